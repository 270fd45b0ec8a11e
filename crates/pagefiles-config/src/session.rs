//! Per-build-session holder for the resolved configuration
//!
//! The configuration is written once, when the host reports its resolved
//! config, and read by every load request afterwards. Reading before that
//! write is an error instead of a silent default.

use serde_json::Value;
use std::sync::Arc;

use crate::errors::ConfigError;
use crate::resolver::resolve;
use crate::types::ResolvedConfig;

#[derive(Debug, Clone, Default)]
pub enum ConfigSession {
    #[default]
    Uninitialized,
    Ready(Arc<ResolvedConfig>),
}

impl ConfigSession {
    /// Resolve both inputs and move to `Ready`. Only valid once per session.
    pub fn initialize(
        &mut self,
        plugin_options: &Value,
        build_config_section: &Value,
    ) -> Result<Arc<ResolvedConfig>, ConfigError> {
        if let ConfigSession::Ready(_) = self {
            return Err(ConfigError::AlreadyResolved);
        }

        let resolved = Arc::new(resolve(plugin_options, build_config_section)?);
        *self = ConfigSession::Ready(Arc::clone(&resolved));
        Ok(resolved)
    }

    /// The resolved configuration, or `NotResolved` before `initialize`
    pub fn ready(&self) -> Result<&Arc<ResolvedConfig>, ConfigError> {
        match self {
            ConfigSession::Uninitialized => Err(ConfigError::NotResolved),
            ConfigSession::Ready(config) => Ok(config),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ConfigSession::Ready(_))
    }
}
