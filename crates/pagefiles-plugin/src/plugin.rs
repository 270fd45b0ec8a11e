//! Host-facing plugin: claims the two virtual module ids and serves them
//!
//! Lifecycle per build session:
//! 1. `config_resolved` resolves both configuration channels exactly once.
//! 2. `resolve_id` claims the two virtual ids and nothing else.
//! 3. `load` generates the module for the requested side on every call.

use pagefiles_codegen::{ManifestGenerator, PathPatternBuilder, ScriptGlobPatternBuilder};
use pagefiles_config::{ConfigError, ConfigSession, InternalInvariantError, ResolvedConfig};
use pagefiles_logger as logger;
use serde_json::Value;
use std::str::FromStr;
use std::sync::Arc;

use crate::errors::PluginError;
use crate::roots::{include_paths, GlobRootCollector};

pub const PLUGIN_NAME: &str = "vite-plugin-ssr:virtualModulePageFiles";
pub const SERVER_MODULE_ID: &str = "virtual:vite-plugin-ssr:pageFiles:server";
pub const CLIENT_MODULE_ID: &str = "virtual:vite-plugin-ssr:pageFiles:client";

const MODULE_IDS: [&str; 2] = [SERVER_MODULE_ID, CLIENT_MODULE_ID];

/// How the host was invoked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Interactive development server
    Serve,
    /// One-shot production build
    Build,
}

impl Command {
    pub fn is_build(self) -> bool {
        matches!(self, Command::Build)
    }
}

impl FromStr for Command {
    type Err = InternalInvariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "serve" => Ok(Command::Serve),
            "build" => Ok(Command::Build),
            other => Err(InternalInvariantError::new(format!(
                "unexpected build command `{}`",
                other
            ))),
        }
    }
}

/// Per-request flags passed by the host alongside the module id
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// The module is loaded for server-side rendering
    pub ssr: bool,
}

pub struct PageFilesPlugin<P = ScriptGlobPatternBuilder> {
    session: ConfigSession,
    command: Option<Command>,
    generator: ManifestGenerator<P>,
}

impl PageFilesPlugin {
    pub fn new() -> Self {
        PageFilesPlugin::with_patterns(ScriptGlobPatternBuilder)
    }
}

impl Default for PageFilesPlugin {
    fn default() -> Self {
        PageFilesPlugin::new()
    }
}

impl<P: PathPatternBuilder> PageFilesPlugin<P> {
    pub fn with_patterns(patterns: P) -> Self {
        PageFilesPlugin {
            session: ConfigSession::Uninitialized,
            command: None,
            generator: ManifestGenerator::new(patterns),
        }
    }

    pub fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    /// Resolve the configuration for this session. Must run before any load.
    pub fn config_resolved(
        &mut self,
        plugin_options: &Value,
        build_config_section: &Value,
        command: Command,
    ) -> Result<Arc<ResolvedConfig>, PluginError> {
        let resolved = self
            .session
            .initialize(plugin_options, build_config_section)?;
        self.command = Some(command);
        tracing::debug!(?command, "Page-files plugin configured");
        logger::info(&format!(
            "Page-files config resolved for {:?}: include={:?}, includeAssetsImportedByServer={}",
            command, resolved.page_files_include, resolved.include_assets_imported_by_server
        ));
        Ok(resolved)
    }

    /// The resolved configuration, once `config_resolved` has run
    pub fn config(&self) -> Result<&Arc<ResolvedConfig>, PluginError> {
        Ok(self.session.ready()?)
    }

    /// Claim one of the two virtual ids; any other id is left to the host
    pub fn resolve_id(&self, id: &str) -> Option<&'static str> {
        MODULE_IDS.iter().copied().find(|module_id| *module_id == id)
    }

    /// Generate the module for a claimed id, or `None` for foreign ids.
    ///
    /// Failures that indicate a defect are also written to the error log.
    pub async fn load<C>(
        &self,
        id: &str,
        options: LoadOptions,
        collector: &C,
    ) -> Result<Option<String>, PluginError>
    where
        C: GlobRootCollector + ?Sized,
    {
        let Some(module_id) = self.resolve_id(id) else {
            return Ok(None);
        };

        let result = self.load_module(module_id, options, collector).await;
        if let Err(err) = &result {
            if err.is_bug() {
                logger::error(&err.to_string());
            }
        }
        result.map(Some)
    }

    async fn load_module<C>(
        &self,
        module_id: &'static str,
        options: LoadOptions,
        collector: &C,
    ) -> Result<String, PluginError>
    where
        C: GlobRootCollector + ?Sized,
    {
        logger::debug(&format!("Loading {} (ssr={})", module_id, options.ssr));

        let is_client_build = module_id == CLIENT_MODULE_ID;
        if is_client_build == options.ssr {
            return Err(InternalInvariantError::new(format!(
                "`{}` was requested with ssr={}",
                module_id, options.ssr
            ))
            .into());
        }

        let config = self.session.ready()?;
        let command = self.command.ok_or(ConfigError::NotResolved)?;

        let roots = collector.collect_roots(config).await?;
        logger::debug_glob(&format!("Glob roots: {:?}", roots));

        let code = self.generator.generate(
            config,
            is_client_build,
            command.is_build(),
            &include_paths(roots),
        )?;
        logger::debug_glob(&format!("Glob imports: {}", code));

        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use crate::plugin::*;

    #[test]
    fn test_command_parsing() {
        assert_eq!("build".parse::<Command>(), Ok(Command::Build));
        assert_eq!("serve".parse::<Command>(), Ok(Command::Serve));
        assert!("preview".parse::<Command>().is_err());
    }

    #[test]
    fn test_resolve_id_claims_only_virtual_ids() {
        let plugin = PageFilesPlugin::new();
        assert_eq!(plugin.resolve_id(SERVER_MODULE_ID), Some(SERVER_MODULE_ID));
        assert_eq!(plugin.resolve_id(CLIENT_MODULE_ID), Some(CLIENT_MODULE_ID));
        assert_eq!(plugin.resolve_id("virtual:vite-plugin-ssr:pageFiles"), None);
        assert_eq!(plugin.resolve_id("/src/main.ts"), None);
    }

    #[test]
    fn test_config_before_resolution_fails() {
        let plugin = PageFilesPlugin::new();
        assert!(matches!(
            plugin.config(),
            Err(PluginError::Config(ConfigError::NotResolved))
        ));
    }
}
