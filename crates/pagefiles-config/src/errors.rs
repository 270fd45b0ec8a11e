use thiserror::Error;

/// Which configuration channel a raw input came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigOrigin {
    /// Options passed to the plugin constructor, `ssr({ ... })`
    PluginOptions,
    /// The `vitePluginSsr` section of the build tool's own config
    BuildConfigSection,
}

impl ConfigOrigin {
    /// Human-readable location of `path` inside this configuration channel.
    ///
    /// `path` is dot-separated (`prerender.partial`); an empty path names the
    /// whole input.
    pub fn describe(self, path: &str) -> String {
        match self {
            ConfigOrigin::PluginOptions if path.is_empty() => {
                "[vite.config.js][ssr(options)] Plugin options".to_string()
            }
            ConfigOrigin::PluginOptions => format!(
                "[vite.config.js][ssr({{ {} }})] Configuration `{}`",
                path_in_object(path),
                path
            ),
            ConfigOrigin::BuildConfigSection if path.is_empty() => {
                "vite.config.js#vitePluginSsr".to_string()
            }
            ConfigOrigin::BuildConfigSection => format!("vite.config.js#vitePluginSsr.{}", path),
        }
    }
}

/// Render `a.b.c` the way it is written inside an object literal: `a: { b: { c } }`
fn path_in_object(path: &str) -> String {
    match path.split_once('.') {
        Some((head, rest)) => format!("{}: {{ {} }}", head, path_in_object(rest)),
        None => path.to_string(),
    }
}

/// A user-supplied configuration value has the wrong shape
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{} should be {expected}", .origin.describe(.path))]
pub struct ValidationError {
    pub origin: ConfigOrigin,
    pub path: String,
    pub expected: &'static str,
}

/// A defect in this crate family rather than a user misconfiguration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("internal error, please report this as a bug: {0}")]
pub struct InternalInvariantError(pub String);

impl InternalInvariantError {
    pub fn new(message: impl Into<String>) -> Self {
        InternalInvariantError(message.into())
    }
}

/// Errors that can occur while resolving the plugin configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Invariant(#[from] InternalInvariantError),

    #[error("internal error, please report this as a bug: configuration was read before it was resolved")]
    NotResolved,

    #[error("internal error, please report this as a bug: configuration was resolved twice in one session")]
    AlreadyResolved,
}
