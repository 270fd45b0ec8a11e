use pagefiles_codegen::CodegenError;
use pagefiles_config::{ConfigError, InternalInvariantError};
use std::io;
use thiserror::Error;

/// Errors surfaced to the host build tool
#[derive(Error, Debug)]
pub enum PluginError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Codegen(#[from] CodegenError),

    #[error(transparent)]
    Invariant(#[from] InternalInvariantError),

    /// Root discovery failures pass through untouched
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl PluginError {
    /// Whether the failure points at a defect rather than user input or I/O
    pub fn is_bug(&self) -> bool {
        match self {
            PluginError::Config(ConfigError::Validation(_)) | PluginError::Io(_) => false,
            PluginError::Config(_) | PluginError::Codegen(_) | PluginError::Invariant(_) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::*;
    use pagefiles_config::{ConfigOrigin, ValidationError};

    #[test]
    fn test_io_error_message_is_unchanged() {
        let err = PluginError::from(io::Error::new(io::ErrorKind::NotFound, "no such root"));
        assert_eq!(err.to_string(), "no such root");
        assert!(!err.is_bug());
    }

    #[test]
    fn test_validation_is_not_a_bug() {
        let err = PluginError::from(ConfigError::Validation(ValidationError {
            origin: ConfigOrigin::PluginOptions,
            path: "includeCSS".to_string(),
            expected: "a list of strings",
        }));
        assert!(!err.is_bug());
        assert!(PluginError::from(ConfigError::NotResolved).is_bug());
    }
}
