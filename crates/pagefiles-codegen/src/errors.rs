use pagefiles_config::InternalInvariantError;
use thiserror::Error;

use crate::types::PageFilePair;

/// Errors that can occur while generating the manifest module
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodegenError {
    #[error(transparent)]
    Invariant(#[from] InternalInvariantError),
}

impl CodegenError {
    pub(crate) fn unreachable_pair(pair: PageFilePair, reason: &str) -> Self {
        CodegenError::Invariant(InternalInvariantError::new(format!(
            "unreachable page-file pair {}/{}: {}",
            pair.category, pair.query, reason
        )))
    }
}
