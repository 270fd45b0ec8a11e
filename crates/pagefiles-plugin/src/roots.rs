//! Seam to the include-root discovery routine
//!
//! Discovery may touch the filesystem, so it is the one awaited step of a
//! load request. Its errors are returned to the host as-is.

use async_trait::async_trait;
use pagefiles_config::ResolvedConfig;
use std::io;

/// One candidate location page files are globbed from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobRoot {
    /// Posix path relative to the project root; `None` when the candidate
    /// could not be located and contributes no glob
    pub include_path: Option<String>,
}

impl GlobRoot {
    pub fn new(include_path: impl Into<String>) -> Self {
        GlobRoot {
            include_path: Some(include_path.into()),
        }
    }

    pub fn unresolved() -> Self {
        GlobRoot { include_path: None }
    }
}

/// Supplies the ordered include roots for a build session
#[async_trait]
pub trait GlobRootCollector: Send + Sync {
    async fn collect_roots(&self, config: &ResolvedConfig) -> io::Result<Vec<GlobRoot>>;
}

/// Collector returning a fixed list, for hosts that discover roots up front
#[derive(Debug, Clone, Default)]
pub struct StaticRootCollector {
    roots: Vec<GlobRoot>,
}

impl StaticRootCollector {
    pub fn new(roots: Vec<GlobRoot>) -> Self {
        StaticRootCollector { roots }
    }

    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        StaticRootCollector {
            roots: paths.into_iter().map(GlobRoot::new).collect(),
        }
    }
}

#[async_trait]
impl GlobRootCollector for StaticRootCollector {
    async fn collect_roots(&self, _config: &ResolvedConfig) -> io::Result<Vec<GlobRoot>> {
        Ok(self.roots.clone())
    }
}

/// Include paths of the resolved roots, in order
pub fn include_paths(roots: Vec<GlobRoot>) -> Vec<String> {
    roots.into_iter().filter_map(|root| root.include_path).collect()
}
