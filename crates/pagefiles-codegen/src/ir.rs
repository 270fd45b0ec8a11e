//! Statement-level representation of the generated module
//!
//! The generator only builds these values; turning them into text is the
//! printer's job. Tests can therefore assert on pairs, containers and
//! bindings without diffing source text.

use crate::types::{ManifestContainer, PageFilePair, QueryKind, TimingClass};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// Bind every module matching `pattern` into one local mapping
    BindAggregation {
        binding: String,
        pattern: String,
        timing: TimingClass,
        query: QueryKind,
    },
    /// Spread the per-root bindings into one mapping
    BindCombine { binding: String, parts: Vec<String> },
    /// Install a combined binding into a container under a category key
    AssignContainer {
        container: ManifestContainer,
        key: &'static str,
        binding: String,
    },
}

/// All statements emitted for one (category, query) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairBlock {
    pub pair: PageFilePair,
    pub timing: TimingClass,
    pub container: ManifestContainer,
    pub statements: Vec<Statement>,
}

impl PairBlock {
    /// Patterns of the per-root aggregations, in root order
    pub fn patterns(&self) -> impl Iterator<Item = &str> + '_ {
        self.statements.iter().filter_map(|statement| match statement {
            Statement::BindAggregation { pattern, .. } => Some(pattern.as_str()),
            _ => None,
        })
    }
}

/// The whole generated module: a fixed preamble followed by pair blocks
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ManifestModule {
    pub blocks: Vec<PairBlock>,
}

impl ManifestModule {
    /// Pairs in emission order
    pub fn pairs(&self) -> impl Iterator<Item = PageFilePair> + '_ {
        self.blocks.iter().map(|block| block.pair)
    }

    pub fn block(&self, pair: PageFilePair) -> Option<&PairBlock> {
        self.blocks.iter().find(|block| block.pair == pair)
    }
}
