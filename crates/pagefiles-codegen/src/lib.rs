//! Page-files manifest generation
//!
//! Produces the source of the virtual module that enumerates a project's page
//! files. The module exports five containers (`lazy`, `eager`,
//! `exportNamesLazy`, `exportNamesEager`, `stylesOnly`), each keyed by page
//! file suffix, plus an `isGeneratedFile` marker.
//!
//! Generation runs in two steps: `ManifestGenerator::build_module` plans the
//! (category, query) pairs for the target and produces a statement list, and
//! `printer::render` turns that list into text.

pub mod errors;
pub mod generator;
pub mod ir;
pub mod plan;
pub mod printer;
pub mod types;

pub use errors::CodegenError;
pub use generator::{
    generate, ManifestGenerator, PathPatternBuilder, ScriptGlobPatternBuilder,
    SCRIPT_FILE_EXTENSIONS,
};
pub use ir::{ManifestModule, PairBlock, Statement};
pub use plan::{plan_pairs, select_container, timing_class};
pub use printer::render;
pub use types::{ManifestContainer, ModuleCategory, PageFilePair, QueryKind, TimingClass};
