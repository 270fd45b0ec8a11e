//! Classification vocabulary for page files
//!
//! Every generated glob is described by a (category, query) pair. The pair
//! decides which files match, what each match yields, and which manifest
//! container the result is installed into.

use std::fmt;

/// Kind of page file, identified by its filename suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModuleCategory {
    /// `.page` files, loaded on both sides
    Isomorphic,
    /// `.page.client` files
    Client,
    /// `.page.server` files
    Server,
    /// `.page.route` files
    Route,
}

impl ModuleCategory {
    pub const ALL: [ModuleCategory; 4] = [
        ModuleCategory::Isomorphic,
        ModuleCategory::Client,
        ModuleCategory::Server,
        ModuleCategory::Route,
    ];

    /// Filename suffix, also the key used inside every manifest container
    pub fn suffix(self) -> &'static str {
        match self {
            ModuleCategory::Isomorphic => ".page",
            ModuleCategory::Client => ".page.client",
            ModuleCategory::Server => ".page.server",
            ModuleCategory::Route => ".page.route",
        }
    }

    /// Fragment appended to container names to build local binding names
    pub fn binding_suffix(self) -> &'static str {
        match self {
            ModuleCategory::Isomorphic => "Isomorph",
            ModuleCategory::Client => "Client",
            ModuleCategory::Server => "Server",
            ModuleCategory::Route => "Route",
        }
    }
}

impl fmt::Display for ModuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModuleCategory::Isomorphic => "isomorphic",
            ModuleCategory::Client => "client",
            ModuleCategory::Server => "server",
            ModuleCategory::Route => "route",
        };
        write!(f, "{}", name)
    }
}

/// What a glob aggregation yields for each matched file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum QueryKind {
    /// The module itself
    None,
    /// Only the list of exported names
    ExportNames,
    /// Only the extracted stylesheet
    Styles,
}

impl QueryKind {
    /// Value passed as the `query` glob option
    pub fn query_param(self) -> &'static str {
        match self {
            QueryKind::None => "",
            QueryKind::ExportNames => "extractExportNames",
            QueryKind::Styles => "extractStyles",
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QueryKind::None => "none",
            QueryKind::ExportNames => "exportNames",
            QueryKind::Styles => "styles",
        };
        write!(f, "{}", name)
    }
}

/// Whether matches are bundled up front or resolved on demand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimingClass {
    Eager,
    Lazy,
}

impl TimingClass {
    pub fn is_eager(self) -> bool {
        matches!(self, TimingClass::Eager)
    }
}

/// One of the five exported mappings of the generated module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManifestContainer {
    Lazy,
    Eager,
    ExportNamesLazy,
    ExportNamesEager,
    StylesOnly,
}

impl ManifestContainer {
    /// Declaration order in the generated preamble
    pub const ALL: [ManifestContainer; 5] = [
        ManifestContainer::Lazy,
        ManifestContainer::Eager,
        ManifestContainer::ExportNamesLazy,
        ManifestContainer::ExportNamesEager,
        ManifestContainer::StylesOnly,
    ];

    /// Exported binding name
    pub fn binding_name(self) -> &'static str {
        match self {
            ManifestContainer::Lazy => "lazy",
            ManifestContainer::Eager => "eager",
            ManifestContainer::ExportNamesLazy => "exportNamesLazy",
            ManifestContainer::ExportNamesEager => "exportNamesEager",
            ManifestContainer::StylesOnly => "stylesOnly",
        }
    }
}

/// A (category, query) combination that gets its own glob block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageFilePair {
    pub category: ModuleCategory,
    pub query: QueryKind,
}

impl PageFilePair {
    pub const fn new(category: ModuleCategory, query: QueryKind) -> Self {
        PageFilePair { category, query }
    }
}

impl fmt::Display for PageFilePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.category, self.query)
    }
}
