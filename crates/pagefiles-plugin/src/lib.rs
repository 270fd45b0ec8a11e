//! Build-tool integration for the page-files virtual modules
//!
//! Wires configuration resolution, include-root discovery and manifest
//! generation into the host's plugin hooks, and checks the server bundle
//! for the emitted `pageFiles` artifact once bundling is done.

pub mod bundle;
pub mod errors;
pub mod plugin;
pub mod roots;

pub use bundle::{analyze_bundle_output, BundleAnalysis, EntryFileNames, OutputFormat, OutputOptions};
pub use errors::PluginError;
pub use plugin::{
    Command, LoadOptions, PageFilesPlugin, CLIENT_MODULE_ID, PLUGIN_NAME, SERVER_MODULE_ID,
};
pub use roots::{include_paths, GlobRoot, GlobRootCollector, StaticRootCollector};
