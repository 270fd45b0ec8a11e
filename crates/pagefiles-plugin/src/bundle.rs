//! Post-build check of the server bundle
//!
//! The server entry imports the page-files module from `pageFiles.<ext>`.
//! After bundling, the artifact must exist under the name matching the
//! bundle's module format.

use pagefiles_config::InternalInvariantError;
use std::str::FromStr;
use tracing::debug;

/// Module formats the bundler can emit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Amd,
    Cjs,
    Es,
    Iife,
    System,
    Umd,
}

impl FromStr for OutputFormat {
    type Err = InternalInvariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "amd" => Ok(OutputFormat::Amd),
            "cjs" => Ok(OutputFormat::Cjs),
            "es" => Ok(OutputFormat::Es),
            "iife" => Ok(OutputFormat::Iife),
            "system" => Ok(OutputFormat::System),
            "umd" => Ok(OutputFormat::Umd),
            other => Err(InternalInvariantError::new(format!(
                "unknown output format `{}`",
                other
            ))),
        }
    }
}

/// The bundler's `entryFileNames` option
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryFileNames {
    /// A literal file name pattern such as `[name].mjs`
    Pattern(String),
    /// Computed per chunk by a callback; the extension is unknown up front
    Dynamic,
}

/// Subset of the bundler's normalized output options this check reads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputOptions {
    pub entry_file_names: EntryFileNames,
    pub format: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleAnalysis {
    pub is_esm: bool,
    /// File name of the generated page-files artifact
    pub page_files_output: String,
}

/// Validate the server bundle and locate the page-files artifact
pub fn analyze_bundle_output<'a, I>(
    options: &OutputOptions,
    bundle_files: I,
    is_ssr_build: bool,
) -> Result<BundleAnalysis, InternalInvariantError>
where
    I: IntoIterator<Item = &'a str>,
{
    if !is_ssr_build {
        return Err(InternalInvariantError::new(
            "bundle analysis only applies to the server build",
        ));
    }

    let is_esm = options.format.parse::<OutputFormat>()? == OutputFormat::Es;
    let file_ext = file_ext(&options.entry_file_names);
    if file_ext == "mjs" && !is_esm {
        return Err(InternalInvariantError::new(format!(
            "`.mjs` entries require the `es` format, got `{}`",
            options.format
        )));
    }

    let page_files_output = format!("pageFiles.{}", file_ext);
    if !bundle_files
        .into_iter()
        .any(|file| file == page_files_output)
    {
        return Err(InternalInvariantError::new(format!(
            "`{}` is missing from the server bundle",
            page_files_output
        )));
    }

    debug!(is_esm, %page_files_output, "Analyzed server bundle");
    Ok(BundleAnalysis {
        is_esm,
        page_files_output,
    })
}

fn file_ext(entry_file_names: &EntryFileNames) -> &'static str {
    match entry_file_names {
        EntryFileNames::Pattern(pattern) if pattern.ends_with(".mjs") => "mjs",
        _ => "js",
    }
}
