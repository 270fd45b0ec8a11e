//! Merge the two configuration channels into one `ResolvedConfig`
//!
//! Precedence, field by field: plugin options, then the build-config
//! section, then the default. A defined value (`false`, an empty list) is
//! never overridden; only absent or `null` values fall through.
//! `pageFilesInclude` is the one field that concatenates instead.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, trace};

use crate::errors::{ConfigError, ConfigOrigin, InternalInvariantError};
use crate::schema::{RESOLVED_SCHEMA, USER_SCHEMA};
use crate::types::{
    PrerenderSetting, RawConfigInput, RawPrerender, ResolvedConfig, ResolvedPrerenderOptions,
};

/// Validate both raw inputs and merge them.
///
/// Pure: identical inputs always produce equal results.
pub fn resolve(
    plugin_options: &Value,
    build_config_section: &Value,
) -> Result<ResolvedConfig, ConfigError> {
    let from_plugin = parse_input(plugin_options, ConfigOrigin::PluginOptions)?;
    let from_section = parse_input(build_config_section, ConfigOrigin::BuildConfigSection)?;

    let resolved = merge(&from_plugin, &from_section);
    self_check(&resolved)?;

    debug!(
        page_files_include = resolved.page_files_include.len(),
        prerender = resolved.prerender.is_enabled(),
        include_assets_imported_by_server = resolved.include_assets_imported_by_server,
        "Resolved page-files configuration"
    );
    Ok(resolved)
}

/// Validate one raw input and convert it to its typed form.
///
/// A top-level `null` means the channel was not configured at all.
pub fn parse_input(value: &Value, origin: ConfigOrigin) -> Result<RawConfigInput, ConfigError> {
    if value.is_null() {
        trace!(?origin, "No configuration supplied");
        return Ok(RawConfigInput::default());
    }

    USER_SCHEMA.validate(value, origin)?;

    RawConfigInput::deserialize(value).map_err(|e| {
        ConfigError::from(InternalInvariantError::new(format!(
            "validated {:?} input could not be decoded: {}",
            origin, e
        )))
    })
}

/// Merge two already-validated inputs
pub fn merge(from_plugin: &RawConfigInput, from_section: &RawConfigInput) -> ResolvedConfig {
    ResolvedConfig {
        disable_auto_full_build: from_plugin
            .disable_auto_full_build
            .or(from_section.disable_auto_full_build)
            .unwrap_or(false),
        page_files_include: from_plugin
            .page_files_include
            .iter()
            .chain(from_section.page_files_include.iter())
            .flatten()
            .cloned()
            .collect(),
        prerender: merge_prerender(
            from_plugin.prerender.as_ref(),
            from_section.prerender.as_ref(),
        ),
        include_css: from_plugin
            .include_css
            .clone()
            .or_else(|| from_section.include_css.clone())
            .unwrap_or_default(),
        include_assets_imported_by_server: from_plugin
            .include_assets_imported_by_server
            .or(from_section.include_assets_imported_by_server)
            .unwrap_or(true),
    }
}

fn merge_prerender(
    from_plugin: Option<&RawPrerender>,
    from_section: Option<&RawPrerender>,
) -> PrerenderSetting {
    let enabled = [from_plugin, from_section]
        .into_iter()
        .flatten()
        .any(RawPrerender::is_enabled);
    if !enabled {
        return PrerenderSetting::Disabled;
    }

    let user = from_plugin.map(RawPrerender::options).unwrap_or_default();
    let section = from_section.map(RawPrerender::options).unwrap_or_default();
    let defaults = ResolvedPrerenderOptions::default();

    PrerenderSetting::Enabled(ResolvedPrerenderOptions {
        partial: user.partial.or(section.partial).unwrap_or(defaults.partial),
        no_extra_dir: user
            .no_extra_dir
            .or(section.no_extra_dir)
            .unwrap_or(defaults.no_extra_dir),
        parallel: user
            .parallel
            .or(section.parallel)
            .unwrap_or(defaults.parallel),
        disable_auto_run: user
            .disable_auto_run
            .or(section.disable_auto_run)
            .unwrap_or(defaults.disable_auto_run),
    })
}

/// Re-validate the merged result against the canonical schema
fn self_check(resolved: &ResolvedConfig) -> Result<(), InternalInvariantError> {
    let value = serde_json::to_value(resolved).map_err(|e| {
        InternalInvariantError::new(format!("resolved config could not be serialized: {}", e))
    })?;

    RESOLVED_SCHEMA
        .validate(&value, ConfigOrigin::PluginOptions)
        .map_err(|e| {
            InternalInvariantError::new(format!(
                "resolved config failed self-validation at `{}` (expected {})",
                e.path, e.expected
            ))
        })
}
