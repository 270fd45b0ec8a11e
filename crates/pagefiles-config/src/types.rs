//! Raw and resolved configuration types
//!
//! Raw inputs mirror what a user may write in either configuration channel:
//! every field is optional and `null` counts as unset. The resolved form is
//! the canonical structure the rest of the plugin reads; it is built once per
//! build session and never mutated afterwards.

use serde::{Deserialize, Serialize, Serializer};

// =============================================================================
// RAW INPUT
// =============================================================================

/// One user-supplied configuration source, after shape validation
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawConfigInput {
    #[serde(default)]
    pub disable_auto_full_build: Option<bool>,
    #[serde(default)]
    pub page_files_include: Option<Vec<String>>,
    #[serde(default)]
    pub prerender: Option<RawPrerender>,
    #[serde(default, rename = "includeCSS")]
    pub include_css: Option<Vec<String>>,
    #[serde(default)]
    pub include_assets_imported_by_server: Option<bool>,
}

/// `prerender` accepts either a flag or a partial options object
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawPrerender {
    Flag(bool),
    Options(PrerenderOptions),
}

impl RawPrerender {
    /// Whether this value asks for prerendering at all
    pub fn is_enabled(&self) -> bool {
        match self {
            RawPrerender::Flag(enabled) => *enabled,
            RawPrerender::Options(_) => true,
        }
    }

    /// Normalize to an options object; flags carry no sub-options
    pub fn options(&self) -> PrerenderOptions {
        match self {
            RawPrerender::Flag(_) => PrerenderOptions::default(),
            RawPrerender::Options(options) => options.clone(),
        }
    }
}

/// Prerender sub-options as written by the user
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PrerenderOptions {
    #[serde(default)]
    pub partial: Option<bool>,
    #[serde(default)]
    pub no_extra_dir: Option<bool>,
    #[serde(default)]
    pub parallel: Option<bool>,
    #[serde(default)]
    pub disable_auto_run: Option<bool>,
}

// =============================================================================
// RESOLVED
// =============================================================================

/// Canonical plugin configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedConfig {
    pub disable_auto_full_build: bool,
    /// Plugin-options entries first, then build-config entries
    pub page_files_include: Vec<String>,
    pub prerender: PrerenderSetting,
    #[serde(rename = "includeCSS")]
    pub include_css: Vec<String>,
    pub include_assets_imported_by_server: bool,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        ResolvedConfig {
            disable_auto_full_build: false,
            page_files_include: Vec::new(),
            prerender: PrerenderSetting::Disabled,
            include_css: Vec::new(),
            include_assets_imported_by_server: true,
        }
    }
}

/// Either exactly `false` or a fully populated options object
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PrerenderSetting {
    #[default]
    Disabled,
    Enabled(ResolvedPrerenderOptions),
}

impl PrerenderSetting {
    pub fn is_enabled(&self) -> bool {
        matches!(self, PrerenderSetting::Enabled(_))
    }

    pub fn options(&self) -> Option<&ResolvedPrerenderOptions> {
        match self {
            PrerenderSetting::Disabled => None,
            PrerenderSetting::Enabled(options) => Some(options),
        }
    }
}

impl Serialize for PrerenderSetting {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PrerenderSetting::Disabled => serializer.serialize_bool(false),
            PrerenderSetting::Enabled(options) => options.serialize(serializer),
        }
    }
}

/// Prerender options with every default applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedPrerenderOptions {
    pub partial: bool,
    pub no_extra_dir: bool,
    pub parallel: bool,
    pub disable_auto_run: bool,
}

impl Default for ResolvedPrerenderOptions {
    fn default() -> Self {
        ResolvedPrerenderOptions {
            partial: false,
            no_extra_dir: false,
            parallel: true,
            disable_auto_run: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::types::*;
    use serde_json::json;

    #[test]
    fn test_disabled_prerender_serializes_to_false() -> Result<(), serde_json::Error> {
        let value = serde_json::to_value(ResolvedConfig::default())?;
        assert_eq!(value["prerender"], json!(false));
        assert_eq!(value["includeAssetsImportedByServer"], json!(true));
        assert_eq!(value["includeCSS"], json!([]));
        Ok(())
    }

    #[test]
    fn test_enabled_prerender_serializes_all_keys() -> Result<(), serde_json::Error> {
        let setting = PrerenderSetting::Enabled(ResolvedPrerenderOptions::default());
        assert_eq!(
            serde_json::to_value(setting)?,
            json!({"partial": false, "noExtraDir": false, "parallel": true, "disableAutoRun": false})
        );
        Ok(())
    }

    #[test]
    fn test_raw_prerender_accepts_flag_or_object() -> Result<(), serde_json::Error> {
        let flag: RawPrerender = serde_json::from_value(json!(true))?;
        assert!(flag.is_enabled());
        assert_eq!(flag.options(), PrerenderOptions::default());

        let options: RawPrerender = serde_json::from_value(json!({"noExtraDir": true}))?;
        assert!(options.is_enabled());
        assert_eq!(options.options().no_extra_dir, Some(true));

        let off: RawPrerender = serde_json::from_value(json!(false))?;
        assert!(!off.is_enabled());
        Ok(())
    }

    #[test]
    fn test_null_fields_deserialize_as_unset() -> Result<(), serde_json::Error> {
        let raw: RawConfigInput = serde_json::from_value(json!({
            "disableAutoFullBuild": null,
            "includeCSS": ["a.css"],
            "unrelatedHostSetting": 3
        }))?;
        assert_eq!(raw.disable_auto_full_build, None);
        assert_eq!(raw.include_css, Some(vec!["a.css".to_string()]));
        Ok(())
    }
}
