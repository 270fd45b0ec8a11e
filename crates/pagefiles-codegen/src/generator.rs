//! Build the manifest module for one load request
//!
//! For every planned (category, query) pair the generator emits one glob
//! aggregation per include root, one binding combining them, and one
//! assignment installing the combination into the pair's container.

use pagefiles_config::ResolvedConfig;
use tracing::{debug, trace};

use crate::errors::CodegenError;
use crate::ir::{ManifestModule, PairBlock, Statement};
use crate::plan::{plan_pairs, select_container, timing_class};
use crate::printer::render;
use crate::types::{ModuleCategory, PageFilePair};

/// Extensions a page file may carry, as a brace-expansion glob
pub const SCRIPT_FILE_EXTENSIONS: &str = "{js,ts,jsx,tsx,mjs,cjs,mts,cts,vue,svelte,marko,md,mdx}";

/// Turns an include root and a category into a concrete glob pattern
pub trait PathPatternBuilder {
    fn glob_pattern(&self, root: &str, category: ModuleCategory) -> String;
}

/// Matches page files of any script extension anywhere below the root.
///
/// Roots are posix paths relative to the project root; the resulting pattern
/// is always absolute (leading `/`) so the host resolves it from the root.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptGlobPatternBuilder;

impl PathPatternBuilder for ScriptGlobPatternBuilder {
    fn glob_pattern(&self, root: &str, category: ModuleCategory) -> String {
        let normalized = root.replace('\\', "/");
        let file_glob = format!("*{}.{}", category.suffix(), SCRIPT_FILE_EXTENSIONS);
        let segments: Vec<&str> = normalized
            .split('/')
            .filter(|segment| !segment.is_empty())
            .chain(["**", file_glob.as_str()])
            .collect();
        format!("/{}", segments.join("/"))
    }
}

/// Code generator parameterized by the pattern builder it asks for globs
#[derive(Debug, Clone, Default)]
pub struct ManifestGenerator<P = ScriptGlobPatternBuilder> {
    patterns: P,
}

impl<P: PathPatternBuilder> ManifestGenerator<P> {
    pub fn new(patterns: P) -> Self {
        ManifestGenerator { patterns }
    }

    /// Build the statement list for a target without rendering it
    pub fn build_module(
        &self,
        config: &ResolvedConfig,
        is_client_build: bool,
        is_build_mode: bool,
        include_roots: &[String],
    ) -> Result<ManifestModule, CodegenError> {
        let pairs = plan_pairs(is_client_build, config.include_assets_imported_by_server);
        let blocks = pairs
            .into_iter()
            .map(|pair| self.build_block(pair, is_build_mode, include_roots))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            is_client_build,
            is_build_mode,
            roots = include_roots.len(),
            pairs = blocks.len(),
            "Built page-files manifest"
        );
        Ok(ManifestModule { blocks })
    }

    /// Build and render the module source
    pub fn generate(
        &self,
        config: &ResolvedConfig,
        is_client_build: bool,
        is_build_mode: bool,
        include_roots: &[String],
    ) -> Result<String, CodegenError> {
        let module = self.build_module(config, is_client_build, is_build_mode, include_roots)?;
        Ok(render(&module))
    }

    fn build_block(
        &self,
        pair: PageFilePair,
        is_build_mode: bool,
        include_roots: &[String],
    ) -> Result<PairBlock, CodegenError> {
        let timing = timing_class(pair, is_build_mode);
        let container = select_container(pair, timing)?;
        trace!(%pair, ?timing, container = container.binding_name(), "Classified pair");

        let binding = format!(
            "{}{}",
            container.binding_name(),
            pair.category.binding_suffix()
        );

        let mut statements = Vec::with_capacity(include_roots.len() + 2);
        let mut parts = Vec::with_capacity(include_roots.len());
        for (i, root) in include_roots.iter().enumerate() {
            let local = format!("{}{}", binding, i + 1);
            statements.push(Statement::BindAggregation {
                binding: local.clone(),
                pattern: self.patterns.glob_pattern(root, pair.category),
                timing,
                query: pair.query,
            });
            parts.push(local);
        }
        statements.push(Statement::BindCombine {
            binding: binding.clone(),
            parts,
        });
        statements.push(Statement::AssignContainer {
            container,
            key: pair.category.suffix(),
            binding,
        });

        Ok(PairBlock {
            pair,
            timing,
            container,
            statements,
        })
    }
}

/// Generate with the default script-extension pattern builder
pub fn generate(
    config: &ResolvedConfig,
    is_client_build: bool,
    is_build_mode: bool,
    include_roots: &[String],
) -> Result<String, CodegenError> {
    ManifestGenerator::new(ScriptGlobPatternBuilder).generate(
        config,
        is_client_build,
        is_build_mode,
        include_roots,
    )
}

#[cfg(test)]
mod tests {
    use crate::generator::*;
    use crate::types::{ManifestContainer, QueryKind};

    #[test]
    fn test_pattern_for_project_root() {
        let pattern = ScriptGlobPatternBuilder.glob_pattern("/", ModuleCategory::Isomorphic);
        assert_eq!(pattern, format!("/**/*.page.{}", SCRIPT_FILE_EXTENSIONS));
    }

    #[test]
    fn test_pattern_for_nested_root() {
        let pattern = ScriptGlobPatternBuilder.glob_pattern("node_modules/my-lib/", ModuleCategory::Route);
        assert_eq!(
            pattern,
            format!("/node_modules/my-lib/**/*.page.route.{}", SCRIPT_FILE_EXTENSIONS)
        );
    }

    #[test]
    fn test_pattern_normalizes_windows_separators() {
        let pattern = ScriptGlobPatternBuilder.glob_pattern("src\\pages", ModuleCategory::Server);
        assert!(pattern.starts_with("/src/pages/**/*.page.server."));
    }

    #[test]
    fn test_block_bindings_are_numbered_per_root() -> Result<(), CodegenError> {
        let generator = ManifestGenerator::new(ScriptGlobPatternBuilder);
        let roots = vec!["a".to_string(), "b".to_string()];
        let module = generator.build_module(&ResolvedConfig::default(), false, false, &roots)?;

        let block = module.block(PageFilePair::new(ModuleCategory::Server, QueryKind::None));
        assert!(block.is_some(), "server block missing");
        if let Some(block) = block {
            assert_eq!(
                block.statements.last(),
                Some(&Statement::AssignContainer {
                    container: ManifestContainer::Lazy,
                    key: ".page.server",
                    binding: "lazyServer".to_string(),
                })
            );
            assert!(block.statements.contains(&Statement::BindCombine {
                binding: "lazyServer".to_string(),
                parts: vec!["lazyServer1".to_string(), "lazyServer2".to_string()],
            }));
            assert_eq!(block.patterns().count(), 2);
        }
        Ok(())
    }
}
