//! Render a `ManifestModule` to JavaScript source
//!
//! Output is byte-stable for equal input: the host caches transformed
//! modules by content, so any drift here invalidates downstream caches.

use crate::ir::{ManifestModule, PairBlock, Statement};
use crate::types::ManifestContainer;

pub const GENERATED_HEADER: &str = "// This file was generated by `pagefiles-codegen`.";

/// Exported marker identifying the module as generated
pub const GENERATED_MARKER: &str = "isGeneratedFile";

pub fn render(module: &ManifestModule) -> String {
    let mut out = String::new();
    out.push_str(GENERATED_HEADER);
    out.push_str("\n\n");
    for container in ManifestContainer::ALL {
        out.push_str(&format!(
            "export const {} = {{}};\n",
            container.binding_name()
        ));
    }
    out.push_str(&format!("export const {} = true;\n", GENERATED_MARKER));
    out.push('\n');

    for block in &module.blocks {
        render_block(&mut out, block);
        out.push('\n');
    }
    out
}

fn render_block(out: &mut String, block: &PairBlock) {
    for statement in &block.statements {
        render_statement(out, statement);
        out.push('\n');
    }
}

fn render_statement(out: &mut String, statement: &Statement) {
    let line = match statement {
        Statement::BindAggregation {
            binding,
            pattern,
            timing,
            query,
        } => format!(
            "const {} = import.meta.importGlob({}, {{ eager: {}, query: \"{}\" }});",
            binding,
            single_quoted(pattern),
            timing.is_eager(),
            query.query_param()
        ),
        Statement::BindCombine { binding, parts } => {
            let spread: Vec<String> = parts.iter().map(|part| format!("...{}", part)).collect();
            format!("const {} = {{{}}};", binding, spread.join(","))
        }
        Statement::AssignContainer {
            container,
            key,
            binding,
        } => format!(
            "{}[{}] = {};",
            container.binding_name(),
            single_quoted(key),
            binding
        ),
    };
    out.push_str(&line);
}

fn single_quoted(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('\'');
    for c in text.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '\'' => quoted.push_str("\\'"),
            '\n' => quoted.push_str("\\n"),
            _ => quoted.push(c),
        }
    }
    quoted.push('\'');
    quoted
}

#[cfg(test)]
mod tests {
    use crate::ir::{ManifestModule, PairBlock, Statement};
    use crate::printer::*;
    use crate::types::{ModuleCategory, PageFilePair, QueryKind, TimingClass};

    #[test]
    fn test_empty_module_is_just_the_preamble() {
        let text = render(&ManifestModule::default());
        assert_eq!(
            text,
            "// This file was generated by `pagefiles-codegen`.\n\
             \n\
             export const lazy = {};\n\
             export const eager = {};\n\
             export const exportNamesLazy = {};\n\
             export const exportNamesEager = {};\n\
             export const stylesOnly = {};\n\
             export const isGeneratedFile = true;\n\
             \n"
        );
    }

    #[test]
    fn test_block_statements() {
        let block = PairBlock {
            pair: PageFilePair::new(ModuleCategory::Route, QueryKind::None),
            timing: TimingClass::Eager,
            container: ManifestContainer::Eager,
            statements: vec![
                Statement::BindAggregation {
                    binding: "eagerRoute1".to_string(),
                    pattern: "/pages/**/*.page.route.js".to_string(),
                    timing: TimingClass::Eager,
                    query: QueryKind::None,
                },
                Statement::BindCombine {
                    binding: "eagerRoute".to_string(),
                    parts: vec!["eagerRoute1".to_string()],
                },
                Statement::AssignContainer {
                    container: ManifestContainer::Eager,
                    key: ".page.route",
                    binding: "eagerRoute".to_string(),
                },
            ],
        };
        let mut out = String::new();
        render_block(&mut out, &block);
        assert_eq!(
            out,
            "const eagerRoute1 = import.meta.importGlob('/pages/**/*.page.route.js', { eager: true, query: \"\" });\n\
             const eagerRoute = {...eagerRoute1};\n\
             eager['.page.route'] = eagerRoute;\n"
        );
    }

    #[test]
    fn test_combine_without_parts_is_empty_object() {
        let mut out = String::new();
        render_statement(
            &mut out,
            &Statement::BindCombine {
                binding: "lazyClient".to_string(),
                parts: Vec::new(),
            },
        );
        assert_eq!(out, "const lazyClient = {};");
    }

    #[test]
    fn test_quotes_are_escaped_in_patterns() {
        assert_eq!(single_quoted("/it's/**"), "'/it\\'s/**'");
        assert_eq!(single_quoted("a\\b"), "'a\\\\b'");
    }
}
