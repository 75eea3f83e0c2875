//! Command-line host for ecss: builds a source tree, compiles a single
//! invocation, or prints reference tables.

pub mod tree;

pub use tree::SourceTree;

use anyhow::{Context as _, Result, anyhow};
use ecss_build::{
    BuildReport, BuildStylesheet, CONFIG_FILE, EcssConfig, EcssPlugin, ParallelRuntime, run_build,
};
use ecss_compiler::{Compiler, GrammarError, reference_for, sections};
use std::fmt::Write as _;
use std::path::Path;

/// Explicit config file, else `ecss.json` in `src` when present, then the
/// `ECSS_*` environment.
///
/// # Errors
/// Returns an error if the file is unreadable or the result does not validate.
pub fn load_config(src: Option<&Path>, explicit: Option<&Path>) -> Result<EcssConfig> {
    let implicit = src
        .map(|dir| dir.join(CONFIG_FILE))
        .filter(|path| path.is_file());
    let file = explicit.map(Path::to_path_buf).or(implicit);
    EcssConfig::load(file.as_deref()).context("loading configuration")
}

/// Run one build of `src` into `out`.
///
/// # Errors
/// Returns the first build error, with the failing module for rewrite errors.
pub fn build_tree(src: &Path, out: &Path, config: EcssConfig) -> Result<BuildReport> {
    let plugin = EcssPlugin::new(config)?;
    let runtime = ParallelRuntime::new(plugin.config().threads)?;
    let mut tree = SourceTree::new(src, out, plugin.config())?;
    let report = run_build(&plugin, &mut tree, &runtime)
        .with_context(|| format!("building {}", src.display()))?;
    Ok(report)
}

/// Source line with a caret run under the failing span.
fn point_at(text: &str, err: &GrammarError) -> String {
    let start = text
        .get(..err.span.start)
        .map_or(0, |head| head.chars().count());
    let width = text
        .get(err.span.start..err.span.end)
        .map_or(1, |part| part.chars().count().max(1));
    format!("  {text}\n  {}{}", " ".repeat(start), "^".repeat(width))
}

/// The class list as a comment, then the rules of one invocation.
///
/// # Errors
/// Returns the grammar error with the invocation text marked.
pub fn compile_text(text: &str, config: &EcssConfig) -> Result<String> {
    let compilation = Compiler::new(config.compile_options())
        .compile(text)
        .map_err(|err| anyhow!("{err}\n{}", point_at(text, &err)))?;
    let class_list = compilation.class_list();
    let css = BuildStylesheet::new(compilation.rules).render(config.minify);
    Ok(format!("/* {class_list} */\n{css}"))
}

/// Value rows of one utility, or every utility name by section when `name`
/// is `None`.
///
/// # Errors
/// Returns an error if `name` is not a known utility.
pub fn reference_text(name: Option<&str>) -> Result<String> {
    let mut out = String::new();
    match name {
        Some(name) => {
            let rows = reference_for(name).ok_or_else(|| anyhow!("unknown utility `{name}`"))?;
            for row in rows {
                let value = if row.value.is_empty() { "-" } else { &row.value };
                let css = row.css.replace('\n', "\n\t");
                writeln!(out, "{value}\t{css}")?;
            }
        }
        None => {
            for section in sections() {
                writeln!(out, "{}", section.title)?;
                for entry in section.entries {
                    writeln!(out, "  {:<16}{}", entry.name, entry.properties.join(", "))?;
                }
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caret_marks_span() {
        let err = Compiler::default().compile("p=4 zzz=1").unwrap_err();
        assert_eq!(point_at("p=4 zzz=1", &err), "  p=4 zzz=1\n      ^^^^^");
    }

    #[test]
    fn flag_rows_show_dash() {
        let text = reference_text(Some("text-lowercase")).unwrap();
        assert!(text.starts_with("-\t"));
    }
}
