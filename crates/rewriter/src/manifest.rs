//! Per-module manifest of utility identifiers and its annotation comment.

use ecss_compiler::{Declaration, UtilityId, UtilityRule};
use rustc_hash::FxHashSet;

/// Opening of the annotation comment written in front of a rewritten module.
pub const ANNOTATION_OPEN: &str = "/*ecss:";
pub const ANNOTATION_CLOSE: &str = "*/";

/// Utilities referenced by one module, first use first. Built once by the
/// rewriter and read-only afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Manifest {
    rules: Vec<UtilityRule>,
}

impl Manifest {
    /// Rules in first-use order; later rules with an already listed
    /// declaration are dropped.
    pub fn from_rules(rules: impl IntoIterator<Item = UtilityRule>) -> Self {
        let mut seen: FxHashSet<Declaration> = FxHashSet::default();
        let rules = rules
            .into_iter()
            .filter(|rule| seen.insert(rule.declaration.clone()))
            .collect();
        Self { rules }
    }

    pub fn rules(&self) -> &[UtilityRule] {
        &self.rules
    }

    pub fn ids(&self) -> impl Iterator<Item = &UtilityId> {
        self.rules.iter().map(|rule| &rule.id)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// `/*ecss: id1 id2*/` plus a newline, or `None` for an empty manifest.
    pub fn annotation(&self) -> Option<String> {
        if self.rules.is_empty() {
            return None;
        }
        let mut seen: FxHashSet<&UtilityId> = FxHashSet::default();
        let ids: Vec<&str> = self
            .ids()
            .filter(|id| seen.insert(id))
            .map(UtilityId::as_str)
            .collect();
        Some(format!(
            "{ANNOTATION_OPEN} {}{ANNOTATION_CLOSE}\n",
            ids.join(" ")
        ))
    }
}

/// Read the identifier list back from a rewritten module's leading annotation.
/// Returns an empty list when the module carries none.
pub fn parse_annotation(code: &str) -> Vec<UtilityId> {
    code.strip_prefix(ANNOTATION_OPEN)
        .and_then(|rest| rest.split_once(ANNOTATION_CLOSE))
        .map(|(body, _)| {
            body.split_whitespace()
                .map(UtilityId::from_raw)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecss_compiler::compile;

    #[test]
    fn empty_manifest_has_no_annotation() {
        assert_eq!(Manifest::default().annotation(), None);
    }

    #[test]
    fn annotation_round_trips() {
        let compilation = compile("p=4 block").unwrap();
        let manifest = Manifest::from_rules(compilation.rules.clone());
        let annotation = manifest.annotation().unwrap();
        assert!(annotation.starts_with("/*ecss: _e"));
        assert!(annotation.ends_with("*/\n"));

        let code = format!("{annotation}export default 1;");
        let ids: Vec<UtilityId> = manifest.ids().cloned().collect();
        assert_eq!(parse_annotation(&code), ids);
    }

    #[test]
    fn repeated_rules_are_kept_once() {
        let first = compile("p=4 m=2").unwrap();
        let second = compile("m=2 p=4 h=1").unwrap();
        let manifest = Manifest::from_rules(first.rules.into_iter().chain(second.rules));
        assert_eq!(manifest.len(), 3);
    }

    #[test]
    fn code_without_annotation() {
        assert!(parse_annotation("const a = 1;").is_empty());
        assert!(parse_annotation("/*ecss: unterminated").is_empty());
    }
}
