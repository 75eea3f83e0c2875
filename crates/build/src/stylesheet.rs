//! Rendering of the collected utilities into stylesheet text.

use core::fmt::Write as _;
use ecss_compiler::UtilityRule;

/// Distinct utilities of one build, in first-seen order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildStylesheet {
    rules: Vec<UtilityRule>,
}

impl BuildStylesheet {
    pub const fn new(rules: Vec<UtilityRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[UtilityRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// One rule per utility, one line each. Media-scoped utilities get their
    /// own `@media` block. No rules renders as an empty string.
    pub fn render(&self, minify: bool) -> String {
        let mut out = String::new();
        for rule in &self.rules {
            let decl = &rule.declaration;
            let selector = format!(".{}{}", rule.id, decl.modifiers.selector_suffix());
            let body = if minify {
                format!("{selector}{{{}:{}}}", decl.property, decl.value)
            } else {
                format!("{selector} {{ {decl} }}")
            };
            // Writing into a String cannot fail.
            drop(match decl.modifiers.media_query() {
                Some(query) if minify => writeln!(out, "@media {query}{{{body}}}"),
                Some(query) => writeln!(out, "@media {query} {{ {body} }}"),
                None => writeln!(out, "{body}"),
            });
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecss_compiler::compile;

    fn sheet(text: &str) -> BuildStylesheet {
        BuildStylesheet::new(compile(text).unwrap().rules)
    }

    #[test]
    fn empty_renders_nothing() {
        assert_eq!(BuildStylesheet::default().render(false), "");
        assert_eq!(BuildStylesheet::default().render(true), "");
    }

    #[test]
    fn plain_rule() {
        let stylesheet = sheet("m-t=8");
        let id = &stylesheet.rules()[0].id;
        assert_eq!(stylesheet.render(false), format!(".{id} {{ margin-top: 2rem; }}\n"));
        assert_eq!(stylesheet.render(true), format!(".{id}{{margin-top:2rem}}\n"));
    }

    #[test]
    fn modifiers_shape_the_rule() {
        let stylesheet = sheet("@lg:hover:bg-c=black");
        let id = &stylesheet.rules()[0].id;
        assert_eq!(
            stylesheet.render(false),
            format!(
                "@media (min-width:1024px) {{ .{id}:hover {{ background-color: #000000; }} }}\n"
            )
        );
    }
}
