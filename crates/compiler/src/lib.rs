//! Compiler for the ecss utility micro-language.
//!
//! One invocation such as `p=4 hover:bg-c=neutral-800 (_ @lg):(grid-c=(1 3))`
//! compiles into an ordered list of [`UtilityRule`]s: atomic declarations,
//! each with a content-addressed class identifier.

pub mod ast;
pub mod declaration;
pub mod error;
pub mod flatten;
pub mod lexer;
pub mod parser;
pub mod reference;
pub mod token;
pub mod utilities;

pub use declaration::{Declaration, Modifier, ModifierSet, UtilityId, UtilityRule};
pub use error::{GrammarError, GrammarErrorKind, GrammarResult, Span};
pub use reference::{ReferenceEntry, ReferenceRow, ReferenceSection, reference_for, sections};

use flatten::{DirectiveBody, FlatDirective};
use log::trace;
use rustc_hash::FxHashSet;

/// Identifier prefix used when none is configured.
pub const DEFAULT_CLASS_PREFIX: &str = "_e";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompileOptions {
    /// Prepended to every utility identifier; must start a valid CSS class name.
    pub class_prefix: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            class_prefix: DEFAULT_CLASS_PREFIX.to_owned(),
        }
    }
}

/// Result of compiling one invocation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Compilation {
    /// Source order, without duplicates.
    pub rules: Vec<UtilityRule>,
}

impl Compilation {
    /// Space-separated identifiers, the text that replaces the invocation.
    pub fn class_list(&self) -> String {
        self.ids().map(UtilityId::as_str).collect::<Vec<_>>().join(" ")
    }

    pub fn ids(&self) -> impl Iterator<Item = &UtilityId> {
        self.rules.iter().map(|rule| &rule.id)
    }

    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.rules.iter().map(|rule| &rule.declaration)
    }
}

#[derive(Clone, Debug, Default)]
pub struct Compiler {
    options: CompileOptions,
}

impl Compiler {
    pub const fn new(options: CompileOptions) -> Self {
        Self { options }
    }

    pub const fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Compile one invocation's text.
    ///
    /// # Errors
    ///
    /// Returns a [`GrammarError`] located inside `text` when the text does not
    /// parse, names an unknown shorthand or modifier, or carries a value its
    /// utility rejects, or when only placeholders remain after expansion.
    pub fn compile(&self, text: &str) -> GrammarResult<Compilation> {
        let exprs = parser::parse(text)?;
        let directives = flatten::flatten(&exprs)?;

        let mut seen: FxHashSet<Declaration> = FxHashSet::default();
        let mut rules = Vec::new();
        for directive in &directives {
            for declaration in self.declarations_of(directive)? {
                if seen.insert(declaration.clone()) {
                    rules.push(UtilityRule::new(&self.options.class_prefix, declaration));
                }
            }
        }
        if rules.is_empty() {
            return Err(GrammarError::new(
                GrammarErrorKind::NoDeclarations,
                Span::new(0, text.len()),
            ));
        }
        trace!("compiled `{text}` into {} rule(s)", rules.len());
        Ok(Compilation { rules })
    }

    fn declarations_of(&self, directive: &FlatDirective) -> GrammarResult<Vec<Declaration>> {
        let fail = |kind: GrammarErrorKind| GrammarError::new(kind, directive.span);

        let modifiers = directive
            .modifiers
            .iter()
            .map(|variant| {
                utilities::modifiers::resolve(variant).ok_or_else(|| {
                    let written = match variant {
                        ast::Variant::Pseudo(value) => value.text().to_owned(),
                        ast::Variant::Media(value) => format!("@{}", value.text()),
                    };
                    fail(GrammarErrorKind::UnknownModifier(written))
                })
            })
            .collect::<GrammarResult<Vec<_>>>()?;
        let modifiers = ModifierSet::new(modifiers);

        let pairs = match &directive.body {
            DirectiveBody::Utility { name, value } => {
                utilities::resolve(name, value.as_ref()).map_err(fail)?
            }
            DirectiveBody::RawCss(css) => ecss_syntax::parse_declarations(css)
                .map_err(|err| fail(GrammarErrorKind::InvalidRawCss(err)))?
                .into_iter()
                .map(|decl| {
                    let value = if decl.important {
                        format!("{} !important", decl.value)
                    } else {
                        decl.value
                    };
                    (decl.name, value)
                })
                .collect(),
        };

        Ok(pairs
            .iter()
            .map(|(property, value)| Declaration::new(modifiers.clone(), property, value))
            .collect())
    }
}

/// Compile with default options.
///
/// # Errors
///
/// See [`Compiler::compile`].
pub fn compile(text: &str) -> GrammarResult<Compilation> {
    Compiler::default().compile(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn css(text: &str) -> Vec<String> {
        compile(text)
            .unwrap()
            .declarations()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn center_expands_to_three_rules() {
        let compilation = compile("center").unwrap();
        assert_eq!(compilation.rules.len(), 3);
        assert_eq!(compilation.class_list().split(' ').count(), 3);
    }

    #[test]
    fn duplicates_inside_one_invocation_collapse() {
        let compilation = compile("p=4 p=4 (p-x p-l)=2").unwrap();
        let rendered: Vec<String> = compilation.declarations().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            ["padding: 1rem;", "padding-left: 0.5rem;", "padding-right: 0.5rem;"]
        );
    }

    #[test]
    fn raw_css_directive() {
        assert_eq!(
            css("[white-space: pre; color: red !important]"),
            ["white-space: pre;", "color: red !important;"]
        );
    }

    #[test]
    fn invalid_raw_css_is_a_grammar_error() {
        let err = compile("p=1 [white-space pre]").unwrap_err();
        assert!(matches!(err.kind, GrammarErrorKind::InvalidRawCss(_)));
        assert_eq!(err.span, Span::new(4, 21));
    }

    #[test]
    fn placeholders_only_is_an_error() {
        let text = "(_ @lg):(p=(_ _))";
        let err = compile(text).unwrap_err();
        assert_eq!(err.kind, GrammarErrorKind::NoDeclarations);
        assert_eq!(err.span, Span::new(0, text.len()));
        assert!(compile("(_ @lg):(p=(_ 4))").is_ok());
    }

    #[test]
    fn custom_property_keeps_its_case() {
        assert_eq!(css("[--MyVar: 1; Color: red]"), ["--MyVar: 1;", "color: red;"]);
    }

    #[test]
    fn unknown_modifier_names_the_prefix() {
        let err = compile("@huge:p=1").unwrap_err();
        assert_eq!(err.kind, GrammarErrorKind::UnknownModifier("@huge".into()));
    }

    #[test]
    fn prefix_option_is_applied() {
        let compiler = Compiler::new(CompileOptions {
            class_prefix: "x-".into(),
        });
        let compilation = compiler.compile("block").unwrap();
        assert!(compilation.class_list().starts_with("x-"));
    }
}
