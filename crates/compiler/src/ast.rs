//! Syntax tree of one invocation.

use crate::error::Span;

/// A directive value before any generator has looked at it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Value {
    /// Bare word: keyword, number or ratio.
    Iden(String),
    /// Bracketed literal, passed through verbatim.
    Raw(String),
}

impl Value {
    pub fn text(&self) -> &str {
        match self {
            Self::Iden(text) | Self::Raw(text) => text,
        }
    }
}

/// Modifier as written: `hover:`, `[nth-child(3)]:`, `@lg:`, `@[print]:`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Variant {
    Pseudo(Value),
    Media(Value),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValueOrGroup {
    Value(Value),
    /// `(v1 v2 _)`, one slot per entry of the enclosing responsive group.
    Group(Vec<Option<Value>>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UtilTree {
    /// `name`, `name=value`, `name=(v1 v2)`
    Leaf(Option<ValueOrGroup>),
    /// `name-(nested directives)`
    Branch(Vec<Expr>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Util {
    /// Usually one name; `(p m)=4` lists several.
    pub properties: Vec<String>,
    pub tree: UtilTree,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
    /// Modifier prefixes applied to one directive or to a parenthesized list.
    Variant {
        variants: Vec<Variant>,
        /// `(_ @lg)` slots; `None` is the base breakpoint.
        variant_group: Vec<Option<Variant>>,
        exprs: Vec<Expr>,
        span: Span,
    },
    Util(Util),
    /// Standalone bracketed CSS declarations, e.g. `[white-space: pre]`.
    RawCss { css: String, span: Span },
}

impl Expr {
    pub const fn span(&self) -> Span {
        match self {
            Self::Variant { span, .. } | Self::RawCss { span, .. } => *span,
            Self::Util(util) => util.span,
        }
    }
}
