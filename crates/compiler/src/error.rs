//! Grammar errors raised while compiling one invocation.

use ecss_syntax::FragmentError;
use std::error::Error;
use std::fmt;

/// Byte range inside the text that was compiled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Span {
    /// Inclusive start offset.
    pub start: usize,
    /// Exclusive end offset.
    pub end: usize,
}

impl Span {
    #[inline]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Smallest span covering both `self` and `other`.
    #[inline]
    #[must_use]
    pub fn to(self, other: Self) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// The same span moved forward by `offset` bytes.
    #[inline]
    #[must_use]
    pub const fn shifted(self, offset: usize) -> Self {
        Self {
            start: self.start + offset,
            end: self.end + offset,
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}..{}", self.start, self.end)
    }
}

/// What went wrong while reading an invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GrammarErrorKind {
    /// The invocation holds no directive at all.
    EmptyInvocation,
    /// A character that cannot start any token.
    UnexpectedChar(char),
    /// `[` without its closing `]`.
    UnterminatedBracket,
    /// `(` without its closing `)`.
    UnterminatedGroup,
    /// A token that does not fit the grammar at this point.
    UnexpectedToken(String),
    /// Input ended where more was required.
    UnexpectedEnd(&'static str),
    /// The shorthand is not part of the utility catalog.
    UnknownShorthand(String),
    /// The shorthand needs `=value`.
    MissingValue(String),
    /// The shorthand is a flag and takes no value.
    UnexpectedValue(String),
    /// No value generator of the shorthand accepts the value.
    InvalidValue { utility: String, value: String },
    /// Unknown pseudo-state or breakpoint name.
    UnknownModifier(String),
    /// A value group whose length differs from its responsive group.
    GroupArity { expected: usize, found: usize },
    /// `()` used as a value.
    EmptyGroup,
    /// Responsive group inside another responsive group.
    NestedResponsiveGroup,
    /// More than one responsive group on one directive.
    DuplicateResponsiveGroup,
    /// A bracketed raw CSS directive that is not valid CSS.
    InvalidRawCss(FragmentError),
    /// Every directive was a placeholder, so nothing would be emitted.
    NoDeclarations,
}

impl fmt::Display for GrammarErrorKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInvocation => write!(formatter, "empty invocation"),
            Self::UnexpectedChar(found) => write!(formatter, "unexpected character `{found}`"),
            Self::UnterminatedBracket => write!(formatter, "unterminated `[`"),
            Self::UnterminatedGroup => write!(formatter, "unterminated `(`"),
            Self::UnexpectedToken(found) => write!(formatter, "unexpected {found}"),
            Self::UnexpectedEnd(expected) => write!(formatter, "expected {expected}"),
            Self::UnknownShorthand(name) => write!(formatter, "unknown shorthand `{name}`"),
            Self::MissingValue(name) => write!(formatter, "`{name}` requires a value"),
            Self::UnexpectedValue(name) => write!(formatter, "`{name}` does not take a value"),
            Self::InvalidValue { utility, value } => {
                write!(formatter, "invalid value `{value}` for `{utility}`")
            }
            Self::UnknownModifier(name) => write!(formatter, "unknown modifier `{name}`"),
            Self::GroupArity { expected, found } => write!(
                formatter,
                "value group has {found} entries but the responsive group has {expected}"
            ),
            Self::EmptyGroup => write!(formatter, "empty value group"),
            Self::NestedResponsiveGroup => write!(formatter, "nested responsive groups"),
            Self::DuplicateResponsiveGroup => {
                write!(formatter, "only one responsive group is allowed per directive")
            }
            Self::InvalidRawCss(inner) => write!(formatter, "raw css: {inner}"),
            Self::NoDeclarations => write!(formatter, "invocation produces no declarations"),
        }
    }
}

/// Malformed micro-language content, located by byte span.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrammarError {
    pub kind: GrammarErrorKind,
    pub span: Span,
}

impl GrammarError {
    #[inline]
    pub const fn new(kind: GrammarErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Rebase the span onto the text that contained the invocation.
    #[inline]
    #[must_use]
    pub fn shifted(self, offset: usize) -> Self {
        Self {
            kind: self.kind,
            span: self.span.shifted(offset),
        }
    }
}

impl fmt::Display for GrammarError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{} at {}", self.kind, self.span)
    }
}

impl Error for GrammarError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.kind {
            GrammarErrorKind::InvalidRawCss(inner) => Some(inner),
            _ => None,
        }
    }
}

pub type GrammarResult<T> = Result<T, GrammarError>;
