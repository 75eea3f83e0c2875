use crate::error::Span;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// One or more whitespace characters, newlines included.
    Whitespace,
    /// `:`
    Colon,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `=`
    Eq,
    /// `@`
    At,
    /// `_`
    Underscore,
    /// Shorthand, keyword or number, e.g. `m-t`, `neutral-800`, `1/2`.
    Word(String),
    /// Bracketed literal, brackets stripped.
    Raw(String),
}

impl fmt::Display for TokenKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Whitespace => write!(formatter, "whitespace"),
            Self::Colon => write!(formatter, "`:`"),
            Self::LParen => write!(formatter, "`(`"),
            Self::RParen => write!(formatter, "`)`"),
            Self::Eq => write!(formatter, "`=`"),
            Self::At => write!(formatter, "`@`"),
            Self::Underscore => write!(formatter, "`_`"),
            Self::Word(word) => write!(formatter, "`{word}`"),
            Self::Raw(raw) => write!(formatter, "`[{raw}]`"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}
