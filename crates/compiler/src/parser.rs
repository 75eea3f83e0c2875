//! Recursive-descent parser producing [`Expr`] trees.

use crate::ast::{Expr, Util, UtilTree, Value, ValueOrGroup, Variant};
use crate::error::{GrammarError, GrammarErrorKind, GrammarResult, Span};
use crate::token::{Token, TokenKind};

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    /// End offset of the source text, used for errors at end of input.
    end: usize,
}

/// Modifier prefixes collected in front of one directive.
#[derive(Default)]
struct Prefixes {
    variants: Vec<Variant>,
    variant_group: Vec<Option<Variant>>,
    start: Option<usize>,
}

impl Prefixes {
    fn is_empty(&self) -> bool {
        self.variants.is_empty() && self.variant_group.is_empty()
    }

    fn mark(&mut self, span: Span) {
        self.start.get_or_insert(span.start);
    }
}

impl Parser {
    pub fn new(tokens: Vec<Token>, end: usize) -> Self {
        Self {
            tokens,
            pos: 0,
            end,
        }
    }

    /// Parse the whole token stream.
    ///
    /// # Errors
    ///
    /// Returns a [`GrammarError`] when the tokens do not form a directive list
    /// or when tokens remain after it (for example a stray `)`).
    pub fn parse(mut self) -> GrammarResult<Vec<Expr>> {
        let exprs = self.parse_exprs()?;
        if let Some(token) = self.bump() {
            return Err(GrammarError::new(
                GrammarErrorKind::UnexpectedToken(token.kind.to_string()),
                token.span,
            ));
        }
        if exprs.is_empty() {
            return Err(GrammarError::new(
                GrammarErrorKind::EmptyInvocation,
                Span::new(0, self.end),
            ));
        }
        Ok(exprs)
    }

    fn peek(&self) -> Option<&TokenKind> {
        self.peek_nth(0)
    }

    fn peek_nth(&self, nth: usize) -> Option<&TokenKind> {
        self.tokens.get(self.pos + nth).map(|token| &token.kind)
    }

    /// Whether the `(` under the cursor opens a responsive group: only
    /// breakpoints, states and `_` up to the `)`, which is followed by `:`.
    fn at_variant_group(&self) -> bool {
        let Some(rest) = self.tokens.get(self.pos + 1..) else {
            return false;
        };
        for (idx, token) in rest.iter().enumerate() {
            match token.kind {
                TokenKind::RParen => {
                    return rest.get(idx + 1).map(|next| &next.kind) == Some(&TokenKind::Colon);
                }
                TokenKind::Underscore
                | TokenKind::At
                | TokenKind::Whitespace
                | TokenKind::Word(_)
                | TokenKind::Raw(_) => {}
                _ => return false,
            }
        }
        false
    }

    fn bump(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn here(&self) -> Span {
        self.tokens
            .get(self.pos)
            .map_or(Span::new(self.end, self.end), |token| token.span)
    }

    fn last_end(&self) -> usize {
        self.pos
            .checked_sub(1)
            .and_then(|idx| self.tokens.get(idx))
            .map_or(0, |token| token.span.end)
    }

    fn eat_whitespace(&mut self) {
        while self.peek() == Some(&TokenKind::Whitespace) {
            self.pos += 1;
        }
    }

    /// Consume `expected` or fail. A missing `)` is reported as an unterminated group.
    fn expect(&mut self, expected: &TokenKind, what: &'static str) -> GrammarResult<Span> {
        match self.bump() {
            Some(token) if &token.kind == expected => Ok(token.span),
            Some(token) => Err(GrammarError::new(
                GrammarErrorKind::UnexpectedToken(format!("{} (expected {what})", token.kind)),
                token.span,
            )),
            None if *expected == TokenKind::RParen => Err(GrammarError::new(
                GrammarErrorKind::UnterminatedGroup,
                Span::new(self.end, self.end),
            )),
            None => Err(GrammarError::new(
                GrammarErrorKind::UnexpectedEnd(what),
                Span::new(self.end, self.end),
            )),
        }
    }

    /// Consume a `)` closing the group opened at `open`.
    fn close_group(&mut self, open: Span) -> GrammarResult<Span> {
        self.expect(&TokenKind::RParen, "`)`").map_err(|err| {
            if err.kind == GrammarErrorKind::UnterminatedGroup {
                GrammarError::new(err.kind, Span::new(open.start, self.end))
            } else {
                err
            }
        })
    }

    fn parse_exprs(&mut self) -> GrammarResult<Vec<Expr>> {
        let mut exprs = Vec::new();
        loop {
            self.eat_whitespace();
            match self.parse_expr()? {
                Some(expr) => exprs.push(expr),
                None => break,
            }
        }
        Ok(exprs)
    }

    fn parse_expr(&mut self) -> GrammarResult<Option<Expr>> {
        let prefixes = self.parse_variants()?;

        if prefixes.is_empty() {
            if matches!(self.peek(), Some(TokenKind::Raw(_))) {
                let span = self.here();
                if let Some(TokenKind::Raw(css)) = self.bump().map(|token| token.kind) {
                    return Ok(Some(Expr::RawCss { css, span }));
                }
            }
            return Ok(self.parse_util()?.map(Expr::Util));
        }

        let start = prefixes.start.unwrap_or_else(|| self.here().start);
        let exprs = if self.peek() == Some(&TokenKind::LParen) {
            let open = self.here();
            self.pos += 1;
            let exprs = self.parse_exprs()?;
            self.close_group(open)?;
            exprs
        } else {
            match self.parse_expr()? {
                Some(expr) => vec![expr],
                None => {
                    return Err(GrammarError::new(
                        GrammarErrorKind::UnexpectedEnd("a directive after the modifier"),
                        self.here(),
                    ));
                }
            }
        };

        Ok(Some(Expr::Variant {
            variants: prefixes.variants,
            variant_group: prefixes.variant_group,
            exprs,
            span: Span::new(start, self.last_end()),
        }))
    }

    fn parse_util(&mut self) -> GrammarResult<Option<Util>> {
        let start = self.here();
        let Some(properties) = self.parse_properties()? else {
            return Ok(None);
        };
        let tree = match self.peek() {
            Some(TokenKind::LParen) => {
                let open = self.here();
                self.pos += 1;
                let exprs = self.parse_exprs()?;
                self.close_group(open)?;
                UtilTree::Branch(exprs)
            }
            Some(TokenKind::Eq) => {
                self.pos += 1;
                UtilTree::Leaf(Some(self.parse_value()?))
            }
            _ => UtilTree::Leaf(None),
        };
        Ok(Some(Util {
            properties,
            tree,
            span: Span::new(start.start, self.last_end()),
        }))
    }

    fn parse_variants(&mut self) -> GrammarResult<Prefixes> {
        let mut prefixes = Prefixes::default();
        let mut group_open: Option<Span> = None;

        loop {
            self.eat_whitespace();
            let span = self.here();
            match self.peek() {
                Some(TokenKind::Word(_) | TokenKind::Raw(_)) => {
                    if group_open.is_none() && self.peek_nth(1) != Some(&TokenKind::Colon) {
                        break;
                    }
                    let value = match self.bump().map(|token| token.kind) {
                        Some(TokenKind::Word(word)) => Value::Iden(word),
                        Some(TokenKind::Raw(raw)) => Value::Raw(raw),
                        _ => break,
                    };
                    prefixes.mark(span);
                    if group_open.is_some() {
                        prefixes.variant_group.push(Some(Variant::Pseudo(value)));
                    } else {
                        prefixes.variants.push(Variant::Pseudo(value));
                        self.pos += 1;
                    }
                }
                Some(TokenKind::At) => {
                    self.pos += 1;
                    let value = match self.bump() {
                        Some(Token {
                            kind: TokenKind::Word(word),
                            ..
                        }) => Value::Iden(word),
                        Some(Token {
                            kind: TokenKind::Raw(raw),
                            ..
                        }) => Value::Raw(raw),
                        Some(token) => {
                            return Err(GrammarError::new(
                                GrammarErrorKind::UnexpectedToken(format!(
                                    "{} (expected a breakpoint after `@`)",
                                    token.kind
                                )),
                                token.span,
                            ));
                        }
                        None => {
                            return Err(GrammarError::new(
                                GrammarErrorKind::UnexpectedEnd("a breakpoint after `@`"),
                                span,
                            ));
                        }
                    };
                    prefixes.mark(span);
                    if group_open.is_some() {
                        prefixes.variant_group.push(Some(Variant::Media(value)));
                    } else {
                        prefixes.variants.push(Variant::Media(value));
                        self.expect(&TokenKind::Colon, "`:` after the breakpoint")?;
                    }
                }
                Some(TokenKind::Underscore) if group_open.is_some() => {
                    self.pos += 1;
                    prefixes.variant_group.push(None);
                }
                Some(TokenKind::LParen) if group_open.is_none() => {
                    if !self.at_variant_group() {
                        break;
                    }
                    if !prefixes.variant_group.is_empty() {
                        return Err(GrammarError::new(
                            GrammarErrorKind::DuplicateResponsiveGroup,
                            span,
                        ));
                    }
                    prefixes.mark(span);
                    self.pos += 1;
                    group_open = Some(span);
                }
                Some(TokenKind::RParen) if group_open.is_some() => {
                    self.pos += 1;
                    group_open = None;
                    self.expect(&TokenKind::Colon, "`:` after the responsive group")?;
                }
                _ => break,
            }
        }

        if let Some(open) = group_open {
            return Err(GrammarError::new(
                GrammarErrorKind::UnterminatedGroup,
                open.to(self.here()),
            ));
        }
        Ok(prefixes)
    }

    fn parse_properties(&mut self) -> GrammarResult<Option<Vec<String>>> {
        match self.peek() {
            Some(TokenKind::Word(_)) => match self.bump().map(|token| token.kind) {
                Some(TokenKind::Word(word)) => Ok(Some(vec![word])),
                _ => Ok(None),
            },
            Some(TokenKind::LParen) => {
                let open = self.here();
                self.pos += 1;
                let mut properties = Vec::new();
                loop {
                    self.eat_whitespace();
                    match self.bump() {
                        Some(Token {
                            kind: TokenKind::Word(word),
                            ..
                        }) => properties.push(word),
                        Some(Token {
                            kind: TokenKind::RParen,
                            span,
                        }) => {
                            if properties.is_empty() {
                                return Err(GrammarError::new(
                                    GrammarErrorKind::EmptyGroup,
                                    open.to(span),
                                ));
                            }
                            break;
                        }
                        Some(token) => {
                            return Err(GrammarError::new(
                                GrammarErrorKind::UnexpectedToken(format!(
                                    "{} in property list",
                                    token.kind
                                )),
                                token.span,
                            ));
                        }
                        None => {
                            return Err(GrammarError::new(
                                GrammarErrorKind::UnterminatedGroup,
                                Span::new(open.start, self.end),
                            ));
                        }
                    }
                }
                Ok(Some(properties))
            }
            _ => Ok(None),
        }
    }

    fn parse_value(&mut self) -> GrammarResult<ValueOrGroup> {
        let eq_end = self.last_end();
        match self.bump() {
            Some(Token {
                kind: TokenKind::Raw(raw),
                ..
            }) => Ok(ValueOrGroup::Value(Value::Raw(raw))),
            Some(Token {
                kind: TokenKind::Word(word),
                ..
            }) => Ok(ValueOrGroup::Value(Value::Iden(word))),
            Some(Token {
                kind: TokenKind::LParen,
                span: open,
            }) => {
                let mut values = Vec::new();
                loop {
                    self.eat_whitespace();
                    match self.bump() {
                        Some(Token {
                            kind: TokenKind::Raw(raw),
                            ..
                        }) => values.push(Some(Value::Raw(raw))),
                        Some(Token {
                            kind: TokenKind::Word(word),
                            ..
                        }) => values.push(Some(Value::Iden(word))),
                        Some(Token {
                            kind: TokenKind::Underscore,
                            ..
                        }) => values.push(None),
                        Some(Token {
                            kind: TokenKind::RParen,
                            span,
                        }) => {
                            if values.is_empty() {
                                return Err(GrammarError::new(
                                    GrammarErrorKind::EmptyGroup,
                                    open.to(span),
                                ));
                            }
                            break;
                        }
                        Some(token) => {
                            return Err(GrammarError::new(
                                GrammarErrorKind::UnexpectedToken(format!(
                                    "{} in value group",
                                    token.kind
                                )),
                                token.span,
                            ));
                        }
                        None => {
                            return Err(GrammarError::new(
                                GrammarErrorKind::UnterminatedGroup,
                                Span::new(open.start, self.end),
                            ));
                        }
                    }
                }
                Ok(ValueOrGroup::Group(values))
            }
            Some(token) => Err(GrammarError::new(
                GrammarErrorKind::UnexpectedToken(format!("{} (expected a value)", token.kind)),
                token.span,
            )),
            None => Err(GrammarError::new(
                GrammarErrorKind::UnexpectedEnd("a value after `=`"),
                Span::new(eq_end, eq_end),
            )),
        }
    }
}

/// Tokenize and parse invocation text.
///
/// # Errors
///
/// Propagates lexer and parser [`GrammarError`]s.
pub fn parse(text: &str) -> GrammarResult<Vec<Expr>> {
    let tokens = crate::lexer::tokenize(text)?;
    Parser::new(tokens, text.len()).parse()
}
