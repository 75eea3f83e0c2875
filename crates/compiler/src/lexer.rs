//! Tokenizer for invocation text.

use crate::error::{GrammarError, GrammarErrorKind, GrammarResult, Span};
use crate::token::{Token, TokenKind};
use core::iter::Peekable;
use core::str::CharIndices;

#[inline]
fn starts_word(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '-'
}

#[inline]
fn continues_word(ch: char) -> bool {
    ch.is_alphanumeric() || matches!(ch, '-' | '.' | '/')
}

struct Lexer<'src> {
    text: &'src str,
    chars: Peekable<CharIndices<'src>>,
}

impl<'src> Lexer<'src> {
    fn new(text: &'src str) -> Self {
        Self {
            text,
            chars: text.char_indices().peekable(),
        }
    }

    fn offset(&mut self) -> usize {
        self.chars.peek().map_or(self.text.len(), |&(idx, _)| idx)
    }

    /// Consume characters while `pred` holds; returns the end offset.
    fn eat_while(&mut self, pred: impl Fn(char) -> bool) -> usize {
        while let Some(&(_, ch)) = self.chars.peek() {
            if !pred(ch) {
                break;
            }
            self.chars.next();
        }
        self.offset()
    }

    /// Read a bracketed literal after its opening `[`. Brackets nest.
    fn raw(&mut self, open: usize) -> GrammarResult<Token> {
        let mut depth = 1_usize;
        for (idx, ch) in self.chars.by_ref() {
            match ch {
                '[' => depth += 1,
                ']' => {
                    depth -= 1;
                    if depth == 0 {
                        let inner = self.text.get(open + 1..idx).unwrap_or_default();
                        return Ok(Token {
                            kind: TokenKind::Raw(inner.to_owned()),
                            span: Span::new(open, idx + 1),
                        });
                    }
                }
                _ => {}
            }
        }
        Err(GrammarError::new(
            GrammarErrorKind::UnterminatedBracket,
            Span::new(open, self.text.len()),
        ))
    }

    fn next_token(&mut self) -> Option<GrammarResult<Token>> {
        let (start, ch) = self.chars.next()?;
        let single = |kind| {
            Some(Ok(Token {
                kind,
                span: Span::new(start, start + ch.len_utf8()),
            }))
        };
        match ch {
            '@' => single(TokenKind::At),
            ':' => single(TokenKind::Colon),
            '=' => single(TokenKind::Eq),
            '(' => single(TokenKind::LParen),
            ')' => single(TokenKind::RParen),
            '_' => single(TokenKind::Underscore),
            '[' => Some(self.raw(start)),
            ws if ws.is_whitespace() => {
                let end = self.eat_while(char::is_whitespace);
                Some(Ok(Token {
                    kind: TokenKind::Whitespace,
                    span: Span::new(start, end),
                }))
            }
            word if starts_word(word) => {
                let end = self.eat_while(continues_word);
                let text = self.text.get(start..end).unwrap_or_default();
                Some(Ok(Token {
                    kind: TokenKind::Word(text.to_owned()),
                    span: Span::new(start, end),
                }))
            }
            other => Some(Err(GrammarError::new(
                GrammarErrorKind::UnexpectedChar(other),
                Span::new(start, start + other.len_utf8()),
            ))),
        }
    }
}

/// Split invocation text into tokens.
///
/// # Errors
///
/// Returns a [`GrammarError`] for characters outside the grammar and for
/// unterminated bracket literals.
pub fn tokenize(text: &str) -> GrammarResult<Vec<Token>> {
    let mut lexer = Lexer::new(text);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next_token() {
        tokens.push(token?);
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<TokenKind> {
        tokenize(text)
            .unwrap()
            .into_iter()
            .map(|token| token.kind)
            .collect()
    }

    #[test]
    fn words_keep_ratio_and_dots() {
        assert_eq!(
            kinds("w=1/2 p=0.5"),
            vec![
                TokenKind::Word("w".into()),
                TokenKind::Eq,
                TokenKind::Word("1/2".into()),
                TokenKind::Whitespace,
                TokenKind::Word("p".into()),
                TokenKind::Eq,
                TokenKind::Word("0.5".into()),
            ]
        );
    }

    #[test]
    fn newlines_collapse_into_one_whitespace_token() {
        assert_eq!(
            kinds("block\n   \n  flex"),
            vec![
                TokenKind::Word("block".into()),
                TokenKind::Whitespace,
                TokenKind::Word("flex".into()),
            ]
        );
    }

    #[test]
    fn raw_literal_is_verbatim_and_nests() {
        let tokens = tokenize("bg-c=[#0f0f0f] [a[b]c]").unwrap();
        assert_eq!(tokens[2].kind, TokenKind::Raw("#0f0f0f".into()));
        assert_eq!(tokens[2].span, Span::new(5, 14));
        assert_eq!(tokens[4].kind, TokenKind::Raw("a[b]c".into()));
    }

    #[test]
    fn unterminated_bracket_reports_span() {
        let err = tokenize("p=4 bg-c=[#fff").unwrap_err();
        assert_eq!(err.kind, GrammarErrorKind::UnterminatedBracket);
        assert_eq!(err.span, Span::new(9, 14));
    }

    #[test]
    fn unknown_character_is_rejected() {
        let err = tokenize("p=${x}").unwrap_err();
        assert_eq!(err.kind, GrammarErrorKind::UnexpectedChar('$'));
        assert_eq!(err.span.start, 2);
    }
}
