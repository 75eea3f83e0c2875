//! CSS text handling shared by the compiler and the build emitter.
//!
//! Two entry points: [`parse_declarations`] turns a raw declaration fragment
//! (the body of a `[...]` directive) into declarations, and
//! [`parse_stylesheet`] reads an emitted stylesheet back, including
//! `@media` blocks, so callers can inspect what was written.
use cssparser::AtRuleParser as CssAtRuleParser;
use cssparser::BasicParseErrorKind;
use cssparser::CowRcStr;
use cssparser::DeclarationParser as CssDeclarationParser;
use cssparser::ParseError;
use cssparser::Parser;
use cssparser::ParserInput;
use cssparser::ParserState;
use cssparser::QualifiedRuleParser as CssQualifiedRuleParser;
use cssparser::RuleBodyItemParser as CssRuleBodyItemParser;
use cssparser::RuleBodyParser as CssRuleBodyParser;
use cssparser::StyleSheetParser;
use core::slice;
use std::error::Error;
use std::fmt;

/// A single CSS declaration (property: value [!important]).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    /// Lowercased property name.
    pub name: String,
    /// Raw value text (without trailing !important).
    pub value: String,
    /// Whether the declaration was marked as `!important`.
    pub important: bool,
}

/// A single style rule with a raw prelude and parsed declarations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleRule {
    /// Raw prelude text (typically the selector list).
    pub prelude: String,
    /// Declarations within the rule block.
    pub declarations: Vec<Declaration>,
}

/// An `@media` block wrapping style rules.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaRule {
    /// Raw media condition, e.g. `(min-width: 1024px)`.
    pub condition: String,
    /// Style rules nested in the block.
    pub rules: Vec<StyleRule>,
}

/// A top-level rule of a stylesheet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CssRule {
    Style(StyleRule),
    Media(MediaRule),
}

/// A parsed stylesheet.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Stylesheet {
    /// Top-level rules in source order.
    pub rules: Vec<CssRule>,
}

impl Stylesheet {
    /// Iterate every style rule, descending into `@media` blocks.
    pub fn style_rules(&self) -> impl Iterator<Item = &StyleRule> {
        self.rules.iter().flat_map(|rule| match rule {
            CssRule::Style(style) => slice::from_ref(style).iter(),
            CssRule::Media(media) => media.rules.iter(),
        })
    }
}

/// A raw declaration fragment that could not be read as CSS.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FragmentError {
    /// The part of the fragment that failed to parse.
    pub near: String,
    /// Line inside the fragment (zero based).
    pub line: u32,
    /// Column inside the fragment (one based, as reported by cssparser).
    pub column: u32,
}

impl fmt::Display for FragmentError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.near.is_empty() {
            write!(formatter, "expected at least one `property: value` declaration")
        } else {
            write!(
                formatter,
                "invalid declaration `{}` at {}:{}",
                self.near, self.line, self.column
            )
        }
    }
}

impl Error for FragmentError {}

/// Parse `!important` at the end of a value, returning (`value_without_important`, `important_flag`).
fn split_important_tail(value: &str) -> (String, bool) {
    let trimmed = value.trim();
    if let Some(pos) = trimmed.rfind("!important")
        && let Some(prefix) = trimmed.get(..pos)
    {
        let head = prefix.trim_end();
        return (head.to_owned(), true);
    }
    (trimmed.to_owned(), false)
}

/// A declaration parser that records property name and its raw value.
struct BodyDeclParser;

impl CssDeclarationParser<'_> for BodyDeclParser {
    type Declaration = Declaration;
    type Error = ();

    fn parse_value<'input>(
        &mut self,
        name: CowRcStr<'input>,
        input: &mut Parser<'input, '_>,
        _decl_start: &ParserState,
    ) -> Result<Self::Declaration, ParseError<'input, Self::Error>> {
        let start = input.position();
        while input.next_including_whitespace_and_comments().is_ok() {}
        let raw = input.slice_from(start);
        let (value, important) = split_important_tail(raw);
        if value.is_empty() {
            return Err(input.new_error(BasicParseErrorKind::EndOfInput));
        }
        Ok(Declaration {
            name: name.to_ascii_lowercase(),
            value,
            important,
        })
    }
}

impl CssAtRuleParser<'_> for BodyDeclParser {
    type Prelude = ();
    type AtRule = Declaration; // Not produced
    type Error = ();

    #[inline]
    fn parse_prelude<'input>(
        &mut self,
        name: CowRcStr<'input>,
        input: &mut Parser<'input, '_>,
    ) -> Result<Self::Prelude, ParseError<'input, Self::Error>> {
        Err(input.new_error(BasicParseErrorKind::AtRuleInvalid(name)))
    }
}

impl CssQualifiedRuleParser<'_> for BodyDeclParser {
    type Prelude = ();
    type QualifiedRule = Declaration; // Not produced
    type Error = ();

    #[inline]
    fn parse_prelude<'input>(
        &mut self,
        input: &mut Parser<'input, '_>,
    ) -> Result<Self::Prelude, ParseError<'input, Self::Error>> {
        Err(input.new_error(BasicParseErrorKind::QualifiedRuleInvalid))
    }
}

impl CssRuleBodyItemParser<'_, Declaration, ()> for BodyDeclParser {
    fn parse_declarations(&self) -> bool {
        true
    }
    fn parse_qualified(&self) -> bool {
        false
    }
}

/// Parse a raw declaration fragment such as `white-space: pre; cursor: pointer`.
///
/// # Errors
///
/// Returns a [`FragmentError`] when any item of the fragment is not a
/// declaration, or when the fragment holds no declaration at all.
pub fn parse_declarations(fragment: &str) -> Result<Vec<Declaration>, FragmentError> {
    let mut input = ParserInput::new(fragment);
    let mut parser = Parser::new(&mut input);
    let mut body = BodyDeclParser;
    let mut out = Vec::new();
    for item in CssRuleBodyParser::new(&mut parser, &mut body) {
        match item {
            Ok(decl) => out.push(decl),
            Err((error, slice)) => {
                return Err(FragmentError {
                    near: slice.trim().to_owned(),
                    line: error.location.line,
                    column: error.location.column,
                });
            }
        }
    }
    if out.is_empty() {
        return Err(FragmentError {
            near: String::new(),
            line: 0,
            column: 1,
        });
    }
    Ok(out)
}

/// Parse declarations from a rule block, skipping invalid items.
fn parse_declarations_from_block(block: &mut Parser) -> Vec<Declaration> {
    let mut body = BodyDeclParser;
    CssRuleBodyParser::new(block, &mut body).flatten().collect()
}

/// Consume the remaining tokens of `input` and return them as trimmed text.
fn rest_as_text(input: &mut Parser) -> String {
    let start = input.position();
    while input.next_including_whitespace_and_comments().is_ok() {}
    input.slice_from(start).trim().to_owned()
}

/// Top-level parser producing style rules and `@media` blocks.
struct TopLevelParser;

impl CssAtRuleParser<'_> for TopLevelParser {
    type Prelude = String;
    type AtRule = CssRule;
    type Error = ();

    #[inline]
    fn parse_prelude<'input>(
        &mut self,
        name: CowRcStr<'input>,
        input: &mut Parser<'input, '_>,
    ) -> Result<Self::Prelude, ParseError<'input, Self::Error>> {
        if name.eq_ignore_ascii_case("media") {
            Ok(rest_as_text(input))
        } else {
            Err(input.new_error(BasicParseErrorKind::AtRuleInvalid(name)))
        }
    }

    #[inline]
    fn parse_block<'input>(
        &mut self,
        prelude: Self::Prelude,
        _state: &ParserState,
        input: &mut Parser<'input, '_>,
    ) -> Result<Self::AtRule, ParseError<'input, Self::Error>> {
        let mut nested = Self;
        let rules = StyleSheetParser::new(input, &mut nested)
            .flatten()
            .filter_map(|rule| match rule {
                CssRule::Style(style) => Some(style),
                CssRule::Media(_) => None,
            })
            .collect();
        Ok(CssRule::Media(MediaRule {
            condition: prelude,
            rules,
        }))
    }
}

impl CssQualifiedRuleParser<'_> for TopLevelParser {
    type Prelude = String; // raw selector/prelude
    type QualifiedRule = CssRule;
    type Error = ();

    #[inline]
    fn parse_prelude<'input>(
        &mut self,
        input: &mut Parser<'input, '_>,
    ) -> Result<Self::Prelude, ParseError<'input, Self::Error>> {
        Ok(rest_as_text(input))
    }

    #[inline]
    fn parse_block<'input>(
        &mut self,
        prelude: Self::Prelude,
        _state: &ParserState,
        input: &mut Parser<'input, '_>,
    ) -> Result<Self::QualifiedRule, ParseError<'input, Self::Error>> {
        let declarations = parse_declarations_from_block(input);
        Ok(CssRule::Style(StyleRule {
            prelude,
            declarations,
        }))
    }
}

/// Parse a full stylesheet into a [`Stylesheet`]. Invalid rules are dropped.
pub fn parse_stylesheet(css: &str) -> Stylesheet {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let mut top = TopLevelParser;
    Stylesheet {
        rules: StyleSheetParser::new(&mut parser, &mut top)
            .flatten()
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_with_two_declarations() {
        let decls = parse_declarations("white-space: pre; Cursor: pointer").unwrap();
        assert_eq!(decls.len(), 2);
        assert_eq!(decls[0].name, "white-space");
        assert_eq!(decls[0].value, "pre");
        assert_eq!(decls[1].name, "cursor");
        assert!(!decls[1].important);
    }

    #[test]
    fn fragment_keeps_important_flag() {
        let decls = parse_declarations("color: red !important").unwrap();
        assert_eq!(decls[0].value, "red");
        assert!(decls[0].important);
    }

    #[test]
    fn empty_fragment_is_rejected() {
        assert!(parse_declarations("   ").is_err());
    }

    #[test]
    fn fragment_without_colon_is_rejected() {
        let err = parse_declarations("white-space pre").unwrap_err();
        assert!(err.to_string().contains("white-space pre"), "{err}");
    }

    #[test]
    fn stylesheet_with_media_block() {
        let sheet = parse_stylesheet(
            "._ea { margin-top: 2rem; }\n@media (min-width: 1024px) { ._eb { color: red; } }\n",
        );
        assert_eq!(sheet.rules.len(), 2);
        let CssRule::Media(media) = &sheet.rules[1] else {
            panic!("expected media rule, got {:?}", sheet.rules[1]);
        };
        assert_eq!(media.condition, "(min-width: 1024px)");
        assert_eq!(sheet.style_rules().count(), 2);
    }
}
