//! Value generators: turn a directive value into a CSS value.

use super::colors;

/// A family of accepted values. Utilities list generators in priority order;
/// the first one that accepts a value wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueGen {
    /// `0`, `px`, or a number of quarter-rem steps.
    Spacing,
    /// `full` or a `n1/n2` ratio.
    Percentage,
    Auto,
    /// `screen`, mapped to the given viewport length.
    Screen(&'static str),
    MaxWidth,
    Overflow,
    JustifyContent,
    JustifyItems,
    AlignItems,
    Flex,
    FlexDirection,
    FlexWrap,
    /// `flex-grow` / `flex-shrink` factor.
    FlexFactor,
    /// Equal-width grid track count.
    GridTracks,
    FontFamily,
    FontSize,
    FontWeight,
    TextAlign,
    BorderRadius,
    Color,
    /// Any number, suffixed with the unit.
    Number(&'static str),
    Easing,
    LineHeight,
}

const OVERFLOW: &[(&str, &str)] = &[
    ("auto", "auto"),
    ("hidden", "hidden"),
    ("clip", "clip"),
    ("visible", "visible"),
    ("scroll", "scroll"),
];

const JUSTIFY_CONTENT: &[(&str, &str)] = &[
    ("start", "flex-start"),
    ("end", "flex-end"),
    ("center", "center"),
    ("between", "space-between"),
    ("around", "space-around"),
    ("evenly", "space-evenly"),
];

const JUSTIFY_ITEMS: &[(&str, &str)] = &[
    ("start", "start"),
    ("end", "end"),
    ("center", "center"),
    ("stretch", "stretch"),
];

const ALIGN_ITEMS: &[(&str, &str)] = &[
    ("start", "flex-start"),
    ("end", "flex-end"),
    ("center", "center"),
    ("baseline", "baseline"),
    ("stretch", "stretch"),
];

const MAX_WIDTH: &[(&str, &str)] = &[
    ("0", "0rem"),
    ("none", "none"),
    ("xs", "20rem"),
    ("sm", "24rem"),
    ("md", "28rem"),
    ("lg", "32rem"),
    ("xl", "36rem"),
    ("2xl", "42rem"),
    ("3xl", "48rem"),
    ("4xl", "56rem"),
    ("5xl", "64rem"),
    ("6xl", "72rem"),
    ("7xl", "80rem"),
    ("full", "100%"),
    ("min", "min-content"),
    ("max", "max-content"),
    ("fit", "fit-content"),
    ("prose", "65ch"),
    ("screen-sm", "640px"),
    ("screen-md", "768px"),
    ("screen-lg", "1024px"),
    ("screen-xl", "1280px"),
    ("screen-2xl", "1536px"),
];

const FLEX: &[(&str, &str)] = &[
    ("1", "1 1 0%"),
    ("auto", "1 1 auto"),
    ("initial", "0 1 auto"),
    ("none", "none"),
];

const FLEX_DIRECTION: &[(&str, &str)] = &[
    ("row", "row"),
    ("-row", "row-reverse"),
    ("col", "column"),
    ("-col", "column-reverse"),
];

const FLEX_WRAP: &[(&str, &str)] = &[
    ("wrap", "wrap"),
    ("-wrap", "wrap-reverse"),
    ("nowrap", "nowrap"),
];

const FLEX_FACTOR: &[(&str, &str)] = &[("1", "1"), ("0", "0")];

const FONT_FAMILY: &[(&str, &str)] = &[
    (
        "sans",
        r#"ui-sans-serif, system-ui, -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Helvetica Neue", Arial, "Noto Sans", sans-serif, "Apple Color Emoji", "Segoe UI Emoji", "Segoe UI Symbol", "Noto Color Emoji""#,
    ),
    (
        "serif",
        r#"ui-serif, Georgia, Cambria, "Times New Roman", Times, serif"#,
    ),
    (
        "mono",
        r#"ui-monospace, SFMono-Regular, Menlo, Monaco, Consolas, "Liberation Mono", "Courier New", monospace"#,
    ),
];

/// Named font sizes with the line height each one pairs with.
pub const FONT_SIZE: &[(&str, &str, &str)] = &[
    ("xs", "0.75rem", "1rem"),
    ("sm", "0.875rem", "1.25rem"),
    ("base", "1rem", "1.5rem"),
    ("lg", "1.125rem", "1.75rem"),
    ("xl", "1.25rem", "1.75rem"),
    ("2xl", "1.5rem", "2rem"),
    ("3xl", "1.875rem", "2.25rem"),
    ("4xl", "2.25rem", "2.5rem"),
    ("5xl", "3rem", "1"),
    ("6xl", "3.75rem", "1"),
    ("7xl", "4.5rem", "1"),
    ("8xl", "6rem", "1"),
    ("9xl", "8rem", "1"),
];

const FONT_WEIGHT: &[(&str, &str)] = &[
    ("thin", "100"),
    ("extralight", "200"),
    ("light", "300"),
    ("normal", "400"),
    ("medium", "500"),
    ("semibold", "600"),
    ("bold", "700"),
    ("extrabold", "800"),
    ("black", "900"),
    ("100", "100"),
    ("200", "200"),
    ("300", "300"),
    ("400", "400"),
    ("500", "500"),
    ("600", "600"),
    ("700", "700"),
    ("800", "800"),
    ("900", "900"),
];

const TEXT_ALIGN: &[(&str, &str)] = &[
    ("left", "left"),
    ("center", "center"),
    ("right", "right"),
    ("justify", "justify"),
];

const BORDER_RADIUS: &[(&str, &str)] = &[
    ("none", "0px"),
    ("sm", "0.125rem"),
    ("md", "0.25rem"),
    ("lg", "0.375rem"),
    ("xl", "0.5rem"),
    ("2xl", "0.75rem"),
    ("3xl", "1rem"),
    ("4xl", "1.5rem"),
    ("full", "9999px"),
];

const EASING: &[(&str, &str)] = &[
    ("linear", "linear"),
    ("in", "cubic-bezier(0.4,0,1,1)"),
    ("out", "cubic-bezier(0,0,0.2,1)"),
    ("in-out", "cubic-bezier(0.4,0,0.2,1)"),
];

const LINE_HEIGHT: &[(&str, &str)] = &[
    ("none", "1"),
    ("tight", "1.25"),
    ("snug", "1.375"),
    ("normal", "1.5"),
    ("relaxed", "1.625"),
    ("loose", "2"),
];

fn keyword(table: &[(&str, &'static str)], word: &str) -> Option<String> {
    table
        .iter()
        .find(|(key, _)| *key == word)
        .map(|(_, css)| (*css).to_owned())
}

fn keyword_rows(table: &[(&str, &str)]) -> Vec<(String, String)> {
    table
        .iter()
        .map(|(key, css)| ((*key).to_owned(), (*css).to_owned()))
        .collect()
}

/// Parse a plain decimal number. Rejects `inf`, `NaN`, exponents and the like.
pub fn parse_number(word: &str) -> Option<f64> {
    let digits = word.strip_prefix('-').unwrap_or(word);
    if digits.is_empty()
        || digits.starts_with('.')
        || !digits.chars().all(|ch| ch.is_ascii_digit() || ch == '.')
    {
        return None;
    }
    word.parse::<f64>().ok().filter(|nr| nr.is_finite())
}

/// Shortest decimal form with at most six fractional digits.
pub fn format_number(nr: f64) -> String {
    let text = format!("{nr:.6}");
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        String::from("0")
    } else {
        trimmed.to_owned()
    }
}

impl ValueGen {
    /// Resolve a bare word, or `None` if this generator does not accept it.
    pub fn resolve(self, word: &str) -> Option<String> {
        match self {
            Self::Spacing => match word {
                "0" => Some(String::from("0px")),
                "px" => Some(String::from("1px")),
                _ => parse_number(word).map(|nr| format!("{}rem", format_number(nr / 4.0))),
            },
            Self::Percentage => {
                if word == "full" {
                    return Some(String::from("100%"));
                }
                let (num, den) = word.split_once('/')?;
                let num = parse_number(num)?;
                let den = parse_number(den)?;
                if den == 0.0 {
                    return None;
                }
                Some(format!("{}%", format_number(num / den * 100.0)))
            }
            Self::Auto => (word == "auto").then(|| String::from("auto")),
            Self::Screen(length) => (word == "screen").then(|| length.to_owned()),
            Self::MaxWidth => keyword(MAX_WIDTH, word),
            Self::Overflow => keyword(OVERFLOW, word),
            Self::JustifyContent => keyword(JUSTIFY_CONTENT, word),
            Self::JustifyItems => keyword(JUSTIFY_ITEMS, word),
            Self::AlignItems => keyword(ALIGN_ITEMS, word),
            Self::Flex => keyword(FLEX, word),
            Self::FlexDirection => keyword(FLEX_DIRECTION, word),
            Self::FlexWrap => keyword(FLEX_WRAP, word),
            Self::FlexFactor => keyword(FLEX_FACTOR, word),
            Self::GridTracks => word
                .parse::<u16>()
                .ok()
                .filter(|count| *count > 0)
                .map(|count| format!("repeat({count}, minmax(0, 1fr))")),
            Self::FontFamily => keyword(FONT_FAMILY, word),
            Self::FontSize => FONT_SIZE
                .iter()
                .find(|(key, _, _)| *key == word)
                .map(|(_, size, _)| (*size).to_owned()),
            Self::FontWeight => keyword(FONT_WEIGHT, word),
            Self::TextAlign => keyword(TEXT_ALIGN, word),
            Self::BorderRadius => keyword(BORDER_RADIUS, word),
            Self::Color => colors::lookup(word).map(str::to_owned),
            Self::Number(unit) => parse_number(word).map(|nr| format!("{}{unit}", format_number(nr))),
            Self::Easing => keyword(EASING, word),
            Self::LineHeight => keyword(LINE_HEIGHT, word),
        }
    }

    /// `(value token, css value)` rows for documentation. Open-ended
    /// generators use placeholders such as `{number}`.
    pub fn reference_rows(self) -> Vec<(String, String)> {
        match self {
            Self::Spacing => vec![
                (String::from("0"), String::from("0px")),
                (String::from("px"), String::from("1px")),
                (String::from("{number}"), String::from("{number/4}rem")),
            ],
            Self::Percentage => vec![
                (String::from("full"), String::from("100%")),
                (String::from("{n1}/{n2}"), String::from("{n1/n2*100}%")),
            ],
            Self::Auto => vec![(String::from("auto"), String::from("auto"))],
            Self::Screen(length) => vec![(String::from("screen"), length.to_owned())],
            Self::MaxWidth => keyword_rows(MAX_WIDTH),
            Self::Overflow => keyword_rows(OVERFLOW),
            Self::JustifyContent => keyword_rows(JUSTIFY_CONTENT),
            Self::JustifyItems => keyword_rows(JUSTIFY_ITEMS),
            Self::AlignItems => keyword_rows(ALIGN_ITEMS),
            Self::Flex => keyword_rows(FLEX),
            Self::FlexDirection => keyword_rows(FLEX_DIRECTION),
            Self::FlexWrap => keyword_rows(FLEX_WRAP),
            Self::FlexFactor => keyword_rows(FLEX_FACTOR),
            Self::GridTracks => vec![(
                String::from("{number}"),
                String::from("repeat({number}, minmax(0, 1fr))"),
            )],
            Self::FontFamily => keyword_rows(FONT_FAMILY),
            Self::FontSize => FONT_SIZE
                .iter()
                .map(|(key, size, _)| ((*key).to_owned(), (*size).to_owned()))
                .collect(),
            Self::FontWeight => keyword_rows(FONT_WEIGHT),
            Self::TextAlign => keyword_rows(TEXT_ALIGN),
            Self::BorderRadius => keyword_rows(BORDER_RADIUS),
            Self::Color => colors::all()
                .map(|(name, hex)| (name, hex.to_owned()))
                .collect(),
            Self::Number(unit) => vec![(String::from("{number}"), format!("{{number}}{unit}"))],
            Self::Easing => keyword_rows(EASING),
            Self::LineHeight => keyword_rows(LINE_HEIGHT),
        }
    }
}

/// Line height paired with a named font size.
pub fn font_size_line_height(word: &str) -> Option<&'static str> {
    FONT_SIZE
        .iter()
        .find(|(key, _, _)| *key == word)
        .map(|(_, _, line)| *line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spacing_scales_by_quarter_rem() {
        assert_eq!(ValueGen::Spacing.resolve("4").as_deref(), Some("1rem"));
        assert_eq!(ValueGen::Spacing.resolve("10").as_deref(), Some("2.5rem"));
        assert_eq!(ValueGen::Spacing.resolve("0.5").as_deref(), Some("0.125rem"));
        assert_eq!(ValueGen::Spacing.resolve("-2").as_deref(), Some("-0.5rem"));
        assert_eq!(ValueGen::Spacing.resolve("0").as_deref(), Some("0px"));
        assert_eq!(ValueGen::Spacing.resolve("px").as_deref(), Some("1px"));
        assert_eq!(ValueGen::Spacing.resolve("auto"), None);
    }

    #[test]
    fn ratios_become_percentages() {
        assert_eq!(ValueGen::Percentage.resolve("1/2").as_deref(), Some("50%"));
        assert_eq!(ValueGen::Percentage.resolve("1/3").as_deref(), Some("33.333333%"));
        assert_eq!(ValueGen::Percentage.resolve("full").as_deref(), Some("100%"));
        assert_eq!(ValueGen::Percentage.resolve("1/0"), None);
        assert_eq!(ValueGen::Percentage.resolve("1/2/3"), None);
        assert_eq!(ValueGen::Percentage.resolve("a/b"), None);
    }

    #[test]
    fn numbers_reject_non_decimal_forms() {
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("1e3"), None);
        assert_eq!(parse_number("-"), None);
        assert_eq!(parse_number("2.5"), Some(2.5));
    }

    #[test]
    fn number_formatting() {
        assert_eq!(format_number(1.0), "1");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(0.125), "0.125");
        assert_eq!(ValueGen::Number("ms").resolve("150").as_deref(), Some("150ms"));
        assert_eq!(ValueGen::Number("").resolve("10").as_deref(), Some("10"));
    }

    #[test]
    fn keyword_tables() {
        assert_eq!(
            ValueGen::GridTracks.resolve("5").as_deref(),
            Some("repeat(5, minmax(0, 1fr))")
        );
        assert_eq!(ValueGen::GridTracks.resolve("0"), None);
        assert_eq!(ValueGen::FlexDirection.resolve("-col").as_deref(), Some("column-reverse"));
        assert_eq!(ValueGen::FontWeight.resolve("semibold").as_deref(), Some("600"));
        assert_eq!(ValueGen::Screen("100vw").resolve("screen").as_deref(), Some("100vw"));
        assert_eq!(font_size_line_height("9xl"), Some("1"));
    }

    #[test]
    fn reference_rows_for_open_generators() {
        assert_eq!(
            ValueGen::Number("px").reference_rows(),
            vec![(String::from("{number}"), String::from("{number}px"))]
        );
        assert_eq!(ValueGen::Spacing.reference_rows().len(), 3);
    }
}
