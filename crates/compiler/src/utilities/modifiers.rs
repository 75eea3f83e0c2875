//! State and breakpoint names accepted as modifier prefixes.

use crate::ast::{Value, Variant};
use crate::declaration::Modifier;

const PSEUDO: &[(&str, &str)] = &[
    ("hover", ":hover"),
    ("focus", ":focus"),
    ("focus-within", ":focus-within"),
    ("focus-visible", ":focus-visible"),
    ("active", ":active"),
    ("visited", ":visited"),
    ("target", ":target"),
    ("checked", ":checked"),
    ("disabled", ":disabled"),
    ("enabled", ":enabled"),
    ("required", ":required"),
    ("invalid", ":invalid"),
    ("empty", ":empty"),
    ("first", ":first-child"),
    ("last", ":last-child"),
    ("only", ":only-child"),
    ("odd", ":nth-child(odd)"),
    ("even", ":nth-child(even)"),
    ("first-of-type", ":first-of-type"),
    ("last-of-type", ":last-of-type"),
    ("before", "::before"),
    ("after", "::after"),
    ("placeholder", "::placeholder"),
    ("selection", "::selection"),
    ("marker", "::marker"),
    ("first-line", "::first-line"),
    ("first-letter", "::first-letter"),
];

const MEDIA: &[(&str, &str)] = &[
    ("sm", "(min-width:640px)"),
    ("md", "(min-width:768px)"),
    ("lg", "(min-width:1024px)"),
    ("xl", "(min-width:1280px)"),
    ("2xl", "(min-width:1536px)"),
    ("dark", "(prefers-color-scheme: dark)"),
    ("portrait", "(orientation: portrait)"),
    ("landscape", "(orientation: landscape)"),
    ("motion-safe", "(prefers-reduced-motion: no-preference)"),
    ("motion-reduce", "(prefers-reduced-motion: reduce)"),
    ("print", "print"),
];

fn find(table: &[(&str, &'static str)], name: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, css)| *css)
}

/// Resolve a written modifier. Bracketed forms pass through; named forms
/// come from the tables above. Returns `None` for an unknown name.
pub fn resolve(variant: &Variant) -> Option<Modifier> {
    match variant {
        Variant::Pseudo(Value::Iden(name)) => find(PSEUDO, name).map(Modifier::pseudo),
        Variant::Pseudo(Value::Raw(raw)) => Some(Modifier::pseudo(raw)),
        Variant::Media(Value::Iden(name)) => find(MEDIA, name).map(Modifier::media),
        Variant::Media(Value::Raw(raw)) => Some(Modifier::media(raw)),
    }
}

/// Named states, for documentation.
pub fn pseudo_names() -> impl Iterator<Item = (&'static str, &'static str)> {
    PSEUDO.iter().copied()
}

/// Named breakpoints and media features, for documentation.
pub fn media_names() -> impl Iterator<Item = (&'static str, &'static str)> {
    MEDIA.iter().copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_modifiers() {
        assert_eq!(
            resolve(&Variant::Media(Value::Iden("lg".into()))),
            Some(Modifier::Media("(min-width:1024px)".into()))
        );
        assert_eq!(
            resolve(&Variant::Pseudo(Value::Iden("first".into()))),
            Some(Modifier::PseudoClass(":first-child".into()))
        );
        assert_eq!(
            resolve(&Variant::Pseudo(Value::Iden("before".into()))),
            Some(Modifier::PseudoElement("::before".into()))
        );
        assert_eq!(resolve(&Variant::Pseudo(Value::Iden("hovr".into()))), None);
    }

    #[test]
    fn bracketed_modifiers_pass_through() {
        assert_eq!(
            resolve(&Variant::Pseudo(Value::Raw("nth-child(3)".into()))),
            Some(Modifier::PseudoClass(":nth-child(3)".into()))
        );
        assert_eq!(
            resolve(&Variant::Media(Value::Raw("(min-width:900px)".into()))),
            Some(Modifier::Media("(min-width:900px)".into()))
        );
    }
}
