//! Utility catalog lookup and value resolution.

pub mod colors;
pub mod modifiers;
pub mod registry;
pub mod values;

use crate::ast::Value;
use crate::error::GrammarErrorKind;
use once_cell::sync::Lazy;
use registry::{CATALOG, Utility, UtilityKind};
use rustc_hash::FxHashMap;

/// Both forms of a shorthand; `flex` has a flag and a valued form.
#[derive(Clone, Copy, Default)]
struct Forms {
    flag: Option<&'static Utility>,
    valued: Option<&'static Utility>,
}

static INDEX: Lazy<FxHashMap<&'static str, Forms>> = Lazy::new(|| {
    let mut index: FxHashMap<&'static str, Forms> = FxHashMap::default();
    for utility in CATALOG.iter().flat_map(|section| section.utilities.iter()) {
        let forms = index.entry(utility.name).or_default();
        if utility.takes_value() {
            forms.valued = Some(utility);
        } else {
            forms.flag = Some(utility);
        }
    }
    index
});

pub fn lookup(name: &str, takes_value: bool) -> Option<&'static Utility> {
    let forms = INDEX.get(name)?;
    if takes_value { forms.valued } else { forms.flag }
}

/// Any form of the utility, valued first.
pub fn lookup_any(name: &str) -> Option<&'static Utility> {
    lookup(name, true).or_else(|| lookup(name, false))
}

/// Resolve a directive into `(property, value)` pairs.
///
/// # Errors
///
/// Returns the error kind for an unknown shorthand, a missing or unexpected
/// value, or a value that no generator of the utility accepts.
pub fn resolve(name: &str, value: Option<&Value>) -> Result<Vec<(String, String)>, GrammarErrorKind> {
    let Some(utility) = lookup(name, value.is_some()) else {
        return Err(match (lookup(name, value.is_none()), value) {
            (Some(_), Some(_)) => GrammarErrorKind::UnexpectedValue(name.to_owned()),
            (Some(_), None) => GrammarErrorKind::MissingValue(name.to_owned()),
            (None, _) => GrammarErrorKind::UnknownShorthand(name.to_owned()),
        });
    };

    let invalid = |word: &str| GrammarErrorKind::InvalidValue {
        utility: name.to_owned(),
        value: word.to_owned(),
    };

    match (&utility.kind, value) {
        (UtilityKind::Flag(decls), _) => Ok(decls
            .iter()
            .map(|(property, css)| ((*property).to_owned(), (*css).to_owned()))
            .collect()),
        (UtilityKind::Valued { properties, values }, Some(value)) => {
            let css = match value {
                Value::Raw(raw) => raw.clone(),
                Value::Iden(word) => values
                    .iter()
                    .find_map(|generator| generator.resolve(word))
                    .ok_or_else(|| invalid(word))?,
            };
            Ok(properties
                .iter()
                .map(|property| ((*property).to_owned(), css.clone()))
                .collect())
        }
        (UtilityKind::FontSize, Some(Value::Raw(raw))) => {
            Ok(vec![(String::from("font-size"), raw.clone())])
        }
        (UtilityKind::FontSize, Some(Value::Iden(word))) => {
            let size = values::ValueGen::FontSize
                .resolve(word)
                .ok_or_else(|| invalid(word))?;
            let line = values::font_size_line_height(word).ok_or_else(|| invalid(word))?;
            Ok(vec![
                (String::from("font-size"), size),
                (String::from("line-height"), line.to_owned()),
            ])
        }
        (UtilityKind::Valued { .. } | UtilityKind::FontSize, None) => {
            Err(GrammarErrorKind::MissingValue(name.to_owned()))
        }
    }
}
