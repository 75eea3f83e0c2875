//! Normalized declarations and the identifiers derived from them.

use core::fmt;
use core::hash::Hasher as _;
use rustc_hash::FxHasher;

/// How a declaration's rule is wrapped. Variant order is the canonical order.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Modifier {
    /// Selector suffix such as `:hover` or `:nth-child(3)`.
    PseudoClass(String),
    /// Selector suffix such as `::before`.
    PseudoElement(String),
    /// Media condition such as `(min-width:1024px)`.
    Media(String),
}

impl Modifier {
    /// Classify a selector suffix by its leading colons.
    pub fn pseudo(selector: &str) -> Self {
        let selector = collapse_whitespace(selector);
        if selector.starts_with("::") {
            Self::PseudoElement(selector)
        } else if selector.starts_with(':') {
            Self::PseudoClass(selector)
        } else {
            Self::PseudoClass(format!(":{selector}"))
        }
    }

    pub fn media(condition: &str) -> Self {
        Self::Media(collapse_whitespace(condition))
    }
}

/// Sorted, duplicate-free modifiers of one declaration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ModifierSet(Vec<Modifier>);

impl ModifierSet {
    pub fn new(modifiers: impl IntoIterator<Item = Modifier>) -> Self {
        let mut list: Vec<Modifier> = modifiers.into_iter().collect();
        list.sort();
        list.dedup();
        Self(list)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Modifier> {
        self.0.iter()
    }

    /// Pseudo-classes then pseudo-elements, concatenated.
    pub fn selector_suffix(&self) -> String {
        self.0
            .iter()
            .filter_map(|modifier| match modifier {
                Modifier::PseudoClass(sel) | Modifier::PseudoElement(sel) => Some(sel.as_str()),
                Modifier::Media(_) => None,
            })
            .collect()
    }

    /// Media conditions joined with `and`, or `None` for an unconditional rule.
    pub fn media_query(&self) -> Option<String> {
        let conditions: Vec<&str> = self
            .0
            .iter()
            .filter_map(|modifier| match modifier {
                Modifier::Media(cond) => Some(cond.as_str()),
                Modifier::PseudoClass(_) | Modifier::PseudoElement(_) => None,
            })
            .collect();
        if conditions.is_empty() {
            None
        } else {
            Some(conditions.join(" and "))
        }
    }
}

impl fmt::Display for ModifierSet {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.selector_suffix())?;
        if let Some(query) = self.media_query() {
            write!(formatter, "@{query}")?;
        }
        Ok(())
    }
}

/// One property/value pair with its wrapping modifiers.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Declaration {
    pub modifiers: ModifierSet,
    pub property: String,
    pub value: String,
}

impl Declaration {
    /// Build a declaration with the property lowercased and whitespace in the
    /// value collapsed. Value case is kept, as is the case of custom
    /// properties (`--name`).
    pub fn new(modifiers: ModifierSet, property: &str, value: &str) -> Self {
        let property = property.trim();
        let property = if property.starts_with("--") {
            property.to_owned()
        } else {
            property.to_ascii_lowercase()
        };
        Self {
            modifiers,
            property,
            value: collapse_whitespace(value),
        }
    }

    /// `modifiers|property|value`, the input of identifier derivation.
    pub fn canonical_key(&self) -> String {
        format!("{}|{}|{}", self.modifiers, self.property, self.value)
    }
}

impl fmt::Display for Declaration {
    /// Renders the body only: `property: value;`.
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}: {};", self.property, self.value)
    }
}

/// Content-addressed class name of one declaration.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UtilityId(String);

impl UtilityId {
    /// Derive the identifier of `declaration`. Pure: equal declarations always
    /// give equal identifiers.
    pub fn derive(prefix: &str, declaration: &Declaration) -> Self {
        let mut hasher = FxHasher::default();
        hasher.write(declaration.canonical_key().as_bytes());
        Self(format!("{prefix}{}", base36(hasher.finish())))
    }

    /// Wrap an identifier read back from a manifest annotation.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UtilityId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

/// A declaration paired with its identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UtilityRule {
    pub id: UtilityId,
    pub declaration: Declaration,
}

impl UtilityRule {
    pub fn new(prefix: &str, declaration: Declaration) -> Self {
        Self {
            id: UtilityId::derive(prefix, &declaration),
            declaration,
        }
    }
}

fn base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return String::from("0");
    }
    let mut out = Vec::with_capacity(13);
    while value > 0 {
        let digit = usize::try_from(value % 36).unwrap_or_default();
        out.push(DIGITS.get(digit).copied().unwrap_or(b'0'));
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

/// Trim and reduce every whitespace run to one space.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
