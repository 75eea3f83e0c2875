//! Reference tables consumed by documentation pages.

use crate::utilities::registry::{CATALOG, Utility, UtilityKind};
use crate::utilities::values::FONT_SIZE;
use crate::utilities::lookup_any;

/// One `{value token, rendered css}` pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReferenceRow {
    /// Token written after `=`; empty for flags.
    pub value: String,
    /// Declarations it produces, one per line.
    pub css: String,
}

impl ReferenceRow {
    fn new(value: impl Into<String>, css: String) -> Self {
        Self {
            value: value.into(),
            css,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReferenceEntry {
    pub name: &'static str,
    pub properties: Vec<&'static str>,
    pub rows: Vec<ReferenceRow>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReferenceSection {
    pub title: &'static str,
    pub entries: Vec<ReferenceEntry>,
}

fn render(properties: &[&str], value: &str) -> String {
    properties
        .iter()
        .map(|property| format!("{property}: {value};"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn rows(utility: &Utility) -> Vec<ReferenceRow> {
    match &utility.kind {
        UtilityKind::Flag(decls) => vec![ReferenceRow::new(
            "",
            decls
                .iter()
                .map(|(property, value)| format!("{property}: {value};"))
                .collect::<Vec<_>>()
                .join("\n"),
        )],
        UtilityKind::Valued { properties, values } => values
            .iter()
            .flat_map(|generator| generator.reference_rows())
            .map(|(token, css)| ReferenceRow::new(token, render(properties, &css)))
            .collect(),
        UtilityKind::FontSize => FONT_SIZE
            .iter()
            .map(|(token, size, line)| {
                ReferenceRow::new(*token, format!("font-size: {size};\nline-height: {line};"))
            })
            .collect(),
    }
}

/// Rows for one utility name, or `None` if the name is not in the catalog.
/// A name with both forms lists the valued form.
pub fn reference_for(name: &str) -> Option<Vec<ReferenceRow>> {
    lookup_any(name).map(rows)
}

/// The whole catalog, grouped by section, in catalog order.
pub fn sections() -> Vec<ReferenceSection> {
    CATALOG
        .iter()
        .map(|section| ReferenceSection {
            title: section.title,
            entries: section
                .utilities
                .iter()
                .map(|utility| ReferenceEntry {
                    name: utility.name,
                    properties: utility.properties(),
                    rows: rows(utility),
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spacing_rows() {
        let rows = reference_for("p").unwrap();
        assert_eq!(rows[0], ReferenceRow::new("0", String::from("padding: 0px;")));
        assert_eq!(rows[1], ReferenceRow::new("px", String::from("padding: 1px;")));
        assert_eq!(
            rows[2],
            ReferenceRow::new("{number}", String::from("padding: {number/4}rem;"))
        );
    }

    #[test]
    fn multi_property_rows_join_lines() {
        let rows = reference_for("m-x").unwrap();
        assert_eq!(rows[0].css, "margin-left: 0px;\nmargin-right: 0px;");
        assert_eq!(rows.last().map(|row| row.value.as_str()), Some("auto"));
    }

    #[test]
    fn width_rows_in_generator_order() {
        let values: Vec<String> = reference_for("w")
            .unwrap()
            .into_iter()
            .map(|row| row.value)
            .collect();
        assert_eq!(values, ["0", "px", "{number}", "full", "{n1}/{n2}", "screen"]);
    }

    #[test]
    fn flags_have_one_row() {
        let rows = reference_for("center").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0].css,
            "display: flex;\njustify-content: center;\nalign-items: center;"
        );
    }

    #[test]
    fn unknown_name() {
        assert!(reference_for("zzz").is_none());
    }

    #[test]
    fn sections_cover_catalog() {
        let sections = sections();
        assert_eq!(sections[0].title, "Layout");
        assert!(
            sections
                .iter()
                .flat_map(|section| &section.entries)
                .any(|entry| entry.name == "bg-c" && entry.rows.len() == 225)
        );
    }
}
