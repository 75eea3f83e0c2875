//! The utility catalog, grouped the way documentation presents it.

use super::values::ValueGen as Gen;

#[derive(Debug)]
pub enum UtilityKind {
    /// Takes no value; always emits these declarations.
    Flag(&'static [(&'static str, &'static str)]),
    /// Takes a value resolved by the first accepting generator; emits one
    /// declaration per property.
    Valued {
        properties: &'static [&'static str],
        values: &'static [Gen],
    },
    /// `font-s`: a named size also sets its paired line height.
    FontSize,
}

#[derive(Debug)]
pub struct Utility {
    pub name: &'static str,
    pub kind: UtilityKind,
}

#[derive(Debug)]
pub struct Section {
    pub title: &'static str,
    pub utilities: &'static [Utility],
}

const fn flag(name: &'static str, decls: &'static [(&'static str, &'static str)]) -> Utility {
    Utility {
        name,
        kind: UtilityKind::Flag(decls),
    }
}

const fn valued(
    name: &'static str,
    properties: &'static [&'static str],
    values: &'static [Gen],
) -> Utility {
    Utility {
        name,
        kind: UtilityKind::Valued { properties, values },
    }
}

const EASE_DEFAULT: (&str, &str) = ("transition-timing-function", "cubic-bezier(0.4,0,0.2,1)");
const DURATION_DEFAULT: (&str, &str) = ("transition-duration", "150ms");

pub static CATALOG: &[Section] = &[
    Section {
        title: "Layout",
        utilities: &[
            flag(
                "center",
                &[
                    ("display", "flex"),
                    ("justify-content", "center"),
                    ("align-items", "center"),
                ],
            ),
            flag("block", &[("display", "block")]),
            flag("inline-block", &[("display", "inline-block")]),
            flag("inline", &[("display", "inline")]),
            flag("flex", &[("display", "flex")]),
            flag("inline-flex", &[("display", "inline-flex")]),
            flag("grid", &[("display", "grid")]),
            flag("inline-grid", &[("display", "inline-grid")]),
            flag("hidden", &[("display", "none")]),
            valued("overflow", &["overflow"], &[Gen::Overflow]),
            valued("overflow-x", &["overflow-x"], &[Gen::Overflow]),
            valued("overflow-y", &["overflow-y"], &[Gen::Overflow]),
            flag("visible", &[("visibility", "visible")]),
            flag("invisible", &[("visibility", "hidden")]),
        ],
    },
    Section {
        title: "Positioning",
        utilities: &[
            flag("static", &[("position", "static")]),
            flag("fixed", &[("position", "fixed")]),
            flag("absolute", &[("position", "absolute")]),
            flag("relative", &[("position", "relative")]),
            flag("sticky", &[("position", "sticky")]),
            valued("t", &["top"], &[Gen::Auto, Gen::Spacing, Gen::Percentage]),
            valued("r", &["right"], &[Gen::Auto, Gen::Spacing, Gen::Percentage]),
            valued("b", &["bottom"], &[Gen::Auto, Gen::Spacing, Gen::Percentage]),
            valued("l", &["left"], &[Gen::Auto, Gen::Spacing, Gen::Percentage]),
            valued("z", &["z-index"], &[Gen::Auto, Gen::Number("")]),
        ],
    },
    Section {
        title: "Flexbox & Grid",
        utilities: &[
            valued("flex", &["flex"], &[Gen::Flex]),
            valued("flex-b", &["flex-basis"], &[Gen::Spacing, Gen::Percentage]),
            valued("flex-d", &["flex-direction"], &[Gen::FlexDirection]),
            valued("flex-w", &["flex-wrap"], &[Gen::FlexWrap]),
            valued("flex-g", &["flex-grow"], &[Gen::FlexFactor]),
            valued("flex-s", &["flex-shrink"], &[Gen::FlexFactor]),
            valued("grid-c", &["grid-template-columns"], &[Gen::GridTracks]),
            valued("grid-r", &["grid-template-rows"], &[Gen::GridTracks]),
            valued("gap", &["gap"], &[Gen::Spacing]),
            valued("gap-x", &["column-gap"], &[Gen::Spacing]),
            valued("gap-y", &["row-gap"], &[Gen::Spacing]),
            valued("justify-c", &["justify-content"], &[Gen::JustifyContent]),
            valued("justify-i", &["justify-items"], &[Gen::JustifyItems]),
            valued("justify-s", &["justify-self"], &[Gen::JustifyItems, Gen::Auto]),
            valued("align-c", &["align-content"], &[Gen::JustifyContent]),
            valued("align-i", &["align-items"], &[Gen::AlignItems]),
            valued("align-s", &["align-self"], &[Gen::AlignItems, Gen::Auto]),
        ],
    },
    Section {
        title: "Spacing",
        utilities: &[
            valued("p", &["padding"], &[Gen::Spacing]),
            valued("p-t", &["padding-top"], &[Gen::Spacing]),
            valued("p-r", &["padding-right"], &[Gen::Spacing]),
            valued("p-b", &["padding-bottom"], &[Gen::Spacing]),
            valued("p-l", &["padding-left"], &[Gen::Spacing]),
            valued("p-x", &["padding-left", "padding-right"], &[Gen::Spacing]),
            valued("p-y", &["padding-top", "padding-bottom"], &[Gen::Spacing]),
            valued("m", &["margin"], &[Gen::Spacing, Gen::Auto]),
            valued("m-t", &["margin-top"], &[Gen::Spacing, Gen::Auto]),
            valued("m-r", &["margin-right"], &[Gen::Spacing, Gen::Auto]),
            valued("m-b", &["margin-bottom"], &[Gen::Spacing, Gen::Auto]),
            valued("m-l", &["margin-left"], &[Gen::Spacing, Gen::Auto]),
            valued("m-x", &["margin-left", "margin-right"], &[Gen::Spacing, Gen::Auto]),
            valued("m-y", &["margin-top", "margin-bottom"], &[Gen::Spacing, Gen::Auto]),
        ],
    },
    Section {
        title: "Sizing",
        utilities: &[
            valued("w", &["width"], &[Gen::Spacing, Gen::Percentage, Gen::Screen("100vw")]),
            valued("h", &["height"], &[Gen::Spacing, Gen::Percentage, Gen::Screen("100vh")]),
            valued("max-w", &["max-width"], &[Gen::MaxWidth]),
        ],
    },
    Section {
        title: "Typography",
        utilities: &[
            valued("font-f", &["font-family"], &[Gen::FontFamily]),
            Utility {
                name: "font-s",
                kind: UtilityKind::FontSize,
            },
            valued("font-w", &["font-weight"], &[Gen::FontWeight]),
            valued("line-h", &["line-height"], &[Gen::LineHeight, Gen::Spacing]),
            flag("list-none", &[("list-style-type", "none")]),
            flag("list-disc", &[("list-style-type", "disc")]),
            flag("list-decimal", &[("list-style-type", "decimal")]),
            flag("list-inside", &[("list-style-position", "inside")]),
            flag("list-outside", &[("list-style-position", "outside")]),
            flag("font-italic", &[("font-style", "italic")]),
            flag("font-not-italic", &[("font-style", "normal")]),
            flag(
                "antialiased",
                &[
                    ("-webkit-font-smoothing", "antialiased"),
                    ("-moz-osx-font-smoothing", "grayscale"),
                ],
            ),
            flag(
                "subpixel-antialiased",
                &[
                    ("-webkit-font-smoothing", "auto"),
                    ("-moz-osx-font-smoothing", "auto"),
                ],
            ),
            valued("text-a", &["text-align"], &[Gen::TextAlign]),
            valued("text-c", &["color"], &[Gen::Color]),
            flag("text-underline", &[("text-decoration", "underline")]),
            flag("text-line-through", &[("text-decoration", "line-through")]),
            flag("text-no-underline", &[("text-decoration", "none")]),
            flag("text-uppercase", &[("text-transform", "uppercase")]),
            flag("text-lowercase", &[("text-transform", "lowercase")]),
            flag("text-capitalize", &[("text-transform", "capitalize")]),
            flag("text-normal-case", &[("text-transform", "none")]),
        ],
    },
    Section {
        title: "Backgrounds",
        utilities: &[valued("bg-c", &["background-color"], &[Gen::Color])],
    },
    Section {
        title: "Borders",
        utilities: &[
            valued("border-r", &["border-radius"], &[Gen::BorderRadius]),
            valued("border-w", &["border-width"], &[Gen::Number("px")]),
            valued("border-lw", &["border-left-width"], &[Gen::Number("px")]),
            valued("border-rw", &["border-right-width"], &[Gen::Number("px")]),
            valued("border-tw", &["border-top-width"], &[Gen::Number("px")]),
            valued("border-bw", &["border-bottom-width"], &[Gen::Number("px")]),
            valued("border-c", &["border-color"], &[Gen::Color]),
            flag("border-solid", &[("border-style", "solid")]),
            flag("border-dashed", &[("border-style", "dashed")]),
            flag("border-dotted", &[("border-style", "dotted")]),
            flag("border-double", &[("border-style", "double")]),
            flag("border-hidden", &[("border-style", "hidden")]),
            flag("border-none", &[("border-style", "none")]),
        ],
    },
    Section {
        title: "Transitions",
        utilities: &[
            flag("transition-none", &[("transition-property", "none")]),
            flag(
                "transition-all",
                &[("transition-property", "all"), EASE_DEFAULT, DURATION_DEFAULT],
            ),
            flag(
                "transition",
                &[
                    (
                        "transition-property",
                        "background-color,border-color,color,fill,stroke,opacity,box-shadow,transform,filter,backdrop-filter",
                    ),
                    EASE_DEFAULT,
                    DURATION_DEFAULT,
                ],
            ),
            flag(
                "transition-colors",
                &[
                    (
                        "transition-property",
                        "background-color,border-color,color,fill,stroke",
                    ),
                    EASE_DEFAULT,
                    DURATION_DEFAULT,
                ],
            ),
            flag(
                "transition-opacity",
                &[("transition-property", "opacity"), EASE_DEFAULT, DURATION_DEFAULT],
            ),
            flag(
                "transition-shadow",
                &[("transition-property", "box-shadow"), EASE_DEFAULT, DURATION_DEFAULT],
            ),
            flag(
                "transition-transform",
                &[("transition-property", "transform"), EASE_DEFAULT, DURATION_DEFAULT],
            ),
            valued("transition-duration", &["transition-duration"], &[Gen::Number("ms")]),
            valued("transition-delay", &["transition-delay"], &[Gen::Number("ms")]),
            valued("transition-ease", &["transition-timing-function"], &[Gen::Easing]),
        ],
    },
    Section {
        title: "Interactivity",
        utilities: &[flag("appearance-none", &[("appearance", "none")])],
    },
];

impl Utility {
    /// Whether the utility is written with `=value`.
    pub const fn takes_value(&self) -> bool {
        !matches!(self.kind, UtilityKind::Flag(_))
    }

    /// Real CSS properties this utility sets.
    pub fn properties(&self) -> Vec<&'static str> {
        match &self.kind {
            UtilityKind::Flag(decls) => decls.iter().map(|(property, _)| *property).collect(),
            UtilityKind::Valued { properties, .. } => properties.to_vec(),
            UtilityKind::FontSize => vec!["font-size", "line-height"],
        }
    }
}
