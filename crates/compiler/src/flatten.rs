//! Expansion of prefix branches, property lists and responsive groups into
//! flat directives.

use crate::ast::{Expr, Util, UtilTree, Value, ValueOrGroup, Variant};
use crate::error::{GrammarError, GrammarErrorKind, GrammarResult, Span};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DirectiveBody {
    /// Catalog shorthand with its full (prefix-joined) name.
    Utility { name: String, value: Option<Value> },
    /// Bracketed CSS declarations written as a directive.
    RawCss(String),
}

/// One directive after every grouping construct has been expanded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlatDirective {
    /// Outermost first, as written.
    pub modifiers: Vec<Variant>,
    pub body: DirectiveBody,
    pub span: Span,
}

#[derive(Clone, Default)]
struct Scope {
    modifiers: Vec<Variant>,
    group: Vec<Option<Variant>>,
    prefix: String,
}

/// Flatten a parsed invocation, preserving source order.
///
/// # Errors
///
/// Fails on value groups whose length does not match the enclosing responsive
/// group, on value groups outside any responsive group, and on nested
/// responsive groups.
pub fn flatten(exprs: &[Expr]) -> GrammarResult<Vec<FlatDirective>> {
    let mut out = Vec::new();
    let scope = Scope::default();
    for expr in exprs {
        flatten_expr(expr, &scope, &mut out)?;
    }
    Ok(out)
}

fn flatten_expr(expr: &Expr, scope: &Scope, out: &mut Vec<FlatDirective>) -> GrammarResult<()> {
    match expr {
        Expr::Variant {
            variants,
            variant_group,
            exprs,
            span,
        } => {
            let mut inner = scope.clone();
            inner.modifiers.extend(variants.iter().cloned());
            if !variant_group.is_empty() {
                if !scope.group.is_empty() {
                    return Err(GrammarError::new(
                        GrammarErrorKind::NestedResponsiveGroup,
                        *span,
                    ));
                }
                inner.group.clone_from(variant_group);
            }
            for child in exprs {
                flatten_expr(child, &inner, out)?;
            }
            Ok(())
        }
        Expr::RawCss { css, span } => {
            out.push(FlatDirective {
                modifiers: scope.modifiers.clone(),
                body: DirectiveBody::RawCss(css.clone()),
                span: *span,
            });
            Ok(())
        }
        Expr::Util(util) => flatten_util(util, scope, out),
    }
}

fn flatten_util(util: &Util, scope: &Scope, out: &mut Vec<FlatDirective>) -> GrammarResult<()> {
    for property in &util.properties {
        let name = format!("{}{property}", scope.prefix);
        match &util.tree {
            UtilTree::Branch(children) => {
                let mut inner = scope.clone();
                inner.prefix = name;
                for child in children {
                    flatten_expr(child, &inner, out)?;
                }
            }
            UtilTree::Leaf(None) => out.push(FlatDirective {
                modifiers: scope.modifiers.clone(),
                body: DirectiveBody::Utility { name, value: None },
                span: util.span,
            }),
            UtilTree::Leaf(Some(ValueOrGroup::Value(value))) => out.push(FlatDirective {
                modifiers: scope.modifiers.clone(),
                body: DirectiveBody::Utility {
                    name,
                    value: Some(value.clone()),
                },
                span: util.span,
            }),
            UtilTree::Leaf(Some(ValueOrGroup::Group(values))) => {
                if values.len() != scope.group.len() {
                    return Err(GrammarError::new(
                        GrammarErrorKind::GroupArity {
                            expected: scope.group.len(),
                            found: values.len(),
                        },
                        util.span,
                    ));
                }
                for (slot, value) in scope.group.iter().zip(values) {
                    let Some(value) = value else { continue };
                    let mut modifiers = scope.modifiers.clone();
                    modifiers.extend(slot.iter().cloned());
                    out.push(FlatDirective {
                        modifiers,
                        body: DirectiveBody::Utility {
                            name: name.clone(),
                            value: Some(value.clone()),
                        },
                        span: util.span,
                    });
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn flat(text: &str) -> Vec<FlatDirective> {
        flatten(&parse(text).unwrap()).unwrap()
    }

    fn names(directives: &[FlatDirective]) -> Vec<(String, Option<String>)> {
        directives
            .iter()
            .filter_map(|directive| match &directive.body {
                DirectiveBody::Utility { name, value } => {
                    Some((name.clone(), value.as_ref().map(|val| val.text().to_owned())))
                }
                DirectiveBody::RawCss(_) => None,
            })
            .collect()
    }

    #[test]
    fn branch_joins_prefix() {
        assert_eq!(
            names(&flat("border-(bw=1 c=neutral-800)")),
            vec![
                ("border-bw".to_owned(), Some("1".to_owned())),
                ("border-c".to_owned(), Some("neutral-800".to_owned())),
            ]
        );
    }

    #[test]
    fn property_list_repeats_value() {
        assert_eq!(
            names(&flat("(p m)=4")),
            vec![
                ("p".to_owned(), Some("4".to_owned())),
                ("m".to_owned(), Some("4".to_owned())),
            ]
        );
    }

    #[test]
    fn responsive_group_assigns_breakpoints() {
        let directives = flat("(_ @lg):(grid-(c=(5 10)))");
        assert_eq!(directives.len(), 2);
        assert!(directives[0].modifiers.is_empty());
        assert_eq!(
            directives[1].modifiers,
            vec![Variant::Media(Value::Iden("lg".into()))]
        );
    }

    #[test]
    fn placeholder_skips_slot() {
        let directives = flat("(_ @md):(p=(_ 8))");
        assert_eq!(directives.len(), 1);
        assert_eq!(
            directives[0].modifiers,
            vec![Variant::Media(Value::Iden("md".into()))]
        );
    }

    #[test]
    fn outer_modifiers_reach_every_leaf() {
        let directives = flat("hover:(bg-c=black text-c=white)");
        assert_eq!(directives.len(), 2);
        for directive in directives {
            assert_eq!(
                directive.modifiers,
                vec![Variant::Pseudo(Value::Iden("hover".into()))]
            );
        }
    }

    #[test]
    fn arity_mismatch() {
        let err = flatten(&parse("(_ @lg):(p=(1 2 3))").unwrap()).unwrap_err();
        assert_eq!(
            err.kind,
            GrammarErrorKind::GroupArity {
                expected: 2,
                found: 3
            }
        );
    }

    #[test]
    fn value_group_without_responsive_group() {
        let err = flatten(&parse("p=(1 2)").unwrap()).unwrap_err();
        assert_eq!(
            err.kind,
            GrammarErrorKind::GroupArity {
                expected: 0,
                found: 2
            }
        );
    }

    #[test]
    fn nested_responsive_groups_are_rejected() {
        let err = flatten(&parse("(_ @lg):((_ @md):(p=(1 2)))").unwrap()).unwrap_err();
        assert_eq!(err.kind, GrammarErrorKind::NestedResponsiveGroup);
    }
}
