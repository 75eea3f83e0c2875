use ecss_compiler::{Compilation, GrammarErrorKind, Modifier, compile};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn rendered(compilation: &Compilation) -> Vec<String> {
    compilation
        .declarations()
        .map(|decl| match decl.modifiers.media_query() {
            Some(query) => format!("@media {query} {{ {decl} }}"),
            None if decl.modifiers.is_empty() => decl.to_string(),
            None => format!("{} {decl}", decl.modifiers.selector_suffix()),
        })
        .collect()
}

fn css(text: &str) -> Vec<String> {
    rendered(&compile(text).unwrap())
}

#[test]
fn numeric_tokens_scale_to_quarter_rem() {
    init();
    assert_eq!(css("p=4"), ["padding: 1rem;"]);
    assert_eq!(css("p=10"), ["padding: 2.5rem;"]);
    assert_eq!(css("m-t=8"), ["margin-top: 2rem;"]);
    assert_eq!(css("gap=0"), ["gap: 0px;"]);
}

#[test]
fn ratios_scale_to_percentages() {
    init();
    assert_eq!(css("w=1/2"), ["width: 50%;"]);
    assert_eq!(css("h=full"), ["height: 100%;"]);
    assert_eq!(css("w=screen"), ["width: 100vw;"]);
    assert_eq!(css("h=screen"), ["height: 100vh;"]);
}

#[test]
fn branch_equals_separate_directives() {
    init();
    let grouped = compile("border-(bw=1 c=neutral-800)").unwrap();
    let separate = compile("border-bw=1 border-c=neutral-800").unwrap();
    assert_eq!(grouped, separate);
    assert_eq!(
        rendered(&grouped),
        ["border-bottom-width: 1px;", "border-color: #262626;"]
    );
}

#[test]
fn responsive_group_yields_base_and_breakpoint_rules() {
    init();
    let compilation = compile("(_ @lg):(grid-(c=(5 10)))").unwrap();
    assert_eq!(
        rendered(&compilation),
        [
            "grid-template-columns: repeat(5, minmax(0, 1fr));",
            "@media (min-width:1024px) { grid-template-columns: repeat(10, minmax(0, 1fr)); }",
        ]
    );
    let ids: Vec<_> = compilation.ids().collect();
    assert_ne!(ids[0], ids[1]);
}

#[test]
fn compiling_twice_is_identical() {
    init();
    let text = "p=4 hover:bg-c=neutral-900 (_ @md):(w=(full 1/2)) [white-space: pre]";
    assert_eq!(compile(text).unwrap(), compile(text).unwrap());
}

#[test]
fn whitespace_and_newlines_are_insignificant() {
    init();
    let compact = compile("p=4 m-t=2").unwrap();
    let spread = compile("\n    p=4\n\n    m-t=2\n  ").unwrap();
    assert_eq!(compact.class_list(), spread.class_list());
}

#[test]
fn modifier_order_does_not_matter() {
    init();
    let one = compile("hover:@md:bg-c=black").unwrap();
    let two = compile("@md:hover:bg-c=black").unwrap();
    assert_eq!(one.class_list(), two.class_list());

    let modifiers: Vec<&Modifier> = one.rules[0].declaration.modifiers.iter().collect();
    assert_eq!(
        modifiers,
        [
            &Modifier::PseudoClass(":hover".into()),
            &Modifier::Media("(min-width:768px)".into()),
        ]
    );
}

#[test]
fn pseudo_and_media_combine() {
    init();
    assert_eq!(
        css("@dark:hover:text-c=white"),
        ["@media (prefers-color-scheme: dark) { color: #ffffff; }"]
    );
    assert_eq!(css("first:m-t=0"), [":first-child margin-top: 0px;"]);
}

#[test]
fn same_declaration_same_identifier_everywhere() {
    init();
    let alone = compile("m-t=8").unwrap();
    let mixed = compile("p=1 m-t=8 block").unwrap();
    assert_eq!(alone.rules[0].id, mixed.rules[1].id);
}

#[test]
fn bracket_values_pass_through_unscaled() {
    init();
    assert_eq!(css("p=[3px]"), ["padding: 3px;"]);
    assert_eq!(css("bg-c=[#0f0f0f]"), ["background-color: #0f0f0f;"]);
}

#[test]
fn unknown_shorthand_is_reported_with_span() {
    init();
    let err = compile("p=1 zzz=1").unwrap_err();
    assert_eq!(err.kind, GrammarErrorKind::UnknownShorthand("zzz".into()));
    assert_eq!((err.span.start, err.span.end), (4, 9));
}

#[test]
fn malformed_tokens_are_errors() {
    init();
    assert!(matches!(
        compile("w=1/").unwrap_err().kind,
        GrammarErrorKind::InvalidValue { .. }
    ));
    assert_eq!(
        compile("bg-c=[#fff").unwrap_err().kind,
        GrammarErrorKind::UnterminatedBracket
    );
    assert_eq!(
        compile("border-(bw=1").unwrap_err().kind,
        GrammarErrorKind::UnterminatedGroup
    );
    assert_eq!(compile("").unwrap_err().kind, GrammarErrorKind::EmptyInvocation);
}
