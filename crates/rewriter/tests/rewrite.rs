use ecss_compiler::{CompileOptions, GrammarErrorKind, compile};
use ecss_rewriter::{Location, RewriteError, Rewriter, parse_annotation, rewrite};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

const BUTTON: &str = r#"export function Button(props) {
  return html`<button class=${ecss`p-x=4 p-y=2 hover:bg-c=neutral-800`}>${props.label}</button>`;
}
"#;

#[test]
fn invocation_becomes_string_literal() {
    init();
    let rewritten = rewrite(BUTTON).unwrap();
    let classes = compile("p-x=4 p-y=2 hover:bg-c=neutral-800")
        .unwrap()
        .class_list();
    assert!(rewritten.code.contains(&format!("class=${{\"{classes}\"}}")));
    assert!(!rewritten.code.contains("ecss`"));
    assert_eq!(rewritten.manifest.len(), 5);
}

#[test]
fn annotation_lists_manifest() {
    init();
    let rewritten = rewrite(BUTTON).unwrap();
    assert!(rewritten.code.starts_with("/*ecss: "));
    let from_code = parse_annotation(&rewritten.code);
    let from_manifest: Vec<_> = rewritten.manifest.ids().cloned().collect();
    assert_eq!(from_code, from_manifest);
}

#[test]
fn module_without_invocations_is_untouched() {
    init();
    let source = "export const answer = 42;\n";
    let rewritten = rewrite(source).unwrap();
    assert_eq!(rewritten.code, source);
    assert!(rewritten.manifest.is_empty());
}

#[test]
fn shared_utilities_listed_once() {
    init();
    let source = "a(ecss`m-t=8 p=2`);\nb(ecss`m-t=8`);\n";
    let rewritten = rewrite(source).unwrap();
    assert_eq!(rewritten.manifest.len(), 2);
    let id = &rewritten.manifest.rules()[0].id;
    assert!(rewritten.code.ends_with(&format!("b(\"{id}\");\n")));
}

#[test]
fn unterminated_marker_is_a_syntax_error() {
    init();
    let err = rewrite("const a = 1;\nconst b = ecss`p=4;\n").unwrap_err();
    let RewriteError::Syntax(syntax) = &err else {
        panic!("expected syntax error, got {err:?}");
    };
    assert_eq!(syntax.offset, 23);
    assert_eq!(err.location(), Location { line: 2, column: 11 });
}

#[test]
fn grammar_error_is_rebased_to_module() {
    init();
    let source = "x;\nconst a = ecss`p=4 zzz=1`;";
    let err = rewrite(source).unwrap_err();
    let RewriteError::Grammar { error, location } = &err else {
        panic!("expected grammar error, got {err:?}");
    };
    assert_eq!(error.kind, GrammarErrorKind::UnknownShorthand("zzz".into()));
    assert_eq!(&source[error.span.start..error.span.end], "zzz=1");
    assert_eq!(*location, Location { line: 2, column: 20 });
}

#[test]
fn custom_marker_and_prefix() {
    init();
    let rewriter = Rewriter::new(
        CompileOptions {
            class_prefix: "u".into(),
        },
        "css",
    );
    let rewritten = rewriter.rewrite("el(css`block`, ecss`flex`)").unwrap();
    assert!(rewritten.code.contains("el(\"u"));
    assert!(rewritten.code.contains("ecss`flex`"));
    assert_eq!(rewritten.manifest.len(), 1);
}

#[test]
fn placeholder_only_invocation_is_rejected() {
    init();
    let err = rewrite("x(ecss`(_ @lg):(p=(_ _))`)").unwrap_err();
    let RewriteError::Grammar { error, .. } = &err else {
        panic!("expected grammar error, got {err:?}");
    };
    assert_eq!(error.kind, GrammarErrorKind::NoDeclarations);
    assert_eq!(error.span.start, 7);
}
