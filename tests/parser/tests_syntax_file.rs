//! Whole-file parsing: losslessness and diagnostics.

use modelica::syntax::SyntaxFile;
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::helpers::source_fixtures::*;

#[rstest]
#[case(FOO_MODEL)]
#[case(TWO_MODELS)]
#[case(CIRCUIT)]
#[case(NESTED_PACKAGE)]
#[case(INITIAL_ONLY)]
#[case(NO_EQUATIONS)]
#[case(EMPTY_BODY)]
fn test_fixtures_parse_losslessly(#[case] source: &str) {
    let file = SyntaxFile::new(source);
    assert!(!file.has_errors(), "{:?}", file.errors());
    assert_eq!(file.source_text(), source);
}

#[rstest]
#[case("model A\n  Real x\nend A;", 3, 0)]
#[case("model A\nequation\n  x = ;\nend A;", 3, 6)]
#[case("model A end A", 1, 13)]
fn test_first_error_position(#[case] source: &str, #[case] line: usize, #[case] column: usize) {
    let file = SyntaxFile::new(source);
    let diagnostic = file.first_error().unwrap();
    assert_eq!(
        (diagnostic.position.line + 1, diagnostic.position.column),
        (line, column),
        "{}",
        diagnostic.message
    );
    assert_eq!(file.source_text(), source);
}

#[test]
fn test_within_clause() {
    let file = SyntaxFile::new(CIRCUIT);
    let within = file.stored_definition().unwrap().within().unwrap();
    assert_eq!(within.segments(), vec!["Examples"]);
}
