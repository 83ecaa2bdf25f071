//! Document lifecycle: loading, re-parsing, class discovery.

use std::io::Write;

use pretty_assertions::assert_eq;
use rstest::rstest;

use modelica::document::{Document, DocumentError, EditOptions};

use crate::helpers::document_helpers::{class, class_ids, document, endpoints};
use crate::helpers::source_fixtures::*;

#[rstest]
#[case(FOO_MODEL, &["Foo"])]
#[case(TWO_MODELS, &["A", "B"])]
#[case(CIRCUIT, &["Circuit"])]
#[case(NESTED_PACKAGE, &["Library", "Inner", "Other"])]
#[case(BLOCK_COMMENTS, &["Commented"])]
#[case("", &[])]
fn test_class_discovery(#[case] source: &str, #[case] expected: &[&str]) {
    let doc = document(source);
    assert_eq!(doc.text(), source);
    assert_eq!(class_ids(&doc), expected);
}

#[test]
fn test_block_comments_are_trivia() {
    let doc = document(BLOCK_COMMENTS);
    let commented = class(&doc, "Commented");
    let names: Vec<_> = commented
        .component_clauses()
        .unwrap()
        .iter()
        .map(|c| c.id().unwrap())
        .collect();
    assert_eq!(names, vec!["Commented::Real::x", "Commented::Pin::p", "Commented::Pin::n"]);
    assert_eq!(endpoints(&commented), vec![("p".to_string(), "n".to_string())]);

    doc.parse("model M /* a ** b */
end M;
").unwrap();
    assert_eq!(class_ids(&doc), vec!["M"]);
}

#[test]
fn test_unterminated_block_comment_is_syntax_error() {
    let err = Document::new("model M
  Real x; /* open
end M;
").unwrap_err();
    assert!(err.is_syntax(), "{err:?}");
}

#[test]
fn test_syntax_error_reports_line_and_column() {
    let err = Document::new("model A\n  Real x\nend A;\n").unwrap_err();
    match err {
        DocumentError::Syntax { line, column, message } => {
            assert_eq!((line, column), (3, 1));
            assert!(message.contains("';'"), "{message}");
        }
        other => panic!("expected syntax error, got {other:?}"),
    }
}

#[test]
fn test_failed_parse_leaves_document_unchanged() {
    let doc = document(TWO_MODELS);
    let b = class(&doc, "B");
    let wires = b.connect_clauses().unwrap();

    let err = doc.parse("model B\n  Pin a\nend B;").unwrap_err();
    assert!(err.is_syntax());
    assert_eq!(doc.text(), TWO_MODELS);
    assert!(b.is_valid());
    assert!(wires.iter().all(|w| w.is_valid()));
}

#[test]
fn test_class_definition_by_name_not_found() {
    let doc = document(TWO_MODELS);
    let err = doc.class_definition_by_name("C").unwrap_err();
    assert!(
        matches!(&err, DocumentError::NotFound { id, .. } if id == "C"),
        "{err:?}"
    );
}

#[test]
fn test_vanished_class_is_not_found() {
    let doc = document(TWO_MODELS);
    doc.parse("model A\nend A;\n").unwrap();
    assert!(matches!(
        doc.class_definition_by_name("B"),
        Err(DocumentError::NotFound { .. })
    ));
    assert_eq!(class_ids(&doc), vec!["A"]);
}

#[test]
fn test_short_classes_are_not_units() {
    let doc = document("type Voltage = Real(unit = \"V\");\nmodel M\n  Voltage v;\nend M;\n");
    assert_eq!(class_ids(&doc), vec!["M"]);
}

#[test]
fn test_clones_share_state() {
    let doc = document(FOO_MODEL);
    let other = doc.clone();
    other.parse(TWO_MODELS).unwrap();
    assert_eq!(doc.text(), TWO_MODELS);
}

#[test]
fn test_from_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(CIRCUIT.as_bytes()).unwrap();
    let doc = Document::from_path(file.path()).unwrap();
    assert_eq!(doc.text(), CIRCUIT);
    assert_eq!(class_ids(&doc), vec!["Circuit"]);
}

#[test]
fn test_from_missing_path_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Document::from_path(dir.path().join("missing.mo")).unwrap_err();
    assert!(matches!(err, DocumentError::Io(_)), "{err:?}");
}

#[test]
fn test_print_tree() {
    let doc = document("model A end A;");
    let tree = doc.print_tree();
    assert!(tree.starts_with("rule:  stored_definition\n"), "{tree}");
    assert!(tree.contains("rule:  class_definition"));
    assert!(tree.contains("token: model"));
}

#[test]
fn test_with_options() {
    let options = EditOptions {
        tab_size: 4,
        insert_spaces: false,
    };
    let doc = Document::with_options(FOO_MODEL, options).unwrap();
    assert_eq!(doc.options(), options);
}

#[test]
fn test_live_units_counts_every_kind() {
    let doc = document(TWO_MODELS);
    assert_eq!(doc.live_units(), 2);
    let b = class(&doc, "B");
    b.component_clauses().unwrap();
    b.connect_clauses().unwrap();
    assert_eq!(doc.live_units(), 2 + 3 + 2);
}
