//! End-to-end editing guarantees.

use pretty_assertions::assert_eq;
use rstest::rstest;

use modelica::document::DocumentError;

use crate::helpers::document_helpers::{class, class_ids, document, endpoints};
use crate::helpers::source_fixtures::*;

#[rstest]
#[case(FOO_MODEL)]
#[case(TWO_MODELS)]
#[case(CIRCUIT)]
#[case(NESTED_PACKAGE)]
#[case(INITIAL_ONLY)]
fn test_reparse_of_own_text_keeps_class_set(#[case] source: &str) {
    let doc = document(source);
    let before = class_ids(&doc);
    let handles = doc.class_definitions();
    doc.parse(&doc.text()).unwrap();
    assert_eq!(class_ids(&doc), before);
    assert!(handles.iter().all(|h| h.is_valid()));
    assert_eq!(doc.class_definitions(), handles);
}

#[test]
fn test_edit_in_one_class_keeps_other_class_handles() {
    let doc = document(TWO_MODELS);
    let a = class(&doc, "A");
    let wire = class(&doc, "B").connect_clauses().unwrap().remove(0);
    let (source, target) = (wire.source().unwrap(), wire.target().unwrap());

    a.add_component_clause("Pin extra;").unwrap();

    assert!(wire.is_valid());
    assert_eq!(wire.source().unwrap(), source);
    assert_eq!(wire.target().unwrap(), target);
}

#[test]
fn test_added_class_is_found_by_name() {
    let doc = document(TWO_MODELS);
    doc.add_class_definition("model Foo\nend Foo;").unwrap();
    let foo = doc.class_definition_by_name("Foo").unwrap();
    assert_eq!(foo.long_class_specifier().unwrap(), "Foo");
}

#[test]
fn test_second_identical_connection_is_rejected() {
    let doc = document(FOO_MODEL);
    let foo = class(&doc, "Foo");
    foo.add_connect_clause("a", "b").unwrap();
    let text = doc.text();

    let err = foo.add_connect_clause("a", "b").unwrap_err();
    assert!(matches!(err, DocumentError::Duplicate { .. }), "{err:?}");
    assert_eq!(foo.connect_clauses().unwrap().len(), 1);
    assert_eq!(doc.text(), text);
}

#[test]
fn test_removed_connection_handle_goes_stale() {
    let doc = document(FOO_MODEL);
    let foo = class(&doc, "Foo");
    foo.add_connect_clause("a", "b").unwrap();
    let wire = foo.connect_clauses().unwrap().remove(0);

    assert!(foo.remove_connect_clause("a", "b").unwrap());
    assert!(!wire.is_valid());
    assert!(!foo.remove_connect_clause("a", "b").unwrap());
}

#[test]
fn test_invalid_component_leaves_text_untouched() {
    let doc = document(FOO_MODEL);
    let foo = class(&doc, "Foo");
    let err = foo.add_component_clause("not valid modelica <<<").unwrap_err();
    assert!(err.is_syntax(), "{err:?}");
    assert_eq!(doc.text(), FOO_MODEL);
}

#[test]
fn test_add_component_then_connect_then_disconnect() {
    let doc = document(FOO_MODEL);
    let foo = class(&doc, "Foo");

    foo.add_component_clause("Real y;").unwrap();
    assert_eq!(foo.component_clauses().unwrap().len(), 2);

    foo.add_connect_clause("x", "y").unwrap();
    assert_eq!(endpoints(&foo), vec![("x".to_string(), "y".to_string())]);
    assert_eq!(
        doc.text(),
        "model Foo\n  Real x;\n  Real y;\nequation\n  connect(x, y);\nend Foo;\n"
    );

    assert!(foo.remove_connect_clause("x", "y").unwrap());
    assert!(foo.connect_clauses().unwrap().is_empty());
    assert_eq!(doc.text(), "model Foo\n  Real x;\n  Real y;\nequation\nend Foo;\n");
}
