//! Mutations: validation, splice placement, relocation.

use pretty_assertions::assert_eq;
use rstest::rstest;

use modelica::document::{Document, DocumentError, EditOptions};

use crate::helpers::document_helpers::{class, class_ids, document, endpoints};
use crate::helpers::source_fixtures::*;

// =============================================================================
// add_class_definition
// =============================================================================

#[test]
fn test_add_class_after_last_class() {
    let doc = document(TWO_MODELS);
    let c = doc.add_class_definition("model C\nend C;").unwrap();
    assert_eq!(c.id().unwrap(), "C");
    assert_eq!(doc.text(), format!("{}\nmodel C\nend C;\n", TWO_MODELS));
    assert_eq!(class_ids(&doc), vec!["A", "B", "C"]);
}

#[test]
fn test_add_class_appends_missing_semicolon() {
    let doc = document("model A\nend A;");
    doc.add_class_definition("  block C\n  end C\n").unwrap();
    assert_eq!(doc.text(), "model A\nend A;\n\nblock C\n  end C;");
}

#[test]
fn test_add_class_to_empty_document() {
    let doc = document("");
    doc.add_class_definition("model Foo\nend Foo;").unwrap();
    assert_eq!(doc.text(), "model Foo\nend Foo;\n");

    let doc = document("within Lib;");
    doc.add_class_definition("model Foo\nend Foo;").unwrap();
    assert_eq!(doc.text(), "within Lib;\nmodel Foo\nend Foo;\n");
}

#[test]
fn test_add_class_keeps_trailing_comment_on_its_line() {
    let doc = document("model A\nend A; // first\n");
    doc.add_class_definition("model B\nend B;").unwrap();
    assert_eq!(doc.text(), "model A\nend A; // first\n\nmodel B\nend B;\n");
}

#[rstest]
#[case("type Voltage = Real(unit = \"V\");")]
#[case("type Colour = enumeration(red, green);")]
#[case("function f = der(g, x);")]
fn test_add_class_rejects_short_forms(#[case] snippet: &str) {
    let doc = document(TWO_MODELS);
    let err = doc.add_class_definition(snippet).unwrap_err();
    assert!(matches!(err, DocumentError::KindMismatch(_)), "{err:?}");
    assert_eq!(doc.text(), TWO_MODELS);
}

#[rstest]
#[case("model Foo")]
#[case("Real x;")]
#[case("model Foo end Foo; model Bar end Bar;")]
fn test_add_class_rejects_invalid_snippets(#[case] snippet: &str) {
    let doc = document(TWO_MODELS);
    let err = doc.add_class_definition(snippet).unwrap_err();
    assert!(err.is_syntax(), "{err:?}");
    assert_eq!(doc.text(), TWO_MODELS);
}

#[test]
fn test_add_existing_class_is_duplicate() {
    let doc = document(TWO_MODELS);
    let err = doc.add_class_definition("model A\nend A;").unwrap_err();
    assert!(matches!(err, DocumentError::Duplicate { .. }), "{err:?}");
    assert_eq!(doc.text(), TWO_MODELS);
}

// =============================================================================
// add_component_clause
// =============================================================================

#[test]
fn test_add_component_after_last_component() {
    let doc = document(TWO_MODELS);
    let a = class(&doc, "A");
    let ground = a.add_component_clause("Ground g").unwrap();
    assert_eq!(ground.id().unwrap(), "A::Ground::g");
    assert_eq!(ground.text().unwrap(), "Ground g");
    assert!(doc.text().starts_with("model A\n  Pin p;\n  Pin n;\n  Ground g;\nequation\n"));
}

#[test]
fn test_add_component_to_empty_body() {
    let doc = document(EMPTY_BODY);
    let empty = class(&doc, "Empty");
    empty.add_component_clause("Real x;").unwrap();
    assert_eq!(doc.text(), "model Empty \"nothing yet\"\n  Real x;\nequation\nend Empty;\n");
}

#[test]
fn test_add_component_with_trailing_comment_into_one_line_body() {
    let doc = document("model Foo Real x; equation end Foo;\n");
    let foo = class(&doc, "Foo");
    let y = foo.add_component_clause("Real y; // note").unwrap();
    assert_eq!(y.id().unwrap(), "Foo::Real::y");
    assert_eq!(doc.text(), "model Foo Real x;\n  Real y; // note\nequation end Foo;\n");
    assert_eq!(foo.component_clauses().unwrap().len(), 2);
}

#[test]
fn test_add_component_into_block_commented_class() {
    let doc = document(BLOCK_COMMENTS);
    let commented = class(&doc, "Commented");
    commented.add_component_clause("Real z; // spare").unwrap();
    assert!(
        doc.text().contains("  Pin n;\n  Real z; // spare\nequation\n"),
        "{}",
        doc.text()
    );
    commented.add_connect_clause("z", "x").unwrap();
    assert_eq!(endpoints(&commented).len(), 2);
}

#[test]
fn test_add_component_with_prefixes() {
    let doc = document(FOO_MODEL);
    let foo = class(&doc, "Foo");
    let k = foo.add_component_clause("parameter Real k = 2 \"gain\";").unwrap();
    assert_eq!(k.names().unwrap(), vec!["k"]);
    let world = foo.add_component_clause("inner World world").unwrap();
    assert_eq!(world.id().unwrap(), "Foo::World::world");
    assert_eq!(foo.component_clauses().unwrap().len(), 3);
}

#[test]
fn test_add_component_indents_nested_classes() {
    let doc = document(NESTED_PACKAGE);
    let other = class(&doc, "Other");
    other.add_component_clause("Real z;").unwrap();
    assert!(doc.text().contains("    Real w;\n    Real z;\n  end Other;"), "{}", doc.text());
}

#[test]
fn test_add_component_uses_edit_options() {
    let options = EditOptions {
        tab_size: 4,
        insert_spaces: false,
    };
    let doc = Document::with_options(FOO_MODEL, options).unwrap();
    class(&doc, "Foo").add_component_clause("Real y;").unwrap();
    assert_eq!(doc.text(), "model Foo\n  Real x;\n\tReal y;\nequation\nend Foo;\n");
}

#[test]
fn test_add_component_allows_duplicates() {
    let doc = document(FOO_MODEL);
    let foo = class(&doc, "Foo");
    let first = foo.component_clauses().unwrap().remove(0);
    let again = foo.add_component_clause("Real x;").unwrap();
    assert_eq!(again, first);
    assert_eq!(doc.text(), "model Foo\n  Real x;\n  Real x;\nequation\nend Foo;\n");
}

#[rstest]
#[case("import Modelica.Constants;")]
#[case("extends Base;")]
#[case("model Sub end Sub;")]
fn test_add_component_rejects_other_elements(#[case] snippet: &str) {
    let doc = document(FOO_MODEL);
    let err = class(&doc, "Foo").add_component_clause(snippet).unwrap_err();
    assert!(matches!(err, DocumentError::KindMismatch(_)), "{err:?}");
    assert_eq!(doc.text(), FOO_MODEL);
}

#[test]
fn test_add_component_rejects_multiple_clauses() {
    let doc = document(FOO_MODEL);
    let err = class(&doc, "Foo").add_component_clause("Real a; Real b;").unwrap_err();
    assert!(err.is_syntax(), "{err:?}");
    assert_eq!(doc.text(), FOO_MODEL);
}

// =============================================================================
// add_connect_clause / remove_connect_clause
// =============================================================================

#[test]
fn test_add_connection_after_last_equation() {
    let doc = document(TWO_MODELS);
    let b = class(&doc, "B");
    let wire = b.add_connect_clause("c", "a").unwrap();
    assert_eq!(wire.text().unwrap(), "connect(c, a)");
    assert!(doc.text().contains("  connect(b, c);\n  connect(c, a);\nend B;"));
}

#[test]
fn test_add_connection_normalizes_endpoints() {
    let doc = document(CIRCUIT);
    let circuit = class(&doc, "Circuit");
    let wire = circuit.add_connect_clause(" resistor . n ", "ground.p").unwrap();
    assert_eq!(wire.source().unwrap(), "resistor.n");
    let err = circuit.add_connect_clause("resistor.n", "ground . p").unwrap_err();
    assert!(matches!(err, DocumentError::Duplicate { .. }), "{err:?}");
}

#[test]
fn test_add_connection_goes_into_regular_section() {
    let doc = document(CIRCUIT);
    let circuit = class(&doc, "Circuit");
    circuit.add_connect_clause("capacitor.n", "source.n").unwrap();
    assert!(doc.text().contains(
        "  connect(source.n, ground.p);\n  connect(capacitor.n, source.n);\n  annotation(experiment"
    ));
}

#[test]
fn test_add_connection_falls_back_to_initial_section() {
    let doc = document(INITIAL_ONLY);
    class(&doc, "Init").add_connect_clause("x", "y").unwrap();
    assert_eq!(
        doc.text(),
        "model Init\n  Real x;\n  Real y;\ninitial equation\n  x = 0;\n  connect(x, y);\nend Init;\n"
    );
}

#[test]
fn test_add_connection_without_equation_section_is_structural() {
    let doc = document(NO_EQUATIONS);
    let err = class(&doc, "Plain").add_connect_clause("x", "y").unwrap_err();
    assert!(matches!(err, DocumentError::Structural(_)), "{err:?}");
    assert_eq!(doc.text(), NO_EQUATIONS);
}

#[rstest]
#[case("a,", "b")]
#[case("a", "")]
#[case("1 + 2", "b")]
fn test_add_connection_rejects_bad_endpoints(#[case] source: &str, #[case] target: &str) {
    let doc = document(FOO_MODEL);
    let err = class(&doc, "Foo").add_connect_clause(source, target).unwrap_err();
    assert!(err.is_syntax(), "{err:?}");
    assert_eq!(doc.text(), FOO_MODEL);
}

#[test]
fn test_remove_connection_text_layout() {
    let doc = document(TWO_MODELS);
    let b = class(&doc, "B");
    assert!(b.remove_connect_clause("a", "b").unwrap());
    assert!(doc.text().contains("equation\n  connect(b, c);\nend B;"), "{}", doc.text());
    assert_eq!(endpoints(&b), vec![("b".to_string(), "c".to_string())]);
}

#[test]
fn test_remove_connection_with_annotation() {
    let doc = document(CIRCUIT);
    let circuit = class(&doc, "Circuit");
    assert!(circuit.remove_connect_clause("source.p", "resistor.p").unwrap());
    assert!(!doc.text().contains("Line(points"));
    assert!(doc.text().contains("equation\n  connect(resistor.n, capacitor.p);"));
}

#[test]
fn test_remove_from_wrong_class_is_noop() {
    let doc = document(TWO_MODELS);
    let a = class(&doc, "A");
    assert!(!a.remove_connect_clause("a", "b").unwrap());
    assert_eq!(doc.text(), TWO_MODELS);
}

#[test]
fn test_connect_clause_remove_delegates_to_class() {
    let doc = document(TWO_MODELS);
    let b = class(&doc, "B");
    let wires = b.connect_clauses().unwrap();
    assert!(wires[1].remove().unwrap());
    assert!(!wires[1].is_valid());
    assert!(wires[0].is_valid());
    assert_eq!(b.connect_clauses().unwrap().len(), 1);
}

#[test]
fn test_mutations_rebind_every_class() {
    let doc = document(TWO_MODELS);
    let a = class(&doc, "A");
    let b = class(&doc, "B");
    let a_wire = a.connect_clauses().unwrap().remove(0);
    let b_components = b.component_clauses().unwrap();

    doc.add_class_definition("model C\nend C;").unwrap();
    a.add_connect_clause("n", "p").unwrap();
    b.remove_connect_clause("b", "c").unwrap();

    assert!(a_wire.is_valid());
    assert_eq!(a_wire.source().unwrap(), "p");
    assert!(b_components.iter().all(|c| c.is_valid()));
    assert_eq!(class_ids(&doc), vec!["A", "B", "C"]);
}
