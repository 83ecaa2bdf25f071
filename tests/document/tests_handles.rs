//! Handle stability across re-parses.

use pretty_assertions::assert_eq;

use modelica::Span;
use modelica::document::DocumentError;

use crate::helpers::document_helpers::{class, document, endpoints};
use crate::helpers::source_fixtures::*;

#[test]
fn test_class_accessors() {
    let doc = document(CIRCUIT);
    let circuit = class(&doc, "Circuit");
    assert_eq!(circuit.id().unwrap(), "Circuit");
    assert_eq!(circuit.long_class_specifier().unwrap(), "Circuit");
    assert_eq!(circuit.prefixes().unwrap(), "model");
    let text = circuit.text().unwrap();
    assert!(text.starts_with("model Circuit"));
    assert!(text.ends_with("end Circuit"));
    assert_eq!(circuit.span().unwrap(), Span::from_coords(1, 0, 18, 11));
}

#[test]
fn test_component_accessors() {
    let doc = document(CIRCUIT);
    let circuit = class(&doc, "Circuit");
    let components = circuit.component_clauses().unwrap();
    let ids: Vec<_> = components.iter().map(|c| c.id().unwrap()).collect();
    assert_eq!(
        ids,
        vec![
            "Circuit::SI.Resistance::R",
            "Circuit::SI.Capacitance::C",
            "Circuit::Modelica.Electrical.Analog.Sources.SineVoltage::source",
            "Circuit::Modelica.Electrical.Analog.Basic.Resistor::resistor",
            "Circuit::Modelica.Electrical.Analog.Basic.Capacitor::capacitor",
            "Circuit::Modelica.Electrical.Analog.Basic.Ground::ground",
        ]
    );
    assert_eq!(components[0].type_specifier().unwrap(), "SI.Resistance");
    assert_eq!(components[0].names().unwrap(), vec!["R"]);
    assert_eq!(components[5].text().unwrap(), "Modelica.Electrical.Analog.Basic.Ground ground");
}

#[test]
fn test_connection_accessors() {
    let doc = document(CIRCUIT);
    let circuit = class(&doc, "Circuit");
    assert_eq!(
        endpoints(&circuit),
        vec![
            ("source.p".to_string(), "resistor.p".to_string()),
            ("resistor.n".to_string(), "capacitor.p".to_string()),
            ("capacitor.n".to_string(), "ground.p".to_string()),
            ("source.n".to_string(), "ground.p".to_string()),
        ]
    );
    let wires = circuit.connect_clauses().unwrap();
    assert_eq!(wires[1].text().unwrap(), "connect(resistor.n, capacitor.p)");
}

#[test]
fn test_members_belong_to_their_nearest_class() {
    let doc = document(NESTED_PACKAGE);
    let library = class(&doc, "Library");
    assert!(library.component_clauses().unwrap().is_empty());
    assert!(library.connect_clauses().unwrap().is_empty());

    let inner = class(&doc, "Inner");
    assert_eq!(inner.component_clauses().unwrap().len(), 1);
    assert_eq!(endpoints(&inner), vec![("v".to_string(), "w".to_string())]);
}

#[test]
fn test_handles_rebind_after_reparse() {
    let doc = document(TWO_MODELS);
    let a = class(&doc, "A");
    let wire = a.connect_clauses().unwrap().remove(0);

    // Same units, moved and reformatted
    doc.parse("model B\nend B;\n\nmodel A\n  Pin p;\n  Pin n;\nequation\n  connect( p ,n );\nend A;\n")
        .unwrap();
    assert!(a.is_valid());
    assert!(wire.is_valid());
    assert_eq!(wire.text().unwrap(), "connect( p ,n )");
    assert_eq!(a.span().unwrap().start.line, 3);
}

#[test]
fn test_stale_handles_fail_every_accessor() {
    let doc = document(TWO_MODELS);
    let a = class(&doc, "A");
    let component = a.component_clauses().unwrap().remove(0);
    let wire = a.connect_clauses().unwrap().remove(0);

    doc.parse("model B\nend B;\n").unwrap();
    assert!(!a.is_valid());
    assert!(!component.is_valid());
    assert!(!wire.is_valid());

    assert!(matches!(a.text(), Err(DocumentError::StaleHandle { method: "text", .. })));
    assert!(matches!(a.component_clauses(), Err(DocumentError::StaleHandle { .. })));
    assert!(matches!(a.add_connect_clause("x", "y"), Err(DocumentError::StaleHandle { .. })));
    assert!(matches!(component.names(), Err(DocumentError::StaleHandle { .. })));
    assert!(matches!(wire.source(), Err(DocumentError::StaleHandle { .. })));
    assert!(matches!(wire.remove(), Err(DocumentError::StaleHandle { .. })));
}

#[test]
fn test_class_vanishing_deactivates_members_even_if_text_reappears_elsewhere() {
    let doc = document(TWO_MODELS);
    let a = class(&doc, "A");
    let wire = a.connect_clauses().unwrap().remove(0);

    // connect(p, n) still exists, but in class C
    doc.parse("model C\nequation\n  connect(p, n);\nend C;\n").unwrap();
    assert!(!a.is_valid());
    assert!(!wire.is_valid());
}

#[test]
fn test_reappearing_units_revive_old_handles() {
    let doc = document(TWO_MODELS);
    let b = class(&doc, "B");
    let wire = b.connect_clauses().unwrap().remove(0);

    doc.parse("model A\nend A;\n").unwrap();
    assert!(!b.is_valid());
    doc.parse(TWO_MODELS).unwrap();
    assert!(b.is_valid());
    assert!(wire.is_valid());
    assert_eq!(class(&doc, "B"), b);
}

#[test]
fn test_handles_do_not_keep_document_alive() {
    let doc = document(FOO_MODEL);
    let foo = class(&doc, "Foo");
    let x = foo.component_clauses().unwrap().remove(0);
    drop(doc);
    assert!(!foo.is_valid());
    assert!(!x.is_valid());
    assert!(matches!(foo.id(), Err(DocumentError::StaleHandle { .. })));
}

#[test]
fn test_duplicate_identity_binds_last_declaration() {
    let doc = document("model M\n  Real x;\n  Real x(start = 1);\nend M;\n");
    let m = class(&doc, "M");
    let components = m.component_clauses().unwrap();
    assert_eq!(components.len(), 1);
    assert_eq!(components[0].text().unwrap(), "Real x(start = 1)");
}
