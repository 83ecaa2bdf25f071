//! Helpers for building documents and inspecting handles.

use modelica::document::{ClassDefinition, ConnectClause, Document};

/// Parse `source`, panicking with the error if it is rejected.
pub fn document(source: &str) -> Document {
    match Document::new(source) {
        Ok(doc) => doc,
        Err(e) => panic!("fixture failed to parse: {e}\n{source}"),
    }
}

/// Class handle by name, panicking if absent.
pub fn class(doc: &Document, name: &str) -> ClassDefinition {
    doc.class_definition_by_name(name)
        .unwrap_or_else(|e| panic!("class {name} not found: {e}"))
}

/// Ids of the document's active classes, in order.
pub fn class_ids(doc: &Document) -> Vec<String> {
    doc.class_definitions()
        .iter()
        .map(|c| c.id().unwrap())
        .collect()
}

/// `(source, target)` of every connection of a class, in order.
pub fn endpoints(class: &ClassDefinition) -> Vec<(String, String)> {
    class
        .connect_clauses()
        .unwrap()
        .iter()
        .map(|c: &ConnectClause| (c.source().unwrap(), c.target().unwrap()))
        .collect()
}
