//! Pattern queries over parsed fixtures.

use modelica::parser::{AstNode, Pattern, ast, parse};
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::helpers::source_fixtures::*;

fn count(source: &str, pattern: &str) -> usize {
    let root = parse(source).syntax();
    Pattern::parse(pattern).unwrap().find_all(&root).len()
}

#[rstest]
#[case(CIRCUIT, "//class_definition", 1)]
#[case(CIRCUIT, "//component_clause", 6)]
#[case(CIRCUIT, "//equation_section", 2)]
#[case(CIRCUIT, "//equation_section//connect_clause", 4)]
#[case(CIRCUIT, "//annotation_clause", 3)]
#[case(NESTED_PACKAGE, "//class_definition", 3)]
#[case(NESTED_PACKAGE, "/class_definition", 1)]
#[case(NESTED_PACKAGE, "//class_definition//class_definition", 2)]
#[case(TWO_MODELS, "//connect_clause/component_reference", 6)]
fn test_pattern_counts(#[case] source: &str, #[case] pattern: &str, #[case] expected: usize) {
    assert_eq!(count(source, pattern), expected, "{pattern}");
}

#[test]
fn test_matches_cast_to_typed_nodes() {
    let root = parse(TWO_MODELS).syntax();
    let connects: Vec<_> = Pattern::parse("//connect_clause")
        .unwrap()
        .find_all(&root)
        .into_iter()
        .filter_map(ast::ConnectClause::cast)
        .map(|c| format!("{}->{}", c.source().unwrap().text(), c.target().unwrap().text()))
        .collect();
    assert_eq!(connects, vec!["p->n", "a->b", "b->c"]);
}

#[test]
fn test_pattern_scoped_to_subtree() {
    let root = parse(NESTED_PACKAGE).syntax();
    let other = Pattern::parse("//class_definition")
        .unwrap()
        .find_all(&root)
        .into_iter()
        .filter_map(ast::ClassDefinition::cast)
        .find(|c| c.name().as_deref() == Some("Other"))
        .unwrap();
    let found = Pattern::parse("//component_clause").unwrap().find_all(other.syntax());
    assert_eq!(found.len(), 1);
}
