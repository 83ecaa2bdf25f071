//! Rule parser tests: snippets parsed as a single grammar construct.

use modelica::parser::{Rule, SyntaxKind, parse_rule};
use rstest::rstest;

/// Helper to assert that a rule parses successfully
fn assert_rule_parses(rule: Rule, input: &str, desc: &str) {
    let result = parse_rule(rule, input);
    assert!(
        result.is_ok(),
        "Failed to parse {} as {:?}: {:?}\nInput: {}",
        desc,
        rule,
        result.errors(),
        input
    );
    assert_eq!(result.syntax().text().to_string(), input, "not lossless: {desc}");
}

fn assert_rule_fails(rule: Rule, input: &str, desc: &str) {
    let result = parse_rule(rule, input);
    assert!(!result.is_ok(), "Expected {} to fail as {:?}", desc, rule);
    assert_eq!(result.syntax().text().to_string(), input, "not lossless: {desc}");
}

// =============================================================================
// Class definitions
// =============================================================================

#[rstest]
#[case("model M end M;", "empty model")]
#[case("partial model M \"doc\"\n  Real x;\nend M", "partial with description")]
#[case("encapsulated package P\n  constant Real pi = 3.14;\nend P;", "encapsulated package")]
#[case("expandable connector Bus\nend Bus;", "expandable connector")]
#[case("operator record Complex\n  Real re;\n  Real im;\nend Complex;", "operator record")]
#[case("pure function f\n  input Real x;\n  output Real y;\nalgorithm\n  y := 2 * x;\nend f;", "function with algorithm")]
#[case("model extends Base(k = 1) \"refined\"\nend Base;", "extends form")]
#[case("type Voltage = Real(unit = \"V\");", "short class")]
#[case("type Mode = enumeration(off \"off\", on);", "enumeration")]
#[case("type Any = enumeration(:);", "open enumeration")]
#[case("function df = der(f, x, y);", "der specifier")]
#[case("function sin\n  input Real u;\n  output Real y;\nexternal \"C\" y = sin(u) annotation(Library = \"m\");\nend sin;", "external function")]
fn test_class_definition(#[case] input: &str, #[case] desc: &str) {
    assert_rule_parses(Rule::ClassDefinition, input, desc);
}

#[rstest]
#[case("model M", "missing end")]
#[case("model M end;", "end without name")]
#[case("Real x;", "component clause")]
#[case("model A end A; model B end B;", "two classes")]
fn test_class_definition_failures(#[case] input: &str, #[case] desc: &str) {
    assert_rule_fails(Rule::ClassDefinition, input, desc);
}

// =============================================================================
// Component clauses and elements
// =============================================================================

#[rstest]
#[case("Real x", "bare")]
#[case("Real x, y, z;", "several declarations")]
#[case("parameter Real k(min = 0) = 1 \"gain\";", "parameter with modifier")]
#[case("flow Modelica.SIunits.Current i;", "flow prefix")]
#[case("input Real u[3] annotation(Dialog(group = \"Inputs\"));", "input with annotation")]
#[case("Real[2, :] m;", "array type")]
#[case("Resistor r(R = 10, final T = 300) if useR;", "conditional with final modifier")]
#[case("Pump p(redeclare package Medium = Water);", "redeclare modifier")]
#[case(".Modelica.Blocks.Sources.Step step(height = 2, startTime = 1);", "global type")]
fn test_component_clause(#[case] input: &str, #[case] desc: &str) {
    assert_rule_parses(Rule::ComponentClause, input, desc);
}

#[rstest]
#[case("Real x; Real y;", "two clauses")]
#[case("x;", "no type")]
#[case("Real;", "no name")]
#[case("parameter x;", "prefix without type")]
fn test_component_clause_failures(#[case] input: &str, #[case] desc: &str) {
    assert_rule_fails(Rule::ComponentClause, input, desc);
}

#[rstest]
#[case("import SI = Modelica.SIunits;", SyntaxKind::IMPORT_CLAUSE)]
#[case("import Modelica.Math.*;", SyntaxKind::IMPORT_CLAUSE)]
#[case("import Modelica.Math.{sin, cos};", SyntaxKind::IMPORT_CLAUSE)]
#[case("extends Base(k = 2) annotation(Icon);", SyntaxKind::EXTENDS_CLAUSE)]
#[case("inner outer World world;", SyntaxKind::COMPONENT_CLAUSE)]
#[case("replaceable Real x constrainedby Real;", SyntaxKind::COMPONENT_CLAUSE)]
#[case("replaceable model M = N;", SyntaxKind::CLASS_DEFINITION)]
fn test_element(#[case] input: &str, #[case] child: SyntaxKind) {
    assert_rule_parses(Rule::Element, input, "element");
    let element = parse_rule(Rule::Element, input).node().unwrap();
    assert!(element.children().any(|n| n.kind() == child), "{input}");
}

// =============================================================================
// Equations and connect clauses
// =============================================================================

#[rstest]
#[case("connect(a, b)")]
#[case("connect(a.p, b[1].n);")]
#[case("connect(.world.frame_b, bar[i, end].frame_a)")]
fn test_connect_clause(#[case] input: &str) {
    assert_rule_parses(Rule::ConnectClause, input, "connect clause");
}

#[rstest]
#[case("connect(a)")]
#[case("connect(a, b, c)")]
#[case("connect(a, f(b))")]
fn test_connect_clause_failures(#[case] input: &str) {
    assert_rule_fails(Rule::ConnectClause, input, "connect clause");
}

#[rstest]
#[case("der(x) = -k * x;", "differential equation")]
#[case("if x > 0 then y = 1; elseif x < 0 then y = -1; else y = 0; end if;", "if equation")]
#[case("for i in 1:n loop connect(a[i], b[i]); end for;", "for equation")]
#[case("when sample(0, 0.1) then reinit(x, 0); end when;", "when equation")]
#[case("assert(x >= 0, \"negative\");", "function call equation")]
fn test_equation(#[case] input: &str, #[case] desc: &str) {
    assert_rule_parses(Rule::Equation, input, desc);
}

// =============================================================================
// Expressions
// =============================================================================

#[rstest]
#[case("a + b * c ^ 2")]
#[case("not a and b or c <> d")]
#[case("if a then b elseif c then d else e")]
#[case("{1, 2, 3}")]
#[case("[1, 2; 3, 4]")]
#[case("sum(x[i] for i in 1:n)")]
#[case("f(x, function g(a = 1), y = 2)")]
#[case("x[:, end - 1]")]
#[case("a .* b ./ c .^ 2")]
#[case("1:0.5:10")]
#[case("(a, , b)")]
#[case("Modelica.Constants.pi * 2e-3")]
fn test_expression(#[case] input: &str) {
    assert_rule_parses(Rule::Expression, input, "expression");
}

#[rstest]
#[case("a +")]
#[case("(a")]
#[case("a b")]
fn test_expression_failures(#[case] input: &str) {
    assert_rule_fails(Rule::Expression, input, "expression");
}

#[rstest]
#[case("a")]
#[case("a.b.c")]
#[case("a[1].b[2, 3]")]
#[case(".a.b")]
fn test_component_reference(#[case] input: &str) {
    assert_rule_parses(Rule::ComponentReference, input, "component reference");
}
