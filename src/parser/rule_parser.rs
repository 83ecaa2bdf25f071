//! Rule-based parser for individual grammar rules
//!
//! Parses a snippet as exactly one grammar construct, without requiring full
//! file context. The whole input must be consumed; clause rules accept one
//! optional trailing `;`. Mutations use this to validate caller-supplied text
//! before touching a document.
//!
//! # Example
//!
//! ```
//! use modelica::parser::rule_parser::{Rule, parse_rule};
//!
//! let result = parse_rule(Rule::ComponentClause, "parameter Real k = 2;");
//! assert!(result.is_ok());
//! ```

use super::grammar::{
    ExpressionParser, classes, equations, parse_class_definition, parse_component_clause,
    parse_component_reference, parse_connect_clause, parse_expression, parse_stored_definition,
};
use super::parser::{Parse, SyntaxError, parse_with};
use super::{SyntaxKind, SyntaxNode};

/// Grammar rules that can be parsed individually
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// stored_definition = [ within [ name ] ';' ] { [ final ] class_definition ';' }
    StoredDefinition,
    /// class_definition = [ encapsulated ] class_prefixes class_specifier
    ClassDefinition,
    /// element = import_clause | extends_clause | [ prefixes ] ( class_definition | component_clause )
    Element,
    /// component_clause = type_prefix type_specifier [ array_subscripts ] component_list
    ComponentClause,
    /// connect_clause = connect '(' component_reference ',' component_reference ')'
    ConnectClause,
    /// equation = ... comment
    Equation,
    /// component_reference = [ '.' ] IDENT [ array_subscripts ] { '.' IDENT [ array_subscripts ] }
    ComponentReference,
    /// expression
    Expression,
}

impl Rule {
    /// Node kind the rule produces
    pub fn kind(self) -> SyntaxKind {
        match self {
            Rule::StoredDefinition => SyntaxKind::STORED_DEFINITION,
            Rule::ClassDefinition => SyntaxKind::CLASS_DEFINITION,
            Rule::Element => SyntaxKind::ELEMENT,
            Rule::ComponentClause => SyntaxKind::COMPONENT_CLAUSE,
            Rule::ConnectClause => SyntaxKind::CONNECT_CLAUSE,
            Rule::Equation => SyntaxKind::EQUATION,
            Rule::ComponentReference => SyntaxKind::COMPONENT_REFERENCE,
            Rule::Expression => SyntaxKind::EXPRESSION,
        }
    }

    /// Rules whose node excludes an optional trailing `;`
    fn allows_semicolon(self) -> bool {
        matches!(
            self,
            Rule::ClassDefinition | Rule::ComponentClause | Rule::ConnectClause
        )
    }
}

/// Result of parsing a single rule
#[derive(Debug, Clone)]
pub struct RuleParseResult {
    pub parse: Parse,
    pub rule: Rule,
    pub input: String,
}

impl RuleParseResult {
    /// Check if parsing succeeded without errors
    pub fn is_ok(&self) -> bool {
        self.parse.ok()
    }

    /// Get parse errors
    pub fn errors(&self) -> &[SyntaxError] {
        &self.parse.errors
    }

    /// Root of the parse (`stored_definition` or `fragment`)
    pub fn syntax(&self) -> SyntaxNode {
        self.parse.syntax()
    }

    /// The node produced by the rule
    pub fn node(&self) -> Option<SyntaxNode> {
        let root = self.syntax();
        if root.kind() == self.rule.kind() {
            return Some(root);
        }
        root.children().find(|n| n.kind() == self.rule.kind())
    }
}

/// Parse input as a specific grammar rule
///
/// # Arguments
///
/// * `rule` - The grammar rule to parse
/// * `input` - The input text to parse
///
/// # Returns
///
/// A `RuleParseResult` containing the parse tree and any errors.
pub fn parse_rule(rule: Rule, input: &str) -> RuleParseResult {
    let parse = match rule {
        Rule::StoredDefinition => {
            parse_with(input, SyntaxKind::STORED_DEFINITION, |p| parse_stored_definition(p))
        }
        _ => parse_with(input, SyntaxKind::FRAGMENT, |p| {
            if p.at_eof() {
                p.error(format!("expected {}, found end of input", rule_label(rule)));
                return;
            }
            match rule {
                Rule::ClassDefinition => parse_class_definition(p),
                Rule::Element => {
                    // The element's own `;` is optional here
                    p.start_node(SyntaxKind::ELEMENT);
                    classes::parse_element_body(p);
                    p.eat(SyntaxKind::SEMICOLON);
                    p.finish_node();
                }
                Rule::ComponentClause => parse_component_clause(p),
                Rule::ConnectClause => parse_connect_clause(p),
                Rule::Equation => {
                    p.start_node(SyntaxKind::EQUATION);
                    equations::parse_equation_body(p);
                    p.eat(SyntaxKind::SEMICOLON);
                    p.finish_node();
                }
                Rule::ComponentReference => parse_component_reference(p),
                Rule::Expression => {
                    parse_expression(p);
                }
                Rule::StoredDefinition => {}
            }
            if rule.allows_semicolon() {
                p.eat(SyntaxKind::SEMICOLON);
            }
            if !p.at_eof() {
                let found = p.current_text().to_string();
                p.error_recover(
                    format!("unexpected '{}' after {}", found, rule_label(rule)),
                    &[],
                );
            }
        }),
    };

    RuleParseResult {
        parse,
        rule,
        input: input.to_string(),
    }
}

fn rule_label(rule: Rule) -> &'static str {
    match rule {
        Rule::StoredDefinition => "stored definition",
        Rule::ClassDefinition => "class definition",
        Rule::Element => "element",
        Rule::ComponentClause => "component clause",
        Rule::ConnectClause => "connect clause",
        Rule::Equation => "equation",
        Rule::ComponentReference => "component reference",
        Rule::Expression => "expression",
    }
}
