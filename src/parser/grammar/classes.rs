//! Class, element and modification parsing for Modelica
//!
//! ```text
//! stored_definition = [ within [ name ] ';' ] { [ final ] class_definition ';' }
//! class_definition  = [ encapsulated ] class_prefixes class_specifier
//! class_specifier   = long_class_specifier | short_class_specifier | der_class_specifier
//! composition       = element_list { public element_list | protected element_list
//!                     | equation_section | algorithm_section }
//!                     [ external ... ';' ] [ annotation_clause ';' ]
//! ```
//!
//! Elements carry their terminating `;`. The `;` after a top-level class
//! belongs to the stored definition, so a class node ends at its end name.

use super::equations::{parse_algorithm_section, parse_equation_section};
use super::expressions::{
    ExpressionParser, parse_array_subscripts, parse_component_reference, parse_expression,
    parse_function_call_args, parse_name,
};
use crate::parser::syntax_kind::SyntaxKind;

/// Keywords that can open a class definition (after element prefixes)
pub(crate) const CLASS_START: &[SyntaxKind] = &[
    SyntaxKind::ENCAPSULATED_KW,
    SyntaxKind::PARTIAL_KW,
    SyntaxKind::CLASS_KW,
    SyntaxKind::MODEL_KW,
    SyntaxKind::RECORD_KW,
    SyntaxKind::BLOCK_KW,
    SyntaxKind::EXPANDABLE_KW,
    SyntaxKind::CONNECTOR_KW,
    SyntaxKind::TYPE_KW,
    SyntaxKind::PACKAGE_KW,
    SyntaxKind::FUNCTION_KW,
    SyntaxKind::OPERATOR_KW,
    SyntaxKind::PURE_KW,
    SyntaxKind::IMPURE_KW,
];

/// Tokens that end an element list
pub(crate) const ELEMENT_LIST_END: &[SyntaxKind] = &[
    SyntaxKind::END_KW,
    SyntaxKind::PUBLIC_KW,
    SyntaxKind::PROTECTED_KW,
    SyntaxKind::EQUATION_KW,
    SyntaxKind::ALGORITHM_KW,
    SyntaxKind::INITIAL_KW,
    SyntaxKind::EXTERNAL_KW,
    SyntaxKind::ANNOTATION_KW,
];

const TYPE_PREFIX_KWS: &[SyntaxKind] = &[
    SyntaxKind::FLOW_KW,
    SyntaxKind::STREAM_KW,
    SyntaxKind::DISCRETE_KW,
    SyntaxKind::PARAMETER_KW,
    SyntaxKind::CONSTANT_KW,
    SyntaxKind::INPUT_KW,
    SyntaxKind::OUTPUT_KW,
];

const ELEMENT_PREFIX_KWS: &[SyntaxKind] = &[
    SyntaxKind::REDECLARE_KW,
    SyntaxKind::FINAL_KW,
    SyntaxKind::INNER_KW,
    SyntaxKind::OUTER_KW,
];

/// stored_definition body (the root node is opened by the caller)
pub fn parse_stored_definition<P: ExpressionParser>(p: &mut P) {
    if p.at(SyntaxKind::WITHIN_KW) {
        p.start_node(SyntaxKind::WITHIN_CLAUSE);
        p.bump();
        if p.at_any(&[SyntaxKind::IDENT, SyntaxKind::DOT]) {
            parse_name(p);
        }
        p.expect(SyntaxKind::SEMICOLON);
        p.finish_node();
    }

    while !p.at_eof() {
        let start_pos = p.get_pos();
        if p.at(SyntaxKind::FINAL_KW) || p.at_any(CLASS_START) {
            p.eat(SyntaxKind::FINAL_KW);
            parse_class_definition(p);
            p.expect(SyntaxKind::SEMICOLON);
        } else {
            let found = p.current_text().to_string();
            p.error_recover(
                format!("expected class definition, found '{}'", found),
                CLASS_START,
            );
        }
        if p.get_pos() == start_pos {
            p.error_recover("unexpected token".to_string(), &[]);
        }
    }
}

/// class_definition = [ encapsulated ] class_prefixes class_specifier
pub fn parse_class_definition<P: ExpressionParser>(p: &mut P) {
    p.start_node(SyntaxKind::CLASS_DEFINITION);
    p.eat(SyntaxKind::ENCAPSULATED_KW);
    parse_class_prefixes(p);
    parse_class_specifier(p);
    p.finish_node();
}

/// class_prefixes = [ partial ] ( class | model | [ operator ] record | block
///                | [ expandable ] connector | type | package
///                | [ pure | impure ] [ operator ] function | operator )
pub fn parse_class_prefixes<P: ExpressionParser>(p: &mut P) {
    p.start_node(SyntaxKind::CLASS_PREFIXES);
    p.eat(SyntaxKind::PARTIAL_KW);
    match p.current_kind() {
        SyntaxKind::CLASS_KW
        | SyntaxKind::MODEL_KW
        | SyntaxKind::RECORD_KW
        | SyntaxKind::BLOCK_KW
        | SyntaxKind::CONNECTOR_KW
        | SyntaxKind::TYPE_KW
        | SyntaxKind::PACKAGE_KW
        | SyntaxKind::FUNCTION_KW => p.bump(),
        SyntaxKind::EXPANDABLE_KW => {
            p.bump();
            p.expect(SyntaxKind::CONNECTOR_KW);
        }
        SyntaxKind::PURE_KW | SyntaxKind::IMPURE_KW => {
            p.bump();
            p.eat(SyntaxKind::OPERATOR_KW);
            p.expect(SyntaxKind::FUNCTION_KW);
        }
        SyntaxKind::OPERATOR_KW => {
            p.bump();
            if p.at_any(&[SyntaxKind::RECORD_KW, SyntaxKind::FUNCTION_KW]) {
                p.bump();
            }
        }
        _ => {
            let found = p.current_text().to_string();
            p.error(format!("expected class kind, found '{}'", found));
        }
    }
    p.finish_node();
}

fn parse_class_specifier<P: ExpressionParser>(p: &mut P) {
    if p.at(SyntaxKind::IDENT) && p.peek_kind(1) == SyntaxKind::EQ {
        if p.peek_kind(2) == SyntaxKind::DER_KW && p.peek_kind(3) == SyntaxKind::L_PAREN {
            parse_der_class_specifier(p);
        } else {
            parse_short_class_specifier(p);
        }
    } else {
        parse_long_class_specifier(p);
    }
}

/// long_class_specifier = IDENT string_comment composition end IDENT
///                      | extends IDENT [ class_modification ] string_comment composition end IDENT
fn parse_long_class_specifier<P: ExpressionParser>(p: &mut P) {
    p.start_node(SyntaxKind::LONG_CLASS_SPECIFIER);
    let extends = p.eat(SyntaxKind::EXTENDS_KW);
    p.start_node(SyntaxKind::NAME);
    p.expect(SyntaxKind::IDENT);
    p.finish_node();
    if extends && p.at(SyntaxKind::L_PAREN) {
        parse_class_modification(p);
    }
    parse_string_comment(p);
    parse_composition(p);
    p.start_node(SyntaxKind::END_CLAUSE);
    p.expect(SyntaxKind::END_KW);
    p.expect(SyntaxKind::IDENT);
    p.finish_node();
    p.finish_node();
}

/// short_class_specifier = IDENT '=' base_prefix type_specifier [ array_subscripts ]
///                         [ class_modification ] comment
///                       | IDENT '=' enumeration '(' ( [ enum_list ] | ':' ) ')' comment
fn parse_short_class_specifier<P: ExpressionParser>(p: &mut P) {
    p.start_node(SyntaxKind::SHORT_CLASS_SPECIFIER);
    p.bump(); // IDENT
    p.bump(); // =
    if p.at(SyntaxKind::ENUMERATION_KW) {
        p.bump();
        p.expect(SyntaxKind::L_PAREN);
        if !p.eat(SyntaxKind::COLON) && p.at(SyntaxKind::IDENT) {
            parse_enum_list(p);
        }
        p.expect(SyntaxKind::R_PAREN);
    } else {
        if p.at_any(&[SyntaxKind::INPUT_KW, SyntaxKind::OUTPUT_KW]) {
            p.start_node(SyntaxKind::TYPE_PREFIX);
            p.bump();
            p.finish_node();
        }
        parse_type_specifier(p);
        if p.at(SyntaxKind::L_BRACKET) {
            parse_array_subscripts(p);
        }
        if p.at(SyntaxKind::L_PAREN) {
            parse_class_modification(p);
        }
    }
    parse_comment(p);
    p.finish_node();
}

/// enum_list = enumeration_literal { ',' enumeration_literal }
fn parse_enum_list<P: ExpressionParser>(p: &mut P) {
    p.start_node(SyntaxKind::ENUM_LIST);
    loop {
        p.start_node(SyntaxKind::ENUMERATION_LITERAL);
        p.expect(SyntaxKind::IDENT);
        parse_comment(p);
        p.finish_node();
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
    p.finish_node();
}

/// der_class_specifier = IDENT '=' der '(' type_specifier ',' IDENT { ',' IDENT } ')' comment
fn parse_der_class_specifier<P: ExpressionParser>(p: &mut P) {
    p.start_node(SyntaxKind::DER_CLASS_SPECIFIER);
    p.bump(); // IDENT
    p.bump(); // =
    p.bump(); // der
    p.expect(SyntaxKind::L_PAREN);
    parse_type_specifier(p);
    while p.eat(SyntaxKind::COMMA) {
        p.expect(SyntaxKind::IDENT);
    }
    p.expect(SyntaxKind::R_PAREN);
    parse_comment(p);
    p.finish_node();
}

/// composition body, up to (not including) the `end` of the class
pub fn parse_composition<P: ExpressionParser>(p: &mut P) {
    p.start_node(SyntaxKind::COMPOSITION);
    parse_element_list(p);
    loop {
        let start_pos = p.get_pos();
        match p.current_kind() {
            _ if p.at_eof() => break,
            SyntaxKind::END_KW => break,
            SyntaxKind::PUBLIC_KW | SyntaxKind::PROTECTED_KW => {
                p.bump();
                parse_element_list(p);
            }
            SyntaxKind::EQUATION_KW => parse_equation_section(p),
            SyntaxKind::ALGORITHM_KW => parse_algorithm_section(p),
            SyntaxKind::INITIAL_KW if p.peek_kind(1) == SyntaxKind::EQUATION_KW => {
                parse_equation_section(p)
            }
            SyntaxKind::INITIAL_KW if p.peek_kind(1) == SyntaxKind::ALGORITHM_KW => {
                parse_algorithm_section(p)
            }
            SyntaxKind::EXTERNAL_KW => parse_external_clause(p),
            SyntaxKind::ANNOTATION_KW => {
                parse_annotation_clause(p);
                p.expect(SyntaxKind::SEMICOLON);
            }
            _ => {
                let found = p.current_text().to_string();
                p.error_recover(
                    format!("unexpected '{}' in class body", found),
                    ELEMENT_LIST_END,
                );
            }
        }
        if p.get_pos() == start_pos {
            p.error_recover("unexpected token in class body".to_string(), &[]);
        }
    }
    p.finish_node();
}

/// element_list = { element ';' }
pub fn parse_element_list<P: ExpressionParser>(p: &mut P) {
    p.start_node(SyntaxKind::ELEMENT_LIST);
    while !p.at_eof() && !p.at_any(ELEMENT_LIST_END) {
        let start_pos = p.get_pos();
        if at_element_start(p) {
            parse_element(p);
        } else {
            let found = p.current_text().to_string();
            let mut recovery = ELEMENT_LIST_END.to_vec();
            recovery.push(SyntaxKind::SEMICOLON);
            p.error_recover(format!("expected element, found '{}'", found), &recovery);
            p.eat(SyntaxKind::SEMICOLON);
        }
        if p.get_pos() == start_pos {
            p.error_recover("unexpected token in element list".to_string(), &[]);
        }
    }
    p.finish_node();
}

fn at_element_start<P: ExpressionParser>(p: &P) -> bool {
    p.at_any(&[
        SyntaxKind::IMPORT_KW,
        SyntaxKind::EXTENDS_KW,
        SyntaxKind::REPLACEABLE_KW,
        SyntaxKind::IDENT,
        SyntaxKind::DOT,
    ]) || p.at_any(ELEMENT_PREFIX_KWS)
        || p.at_any(CLASS_START)
        || p.at_any(TYPE_PREFIX_KWS)
}

/// element = element_body ';'
pub fn parse_element<P: ExpressionParser>(p: &mut P) {
    p.start_node(SyntaxKind::ELEMENT);
    parse_element_body(p);
    p.expect(SyntaxKind::SEMICOLON);
    p.finish_node();
}

/// element = import_clause | extends_clause
///         | [ redeclare ] [ final ] [ inner ] [ outer ]
///           ( class_definition | component_clause
///           | replaceable ( class_definition | component_clause ) [ constraining_clause comment ] )
pub fn parse_element_body<P: ExpressionParser>(p: &mut P) {
    if p.at(SyntaxKind::IMPORT_KW) {
        parse_import_clause(p);
        return;
    }
    if p.at(SyntaxKind::EXTENDS_KW) {
        parse_extends_clause(p);
        return;
    }
    while p.at_any(ELEMENT_PREFIX_KWS) {
        p.bump();
    }
    let replaceable = p.eat(SyntaxKind::REPLACEABLE_KW);
    if p.at_any(CLASS_START) {
        parse_class_definition(p);
    } else {
        parse_component_clause(p);
    }
    if replaceable && p.at(SyntaxKind::CONSTRAINEDBY_KW) {
        parse_constraining_clause(p);
        parse_comment(p);
    }
}

/// import_clause = import ( IDENT '=' name | name [ '.*' | '.' '{' import_list '}' ] ) comment
fn parse_import_clause<P: ExpressionParser>(p: &mut P) {
    p.start_node(SyntaxKind::IMPORT_CLAUSE);
    p.bump(); // import
    if p.at(SyntaxKind::IDENT) && p.peek_kind(1) == SyntaxKind::EQ {
        p.bump();
        p.bump();
        parse_name(p);
    } else {
        parse_name(p);
        if !p.eat(SyntaxKind::DOT_STAR)
            && p.at(SyntaxKind::DOT)
            && p.peek_kind(1) == SyntaxKind::L_BRACE
        {
            p.bump(); // .
            p.start_node(SyntaxKind::IMPORT_LIST);
            p.bump(); // {
            loop {
                p.expect(SyntaxKind::IDENT);
                if !p.eat(SyntaxKind::COMMA) {
                    break;
                }
            }
            p.expect(SyntaxKind::R_BRACE);
            p.finish_node();
        }
    }
    parse_comment(p);
    p.finish_node();
}

/// extends_clause = extends type_specifier [ class_modification ] [ annotation_clause ]
fn parse_extends_clause<P: ExpressionParser>(p: &mut P) {
    p.start_node(SyntaxKind::EXTENDS_CLAUSE);
    p.bump(); // extends
    parse_type_specifier(p);
    if p.at(SyntaxKind::L_PAREN) {
        parse_class_modification(p);
    }
    if p.at(SyntaxKind::ANNOTATION_KW) {
        parse_annotation_clause(p);
    }
    p.finish_node();
}

/// constraining_clause = constrainedby type_specifier [ class_modification ]
fn parse_constraining_clause<P: ExpressionParser>(p: &mut P) {
    p.start_node(SyntaxKind::CONSTRAINING_CLAUSE);
    p.bump(); // constrainedby
    parse_type_specifier(p);
    if p.at(SyntaxKind::L_PAREN) {
        parse_class_modification(p);
    }
    p.finish_node();
}

/// external [ STRING ] [ external_function_call ] [ annotation_clause ] ';'
fn parse_external_clause<P: ExpressionParser>(p: &mut P) {
    p.start_node(SyntaxKind::EXTERNAL_CLAUSE);
    p.bump(); // external
    p.eat(SyntaxKind::STRING);
    if p.at_any(&[SyntaxKind::IDENT, SyntaxKind::DOT]) {
        p.start_node(SyntaxKind::EXTERNAL_FUNCTION_CALL);
        if p.at(SyntaxKind::IDENT) && p.peek_kind(1) == SyntaxKind::L_PAREN {
            p.bump();
        } else {
            parse_component_reference(p);
            p.expect(SyntaxKind::EQ);
            p.expect(SyntaxKind::IDENT);
        }
        parse_function_call_args(p);
        p.finish_node();
    }
    if p.at(SyntaxKind::ANNOTATION_KW) {
        parse_annotation_clause(p);
    }
    p.expect(SyntaxKind::SEMICOLON);
    p.finish_node();
}

// =============================================================================
// Components
// =============================================================================

/// component_clause = type_prefix type_specifier [ array_subscripts ] component_list
pub fn parse_component_clause<P: ExpressionParser>(p: &mut P) {
    p.start_node(SyntaxKind::COMPONENT_CLAUSE);
    parse_type_prefix(p);
    parse_type_specifier(p);
    if p.at(SyntaxKind::L_BRACKET) {
        parse_array_subscripts(p);
    }
    p.start_node(SyntaxKind::COMPONENT_LIST);
    loop {
        parse_component_declaration(p);
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
    p.finish_node();
    p.finish_node();
}

/// type_prefix = [ flow | stream ] [ discrete | parameter | constant ] [ input | output ]
fn parse_type_prefix<P: ExpressionParser>(p: &mut P) {
    if !p.at_any(TYPE_PREFIX_KWS) {
        return;
    }
    p.start_node(SyntaxKind::TYPE_PREFIX);
    while p.at_any(TYPE_PREFIX_KWS) {
        p.bump();
    }
    p.finish_node();
}

/// type_specifier = [ '.' ] name
pub fn parse_type_specifier<P: ExpressionParser>(p: &mut P) {
    p.start_node(SyntaxKind::TYPE_SPECIFIER);
    parse_name(p);
    p.finish_node();
}

/// component_declaration = declaration [ condition_attribute ] comment
fn parse_component_declaration<P: ExpressionParser>(p: &mut P) {
    p.start_node(SyntaxKind::COMPONENT_DECLARATION);
    parse_declaration(p);
    if p.at(SyntaxKind::IF_KW) {
        p.start_node(SyntaxKind::CONDITION_ATTRIBUTE);
        p.bump();
        parse_expression(p);
        p.finish_node();
    }
    parse_comment(p);
    p.finish_node();
}

/// declaration = IDENT [ array_subscripts ] [ modification ]
fn parse_declaration<P: ExpressionParser>(p: &mut P) {
    p.start_node(SyntaxKind::DECLARATION);
    p.expect(SyntaxKind::IDENT);
    if p.at(SyntaxKind::L_BRACKET) {
        parse_array_subscripts(p);
    }
    if p.at_any(&[SyntaxKind::L_PAREN, SyntaxKind::EQ, SyntaxKind::COLON_EQ]) {
        parse_modification(p);
    }
    p.finish_node();
}

/// component_clause1 = type_prefix type_specifier component_declaration1
fn parse_component_clause1<P: ExpressionParser>(p: &mut P) {
    p.start_node(SyntaxKind::COMPONENT_CLAUSE1);
    parse_type_prefix(p);
    parse_type_specifier(p);
    p.start_node(SyntaxKind::COMPONENT_DECLARATION1);
    parse_declaration(p);
    parse_comment(p);
    p.finish_node();
    p.finish_node();
}

// =============================================================================
// Modifications
// =============================================================================

/// modification = class_modification [ '=' expression ] | '=' expression | ':=' expression
pub fn parse_modification<P: ExpressionParser>(p: &mut P) {
    p.start_node(SyntaxKind::MODIFICATION);
    if p.at(SyntaxKind::L_PAREN) {
        parse_class_modification(p);
        if p.eat(SyntaxKind::EQ) {
            parse_expression(p);
        }
    } else if p.at_any(&[SyntaxKind::EQ, SyntaxKind::COLON_EQ]) {
        p.bump();
        parse_expression(p);
    }
    p.finish_node();
}

/// class_modification = '(' [ argument_list ] ')'
pub fn parse_class_modification<P: ExpressionParser>(p: &mut P) {
    p.start_node(SyntaxKind::CLASS_MODIFICATION);
    p.expect(SyntaxKind::L_PAREN);
    if !p.at(SyntaxKind::R_PAREN) && !p.at_eof() {
        p.start_node(SyntaxKind::ARGUMENT_LIST);
        loop {
            let start_pos = p.get_pos();
            parse_argument(p);
            if p.get_pos() == start_pos || !p.eat(SyntaxKind::COMMA) {
                break;
            }
        }
        p.finish_node();
    }
    p.expect(SyntaxKind::R_PAREN);
    p.finish_node();
}

/// argument = element_modification_or_replaceable | element_redeclaration
fn parse_argument<P: ExpressionParser>(p: &mut P) {
    p.start_node(SyntaxKind::ARGUMENT);
    if p.at(SyntaxKind::REDECLARE_KW) {
        p.start_node(SyntaxKind::ELEMENT_REDECLARATION);
        p.bump();
        p.eat(SyntaxKind::EACH_KW);
        p.eat(SyntaxKind::FINAL_KW);
        if p.at(SyntaxKind::REPLACEABLE_KW) {
            parse_element_replaceable(p);
        } else if p.at_any(CLASS_START) {
            parse_short_class_definition(p);
        } else {
            parse_component_clause1(p);
        }
        p.finish_node();
    } else {
        p.eat(SyntaxKind::EACH_KW);
        p.eat(SyntaxKind::FINAL_KW);
        if p.at(SyntaxKind::REPLACEABLE_KW) {
            parse_element_replaceable(p);
        } else {
            parse_element_modification(p);
        }
    }
    p.finish_node();
}

/// element_modification = name [ modification ] string_comment
///                       | break IDENT
fn parse_element_modification<P: ExpressionParser>(p: &mut P) {
    p.start_node(SyntaxKind::ELEMENT_MODIFICATION);
    if p.eat(SyntaxKind::BREAK_KW) {
        p.expect(SyntaxKind::IDENT);
    } else {
        parse_name(p);
        if p.at_any(&[SyntaxKind::L_PAREN, SyntaxKind::EQ, SyntaxKind::COLON_EQ]) {
            parse_modification(p);
        }
        parse_string_comment(p);
    }
    p.finish_node();
}

/// element_replaceable = replaceable ( short_class_definition | component_clause1 )
///                       [ constraining_clause ]
fn parse_element_replaceable<P: ExpressionParser>(p: &mut P) {
    p.start_node(SyntaxKind::ELEMENT_REPLACEABLE);
    p.bump(); // replaceable
    if p.at_any(CLASS_START) {
        parse_short_class_definition(p);
    } else {
        parse_component_clause1(p);
    }
    if p.at(SyntaxKind::CONSTRAINEDBY_KW) {
        parse_constraining_clause(p);
    }
    p.finish_node();
}

/// short_class_definition = class_prefixes short_class_specifier
fn parse_short_class_definition<P: ExpressionParser>(p: &mut P) {
    p.start_node(SyntaxKind::SHORT_CLASS_DEFINITION);
    parse_class_prefixes(p);
    if p.at(SyntaxKind::IDENT) && p.peek_kind(1) == SyntaxKind::EQ {
        parse_short_class_specifier(p);
    } else {
        let found = p.current_text().to_string();
        p.error(format!("expected short class specifier, found '{}'", found));
    }
    p.finish_node();
}

// =============================================================================
// Comments and annotations
// =============================================================================

/// comment = string_comment [ annotation_clause ]
pub fn parse_comment<P: ExpressionParser>(p: &mut P) {
    if !p.at_any(&[SyntaxKind::STRING, SyntaxKind::ANNOTATION_KW]) {
        return;
    }
    p.start_node(SyntaxKind::COMMENT);
    parse_string_comment(p);
    if p.at(SyntaxKind::ANNOTATION_KW) {
        parse_annotation_clause(p);
    }
    p.finish_node();
}

/// string_comment = [ STRING { '+' STRING } ]
pub fn parse_string_comment<P: ExpressionParser>(p: &mut P) {
    if !p.at(SyntaxKind::STRING) {
        return;
    }
    p.start_node(SyntaxKind::STRING_COMMENT);
    p.bump();
    while p.at(SyntaxKind::PLUS) && p.peek_kind(1) == SyntaxKind::STRING {
        p.bump();
        p.bump();
    }
    p.finish_node();
}

/// annotation_clause = annotation class_modification
pub fn parse_annotation_clause<P: ExpressionParser>(p: &mut P) {
    p.start_node(SyntaxKind::ANNOTATION_CLAUSE);
    p.bump(); // annotation
    parse_class_modification(p);
    p.finish_node();
}
