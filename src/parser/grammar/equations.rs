//! Equation and algorithm section parsing for Modelica
//!
//! ```text
//! equation_section  = [ initial ] equation { equation ';' }
//! algorithm_section = [ initial ] algorithm { statement ';' }
//! ```
//!
//! EQUATION and STATEMENT nodes include their terminating `;`, so removing one
//! from the source never leaves a dangling separator behind.

use super::classes::parse_comment;
use super::expressions::{
    ExpressionParser, parse_component_reference, parse_expression, parse_for_indices,
};
use crate::parser::syntax_kind::SyntaxKind;

/// Tokens that end the body of an equation or algorithm section
const SECTION_END: &[SyntaxKind] = &[
    SyntaxKind::END_KW,
    SyntaxKind::PUBLIC_KW,
    SyntaxKind::PROTECTED_KW,
    SyntaxKind::EQUATION_KW,
    SyntaxKind::ALGORITHM_KW,
    SyntaxKind::EXTERNAL_KW,
    SyntaxKind::ANNOTATION_KW,
];

/// Tokens that end a nested block (`if`/`for`/`when`/`while` bodies)
const BLOCK_END: &[SyntaxKind] = &[
    SyntaxKind::END_KW,
    SyntaxKind::ELSE_KW,
    SyntaxKind::ELSEIF_KW,
    SyntaxKind::ELSEWHEN_KW,
];

fn at_section_end<P: ExpressionParser>(p: &P) -> bool {
    p.at_eof()
        || p.at_any(SECTION_END)
        || (p.at(SyntaxKind::INITIAL_KW)
            && matches!(
                p.peek_kind(1),
                SyntaxKind::EQUATION_KW | SyntaxKind::ALGORITHM_KW
            ))
}

/// equation_section = [ initial ] equation { equation ';' }
pub fn parse_equation_section<P: ExpressionParser>(p: &mut P) {
    p.start_node(SyntaxKind::EQUATION_SECTION);
    p.eat(SyntaxKind::INITIAL_KW);
    p.expect(SyntaxKind::EQUATION_KW);
    while !at_section_end(p) {
        let start_pos = p.get_pos();
        parse_equation(p);
        if p.get_pos() == start_pos {
            p.error_recover("unexpected token in equation section".to_string(), &[]);
        }
    }
    p.finish_node();
}

/// algorithm_section = [ initial ] algorithm { statement ';' }
pub fn parse_algorithm_section<P: ExpressionParser>(p: &mut P) {
    p.start_node(SyntaxKind::ALGORITHM_SECTION);
    p.eat(SyntaxKind::INITIAL_KW);
    p.expect(SyntaxKind::ALGORITHM_KW);
    while !at_section_end(p) {
        let start_pos = p.get_pos();
        parse_statement(p);
        if p.get_pos() == start_pos {
            p.error_recover("unexpected token in algorithm section".to_string(), &[]);
        }
    }
    p.finish_node();
}

/// equation = ( simple_expression '=' expression | if_equation | for_equation
///            | connect_clause | when_equation | component_reference function_call_args )
///            comment ';'
pub fn parse_equation<P: ExpressionParser>(p: &mut P) {
    p.start_node(SyntaxKind::EQUATION);
    parse_equation_body(p);
    p.expect(SyntaxKind::SEMICOLON);
    p.finish_node();
}

/// An equation without its terminating `;`
pub fn parse_equation_body<P: ExpressionParser>(p: &mut P) {
    match p.current_kind() {
        SyntaxKind::IF_KW => parse_if_equation(p),
        SyntaxKind::FOR_KW => parse_for_equation(p),
        SyntaxKind::WHEN_KW => parse_when_equation(p),
        SyntaxKind::CONNECT_KW => parse_connect_clause(p),
        _ => {
            parse_expression(p);
            if p.eat(SyntaxKind::EQ) {
                parse_expression(p);
            }
        }
    }
    parse_comment(p);
}

/// connect_clause = connect '(' component_reference ',' component_reference ')'
pub fn parse_connect_clause<P: ExpressionParser>(p: &mut P) {
    p.start_node(SyntaxKind::CONNECT_CLAUSE);
    p.expect(SyntaxKind::CONNECT_KW);
    p.expect(SyntaxKind::L_PAREN);
    parse_component_reference(p);
    p.expect(SyntaxKind::COMMA);
    parse_component_reference(p);
    p.expect(SyntaxKind::R_PAREN);
    p.finish_node();
}

fn parse_equation_block<P: ExpressionParser>(p: &mut P) {
    while !p.at_eof() && !p.at_any(BLOCK_END) {
        let start_pos = p.get_pos();
        parse_equation(p);
        if p.get_pos() == start_pos {
            p.error_recover("unexpected token in equation block".to_string(), &[]);
        }
    }
}

fn parse_statement_block<P: ExpressionParser>(p: &mut P) {
    while !p.at_eof() && !p.at_any(BLOCK_END) {
        let start_pos = p.get_pos();
        parse_statement(p);
        if p.get_pos() == start_pos {
            p.error_recover("unexpected token in statement block".to_string(), &[]);
        }
    }
}

/// `end <keyword>` closing a nested block
fn parse_block_end<P: ExpressionParser>(p: &mut P, keyword: SyntaxKind) {
    p.expect(SyntaxKind::END_KW);
    p.expect(keyword);
}

/// if expression then { equation ';' } { elseif expression then { equation ';' } }
/// [ else { equation ';' } ] end if
fn parse_if_equation<P: ExpressionParser>(p: &mut P) {
    p.start_node(SyntaxKind::IF_EQUATION);
    p.bump(); // if
    parse_expression(p);
    p.expect(SyntaxKind::THEN_KW);
    parse_equation_block(p);
    while p.at(SyntaxKind::ELSEIF_KW) {
        p.bump();
        parse_expression(p);
        p.expect(SyntaxKind::THEN_KW);
        parse_equation_block(p);
    }
    if p.eat(SyntaxKind::ELSE_KW) {
        parse_equation_block(p);
    }
    parse_block_end(p, SyntaxKind::IF_KW);
    p.finish_node();
}

/// for for_indices loop { equation ';' } end for
fn parse_for_equation<P: ExpressionParser>(p: &mut P) {
    p.start_node(SyntaxKind::FOR_EQUATION);
    p.bump(); // for
    parse_for_indices(p);
    p.expect(SyntaxKind::LOOP_KW);
    parse_equation_block(p);
    parse_block_end(p, SyntaxKind::FOR_KW);
    p.finish_node();
}

/// when expression then { equation ';' } { elsewhen expression then { equation ';' } } end when
fn parse_when_equation<P: ExpressionParser>(p: &mut P) {
    p.start_node(SyntaxKind::WHEN_EQUATION);
    p.bump(); // when
    parse_expression(p);
    p.expect(SyntaxKind::THEN_KW);
    parse_equation_block(p);
    while p.at(SyntaxKind::ELSEWHEN_KW) {
        p.bump();
        parse_expression(p);
        p.expect(SyntaxKind::THEN_KW);
        parse_equation_block(p);
    }
    parse_block_end(p, SyntaxKind::WHEN_KW);
    p.finish_node();
}

/// statement = ( component_reference ( ':=' expression | function_call_args )
///             | '(' output_expression_list ')' ':=' component_reference function_call_args
///             | break | return | if_statement | for_statement | while_statement | when_statement )
///             comment ';'
pub fn parse_statement<P: ExpressionParser>(p: &mut P) {
    p.start_node(SyntaxKind::STATEMENT);
    match p.current_kind() {
        SyntaxKind::BREAK_KW | SyntaxKind::RETURN_KW => p.bump(),
        SyntaxKind::IF_KW => parse_if_statement(p),
        SyntaxKind::FOR_KW => parse_for_statement(p),
        SyntaxKind::WHILE_KW => parse_while_statement(p),
        SyntaxKind::WHEN_KW => parse_when_statement(p),
        _ => {
            parse_expression(p);
            if p.eat(SyntaxKind::COLON_EQ) {
                parse_expression(p);
            }
        }
    }
    parse_comment(p);
    p.expect(SyntaxKind::SEMICOLON);
    p.finish_node();
}

fn parse_if_statement<P: ExpressionParser>(p: &mut P) {
    p.start_node(SyntaxKind::IF_STATEMENT);
    p.bump(); // if
    parse_expression(p);
    p.expect(SyntaxKind::THEN_KW);
    parse_statement_block(p);
    while p.at(SyntaxKind::ELSEIF_KW) {
        p.bump();
        parse_expression(p);
        p.expect(SyntaxKind::THEN_KW);
        parse_statement_block(p);
    }
    if p.eat(SyntaxKind::ELSE_KW) {
        parse_statement_block(p);
    }
    parse_block_end(p, SyntaxKind::IF_KW);
    p.finish_node();
}

fn parse_for_statement<P: ExpressionParser>(p: &mut P) {
    p.start_node(SyntaxKind::FOR_STATEMENT);
    p.bump(); // for
    parse_for_indices(p);
    p.expect(SyntaxKind::LOOP_KW);
    parse_statement_block(p);
    parse_block_end(p, SyntaxKind::FOR_KW);
    p.finish_node();
}

fn parse_while_statement<P: ExpressionParser>(p: &mut P) {
    p.start_node(SyntaxKind::WHILE_STATEMENT);
    p.bump(); // while
    parse_expression(p);
    p.expect(SyntaxKind::LOOP_KW);
    parse_statement_block(p);
    parse_block_end(p, SyntaxKind::WHILE_KW);
    p.finish_node();
}

fn parse_when_statement<P: ExpressionParser>(p: &mut P) {
    p.start_node(SyntaxKind::WHEN_STATEMENT);
    p.bump(); // when
    parse_expression(p);
    p.expect(SyntaxKind::THEN_KW);
    parse_statement_block(p);
    while p.at(SyntaxKind::ELSEWHEN_KW) {
        p.bump();
        parse_expression(p);
        p.expect(SyntaxKind::THEN_KW);
        parse_statement_block(p);
    }
    parse_block_end(p, SyntaxKind::WHEN_KW);
    p.finish_node();
}
