//! Expression parsing for Modelica
//!
//! This module implements the expression precedence chain of the Modelica grammar:
//!
//! ```text
//! expression → (if-expression | simple_expression)
//! simple_expression → logical_expression [':' logical_expression [':' logical_expression]]
//!     → logical_term ('or') → logical_factor ('and') → ['not'] relation
//!     → arithmetic_expression → term → factor ('^' | '.^') → primary
//! ```
//!
//! Operators are kept flat inside the enclosing EXPRESSION node. Only the
//! pieces that callers look at get their own nodes (component references,
//! call arguments, array constructors and subscripts).

use crate::parser::syntax_kind::SyntaxKind;

/// Trait for parsing operations
///
/// This trait defines the interface between the grammar functions and the main parser.
/// The main parser implements this trait to provide the necessary infrastructure.
pub trait ExpressionParser {
    // Token inspection
    fn current_kind(&self) -> SyntaxKind;
    fn current_text(&self) -> &str;
    fn at(&self, kind: SyntaxKind) -> bool;
    fn at_any(&self, kinds: &[SyntaxKind]) -> bool;
    fn at_eof(&self) -> bool;

    /// Peek at the kind of the nth significant token ahead (0 is the current one)
    fn peek_kind(&self, n: usize) -> SyntaxKind;

    // Position tracking
    fn get_pos(&self) -> usize;

    // Trivia handling
    fn skip_trivia(&mut self);

    // Token consumption
    fn bump(&mut self);
    fn bump_any(&mut self);
    fn eat(&mut self, kind: SyntaxKind) -> bool;
    fn expect(&mut self, kind: SyntaxKind) -> bool;

    // Diagnostics
    fn error(&mut self, message: String);
    fn error_recover(&mut self, message: String, recovery: &[SyntaxKind]);

    // Node building
    fn start_node(&mut self, kind: SyntaxKind);
    fn finish_node(&mut self);
}

const RELATIONAL_OPS: &[SyntaxKind] = &[
    SyntaxKind::LT,
    SyntaxKind::LT_EQ,
    SyntaxKind::GT,
    SyntaxKind::GT_EQ,
    SyntaxKind::EQ_EQ,
    SyntaxKind::NEQ,
];

const ADD_OPS: &[SyntaxKind] = &[
    SyntaxKind::PLUS,
    SyntaxKind::MINUS,
    SyntaxKind::DOT_PLUS,
    SyntaxKind::DOT_MINUS,
];

const MUL_OPS: &[SyntaxKind] = &[
    SyntaxKind::STAR,
    SyntaxKind::SLASH,
    SyntaxKind::DOT_STAR,
    SyntaxKind::DOT_SLASH,
];

/// Parse an expression, returning true if any tokens were consumed
///
/// expression = simple_expression
///            | if expression then expression { elseif expression then expression } else expression
pub fn parse_expression<P: ExpressionParser>(p: &mut P) -> bool {
    let start_pos = p.get_pos();
    p.start_node(SyntaxKind::EXPRESSION);
    if p.at(SyntaxKind::IF_KW) {
        parse_if_expression(p);
    } else {
        parse_simple_expression(p);
    }
    p.finish_node();
    p.get_pos() > start_pos
}

fn parse_if_expression<P: ExpressionParser>(p: &mut P) {
    p.bump(); // if
    parse_expression(p);
    p.expect(SyntaxKind::THEN_KW);
    parse_expression(p);
    while p.at(SyntaxKind::ELSEIF_KW) {
        p.bump();
        parse_expression(p);
        p.expect(SyntaxKind::THEN_KW);
        parse_expression(p);
    }
    p.expect(SyntaxKind::ELSE_KW);
    parse_expression(p);
}

/// simple_expression = logical_expression [ ':' logical_expression [ ':' logical_expression ] ]
pub fn parse_simple_expression<P: ExpressionParser>(p: &mut P) {
    parse_logical_expression(p);
    if p.eat(SyntaxKind::COLON) {
        parse_logical_expression(p);
        if p.eat(SyntaxKind::COLON) {
            parse_logical_expression(p);
        }
    }
}

/// logical_expression = logical_term { or logical_term }
fn parse_logical_expression<P: ExpressionParser>(p: &mut P) {
    parse_logical_term(p);
    while p.eat(SyntaxKind::OR_KW) {
        parse_logical_term(p);
    }
}

/// logical_term = logical_factor { and logical_factor }
fn parse_logical_term<P: ExpressionParser>(p: &mut P) {
    parse_logical_factor(p);
    while p.eat(SyntaxKind::AND_KW) {
        parse_logical_factor(p);
    }
}

/// logical_factor = [ not ] relation
fn parse_logical_factor<P: ExpressionParser>(p: &mut P) {
    p.eat(SyntaxKind::NOT_KW);
    parse_relation(p);
}

/// relation = arithmetic_expression [ relational_operator arithmetic_expression ]
fn parse_relation<P: ExpressionParser>(p: &mut P) {
    parse_arithmetic_expression(p);
    if p.at_any(RELATIONAL_OPS) {
        p.bump();
        parse_arithmetic_expression(p);
    }
}

/// arithmetic_expression = [ add_operator ] term { add_operator term }
fn parse_arithmetic_expression<P: ExpressionParser>(p: &mut P) {
    if p.at_any(ADD_OPS) {
        p.bump();
    }
    parse_term(p);
    while p.at_any(ADD_OPS) {
        p.bump();
        parse_term(p);
    }
}

/// term = factor { mul_operator factor }
fn parse_term<P: ExpressionParser>(p: &mut P) {
    parse_factor(p);
    while p.at_any(MUL_OPS) {
        p.bump();
        parse_factor(p);
    }
}

/// factor = primary [ ('^' | '.^') primary ]
fn parse_factor<P: ExpressionParser>(p: &mut P) {
    parse_primary(p);
    if p.at_any(&[SyntaxKind::CARET, SyntaxKind::DOT_CARET]) {
        p.bump();
        parse_primary(p);
    }
}

/// primary = literal | component_reference [function_call_args]
///         | (der | initial | pure) function_call_args
///         | '(' output_expression_list ')' | '[' ... ']' | '{' ... '}' | end
pub fn parse_primary<P: ExpressionParser>(p: &mut P) {
    match p.current_kind() {
        _ if p.at_eof() => {
            p.error("expected expression, found end of input".to_string());
        }
        SyntaxKind::UNSIGNED_INTEGER
        | SyntaxKind::UNSIGNED_REAL
        | SyntaxKind::STRING
        | SyntaxKind::TRUE_KW
        | SyntaxKind::FALSE_KW
        | SyntaxKind::END_KW => p.bump(),
        SyntaxKind::DER_KW | SyntaxKind::INITIAL_KW | SyntaxKind::PURE_KW
            if p.peek_kind(1) == SyntaxKind::L_PAREN =>
        {
            p.bump();
            parse_function_call_args(p);
        }
        SyntaxKind::IDENT | SyntaxKind::DOT => {
            parse_component_reference(p);
            if p.at(SyntaxKind::L_PAREN) {
                parse_function_call_args(p);
            }
        }
        SyntaxKind::L_PAREN => parse_output_expression_list(p),
        SyntaxKind::L_BRACKET => parse_array_concatenation(p),
        SyntaxKind::L_BRACE => parse_array_constructor(p),
        _ => {
            let found = p.current_text().to_string();
            p.error(format!("expected expression, found '{}'", found));
        }
    }
}

/// name = [ '.' ] IDENT { '.' IDENT }
pub fn parse_name<P: ExpressionParser>(p: &mut P) {
    p.start_node(SyntaxKind::NAME);
    p.eat(SyntaxKind::DOT);
    p.expect(SyntaxKind::IDENT);
    while p.at(SyntaxKind::DOT) && p.peek_kind(1) == SyntaxKind::IDENT {
        p.bump(); // .
        p.bump(); // IDENT
    }
    p.finish_node();
}

/// component_reference = [ '.' ] IDENT [ array_subscripts ] { '.' IDENT [ array_subscripts ] }
pub fn parse_component_reference<P: ExpressionParser>(p: &mut P) {
    p.start_node(SyntaxKind::COMPONENT_REFERENCE);
    p.eat(SyntaxKind::DOT);
    p.expect(SyntaxKind::IDENT);
    if p.at(SyntaxKind::L_BRACKET) {
        parse_array_subscripts(p);
    }
    while p.at(SyntaxKind::DOT) && p.peek_kind(1) == SyntaxKind::IDENT {
        p.bump(); // .
        p.bump(); // IDENT
        if p.at(SyntaxKind::L_BRACKET) {
            parse_array_subscripts(p);
        }
    }
    p.finish_node();
}

/// array_subscripts = '[' subscript { ',' subscript } ']'
pub fn parse_array_subscripts<P: ExpressionParser>(p: &mut P) {
    p.start_node(SyntaxKind::ARRAY_SUBSCRIPTS);
    p.expect(SyntaxKind::L_BRACKET);
    loop {
        p.start_node(SyntaxKind::SUBSCRIPT);
        if !p.eat(SyntaxKind::COLON) {
            parse_expression(p);
        }
        p.finish_node();
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
    p.expect(SyntaxKind::R_BRACKET);
    p.finish_node();
}

/// function_call_args = '(' [ function_arguments ] ')'
pub fn parse_function_call_args<P: ExpressionParser>(p: &mut P) {
    p.start_node(SyntaxKind::FUNCTION_CALL_ARGS);
    p.expect(SyntaxKind::L_PAREN);
    if !p.at(SyntaxKind::R_PAREN) {
        parse_argument_items(p, SyntaxKind::R_PAREN);
    }
    p.expect(SyntaxKind::R_PAREN);
    p.finish_node();
}

/// Comma separated call or constructor arguments, optionally followed by
/// `for for_indices` (array comprehension / reduction)
fn parse_argument_items<P: ExpressionParser>(p: &mut P, close: SyntaxKind) {
    let mut first = true;
    loop {
        let start_pos = p.get_pos();
        if p.at(SyntaxKind::IDENT) && p.peek_kind(1) == SyntaxKind::EQ {
            parse_named_argument(p);
        } else {
            parse_function_argument(p);
        }
        if first && p.at(SyntaxKind::FOR_KW) {
            p.bump();
            parse_for_indices(p);
            break;
        }
        first = false;
        if p.get_pos() == start_pos || p.at(close) || !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
}

/// named_argument = IDENT '=' function_argument
fn parse_named_argument<P: ExpressionParser>(p: &mut P) {
    p.start_node(SyntaxKind::NAMED_ARGUMENT);
    p.bump(); // IDENT
    p.bump(); // =
    parse_function_argument(p);
    p.finish_node();
}

/// function_argument = function name '(' [ named_arguments ] ')' | expression
fn parse_function_argument<P: ExpressionParser>(p: &mut P) {
    p.start_node(SyntaxKind::FUNCTION_ARGUMENT);
    if p.at(SyntaxKind::FUNCTION_KW) {
        p.bump();
        parse_name(p);
        parse_function_call_args(p);
    } else {
        parse_expression(p);
    }
    p.finish_node();
}

/// output_expression_list = '(' [ expression ] { ',' [ expression ] } ')'
fn parse_output_expression_list<P: ExpressionParser>(p: &mut P) {
    p.start_node(SyntaxKind::OUTPUT_EXPRESSION_LIST);
    p.bump(); // (
    loop {
        if !p.at_any(&[SyntaxKind::COMMA, SyntaxKind::R_PAREN]) {
            parse_expression(p);
        }
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
    p.expect(SyntaxKind::R_PAREN);
    p.finish_node();
}

/// '[' expression_list { ';' expression_list } ']'
fn parse_array_concatenation<P: ExpressionParser>(p: &mut P) {
    p.start_node(SyntaxKind::ARRAY_CONCATENATION);
    p.bump(); // [
    loop {
        parse_expression_list(p);
        if !p.eat(SyntaxKind::SEMICOLON) {
            break;
        }
    }
    p.expect(SyntaxKind::R_BRACKET);
    p.finish_node();
}

/// '{' array_arguments '}'
fn parse_array_constructor<P: ExpressionParser>(p: &mut P) {
    p.start_node(SyntaxKind::ARRAY_CONSTRUCTOR);
    p.bump(); // {
    if !p.at(SyntaxKind::R_BRACE) {
        parse_argument_items(p, SyntaxKind::R_BRACE);
    }
    p.expect(SyntaxKind::R_BRACE);
    p.finish_node();
}

/// expression_list = expression { ',' expression }
pub fn parse_expression_list<P: ExpressionParser>(p: &mut P) {
    loop {
        if !parse_expression(p) || !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
}

/// for_indices = for_index { ',' for_index }
pub fn parse_for_indices<P: ExpressionParser>(p: &mut P) {
    p.start_node(SyntaxKind::FOR_INDICES);
    loop {
        p.start_node(SyntaxKind::FOR_INDEX);
        p.expect(SyntaxKind::IDENT);
        if p.eat(SyntaxKind::IN_KW) {
            parse_expression(p);
        }
        p.finish_node();
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
    p.finish_node();
}
