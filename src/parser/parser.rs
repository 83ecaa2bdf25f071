//! Recursive descent parser for Modelica
//!
//! Builds a rowan GreenNode tree from tokens.
//! Trivia is attached lazily: it is flushed into whichever node is open when
//! the next significant token (or node) starts, so node ranges begin and end
//! on significant tokens. The CST stays lossless either way.

use super::grammar::{self, ExpressionParser};
use super::lexer::{Lexer, Token};
use super::syntax_kind::SyntaxKind;
use rowan::{GreenNode, GreenNodeBuilder, TextRange, TextSize};

/// Parse result containing the green tree and any errors
#[derive(Debug, Clone)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Get the root syntax node
    pub fn syntax(&self) -> super::SyntaxNode {
        super::SyntaxNode::new_root(self.green.clone())
    }

    /// Check if parsing succeeded without errors
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A syntax error with location and message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

/// Parse a whole Modelica file (`stored_definition`) into a CST
pub fn parse(input: &str) -> Parse {
    parse_with(input, SyntaxKind::STORED_DEFINITION, |p| {
        grammar::parse_stored_definition(p)
    })
}

/// Run `f` over the tokens of `input` inside a root node of kind `root`
///
/// Leading trivia goes into the root, as does anything left after `f` returns.
pub(crate) fn parse_with(
    input: &str,
    root: SyntaxKind,
    f: impl FnOnce(&mut Parser<'_>),
) -> Parse {
    let tokens: Vec<_> = Lexer::new(input).collect();
    let mut parser = Parser::new(&tokens, input.len());
    parser.builder.start_node(root.into());
    f(&mut parser);
    parser.skip_trivia();
    parser.builder.finish_node();
    parser.finish()
}

/// Human readable name of a token kind for diagnostics
pub fn kind_to_name(kind: SyntaxKind) -> &'static str {
    match kind {
        SyntaxKind::IDENT => "identifier",
        SyntaxKind::UNSIGNED_INTEGER => "integer",
        SyntaxKind::UNSIGNED_REAL => "real number",
        SyntaxKind::STRING => "string",
        SyntaxKind::L_PAREN => "'('",
        SyntaxKind::R_PAREN => "')'",
        SyntaxKind::L_BRACKET => "'['",
        SyntaxKind::R_BRACKET => "']'",
        SyntaxKind::L_BRACE => "'{'",
        SyntaxKind::R_BRACE => "'}'",
        SyntaxKind::SEMICOLON => "';'",
        SyntaxKind::COMMA => "','",
        SyntaxKind::DOT => "'.'",
        SyntaxKind::COLON => "':'",
        SyntaxKind::EQ => "'='",
        SyntaxKind::COLON_EQ => "':='",
        SyntaxKind::END_KW => "'end'",
        SyntaxKind::THEN_KW => "'then'",
        SyntaxKind::LOOP_KW => "'loop'",
        SyntaxKind::EQUATION_KW => "'equation'",
        SyntaxKind::ALGORITHM_KW => "'algorithm'",
        SyntaxKind::CONNECT_KW => "'connect'",
        SyntaxKind::ERROR => "invalid token",
        kind if kind.is_keyword() => "keyword",
        kind if kind.is_punct() => "operator",
        _ => "token",
    }
}

/// The parser state
pub(crate) struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
    input_len: usize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<SyntaxError>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token<'a>], input_len: usize) -> Self {
        Self {
            tokens,
            pos: 0,
            input_len,
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
        }
    }

    fn finish(self) -> Parse {
        Parse {
            green: self.builder.finish(),
            errors: self.errors,
        }
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    /// Index of the next significant (non-trivia) token
    fn significant_pos(&self) -> usize {
        let mut idx = self.pos;
        while idx < self.tokens.len() && self.tokens[idx].kind.is_trivia() {
            idx += 1;
        }
        idx
    }

    fn current(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.significant_pos())
    }

    fn end_range(&self) -> TextRange {
        TextRange::empty(TextSize::new(self.input_len as u32))
    }

}

impl ExpressionParser for Parser<'_> {
    fn current_kind(&self) -> SyntaxKind {
        self.current().map(|t| t.kind).unwrap_or(SyntaxKind::ERROR)
    }

    fn current_text(&self) -> &str {
        self.current().map(|t| t.text).unwrap_or("")
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        !self.at_eof() && self.current_kind() == kind
    }

    fn at_any(&self, kinds: &[SyntaxKind]) -> bool {
        !self.at_eof() && kinds.contains(&self.current_kind())
    }

    fn at_eof(&self) -> bool {
        self.significant_pos() >= self.tokens.len()
    }

    fn peek_kind(&self, n: usize) -> SyntaxKind {
        // Look ahead, skipping trivia
        let mut idx = self.pos;
        let mut count = 0;
        while idx < self.tokens.len() {
            if !self.tokens[idx].kind.is_trivia() {
                if count == n {
                    return self.tokens[idx].kind;
                }
                count += 1;
            }
            idx += 1;
        }
        SyntaxKind::ERROR
    }

    fn get_pos(&self) -> usize {
        self.pos
    }

    fn skip_trivia(&mut self) {
        while let Some(token) = self.tokens.get(self.pos) {
            if !token.kind.is_trivia() {
                break;
            }
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    fn bump(&mut self) {
        self.skip_trivia();
        if let Some(token) = self.tokens.get(self.pos) {
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    fn bump_any(&mut self) {
        self.bump();
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            true
        } else {
            let found = if self.at_eof() {
                "end of input".to_string()
            } else {
                format!("'{}'", self.current_text())
            };
            self.error(format!("expected {}, found {}", kind_to_name(kind), found));
            false
        }
    }

    fn error(&mut self, message: String) {
        let range = self
            .current()
            .map(|t| TextRange::at(t.offset, TextSize::of(t.text)))
            .unwrap_or_else(|| self.end_range());
        self.errors.push(SyntaxError::new(message, range));
    }

    fn error_recover(&mut self, message: String, recovery: &[SyntaxKind]) {
        self.error(message);
        self.start_node(SyntaxKind::ERROR);
        // Always consume at least one token to make progress
        let mut consumed = false;
        while !self.at_eof() && !self.at_any(recovery) {
            self.bump_any();
            consumed = true;
        }
        if !consumed && !self.at_eof() {
            self.bump_any();
        }
        self.finish_node();
    }

    fn start_node(&mut self, kind: SyntaxKind) {
        self.skip_trivia();
        self.builder.start_node(kind.into());
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }
}
