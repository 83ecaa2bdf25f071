//! Syntax file wrapper for parsed Modelica files.
//!
//! Pairs a parse result with the line index of its text so diagnostics and
//! unit spans can be reported as line/column positions.

use std::fmt::Write as _;

use crate::base::{LineIndex, Position, Span, TextRange};
use crate::parser::{AstNode, Parse, SyntaxError, SyntaxNode, ast::StoredDefinition, parse};

/// A parsed Modelica file
#[derive(Debug, Clone)]
pub struct SyntaxFile {
    /// The underlying rowan parse result
    parse: Parse,
    line_index: LineIndex,
}

/// A syntax error located by line and column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxDiagnostic {
    pub message: String,
    pub position: Position,
}

impl SyntaxFile {
    /// Parse `source` as a whole Modelica file
    pub fn new(source: &str) -> Self {
        Self {
            parse: parse(source),
            line_index: LineIndex::new(source),
        }
    }

    /// Get the underlying parse result
    pub fn parse(&self) -> &Parse {
        &self.parse
    }

    pub fn syntax(&self) -> SyntaxNode {
        self.parse.syntax()
    }

    /// Get the root stored definition AST node
    pub fn stored_definition(&self) -> Option<StoredDefinition> {
        StoredDefinition::cast(self.parse.syntax())
    }

    /// Check if parsing had errors
    pub fn has_errors(&self) -> bool {
        !self.parse.errors.is_empty()
    }

    /// Get parse errors
    pub fn errors(&self) -> &[SyntaxError] {
        &self.parse.errors
    }

    /// The first parse error, located by line and column
    pub fn first_error(&self) -> Option<SyntaxDiagnostic> {
        self.parse.errors.first().map(|e| SyntaxDiagnostic {
            message: e.message.clone(),
            position: self.line_index.line_col(e.range.start()).into(),
        })
    }

    /// Get the source text of the file
    pub fn source_text(&self) -> String {
        self.parse.syntax().text().to_string()
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    /// Line/column span of a byte range in this file
    pub fn span(&self, range: TextRange) -> Span {
        self.line_index.span(range)
    }

    /// Indented dump of the parse tree, one `rule:` or `token:` line per node.
    ///
    /// Trivia is left out.
    pub fn print_tree(&self) -> String {
        let mut out = String::new();
        print_node(&self.parse.syntax(), 0, &mut out);
        out
    }
}

fn print_node(node: &SyntaxNode, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    let name = node.kind().rule_name().unwrap_or("unknown");
    let _ = writeln!(out, "{indent}rule:  {name}");
    for child in node.children_with_tokens() {
        match child {
            rowan::NodeOrToken::Node(n) => print_node(&n, depth + 1, out),
            rowan::NodeOrToken::Token(t) if !t.kind().is_trivia() => {
                let _ = writeln!(out, "{indent}  token: {}", t.text());
            }
            rowan::NodeOrToken::Token(_) => {}
        }
    }
}
