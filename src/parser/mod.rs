//! Rowan-based lossless parser for Modelica
//!
//! This module provides a lossless parser using:
//! - **logos** for fast lexing
//! - **rowan** for the CST (Concrete Syntax Tree)
//!
//! This is the rust-analyzer approach: we build a lossless CST that preserves
//! all whitespace and comments, then extract an AST layer on top.
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (logos) → Tokens with SyntaxKind
//!     ↓
//! Parser → GreenNode tree (immutable, cheap to clone)
//!     ↓
//! SyntaxNode (rowan) → CST with parent pointers
//!     ↓
//! AST layer → Typed wrappers over SyntaxNode
//!     ↓
//! Pattern queries → nodes of one grammar rule under a root
//! ```
//!
//! There is no incremental reparsing: every edit re-parses the whole text.

#[allow(clippy::module_inception)]
mod parser;

pub mod ast;
pub mod grammar;
mod lexer;
pub mod query;
pub mod rule_parser;
mod syntax_kind;

pub use ast::{AstNode, compact_text};
pub use lexer::{Lexer, Token, tokenize};
pub use parser::{Parse, SyntaxError, kind_to_name, parse};
pub use query::{Pattern, PatternError};
pub use rule_parser::{Rule, RuleParseResult, parse_rule};
pub use syntax_kind::{
    ModelicaLanguage, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxNodeChildren, SyntaxToken,
};

/// Re-export rowan types for convenience
pub use rowan::{GreenNode, TextRange, TextSize};
