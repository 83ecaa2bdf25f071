//! # modelica-edit
//!
//! Live-editing engine for Modelica source files.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! document  → Document, stable handles, mutations
//!   ↓
//! syntax    → SyntaxFile, diagnostics with line/column
//!   ↓
//! parser    → Logos lexer, recursive-descent parser, rule parser, pattern queries
//!   ↓
//! base      → Primitives (TextRange, LineIndex, Span)
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → syntax → document)
// ============================================================================

/// Foundation types: TextRange, line/column conversion
pub mod base;

/// Parser: Logos lexer, recursive-descent parser, typed AST, pattern queries
pub mod parser;

/// Syntax: parsed file wrapper with diagnostics
pub mod syntax;

/// Document: live editing with handles that survive re-parsing
pub mod document;

// Re-export foundation types
pub use base::{LineCol, LineIndex, Position, Span, TextRange, TextSize};

// Re-export the editing surface
pub use document::{
    ClassDefinition, ComponentClause, ConnectClause, Document, DocumentError, EditOptions,
};
