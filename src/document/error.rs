//! Error types for document operations.

use thiserror::Error;

use crate::syntax::SyntaxDiagnostic;

/// Errors that can occur while querying or editing a document.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Text (whole document or snippet) failed to parse. Line and column are 1-indexed.
    #[error("Syntax error at {line}:{column}: {message}")]
    Syntax {
        message: String,
        line: usize,
        column: usize,
    },

    /// Snippet parsed, but as a different construct than the operation needs.
    #[error("Kind mismatch: {0}")]
    KindMismatch(String),

    /// A class lacks the structure an edit needs (composition, equation section).
    #[error("Structural error: {0}")]
    Structural(String),

    /// An add operation targeted an identity that is already active.
    #[error("Duplicate {kind}: {id}")]
    Duplicate { kind: &'static str, id: String },

    /// Lookup by name or endpoints failed.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// Accessor called on a handle whose unit is no longer active.
    #[error("Stale {kind} handle used in {method}")]
    StaleHandle {
        kind: &'static str,
        method: &'static str,
    },

    /// The document was re-parsed but an inserted unit could not be relocated.
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error while loading a document.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for document operations
pub type Result<T> = std::result::Result<T, DocumentError>;

impl DocumentError {
    pub fn kind_mismatch(message: impl Into<String>) -> Self {
        Self::KindMismatch(message.into())
    }

    pub fn structural(message: impl Into<String>) -> Self {
        Self::Structural(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn duplicate(kind: &'static str, id: impl Into<String>) -> Self {
        Self::Duplicate {
            kind,
            id: id.into(),
        }
    }

    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn stale(kind: &'static str, method: &'static str) -> Self {
        Self::StaleHandle { kind, method }
    }

    pub fn is_syntax(&self) -> bool {
        matches!(self, Self::Syntax { .. })
    }
}

impl From<SyntaxDiagnostic> for DocumentError {
    fn from(diagnostic: SyntaxDiagnostic) -> Self {
        Self::Syntax {
            message: diagnostic.message,
            line: diagnostic.position.line + 1,
            column: diagnostic.position.column + 1,
        }
    }
}
