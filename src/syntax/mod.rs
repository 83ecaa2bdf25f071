//! Parsed file wrapper over the Modelica front end
pub mod file;

pub use file::{SyntaxDiagnostic, SyntaxFile};

// Re-export Position and Span from base for convenience
pub use crate::base::{Position, Span};
