//! Grammar modules for Modelica parsing
//!
//! This module contains the language-specific parsing logic organized by grammar area:
//! - `classes` - Stored definitions, classes, elements, components and modifications
//! - `equations` - Equation and algorithm sections
//! - `expressions` - Expression precedence chain, names and component references
//!
//! The parsing functions are generic over the `ExpressionParser` trait
//! so they can be used with any parser implementation.

pub mod classes;
pub mod equations;
pub mod expressions;

pub use classes::{parse_class_definition, parse_component_clause, parse_stored_definition};
pub use equations::parse_connect_clause;
pub use expressions::{ExpressionParser, parse_component_reference, parse_expression};
