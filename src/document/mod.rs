//! Live editing of a Modelica document
//!
//! A [`Document`] owns the source text and its parse tree. Callers get
//! handles ([`ClassDefinition`], [`ComponentClause`], [`ConnectClause`])
//! that stay attached to "the same" unit across edits: the whole text is
//! re-parsed after every change and each unit is found again by a
//! content-derived identity.
//!
//! ```
//! use modelica::document::Document;
//!
//! let doc = Document::new("model Foo\n  Real x;\nequation\nend Foo;\n")?;
//! let foo = doc.class_definition_by_name("Foo")?;
//! foo.add_component_clause("Real y;")?;
//! let wire = foo.add_connect_clause("x", "y")?;
//! assert_eq!(wire.source()?, "x");
//! assert!(foo.remove_connect_clause("x", "y")?);
//! assert!(!wire.is_valid());
//! # Ok::<(), modelica::document::DocumentError>(())
//! ```

mod class;
mod edit;
mod error;
mod handles;
mod kinds;
mod options;
mod state;
pub mod unit;

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use tracing::debug;

pub use class::{ClassMembers, select_equation_section};
pub use error::{DocumentError, Result};
pub use handles::{ClassDefinition, ComponentClause, ConnectClause};
pub use kinds::{ClassKind, ComponentKind, ConnectionKind};
pub use options::EditOptions;
pub use unit::{Rebind, Unit, UnitArena, UnitKind};

use state::DocumentState;

/// A parsed Modelica source file
///
/// Clones share the same underlying text and caches.
#[derive(Clone)]
pub struct Document {
    state: Rc<RefCell<DocumentState>>,
}

impl Document {
    /// Parse `text` with default edit options
    pub fn new(text: &str) -> Result<Self> {
        Self::with_options(text, EditOptions::default())
    }

    pub fn with_options(text: &str, options: EditOptions) -> Result<Self> {
        let state = DocumentState::new(text, options)?;
        Ok(Self {
            state: Rc::new(RefCell::new(state)),
        })
    }

    /// Load and parse a file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), "loading document");
        Self::new(&text)
    }

    /// Replace the whole text
    ///
    /// Handles to units that still exist are rebound; the others become
    /// stale. On a syntax error the document is left as it was.
    pub fn parse(&self, text: &str) -> Result<()> {
        self.state.borrow_mut().parse(text)
    }

    pub fn text(&self) -> String {
        self.state.borrow().text().to_string()
    }

    pub fn options(&self) -> EditOptions {
        self.state.borrow().options
    }

    /// Indented dump of the current parse tree
    pub fn print_tree(&self) -> String {
        self.state.borrow().file().print_tree()
    }

    /// Every class in the document, nested ones included, in source order
    pub fn class_definitions(&self) -> Vec<ClassDefinition> {
        let indices = self.state.borrow_mut().class_indices();
        indices
            .into_iter()
            .map(|index| ClassDefinition::new(Rc::downgrade(&self.state), index))
            .collect()
    }

    /// Class by dot-joined name
    pub fn class_definition_by_name(&self, name: &str) -> Result<ClassDefinition> {
        let index = self.state.borrow_mut().class_by_name(name)?;
        Ok(ClassDefinition::new(Rc::downgrade(&self.state), index))
    }

    /// Append a long class definition after the last top-level class
    pub fn add_class_definition(&self, text: &str) -> Result<ClassDefinition> {
        let index = self.state.borrow_mut().add_class_definition(text)?;
        Ok(ClassDefinition::new(Rc::downgrade(&self.state), index))
    }

    /// Number of active classes, components and connections
    pub fn live_units(&self) -> usize {
        self.state.borrow().live_units()
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("Document")
            .field("len", &state.text().len())
            .field("classes", &state.classes.active_count())
            .finish()
    }
}
