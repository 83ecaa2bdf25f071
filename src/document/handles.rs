//! Caller-facing handles to classes, components and connections
//!
//! A handle is a weak pointer to the document plus arena indices. It never
//! keeps the document alive and never owns a unit; when the unit behind it
//! is inactive every accessor fails with [`DocumentError::StaleHandle`].

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use super::error::{DocumentError, Result};
use super::kinds::{ClassKind, ComponentKind, ConnectionKind};
use super::state::DocumentState;
use super::unit::{Unit, UnitKind};
use crate::base::Span;
use crate::parser::{AstNode, ast};

type StateRef = Weak<RefCell<DocumentState>>;

fn upgrade(doc: &StateRef, kind: &'static str, method: &'static str) -> Result<Rc<RefCell<DocumentState>>> {
    doc.upgrade().ok_or_else(|| DocumentError::stale(kind, method))
}

/// Handle to a class definition
#[derive(Clone)]
pub struct ClassDefinition {
    doc: StateRef,
    index: usize,
}

impl ClassDefinition {
    pub(crate) fn new(doc: StateRef, index: usize) -> Self {
        Self { doc, index }
    }

    fn read<R>(
        &self,
        method: &'static str,
        f: impl FnOnce(&DocumentState, &Unit<ClassKind>, &ast::ClassDefinition) -> R,
    ) -> Result<R> {
        let doc = upgrade(&self.doc, ClassKind::NAME, method)?;
        let state = doc.borrow();
        let unit = state
            .class_unit(self.index)
            .ok_or_else(|| DocumentError::stale(ClassKind::NAME, method))?;
        let node = unit
            .node()
            .ok_or_else(|| DocumentError::stale(ClassKind::NAME, method))?;
        Ok(f(&*state, unit, node))
    }

    fn write<R>(
        &self,
        method: &'static str,
        f: impl FnOnce(&mut DocumentState) -> Result<R>,
    ) -> Result<R> {
        let doc = upgrade(&self.doc, ClassKind::NAME, method)?;
        let mut state = doc.borrow_mut();
        if state.class_node(self.index).is_none() {
            return Err(DocumentError::stale(ClassKind::NAME, method));
        }
        f(&mut *state)
    }

    pub fn is_valid(&self) -> bool {
        self.doc
            .upgrade()
            .is_some_and(|doc| doc.borrow().class_node(self.index).is_some())
    }

    /// Dot-joined class name
    pub fn id(&self) -> Result<String> {
        self.read("id", |_, unit, _| unit.id().to_string())
    }

    /// Name from the long class specifier
    pub fn long_class_specifier(&self) -> Result<String> {
        self.read("long_class_specifier", |_, _, node| {
            node.long_class_specifier().and_then(|spec| spec.name())
        })?
        .ok_or_else(|| DocumentError::internal("class unit bound to a node without a name"))
    }

    /// Class prefix keywords, e.g. `partial model`
    pub fn prefixes(&self) -> Result<String> {
        self.read("prefixes", |_, _, node| node.prefixes().unwrap_or_default())
    }

    /// Source text of the definition, without the trailing `;`
    pub fn text(&self) -> Result<String> {
        self.read("text", |_, _, node| node.syntax().text().to_string())
    }

    pub fn span(&self) -> Result<Span> {
        self.read("span", |state, _, node| {
            state.file().span(node.syntax().text_range())
        })
    }

    /// Components declared directly in this class
    pub fn component_clauses(&self) -> Result<Vec<ComponentClause>> {
        self.write("component_clauses", |state| {
            Ok(state
                .component_indices(self.index)
                .into_iter()
                .map(|index| ComponentClause::new(self.doc.clone(), self.index, index))
                .collect())
        })
    }

    /// Add a component clause (`Real y;`, `parameter Real k = 1`) to the class body
    pub fn add_component_clause(&self, text: &str) -> Result<ComponentClause> {
        let index = self.write("add_component_clause", |state| {
            state.add_component_clause(self.index, text)
        })?;
        Ok(ComponentClause::new(self.doc.clone(), self.index, index))
    }

    /// Connect clauses in this class's equation sections
    pub fn connect_clauses(&self) -> Result<Vec<ConnectClause>> {
        self.write("connect_clauses", |state| {
            Ok(state
                .connection_indices(self.index)
                .into_iter()
                .map(|index| ConnectClause::new(self.doc.clone(), self.index, index))
                .collect())
        })
    }

    pub fn add_connect_clause(&self, source: &str, target: &str) -> Result<ConnectClause> {
        let index = self.write("add_connect_clause", |state| {
            state.add_connect_clause(self.index, source, target)
        })?;
        Ok(ConnectClause::new(self.doc.clone(), self.index, index))
    }

    /// Remove `connect(source, target)`; `Ok(false)` if there is none
    pub fn remove_connect_clause(&self, source: &str, target: &str) -> Result<bool> {
        self.write("remove_connect_clause", |state| {
            state.remove_connect_clause(self.index, source, target)
        })
    }
}

impl PartialEq for ClassDefinition {
    fn eq(&self, other: &Self) -> bool {
        Weak::ptr_eq(&self.doc, &other.doc) && self.index == other.index
    }
}

impl Eq for ClassDefinition {}

impl fmt::Debug for ClassDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassDefinition")
            .field("id", &self.id().ok())
            .field("valid", &self.is_valid())
            .finish()
    }
}

/// Handle to a component clause inside a class
#[derive(Clone)]
pub struct ComponentClause {
    doc: StateRef,
    class: usize,
    index: usize,
}

impl ComponentClause {
    fn new(doc: StateRef, class: usize, index: usize) -> Self {
        Self { doc, class, index }
    }

    fn read<R>(
        &self,
        method: &'static str,
        f: impl FnOnce(&Unit<ComponentKind>, &ast::ComponentClause) -> R,
    ) -> Result<R> {
        let doc = upgrade(&self.doc, ComponentKind::NAME, method)?;
        let state = doc.borrow();
        let unit = state
            .class_unit(self.class)
            .and_then(|class| class.children.components.get(self.index))
            .ok_or_else(|| DocumentError::stale(ComponentKind::NAME, method))?;
        let node = unit
            .node()
            .ok_or_else(|| DocumentError::stale(ComponentKind::NAME, method))?;
        Ok(f(unit, node))
    }

    pub fn is_valid(&self) -> bool {
        self.read("is_valid", |_, _| ()).is_ok()
    }

    /// `Class::Type::first_name`
    pub fn id(&self) -> Result<String> {
        self.read("id", |unit, _| unit.id().to_string())
    }

    pub fn text(&self) -> Result<String> {
        self.read("text", |_, node| node.syntax().text().to_string())
    }

    pub fn type_specifier(&self) -> Result<String> {
        self.read("type_specifier", |_, node| {
            node.type_specifier().map(|t| t.text()).unwrap_or_default()
        })
    }

    /// Every name the clause declares, in order
    pub fn names(&self) -> Result<Vec<String>> {
        self.read("names", |_, node| node.names())
    }
}

impl PartialEq for ComponentClause {
    fn eq(&self, other: &Self) -> bool {
        Weak::ptr_eq(&self.doc, &other.doc) && self.class == other.class && self.index == other.index
    }
}

impl Eq for ComponentClause {}

impl fmt::Debug for ComponentClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentClause")
            .field("id", &self.id().ok())
            .field("valid", &self.is_valid())
            .finish()
    }
}

/// Handle to a `connect(source, target)` statement
#[derive(Clone)]
pub struct ConnectClause {
    doc: StateRef,
    class: usize,
    index: usize,
}

impl ConnectClause {
    fn new(doc: StateRef, class: usize, index: usize) -> Self {
        Self { doc, class, index }
    }

    fn read<R>(
        &self,
        method: &'static str,
        f: impl FnOnce(&ast::ConnectClause) -> R,
    ) -> Result<R> {
        let doc = upgrade(&self.doc, ConnectionKind::NAME, method)?;
        let state = doc.borrow();
        let node = state
            .class_unit(self.class)
            .and_then(|class| class.children.connections.get(self.index))
            .and_then(|unit| unit.node())
            .ok_or_else(|| DocumentError::stale(ConnectionKind::NAME, method))?;
        Ok(f(node))
    }

    pub fn is_valid(&self) -> bool {
        self.read("is_valid", |_| ()).is_ok()
    }

    pub fn source(&self) -> Result<String> {
        self.read("source", |node| node.source().map(|r| r.text()))?
            .ok_or_else(|| DocumentError::internal("connect clause without source"))
    }

    pub fn target(&self) -> Result<String> {
        self.read("target", |node| node.target().map(|r| r.text()))?
            .ok_or_else(|| DocumentError::internal("connect clause without target"))
    }

    /// Source text of the clause, without the trailing `;`
    pub fn text(&self) -> Result<String> {
        self.read("text", |node| node.syntax().text().to_string())
    }

    /// Remove this clause from its class
    pub fn remove(&self) -> Result<bool> {
        let source = self.source()?;
        let target = self.target()?;
        ClassDefinition::new(self.doc.clone(), self.class).remove_connect_clause(&source, &target)
    }
}

impl PartialEq for ConnectClause {
    fn eq(&self, other: &Self) -> bool {
        Weak::ptr_eq(&self.doc, &other.doc) && self.class == other.class && self.index == other.index
    }
}

impl Eq for ConnectClause {}

impl fmt::Debug for ConnectClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let endpoints = self.read("fmt", |node| {
            (node.source().map(|r| r.text()), node.target().map(|r| r.text()))
        });
        f.debug_struct("ConnectClause")
            .field("endpoints", &endpoints.ok())
            .field("valid", &self.is_valid())
            .finish()
    }
}
