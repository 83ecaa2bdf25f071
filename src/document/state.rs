//! Mutable state behind a [`Document`](super::Document)

use tracing::debug;

use super::error::{DocumentError, Result};
use super::kinds::ClassKind;
use super::options::EditOptions;
use super::unit::{Unit, UnitArena};
use crate::parser::{AstNode, SyntaxNode, ast};
use crate::syntax::SyntaxFile;

/// Text, tree and unit caches of one document
#[derive(Debug)]
pub(crate) struct DocumentState {
    file: SyntaxFile,
    text: String,
    pub(crate) options: EditOptions,
    pub(crate) classes: UnitArena<ClassKind>,
}

impl DocumentState {
    pub(crate) fn new(text: &str, options: EditOptions) -> Result<Self> {
        let file = SyntaxFile::new(text);
        if let Some(diagnostic) = file.first_error() {
            return Err(diagnostic.into());
        }
        let mut state = Self {
            file,
            text: text.to_string(),
            options,
            classes: UnitArena::new(),
        };
        state.classes.rebuild(&state.file.syntax(), "");
        debug!(len = text.len(), classes = state.classes.active_count(), "document loaded");
        Ok(state)
    }

    pub(crate) fn text(&self) -> &str {
        &self.text
    }

    pub(crate) fn file(&self) -> &SyntaxFile {
        &self.file
    }

    pub(crate) fn root(&self) -> SyntaxNode {
        self.file.syntax()
    }

    /// Replace text and tree, then rebind every unit
    ///
    /// On a syntax error nothing changes.
    pub(crate) fn parse(&mut self, text: &str) -> Result<()> {
        let file = SyntaxFile::new(text);
        if let Some(diagnostic) = file.first_error() {
            debug!(len = text.len(), error = %diagnostic.message, "rejected document text");
            return Err(diagnostic.into());
        }
        self.file = file;
        self.text = text.to_string();
        self.rebind_all();
        Ok(())
    }

    /// Classes against the new root first, then members against their class
    fn rebind_all(&mut self) {
        let root = self.root();
        self.classes.rebind(Some(&root));

        let mut members = 0;
        for class in self.classes.iter_mut() {
            match class.node().map(|node| node.syntax().clone()) {
                Some(node) => {
                    class.children.rebind(&node);
                    members += class.children.components.active_count()
                        + class.children.connections.active_count();
                }
                None => {
                    let id = class.id().clone();
                    class.children.cascade_deactivate(&id);
                }
            }
        }

        debug!(
            len = self.text.len(),
            classes = self.classes.active_count(),
            members,
            "document reparsed"
        );
    }

    /// Active classes in document order
    pub(crate) fn class_indices(&mut self) -> Vec<usize> {
        let root = self.root();
        self.classes.ensure(Some(&root), "").to_vec()
    }

    pub(crate) fn class_unit(&self, index: usize) -> Option<&Unit<ClassKind>> {
        self.classes.get(index)
    }

    /// Bound node of an active class
    pub(crate) fn class_node(&self, index: usize) -> Option<ast::ClassDefinition> {
        self.classes.get(index).and_then(|unit| unit.node()).cloned()
    }

    pub(crate) fn class_by_name(&mut self, name: &str) -> Result<usize> {
        self.class_indices();
        self.classes
            .find_active(name)
            .ok_or_else(|| DocumentError::not_found("class definition", name))
    }

    /// Active components of a class in document order
    pub(crate) fn component_indices(&mut self, class: usize) -> Vec<usize> {
        let Some(unit) = self.classes.get_mut(class) else {
            return Vec::new();
        };
        let scope = unit.node().map(|node| node.syntax().clone());
        let owner = unit.id().clone();
        unit.children
            .components
            .ensure(scope.as_ref(), &owner)
            .to_vec()
    }

    /// Active connections of a class in document order
    pub(crate) fn connection_indices(&mut self, class: usize) -> Vec<usize> {
        let Some(unit) = self.classes.get_mut(class) else {
            return Vec::new();
        };
        let scope = unit.node().map(|node| node.syntax().clone());
        let owner = unit.id().clone();
        unit.children
            .connections
            .ensure(scope.as_ref(), &owner)
            .to_vec()
    }

    /// Number of active units of every kind
    pub(crate) fn live_units(&self) -> usize {
        self.classes
            .iter()
            .map(|class| {
                usize::from(class.is_active())
                    + class.children.components.active_count()
                    + class.children.connections.active_count()
            })
            .sum()
    }
}
