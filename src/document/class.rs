//! Per-class caches of components and connections

use tracing::trace;

use super::error::{DocumentError, Result};
use super::kinds::{ComponentKind, ConnectionKind};
use super::unit::UnitArena;
use crate::parser::{AstNode, SyntaxNode, ast};

/// Children owned by one class unit
///
/// Both arenas rebuild lazily against the class's current node.
#[derive(Debug, Default)]
pub struct ClassMembers {
    pub components: UnitArena<ComponentKind>,
    pub connections: UnitArena<ConnectionKind>,
}

impl ClassMembers {
    /// Rebind every child against the class's new node
    pub(crate) fn rebind(&mut self, class_node: &SyntaxNode) {
        self.components.rebind(Some(class_node));
        self.connections.rebind(Some(class_node));
    }

    /// The class is gone; its children go with it
    pub(crate) fn cascade_deactivate(&mut self, class_id: &str) {
        if self.components.active_count() + self.connections.active_count() > 0 {
            trace!(class = class_id, "cascading deactivation to members");
        }
        self.components.deactivate_all();
        self.connections.deactivate_all();
    }
}

/// Equation section that receives new connect clauses
///
/// The first non-initial section wins; a class with only `initial equation`
/// sections uses the first of those.
pub fn select_equation_section(class: &ast::ClassDefinition) -> Result<ast::EquationSection> {
    let name = class.name().unwrap_or_default();
    let sections: Vec<_> = class
        .long_class_specifier()
        .and_then(|spec| spec.composition())
        .map(|composition| composition.equation_sections().collect())
        .unwrap_or_default();

    sections
        .iter()
        .find(|section| !section.is_initial())
        .or_else(|| sections.first())
        .cloned()
        .ok_or_else(|| {
            DocumentError::structural(format!("class '{}' has no equation section", name))
        })
}

/// Nesting depth of a class: 0 for top-level classes
pub(crate) fn class_depth(class: &ast::ClassDefinition) -> usize {
    class
        .syntax()
        .ancestors()
        .skip(1)
        .filter(|n| ast::ClassDefinition::can_cast(n.kind()))
        .count()
}
