//! The three unit kinds and their identities
//!
//! | kind       | pattern                              | identity                        |
//! |------------|--------------------------------------|---------------------------------|
//! | class      | `//class_definition`                 | long class name                 |
//! | component  | `//component_clause`                 | `class::type::first_name`       |
//! | connection | `//equation_section//connect_clause` | `source->target`                |

use smol_str::{SmolStr, format_smolstr};

use super::class::ClassMembers;
use crate::parser::ast;

/// Class definitions anywhere in the document
///
/// Short class definitions (`type T = Real;`) have no long specifier and are
/// not units.
pub struct ClassKind;

impl super::unit::UnitKind for ClassKind {
    type Node = ast::ClassDefinition;
    type Children = ClassMembers;

    const NAME: &'static str = "class definition";
    const PATTERN: &'static str = "//class_definition";
    const SCOPED: bool = false;

    fn identity(_owner: &str, node: &Self::Node) -> Option<SmolStr> {
        class_identity(node)
    }
}

/// Component clauses whose nearest enclosing class is the owner
pub struct ComponentKind;

impl super::unit::UnitKind for ComponentKind {
    type Node = ast::ComponentClause;
    type Children = ();

    const NAME: &'static str = "component clause";
    const PATTERN: &'static str = "//component_clause";
    const SCOPED: bool = true;

    fn identity(owner: &str, node: &Self::Node) -> Option<SmolStr> {
        component_identity(owner, node)
    }
}

/// Connect clauses in the owner's equation sections
pub struct ConnectionKind;

impl super::unit::UnitKind for ConnectionKind {
    type Node = ast::ConnectClause;
    type Children = ();

    const NAME: &'static str = "connect clause";
    const PATTERN: &'static str = "//equation_section//connect_clause";
    const SCOPED: bool = true;

    fn identity(_owner: &str, node: &Self::Node) -> Option<SmolStr> {
        let source = node.source()?.text();
        let target = node.target()?.text();
        Some(connection_identity(&source, &target))
    }
}

pub(crate) fn class_identity(node: &ast::ClassDefinition) -> Option<SmolStr> {
    node.long_class_specifier()?.name().map(SmolStr::from)
}

pub(crate) fn component_identity(owner: &str, node: &ast::ComponentClause) -> Option<SmolStr> {
    let type_name = node.type_specifier()?.text();
    let first = node.declarations().next()?.name()?;
    Some(format_smolstr!("{}::{}::{}", owner, type_name, first))
}

pub(crate) fn connection_identity(source: &str, target: &str) -> SmolStr {
    format_smolstr!("{}->{}", source, target)
}
