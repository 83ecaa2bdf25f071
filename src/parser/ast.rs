//! Typed AST wrappers over the untyped rowan CST.
//!
//! This module provides strongly-typed accessors for Modelica syntax nodes.
//! Each struct wraps a SyntaxNode and provides methods to access children.

use super::syntax_kind::SyntaxKind;
use super::{SyntaxNode, SyntaxToken};

/// Trait for AST nodes that wrap a SyntaxNode
pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;
    fn cast(node: SyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &SyntaxNode;
}

// ============================================================================
// Helper utilities
// ============================================================================

/// Concatenated text of the non-trivia tokens under `node`.
///
/// Whitespace and comments are dropped, so `a . b [ 1 ]` and `a.b[1]` compare
/// equal. This is the canonical form used for unit identities.
pub fn compact_text(node: &SyntaxNode) -> String {
    node.descendants_with_tokens()
        .filter_map(|e| e.into_token())
        .filter(|t| !t.kind().is_trivia())
        .map(|t| t.text().to_string())
        .collect()
}

/// Check if a syntax node has a direct child token of the specified kind.
#[inline]
fn has_token(node: &SyntaxNode, kind: SyntaxKind) -> bool {
    node.children_with_tokens()
        .filter_map(|e| e.into_token())
        .any(|t| t.kind() == kind)
}

/// First direct child token of the given kind
#[inline]
fn child_token(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|e| e.into_token())
        .find(|t| t.kind() == kind)
}

/// First direct child node castable to `N`
#[inline]
fn child<N: AstNode>(node: &SyntaxNode) -> Option<N> {
    node.children().find_map(N::cast)
}

/// All direct child nodes castable to `N`
#[inline]
fn children<N: AstNode>(node: &SyntaxNode) -> impl Iterator<Item = N> + use<N> {
    node.children().filter_map(N::cast)
}

// ============================================================================
// Helper macros
// ============================================================================

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                kind == SyntaxKind::$kind
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                if Self::can_cast(node.kind()) {
                    Some(Self(node))
                } else {
                    None
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

// ============================================================================
// Root
// ============================================================================

ast_node!(StoredDefinition, STORED_DEFINITION);

impl StoredDefinition {
    /// The `within` prefix, if any
    pub fn within(&self) -> Option<Name> {
        self.0
            .children()
            .find(|n| n.kind() == SyntaxKind::WITHIN_CLAUSE)
            .and_then(|n| child(&n))
    }

    /// Top-level class definitions
    pub fn class_definitions(&self) -> impl Iterator<Item = ClassDefinition> + '_ {
        children(&self.0)
    }
}

// ============================================================================
// Classes
// ============================================================================

ast_node!(ClassDefinition, CLASS_DEFINITION);

/// The three shapes a class specifier can take
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClassSpecifier {
    Long(LongClassSpecifier),
    Short(SyntaxNode),
    Der(SyntaxNode),
}

impl ClassDefinition {
    pub fn is_encapsulated(&self) -> bool {
        has_token(&self.0, SyntaxKind::ENCAPSULATED_KW)
    }

    pub fn is_partial(&self) -> bool {
        self.0
            .children()
            .find(|n| n.kind() == SyntaxKind::CLASS_PREFIXES)
            .is_some_and(|n| has_token(&n, SyntaxKind::PARTIAL_KW))
    }

    /// The class restriction keywords (`model`, `expandable connector`, ...)
    pub fn prefixes(&self) -> Option<String> {
        self.0
            .children()
            .find(|n| n.kind() == SyntaxKind::CLASS_PREFIXES)
            .map(|n| {
                n.children_with_tokens()
                    .filter_map(|e| e.into_token())
                    .filter(|t| !t.kind().is_trivia())
                    .map(|t| t.text().to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
    }

    pub fn specifier(&self) -> Option<ClassSpecifier> {
        self.0.children().find_map(|n| match n.kind() {
            SyntaxKind::LONG_CLASS_SPECIFIER => LongClassSpecifier::cast(n).map(ClassSpecifier::Long),
            SyntaxKind::SHORT_CLASS_SPECIFIER => Some(ClassSpecifier::Short(n)),
            SyntaxKind::DER_CLASS_SPECIFIER => Some(ClassSpecifier::Der(n)),
            _ => None,
        })
    }

    pub fn long_class_specifier(&self) -> Option<LongClassSpecifier> {
        child(&self.0)
    }

    /// Class name, for any specifier shape
    pub fn name(&self) -> Option<String> {
        match self.specifier()? {
            ClassSpecifier::Long(long) => long.name(),
            ClassSpecifier::Short(node) | ClassSpecifier::Der(node) => {
                child_token(&node, SyntaxKind::IDENT).map(|t| t.text().to_string())
            }
        }
    }
}

ast_node!(LongClassSpecifier, LONG_CLASS_SPECIFIER);

impl LongClassSpecifier {
    /// `model extends Foo ... end Foo` form
    pub fn is_extends(&self) -> bool {
        has_token(&self.0, SyntaxKind::EXTENDS_KW)
    }

    /// Dot-joined name segments
    pub fn name(&self) -> Option<String> {
        let name: Name = child(&self.0)?;
        let segments = name.segments();
        if segments.is_empty() {
            None
        } else {
            Some(segments.join("."))
        }
    }

    pub fn description(&self) -> Option<SyntaxNode> {
        self.0
            .children()
            .find(|n| n.kind() == SyntaxKind::STRING_COMMENT)
    }

    pub fn composition(&self) -> Option<Composition> {
        child(&self.0)
    }

    /// The identifier after `end`
    pub fn end_name(&self) -> Option<String> {
        self.0
            .children()
            .find(|n| n.kind() == SyntaxKind::END_CLAUSE)
            .and_then(|n| child_token(&n, SyntaxKind::IDENT))
            .map(|t| t.text().to_string())
    }
}

ast_node!(Composition, COMPOSITION);

impl Composition {
    pub fn element_lists(&self) -> impl Iterator<Item = ElementList> + '_ {
        children(&self.0)
    }

    pub fn equation_sections(&self) -> impl Iterator<Item = EquationSection> + '_ {
        children(&self.0)
    }

    pub fn algorithm_sections(&self) -> impl Iterator<Item = SyntaxNode> + '_ {
        self.0
            .children()
            .filter(|n| n.kind() == SyntaxKind::ALGORITHM_SECTION)
    }
}

ast_node!(ElementList, ELEMENT_LIST);

impl ElementList {
    pub fn elements(&self) -> impl Iterator<Item = Element> + '_ {
        children(&self.0)
    }
}

ast_node!(Element, ELEMENT);

impl Element {
    pub fn component_clause(&self) -> Option<ComponentClause> {
        child(&self.0)
    }

    pub fn class_definition(&self) -> Option<ClassDefinition> {
        child(&self.0)
    }

    pub fn is_import(&self) -> bool {
        self.0.children().any(|n| n.kind() == SyntaxKind::IMPORT_CLAUSE)
    }

    pub fn is_extends(&self) -> bool {
        self.0.children().any(|n| n.kind() == SyntaxKind::EXTENDS_CLAUSE)
    }

    pub fn is_replaceable(&self) -> bool {
        has_token(&self.0, SyntaxKind::REPLACEABLE_KW)
    }
}

// ============================================================================
// Components
// ============================================================================

ast_node!(ComponentClause, COMPONENT_CLAUSE);

impl ComponentClause {
    pub fn type_specifier(&self) -> Option<TypeSpecifier> {
        child(&self.0)
    }

    /// Type prefix keywords (`parameter`, `flow`, `input`, ...)
    pub fn type_prefix(&self) -> Vec<SyntaxKind> {
        self.0
            .children()
            .find(|n| n.kind() == SyntaxKind::TYPE_PREFIX)
            .map(|n| {
                n.children_with_tokens()
                    .filter_map(|e| e.into_token())
                    .map(|t| t.kind())
                    .filter(|k| k.is_keyword())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn declarations(&self) -> impl Iterator<Item = ComponentDeclaration> + use<> {
        self.0
            .children()
            .find(|n| n.kind() == SyntaxKind::COMPONENT_LIST)
            .into_iter()
            .flat_map(|list| list.children().filter_map(ComponentDeclaration::cast))
    }

    /// Declared names in source order
    pub fn names(&self) -> Vec<String> {
        self.declarations().filter_map(|d| d.name()).collect()
    }
}

ast_node!(TypeSpecifier, TYPE_SPECIFIER);

impl TypeSpecifier {
    /// Canonical type name (`Modelica.SIunits.Voltage`, `.Real`)
    pub fn text(&self) -> String {
        compact_text(&self.0)
    }
}

ast_node!(ComponentDeclaration, COMPONENT_DECLARATION);

impl ComponentDeclaration {
    pub fn declaration(&self) -> Option<Declaration> {
        child(&self.0)
    }

    pub fn name(&self) -> Option<String> {
        self.declaration().and_then(|d| d.name())
    }

    pub fn has_condition(&self) -> bool {
        self.0
            .children()
            .any(|n| n.kind() == SyntaxKind::CONDITION_ATTRIBUTE)
    }
}

ast_node!(Declaration, DECLARATION);

impl Declaration {
    pub fn name(&self) -> Option<String> {
        child_token(&self.0, SyntaxKind::IDENT).map(|t| t.text().to_string())
    }

    pub fn modification(&self) -> Option<SyntaxNode> {
        self.0
            .children()
            .find(|n| n.kind() == SyntaxKind::MODIFICATION)
    }
}

// ============================================================================
// Equations
// ============================================================================

ast_node!(EquationSection, EQUATION_SECTION);

impl EquationSection {
    pub fn is_initial(&self) -> bool {
        has_token(&self.0, SyntaxKind::INITIAL_KW)
    }

    /// The `equation` keyword opening the section
    pub fn keyword(&self) -> Option<SyntaxToken> {
        child_token(&self.0, SyntaxKind::EQUATION_KW)
    }

    pub fn equations(&self) -> impl Iterator<Item = Equation> + '_ {
        children(&self.0)
    }
}

ast_node!(Equation, EQUATION);

impl Equation {
    pub fn connect_clause(&self) -> Option<ConnectClause> {
        child(&self.0)
    }
}

ast_node!(ConnectClause, CONNECT_CLAUSE);

impl ConnectClause {
    pub fn source(&self) -> Option<ComponentReference> {
        children(&self.0).next()
    }

    pub fn target(&self) -> Option<ComponentReference> {
        children(&self.0).nth(1)
    }
}

// ============================================================================
// Names and references
// ============================================================================

ast_node!(ComponentReference, COMPONENT_REFERENCE);

impl ComponentReference {
    /// Canonical reference text (`a.b[1]`)
    pub fn text(&self) -> String {
        compact_text(&self.0)
    }
}

ast_node!(Name, NAME);

impl Name {
    pub fn segments(&self) -> Vec<String> {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .filter(|t| t.kind() == SyntaxKind::IDENT)
            .map(|t| t.text().to_string())
            .collect()
    }

    pub fn is_global(&self) -> bool {
        self.0
            .first_token()
            .is_some_and(|t| t.kind() == SyntaxKind::DOT)
    }
}
