//! Stable units that survive re-parsing
//!
//! A unit pairs a content-derived identity with the tree node it is currently
//! bound to. Every unit kind shares one implementation, parameterised by a
//! [`UnitKind`]: the node type, the pattern that finds candidate nodes, and
//! the identity function.
//!
//! Units live in a [`UnitArena`] keyed by identity. Entries are never removed:
//! when an identity disappears from the tree the unit is deactivated in place,
//! so handles holding its index observe an inactive unit instead of a dangling
//! one. When the identity shows up again the same unit becomes active again.

use indexmap::IndexMap;
use rustc_hash::{FxBuildHasher, FxHashMap, FxHashSet};
use smol_str::SmolStr;
use tracing::{error, trace, warn};

use crate::parser::{AstNode, Pattern, SyntaxKind, SyntaxNode};

/// Describes one kind of unit (class, component, connection)
pub trait UnitKind: 'static {
    /// Typed node the unit binds to
    type Node: AstNode + Clone + std::fmt::Debug;
    /// Per-unit data that lives as long as the unit (child caches for classes)
    type Children: Default;

    /// Human readable kind, used in errors and logs
    const NAME: &'static str;
    /// Structural pattern selecting candidate nodes under a scope
    const PATTERN: &'static str;
    /// Only keep nodes whose nearest enclosing class is the scope itself
    const SCOPED: bool;

    /// Identity of `node`; `owner` is the identity of the owning unit, empty at document level
    fn identity(owner: &str, node: &Self::Node) -> Option<SmolStr>;

    /// All candidate nodes under `scope`, in document order
    fn find_nodes(scope: &SyntaxNode) -> Vec<Self::Node> {
        let pattern = match Pattern::parse(Self::PATTERN) {
            Ok(pattern) => pattern,
            Err(e) => {
                error!(kind = Self::NAME, pattern = Self::PATTERN, "invalid unit pattern: {}", e);
                return Vec::new();
            }
        };
        pattern
            .find_all(scope)
            .into_iter()
            .filter(|node| !Self::SCOPED || nearest_class(node).as_ref() == Some(scope))
            .filter_map(Self::Node::cast)
            .collect()
    }
}

/// Candidate nodes under `scope` keyed by identity; the last node wins a shared identity
fn candidates<K: UnitKind>(scope: &SyntaxNode, owner: &str) -> FxHashMap<SmolStr, K::Node> {
    K::find_nodes(scope)
        .into_iter()
        .filter_map(|node| Some((K::identity(owner, &node)?, node)))
        .collect()
}

/// Closest `class_definition` strictly above `node`
pub(crate) fn nearest_class(node: &SyntaxNode) -> Option<SyntaxNode> {
    node.ancestors()
        .skip(1)
        .find(|n| n.kind() == SyntaxKind::CLASS_DEFINITION)
}

/// Type-erased view of a unit used by the rebind pass
pub trait Rebind {
    fn id(&self) -> &str;
    fn is_active(&self) -> bool;
    /// Re-resolve the identity under `scope`; `None` means the scope itself is gone
    fn update_ctx(&mut self, scope: Option<&SyntaxNode>);
}

/// One unit: identity plus the node it is currently bound to
pub struct Unit<K: UnitKind> {
    id: SmolStr,
    owner: SmolStr,
    node: Option<K::Node>,
    pub(crate) children: K::Children,
}

impl<K: UnitKind> Unit<K> {
    fn new(id: SmolStr, owner: SmolStr, node: K::Node) -> Self {
        Self {
            id,
            owner,
            node: Some(node),
            children: K::Children::default(),
        }
    }

    pub fn id(&self) -> &SmolStr {
        &self.id
    }

    pub fn is_active(&self) -> bool {
        self.node.is_some()
    }

    pub fn node(&self) -> Option<&K::Node> {
        self.node.as_ref()
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub(crate) fn bind(&mut self, node: K::Node) {
        self.node = Some(node);
    }

    /// Bind to `found`, or deactivate when the identity is gone
    fn settle(&mut self, found: Option<K::Node>) {
        match found {
            Some(node) => {
                trace!(kind = K::NAME, id = %self.id, "rebound");
                self.bind(node);
            }
            None => self.deactivate(),
        }
    }

    pub(crate) fn deactivate(&mut self) {
        if self.node.take().is_some() {
            trace!(kind = K::NAME, id = %self.id, "deactivated");
        }
    }
}

impl<K: UnitKind> Rebind for Unit<K> {
    fn id(&self) -> &str {
        &self.id
    }

    fn is_active(&self) -> bool {
        self.node.is_some()
    }

    fn update_ctx(&mut self, scope: Option<&SyntaxNode>) {
        let Some(scope) = scope else {
            self.deactivate();
            return;
        };
        let found = candidates::<K>(scope, &self.owner).remove(&self.id);
        self.settle(found);
    }
}

impl<K: UnitKind> std::fmt::Debug for Unit<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Unit")
            .field("kind", &K::NAME)
            .field("id", &self.id)
            .field("owner", &self.owner)
            .field("active", &self.node.is_some())
            .finish()
    }
}

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// All units of one kind under one owner, keyed by identity
///
/// Indices into the arena are stable for its whole lifetime.
pub struct UnitArena<K: UnitKind> {
    units: FxIndexMap<SmolStr, Unit<K>>,
    /// Active units in document order, as of the last rebuild
    order: Vec<usize>,
    dirty: bool,
}

impl<K: UnitKind> Default for UnitArena<K> {
    fn default() -> Self {
        Self {
            units: FxIndexMap::default(),
            order: Vec::new(),
            dirty: true,
        }
    }
}

impl<K: UnitKind> std::fmt::Debug for UnitArena<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnitArena")
            .field("units", &self.units.values().collect::<Vec<_>>())
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl<K: UnitKind> UnitArena<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn get(&self, index: usize) -> Option<&Unit<K>> {
        self.units.get_index(index).map(|(_, unit)| unit)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Unit<K>> {
        self.units.get_index_mut(index).map(|(_, unit)| unit)
    }

    /// Index of the unit with this identity, active or not
    pub fn find(&self, id: &str) -> Option<usize> {
        self.units.get_index_of(id)
    }

    /// Index of the unit with this identity, if it is active
    pub fn find_active(&self, id: &str) -> Option<usize> {
        self.find(id)
            .filter(|&index| self.get(index).is_some_and(|u| u.is_active()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Unit<K>> {
        self.units.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Unit<K>> {
        self.units.values_mut()
    }

    /// Active units in document order, rebuilding first if dirty
    pub fn ensure(&mut self, scope: Option<&SyntaxNode>, owner: &str) -> &[usize] {
        if self.dirty {
            match scope {
                Some(scope) => self.rebuild(scope, owner),
                None => self.deactivate_all(),
            }
            self.dirty = false;
        }
        &self.order
    }

    /// Scan `scope` and bind, create or deactivate units to match it
    pub fn rebuild(&mut self, scope: &SyntaxNode, owner: &str) {
        self.order.clear();
        let mut seen: FxHashSet<SmolStr> = FxHashSet::default();

        for node in K::find_nodes(scope) {
            let Some(id) = K::identity(owner, &node) else {
                continue;
            };
            if !seen.insert(id.clone()) {
                warn!(kind = K::NAME, id = %id, "identity shared by several nodes; binding the last one");
                if let Some(unit) = self.units.get_mut(&id) {
                    unit.bind(node);
                }
                continue;
            }
            let index = match self.units.get_full_mut(&id) {
                Some((index, _, unit)) => {
                    unit.bind(node);
                    index
                }
                None => {
                    trace!(kind = K::NAME, id = %id, "discovered");
                    let (index, _) = self
                        .units
                        .insert_full(id.clone(), Unit::new(id, SmolStr::new(owner), node));
                    index
                }
            };
            self.order.push(index);
        }

        for unit in self.units.values_mut() {
            if !seen.contains(&unit.id) {
                unit.deactivate();
            }
        }
        self.dirty = false;
    }

    /// Rebind every unit against `scope`
    ///
    /// The scope is scanned once and every unit binds from the same identity
    /// map. Without a scope each unit deactivates through [`Rebind`].
    pub fn rebind(&mut self, scope: Option<&SyntaxNode>) {
        self.dirty = true;
        let Some(scope) = scope else {
            for unit in self.units.values_mut() {
                let unit: &mut dyn Rebind = unit;
                unit.update_ctx(None);
            }
            return;
        };
        // Units of one arena share their owner.
        let Some(owner) = self.units.values().next().map(|u| u.owner.clone()) else {
            return;
        };
        let mut found = candidates::<K>(scope, &owner);
        for unit in self.units.values_mut() {
            unit.settle(found.remove(&unit.id));
        }
    }

    /// Deactivate every unit without looking at the tree
    pub fn deactivate_all(&mut self) {
        for unit in self.units.values_mut() {
            unit.deactivate();
        }
        self.order.clear();
        self.dirty = true;
    }

    /// Number of active units
    pub fn active_count(&self) -> usize {
        self.units.values().filter(|u| u.is_active()).count()
    }
}
