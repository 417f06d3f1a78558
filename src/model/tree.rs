//! Tree structure for rooted, leaf-labeled trees.
//!
//! - `Tree`: arena of [Node]s with a root index and a cached traversal order.
//! - `NodeIndex` addresses nodes in the arena.

use crate::model::node::Node;
use crate::model::traverse::{EulerTour, last_visit_order};
use std::collections::{HashMap, HashSet};

/// Index of a node in a tree arena.
pub type NodeIndex = usize;

/// *During construction only*, index for unset root.
const NO_ROOT_SET_INDEX: NodeIndex = usize::MAX;

// =#========================================================================#=
// TREE
// =#========================================================================#=
/// A rooted, leaf-labeled tree represented using the arena pattern on [Node].
///
/// Nodes are stored in a contiguous vector and referenced by [NodeIndex];
/// the parent back-reference is a non-owning index, so the usual
/// parent/child aliasing troubles of a pointer graph do not arise.
///
/// # Structure
/// - All nodes (root, internal, and leaves) are stored in the arena
/// - Index of root is maintained
/// - Arity is arbitrary; internal nodes may carry labels
/// - Edge lengths are opaque text, preserved verbatim
/// - Unlinking detaches a subtree but leaves its nodes in the arena;
///   detached nodes are unreachable from the root and are released when
///   the `Tree` is dropped
///
/// # Traversal order cache
/// [`nodes_in_order`](Tree::nodes_in_order) caches the last-visit (post)
/// order of the Euler tour. The cache is guarded by a generation counter:
/// every structural edit bumps the tree generation, and a stale cache is
/// rebuilt on next access rather than returned as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    /// Nodes of this tree (arena pattern)
    nodes: Vec<Node>,

    /// Index of the root of this tree
    root_index: NodeIndex,

    /// Cached last-visit order; valid iff `order_generation == generation`
    order: Vec<NodeIndex>,

    /// Bumped by every structural edit
    generation: u64,

    /// Generation at which `order` was last rebuilt
    order_generation: u64,
}

// ============================================================================
// New, Getters / Accessors (pub)
// ============================================================================
impl Tree {
    /// Creates a new, empty tree with no root set.
    pub fn new() -> Self {
        Tree {
            nodes: Vec::new(),
            root_index: NO_ROOT_SET_INDEX,
            order: Vec::new(),
            generation: 1,
            order_generation: 0,
        }
    }

    /// Adds an unattached node to the arena, returning its index.
    ///
    /// The node has no parent and no children; link it with
    /// [`add_child`](Tree::add_child) or declare it root with
    /// [`set_root`](Tree::set_root).
    pub fn add_node(&mut self, label: String, length: Option<String>) -> NodeIndex {
        let index = self.nodes.len();
        self.nodes.push(Node::new(index, label, length));
        self.bump_generation();
        index
    }

    /// Declares the node at `index` to be the root of this tree.
    pub fn set_root(&mut self, index: NodeIndex) {
        self.root_index = index;
        self.bump_generation();
    }

    /// Returns whether the root of the tree has been set.
    pub fn is_root_set(&self) -> bool {
        self.root_index != NO_ROOT_SET_INDEX
    }

    /// Returns the index of the root node.
    ///
    /// # Panics
    /// Panics if the root hasn't been set yet.
    pub fn root_index(&self) -> NodeIndex {
        assert!(self.is_root_set(), "tree has no root set");
        self.root_index
    }

    /// Returns a reference to the root node.
    ///
    /// # Panics
    /// Panics if the root hasn't been set yet.
    pub fn root(&self) -> &Node {
        &self.nodes[self.root_index()]
    }

    /// Returns the number of nodes in the arena, including detached ones.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of leaves reachable from the root.
    pub fn num_leaves(&self) -> usize {
        last_visit_order(self, self.root_index())
            .into_iter()
            .filter(|&i| self[i].is_leaf())
            .count()
    }

    /// Returns the siblings of a node: its parent's other children, in
    /// their original order. Empty for the root (or a detached node).
    pub fn siblings(&self, index: NodeIndex) -> Vec<NodeIndex> {
        match self[index].parent_index() {
            Some(parent) => self[parent]
                .children()
                .iter()
                .copied()
                .filter(|&c| c != index)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Returns an Euler-tour iterator over the subtree rooted at `start`.
    ///
    /// See [EulerTour] for the visit contract.
    pub fn tour_from(&self, start: NodeIndex) -> EulerTour<'_> {
        EulerTour::new(self, start)
    }

    /// Returns an Euler-tour iterator over the whole tree.
    pub fn tour(&self) -> EulerTour<'_> {
        EulerTour::new(self, self.root_index())
    }
}

impl std::ops::Index<NodeIndex> for Tree {
    type Output = Node;

    fn index(&self, index: NodeIndex) -> &Self::Output {
        &self.nodes[index]
    }
}

impl std::ops::IndexMut<NodeIndex> for Tree {
    fn index_mut(&mut self, index: NodeIndex) -> &mut Self::Output {
        &mut self.nodes[index]
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Traversal order cache, label index, leaf labels
// ============================================================================
impl Tree {
    /// Marks every cached traversal artifact stale. Called by every
    /// structural edit.
    pub(crate) fn bump_generation(&mut self) {
        self.generation += 1;
    }

    /// Returns the nodes reachable from the root in last-visit (post)
    /// order: children before their parent, subtrees in child order.
    ///
    /// The cached order is rebuilt if any structural edit happened since
    /// it was last computed; it is never returned stale.
    pub fn nodes_in_order(&mut self) -> &[NodeIndex] {
        if self.order_generation != self.generation {
            self.order = last_visit_order(self, self.root_index());
            self.order_generation = self.generation;
        }
        &self.order
    }

    /// Builds an ephemeral mapping from label text to node index by one
    /// traversal of the tree.
    ///
    /// Empty labels are never indexed. Duplicate labels are last-wins in
    /// traversal order; callers that require unique labels must ensure
    /// them upstream, duplicates are not detected here.
    pub fn label_map(&self) -> HashMap<String, NodeIndex> {
        let mut map = HashMap::new();
        for index in last_visit_order(self, self.root_index()) {
            let label = self[index].label();
            if !label.is_empty() {
                map.insert(label.to_string(), index);
            }
        }
        map
    }

    /// Collects the labels of all reachable, labeled leaves.
    pub fn leaf_labels(&self) -> HashSet<String> {
        let mut labels = HashSet::new();
        for index in last_visit_order(self, self.root_index()) {
            let node = &self[index];
            if node.is_leaf() && !node.label().is_empty() {
                labels.insert(node.label().to_string());
            }
        }
        labels
    }

    /// Validates the reachable part of the tree structure.
    ///
    /// Checks:
    /// - Root is set, in bounds, and has no parent
    /// - Every node's index matches its arena position
    /// - Every reachable child points back to its parent
    /// - Every reachable non-root node is among its parent's children
    ///
    /// Detached arena nodes are ignored; unlinking leaves them behind.
    pub fn is_valid(&self) -> bool {
        if !self.is_root_set() || self.root_index >= self.nodes.len() {
            return false;
        }
        if self.root().parent_index().is_some() {
            return false;
        }

        for (position, node) in self.nodes.iter().enumerate() {
            if node.index() != position {
                return false;
            }
        }

        for index in last_visit_order(self, self.root_index) {
            let node = &self[index];
            for &child in node.children() {
                if child >= self.nodes.len() {
                    return false;
                }
                if self[child].parent_index() != Some(index) {
                    return false;
                }
            }
            if index != self.root_index {
                match node.parent_index() {
                    None => return false,
                    Some(parent) => {
                        if parent >= self.nodes.len() {
                            return false;
                        }
                        if !self[parent].children().contains(&index) {
                            return false;
                        }
                    }
                }
            }
        }

        true
    }
}
