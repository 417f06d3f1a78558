//! Node type for rooted, leaf-labeled trees.

use crate::model::tree::NodeIndex;

// =#========================================================================#=
// NODE
// =#========================================================================#=
/// A node in a rooted tree stored in a [Tree](crate::model::tree::Tree) arena.
///
/// Unlike a fixed-arity model, every node is uniform: any node may carry a
/// label (empty string = unlabeled), an edge-length text, and any number of
/// ordered children. Structural editing can turn a leaf into an internal
/// node and vice versa, so the role of a node is derived, not declared.
///
/// # Invariants
/// - `index` is the node's position in the tree arena
/// - `parent` is a non-owning back-index: `None` for the root of a tree
///   (or of a detached subtree), `Some` otherwise
/// - A node with `Some(parent)` appears exactly once in that parent's
///   child sequence
/// - `length` holds the edge-length text verbatim as parsed; it is never
///   interpreted as a number, only its presence and textual identity matter
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Index of this node in the tree arena
    index: NodeIndex,
    /// Label text; empty means unlabeled
    label: String,
    /// Edge-length text, kept verbatim; `None` means no recorded length
    length: Option<String>,
    /// Index of the parent node, `None` for a (sub)tree root
    parent: Option<NodeIndex>,
    /// Indices of the child nodes, in order
    children: Vec<NodeIndex>,
}

impl Node {
    /// Creates a new unattached node (no parent, no children).
    ///
    /// # Arguments
    /// * `index` - The node's position in the tree arena
    /// * `label` - Label text (empty = unlabeled)
    /// * `length` - Verbatim edge-length text, if any
    pub fn new(index: NodeIndex, label: String, length: Option<String>) -> Self {
        Node {
            index,
            label,
            length,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Returns the index of this node.
    pub fn index(&self) -> NodeIndex {
        self.index
    }

    /// Returns the label text; empty means unlabeled.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the edge-length text, if any.
    pub fn length(&self) -> Option<&str> {
        self.length.as_deref()
    }

    /// Returns `true` if this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns `true` if this node has no parent.
    ///
    /// This is a local property: the root of a detached subtree also
    /// reports `true`. Whether a node is the root of a particular tree is
    /// decided by comparing against
    /// [`Tree::root_index`](crate::model::tree::Tree::root_index).
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Returns the number of children.
    pub fn children_count(&self) -> usize {
        self.children.len()
    }

    /// Returns the ordered child indices.
    pub fn children(&self) -> &[NodeIndex] {
        &self.children
    }

    /// Returns the index of the parent, or `None` for a (sub)tree root.
    pub fn parent_index(&self) -> Option<NodeIndex> {
        self.parent
    }

    // ------------------------------------------------------------------
    // Mutators, used by the editing primitives and the parser
    // ------------------------------------------------------------------

    pub(crate) fn set_label(&mut self, label: String) {
        self.label = label;
    }

    pub(crate) fn clear_label(&mut self) {
        self.label.clear();
    }

    pub(crate) fn set_length(&mut self, length: Option<String>) {
        self.length = length;
    }

    pub(crate) fn take_length(&mut self) -> Option<String> {
        self.length.take()
    }

    pub(crate) fn set_parent(&mut self, parent: Option<NodeIndex>) {
        self.parent = parent;
    }

    pub(crate) fn push_child(&mut self, child: NodeIndex) {
        self.children.push(child);
    }

    pub(crate) fn insert_child_at(&mut self, index: usize, child: NodeIndex) {
        let index = index.min(self.children.len());
        self.children.insert(index, child);
    }

    /// Removes `child` from the child sequence, returning its prior position.
    pub(crate) fn remove_child_index(&mut self, child: NodeIndex) -> Option<usize> {
        let position = self.children.iter().position(|&c| c == child)?;
        self.children.remove(position);
        Some(position)
    }

    pub(crate) fn set_children(&mut self, children: Vec<NodeIndex>) {
        self.children = children;
    }

    pub(crate) fn clear_children(&mut self) {
        self.children.clear();
    }
}
