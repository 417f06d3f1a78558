//! Structural editing of trees.
//!
//! All edits operate on node indices, rewire parent/child links in place,
//! and bump the tree generation so cached traversal orders are rebuilt.
//! Detached nodes stay in the arena; nothing here frees them.

use crate::model::tree::{NodeIndex, Tree};
use thiserror::Error;

/// Error raised when an edit's structural precondition does not hold.
///
/// These are recoverable contract violations on the caller's side, not
/// corruption of the tree: the tree is left unchanged when one is
/// returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StructuralError {
    /// The operation needs a parent but the node has none.
    #[error("node {0} has no parent")]
    NoParent(NodeIndex),

    /// The given child is not among the parent's children.
    #[error("node {child} is not a child of node {parent}")]
    NotAChild { parent: NodeIndex, child: NodeIndex },

    /// Splicing requires exactly one child.
    #[error("node {node} has {children} children, cannot splice it out")]
    NotAKnee { node: NodeIndex, children: usize },

    /// Swapping into root position requires the parent to be the root.
    #[error("parent of node {0} is not the root")]
    ParentNotRoot(NodeIndex),
}

/// Outcome of [`Tree::unlink_node`].
///
/// Unlinking may leave the parent with a single child. For a non-root
/// parent that knee is spliced out on the spot; for the root it cannot
/// be, because replacing the root is the caller's decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unlinked {
    /// The node was unlinked and the tree needs no further repair.
    Done,
    /// The root was left with this single child; the caller must install
    /// it as the new root, typically via [`Tree::install_root`].
    RootChildReplacement(NodeIndex),
}

// ============================================================================
// Linking
// ============================================================================
impl Tree {
    /// Appends `child` to `parent`'s children and sets its back-reference.
    pub fn add_child(&mut self, parent: NodeIndex, child: NodeIndex) {
        self[parent].push_child(child);
        self[child].set_parent(Some(parent));
        self.bump_generation();
    }

    /// Inserts `child` at `position` among `parent`'s children, shifting
    /// later siblings right. A position past the end appends.
    pub fn insert_child(&mut self, parent: NodeIndex, child: NodeIndex, position: usize) {
        self[parent].insert_child_at(position, child);
        self[child].set_parent(Some(parent));
        self.bump_generation();
    }

    /// Removes `child` from `parent`'s children and clears its
    /// back-reference, returning the position it held.
    pub fn remove_child(
        &mut self,
        parent: NodeIndex,
        child: NodeIndex,
    ) -> Result<usize, StructuralError> {
        let position = self[parent]
            .remove_child_index(child)
            .ok_or(StructuralError::NotAChild { parent, child })?;
        self[child].set_parent(None);
        self.bump_generation();
        Ok(position)
    }

    /// Replaces `old` with `new` at the same position under `parent`.
    ///
    /// `old` is detached; `new` is reparented. Sibling order is preserved.
    pub fn replace_child(
        &mut self,
        parent: NodeIndex,
        old: NodeIndex,
        new: NodeIndex,
    ) -> Result<(), StructuralError> {
        let position = self[parent]
            .remove_child_index(old)
            .ok_or(StructuralError::NotAChild { parent, child: old })?;
        self[old].set_parent(None);
        self[parent].insert_child_at(position, new);
        self[new].set_parent(Some(parent));
        self.bump_generation();
        Ok(())
    }
}

// ============================================================================
// Restructuring
// ============================================================================
impl Tree {
    /// Creates a new node with the given label and no edge length, and
    /// inserts it between `node` and its parent: the new node takes
    /// `node`'s position among its siblings and `node` becomes the new
    /// node's sole child.
    ///
    /// If `node` is the root, the new node becomes the root instead.
    ///
    /// Returns the index of the new node.
    pub fn insert_node_above(&mut self, node: NodeIndex, label: String) -> NodeIndex {
        let inserted = self.add_node(label, None);
        match self[node].parent_index() {
            Some(parent) => {
                let position = self[parent]
                    .remove_child_index(node)
                    .unwrap_or_else(|| self[parent].children_count());
                self[parent].insert_child_at(position, inserted);
                self[inserted].set_parent(Some(parent));
            }
            None => {
                if self.is_root_set() && self.root_index() == node {
                    self.set_root(inserted);
                }
            }
        }
        self[inserted].push_child(node);
        self[node].set_parent(Some(inserted));
        self.bump_generation();
        inserted
    }

    /// Splices out a knee: a node with exactly one child. The child takes
    /// the node's position among its siblings and keeps its own edge
    /// length text; the spliced node is detached.
    pub fn splice_out(&mut self, node: NodeIndex) -> Result<(), StructuralError> {
        let children = self[node].children_count();
        if children != 1 {
            return Err(StructuralError::NotAKnee { node, children });
        }
        let parent = self[node]
            .parent_index()
            .ok_or(StructuralError::NoParent(node))?;
        let child = self[node].children()[0];

        let position = self[parent]
            .remove_child_index(node)
            .ok_or(StructuralError::NotAChild { parent, child: node })?;
        self[parent].insert_child_at(position, child);
        self[child].set_parent(Some(parent));

        self[node].set_parent(None);
        self[node].clear_children();
        self.bump_generation();
        Ok(())
    }

    /// Swaps `node` with its parent, which must be the current root.
    ///
    /// `node` becomes the root: it loses its edge length, the old root
    /// takes that length over and is appended as `node`'s last child.
    /// Sibling order under the old root is otherwise preserved.
    pub fn swap_with_root(&mut self, node: NodeIndex) -> Result<(), StructuralError> {
        let parent = self[node]
            .parent_index()
            .ok_or(StructuralError::NoParent(node))?;
        if parent != self.root_index() {
            return Err(StructuralError::ParentNotRoot(node));
        }

        self[parent].remove_child_index(node);
        let length = self[node].take_length();
        self[parent].set_length(length);

        self[node].set_parent(None);
        self[node].push_child(parent);
        self[parent].set_parent(Some(node));
        self.set_root(node);
        Ok(())
    }

    /// Unlinks `node` from its parent, detaching its whole subtree, and
    /// repairs any knee this creates.
    ///
    /// If the parent is left with one child:
    /// - a non-root parent with a grandparent is spliced out,
    /// - a root parent cannot be repaired here; the sole remaining child
    ///   is reported back as [`Unlinked::RootChildReplacement`] for the
    ///   caller to install.
    pub fn unlink_node(&mut self, node: NodeIndex) -> Result<Unlinked, StructuralError> {
        let parent = self[node]
            .parent_index()
            .ok_or(StructuralError::NoParent(node))?;
        self.remove_child(parent, node)?;

        if self[parent].children_count() == 1 {
            if self.is_root_set() && parent == self.root_index() {
                return Ok(Unlinked::RootChildReplacement(self[parent].children()[0]));
            }
            if self[parent].parent_index().is_some() {
                self.splice_out(parent)?;
            }
        }
        Ok(Unlinked::Done)
    }

    /// Installs `candidate` as the new root: detaches it from its parent
    /// if it has one, clears its edge length, and declares it root.
    pub fn install_root(&mut self, candidate: NodeIndex) {
        if let Some(parent) = self[candidate].parent_index() {
            self[parent].remove_child_index(candidate);
            self[candidate].set_parent(None);
        }
        self[candidate].take_length();
        self.set_root(candidate);
    }
}
