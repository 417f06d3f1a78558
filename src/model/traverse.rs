//! Euler-tour traversal over a tree.
//!
//! The tour visits an internal node with `k` children `k + 1` times: once
//! before its first child subtree, once between consecutive child
//! subtrees, and once after the final one. A leaf is visited exactly once.
//! Taking only the [`Last`](Visit::Last) and [`Leaf`](Visit::Leaf) visits
//! yields the post order used throughout the crate.

use crate::model::tree::{NodeIndex, Tree};

/// Which visit of a node an Euler-tour step represents.
///
/// An internal node with `k` children produces one [`First`](Visit::First),
/// `k - 1` [`Between`](Visit::Between)s, and one [`Last`](Visit::Last)
/// (for `k == 1` the first visit is immediately followed by the last).
/// A leaf produces a single [`Leaf`](Visit::Leaf).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// Before the first child subtree of an internal node.
    First,
    /// Between two consecutive child subtrees.
    Between,
    /// After the final child subtree.
    Last,
    /// The single visit of a leaf.
    Leaf,
}

impl Visit {
    /// Returns whether this is the final visit of its node.
    pub fn is_last(self) -> bool {
        matches!(self, Visit::Last | Visit::Leaf)
    }
}

// =#========================================================================#=
// EULER TOUR
// =#========================================================================#=
/// Iterator over the Euler tour of the subtree rooted at a start node.
///
/// All traversal state lives in the iterator: the tree is borrowed
/// immutably, nodes carry no cursor, and several tours over the same tree
/// may run concurrently.
///
/// # Example
/// ```
/// use mastree::model::traverse::Visit;
/// use mastree::newick::parse_newick;
///
/// let tree = parse_newick("((A,B)f,(C,(D,E)g)h)i;").unwrap();
/// let labels: Vec<&str> = tree
///     .tour()
///     .map(|(index, _)| tree[index].label())
///     .collect();
/// assert_eq!(
///     labels,
///     ["i", "f", "A", "f", "B", "f", "i", "h", "C", "h", "g", "D", "g",
///      "E", "g", "h", "i"]
/// );
///
/// let post: Vec<&str> = tree
///     .tour()
///     .filter(|(_, visit)| visit.is_last())
///     .map(|(index, _)| tree[index].label())
///     .collect();
/// assert_eq!(post, ["A", "B", "f", "C", "D", "E", "g", "h", "i"]);
/// ```
pub struct EulerTour<'a> {
    tree: &'a Tree,
    /// Pairs of (node, number of child subtrees already toured).
    stack: Vec<(NodeIndex, usize)>,
}

impl<'a> EulerTour<'a> {
    /// Creates a tour over the subtree rooted at `start`.
    ///
    /// `start` need not be the tree root; the tour never climbs above it.
    pub fn new(tree: &'a Tree, start: NodeIndex) -> Self {
        EulerTour {
            tree,
            stack: vec![(start, 0)],
        }
    }
}

impl Iterator for EulerTour<'_> {
    type Item = (NodeIndex, Visit);

    fn next(&mut self) -> Option<Self::Item> {
        let &(index, cursor) = self.stack.last()?;
        let node = &self.tree[index];

        if node.is_leaf() {
            self.stack.pop();
            return Some((index, Visit::Leaf));
        }

        if cursor < node.children_count() {
            if let Some(entry) = self.stack.last_mut() {
                entry.1 += 1;
            }
            self.stack.push((node.children()[cursor], 0));
            let visit = if cursor == 0 { Visit::First } else { Visit::Between };
            Some((index, visit))
        } else {
            self.stack.pop();
            Some((index, Visit::Last))
        }
    }
}

/// Collects the nodes of the subtree rooted at `start` in last-visit
/// order: children before their parent, subtrees in child order.
pub fn last_visit_order(tree: &Tree, start: NodeIndex) -> Vec<NodeIndex> {
    EulerTour::new(tree, start)
        .filter(|(_, visit)| visit.is_last())
        .map(|(index, _)| index)
        .collect()
}
