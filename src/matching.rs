//! Subtree matching of leaf-labeled trees.
//!
//! A pattern matches a target when restricting the target to the
//! pattern's leaf labels yields the pattern's topology. Both sides are
//! brought into a canonical textual form first, so the comparison is a
//! plain string equality.
//!
//! The restriction pipeline, applied to a working copy of a tree:
//! 1. Blank all internal node labels
//! 2. Unlink labeled leaves whose label is not in the kept set
//! 3. Prune unlabeled leaves until none remain
//! 4. Collapse knee nodes, the root included
//! 5. Blank all edge lengths
//! 6. Order children canonically
//! 7. Serialize to Newick

use crate::model::edit::{StructuralError, Unlinked};
use crate::model::order::canonical_order;
use crate::model::tree::{NodeIndex, Tree};
use crate::newick::to_newick;
use std::collections::HashSet;
use thiserror::Error;
use tracing::debug;

/// Error raised while compiling a pattern or testing a match.
#[derive(Debug, Error)]
pub enum MatchError {
    /// A tree given as text could not be parsed.
    #[error(transparent)]
    Parse(#[from] crate::newick::NewickError),

    /// The pattern has no labeled leaves, so it can match nothing.
    #[error("pattern has no labeled leaves")]
    EmptyPattern,

    /// An edit during restriction hit a broken structural precondition.
    /// Indicates a malformed input tree.
    #[error("tree structure error during restriction: {0}")]
    Structure(#[from] StructuralError),
}

// =#========================================================================#=
// COMPILED PATTERN
// =#========================================================================#=
/// A pattern tree prepared for repeated matching: its leaf label set and
/// its canonical Newick form.
///
/// Compiling normalizes the pattern with the same pipeline later applied
/// to targets, so a pattern written with edge lengths, internal labels,
/// or arbitrary child order still matches what it denotes.
///
/// # Example
/// ```
/// use mastree::matching::CompiledPattern;
/// use mastree::newick::parse_newick;
///
/// let pattern = CompiledPattern::compile(parse_newick("(Kea,(Kaka,Kakapo));").unwrap()).unwrap();
/// let target = parse_newick("((Kea:2,Weka:1):1,((Kaka:1,Kakapo:3):1,Tui:1):1);").unwrap();
/// assert!(pattern.is_match(&target).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    labels: HashSet<String>,
    canonical: String,
}

impl CompiledPattern {
    /// Normalizes the given pattern tree and captures its leaf label set
    /// and canonical form.
    pub fn compile(mut pattern: Tree) -> Result<Self, MatchError> {
        let labels = pattern.leaf_labels();
        if labels.is_empty() {
            return Err(MatchError::EmptyPattern);
        }
        normalize(&mut pattern, &labels)?;
        let canonical = to_newick(&pattern);
        debug!(canonical, num_labels = labels.len(), "compiled pattern");
        Ok(CompiledPattern { labels, canonical })
    }

    /// Returns the pattern's leaf label set.
    pub fn labels(&self) -> &HashSet<String> {
        &self.labels
    }

    /// Returns the pattern's canonical Newick form.
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    /// Tests whether the target contains this pattern: restricting a
    /// copy of the target to the pattern's labels must reproduce the
    /// pattern's canonical form.
    ///
    /// A pattern label missing from the target simply yields no match.
    pub fn is_match(&self, target: &Tree) -> Result<bool, MatchError> {
        let mut restricted = target.clone();
        normalize(&mut restricted, &self.labels)?;
        Ok(to_newick(&restricted) == self.canonical)
    }
}

/// Returns the size of the intersection of two leaf label sets.
pub fn leaf_label_overlap(a: &HashSet<String>, b: &HashSet<String>) -> usize {
    a.intersection(b).count()
}

/// Returns a copy of the tree restricted to the kept labels and brought
/// into canonical form.
pub fn restrict(tree: &Tree, keep: &HashSet<String>) -> Result<Tree, MatchError> {
    let mut restricted = tree.clone();
    normalize(&mut restricted, keep)?;
    Ok(restricted)
}

/// Runs the restriction pipeline on the tree in place.
pub fn normalize(tree: &mut Tree, keep: &HashSet<String>) -> Result<(), MatchError> {
    blank_internal_labels(tree);
    unlink_outside(tree, keep)?;
    prune_unlabeled_leaves(tree)?;
    collapse_knees(tree)?;
    blank_lengths(tree);
    canonical_order(tree);
    Ok(())
}

// ============================================================================
// Pipeline steps (private)
// ============================================================================
/// Clears the label of every reachable internal node, leaving only leaf
/// labels to drive the match.
fn blank_internal_labels(tree: &mut Tree) {
    for index in tree.nodes_in_order().to_vec() {
        if !tree[index].is_leaf() {
            tree[index].clear_label();
        }
    }
    tree.bump_generation();
}

/// Unlinks every non-root labeled leaf whose label is not in the kept
/// set. A root that is itself an unkept labeled leaf stays; it cannot
/// match any pattern and falls out of the comparison.
fn unlink_outside(tree: &mut Tree, keep: &HashSet<String>) -> Result<(), StructuralError> {
    let order = tree.nodes_in_order().to_vec();
    let unkept: Vec<NodeIndex> = order
        .into_iter()
        .filter(|&i| {
            let node = &tree[i];
            node.is_leaf()
                && node.parent_index().is_some()
                && !node.label().is_empty()
                && !keep.contains(node.label())
        })
        .collect();

    for index in unkept {
        // A root replacement may have promoted this leaf to root
        if tree[index].parent_index().is_none() {
            continue;
        }
        if let Unlinked::RootChildReplacement(child) = tree.unlink_node(index)? {
            tree.install_root(child);
        }
    }
    Ok(())
}

/// Prunes unlabeled leaves until none remain.
///
/// Unlinking can turn an internal node into an unlabeled leaf, so this
/// runs to a fixed point. The root itself is never pruned.
fn prune_unlabeled_leaves(tree: &mut Tree) -> Result<(), StructuralError> {
    loop {
        let order = tree.nodes_in_order().to_vec();
        let empty: Vec<NodeIndex> = order
            .into_iter()
            .filter(|&i| {
                let node = &tree[i];
                node.is_leaf() && node.label().is_empty() && node.parent_index().is_some()
            })
            .collect();
        if empty.is_empty() {
            return Ok(());
        }

        for index in empty {
            // An earlier unlink in this pass may have detached it already
            if tree[index].parent_index().is_none() {
                continue;
            }
            if let Unlinked::RootChildReplacement(child) = tree.unlink_node(index)? {
                tree.install_root(child);
            }
        }
    }
}

/// Splices out every knee node. A knee chain collapses in one post-order
/// pass; a root left with a single child hands root status down until
/// the root is a leaf or has at least two children.
fn collapse_knees(tree: &mut Tree) -> Result<(), StructuralError> {
    let order = tree.nodes_in_order().to_vec();
    let knees: Vec<NodeIndex> = order
        .into_iter()
        .filter(|&i| tree[i].children_count() == 1 && tree[i].parent_index().is_some())
        .collect();
    for index in knees {
        tree.splice_out(index)?;
    }

    while tree.root().children_count() == 1 {
        let child = tree.root().children()[0];
        tree.install_root(child);
    }
    Ok(())
}

/// Removes the edge length text of every reachable node.
fn blank_lengths(tree: &mut Tree) {
    for index in tree.nodes_in_order().to_vec() {
        tree[index].take_length();
    }
    tree.bump_generation();
}
