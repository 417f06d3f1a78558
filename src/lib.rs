//! Mastree tests leaf-labeled trees for subtree containment and grows
//! greedy consensus trees from seed subtrees.
//!
//! Trees are rooted, multifurcating, and written in Newick notation.
//! Core functionality provided:
//! - Newick: parse single trees or whole files, serialize back with
//!   verbatim edge length text.
//! - Tree model: arena-pattern [Tree](model::tree::Tree) with ordered
//!   children, structural editing primitives, Euler-tour traversal, and
//!   canonical child ordering.
//! - Matching: a pattern tree occurs in a target when restricting the
//!   target to the pattern's leaf labels reproduces the pattern's
//!   topology. See [crate::matching].
//! - Consensus: grow each seed subtree by greedily merging it with other
//!   seeds while its support in a tree corpus stays above a cutoff.
//!   See [crate::consensus].
//!
//! Limitations:
//! - Rooted comparison only; no unrooted or branch-length-aware modes
//! - Labels must be unique within a tree for matching to be meaningful
//!
//! # Usage patterns
//! 1. Quick API below for one-off string-to-string operations.
//! 2. Parse once and reuse: [`newick::parse_newick`] +
//!    [`matching::CompiledPattern`] for matching a pattern over many
//!    trees, [`consensus::greedy_consensus`] for whole corpora.
//!
//! ## Example
//! ```
//! use mastree::matches;
//!
//! let target = "(((Weka:1,Takahe:2):1,(Kea:1,Kaka:1):2):1,Kiwi:4);";
//! assert!(matches(target, "((Kea,Kaka),Kiwi);").unwrap());
//! assert!(!matches(target, "((Kea,Kiwi),Kaka);").unwrap());
//! ```

pub mod consensus;
pub mod corpus;
pub mod matching;
pub mod model;
pub mod newick;

use crate::matching::{CompiledPattern, MatchError};
use std::collections::HashSet;

// ============================================================================
// Quick Matching API
// ============================================================================
/// Tests whether the pattern tree occurs in the target tree, both given
/// as Newick text.
///
/// See [`matching::CompiledPattern`] for the match semantics and for
/// reusing a compiled pattern across many targets.
pub fn matches(target: &str, pattern: &str) -> Result<bool, MatchError> {
    let pattern = CompiledPattern::compile(newick::parse_newick(pattern)?)?;
    pattern.is_match(&newick::parse_newick(target)?)
}

/// Restricts a Newick tree to the given leaf labels and returns the
/// canonical Newick text of the restriction.
///
/// See [`matching::restrict`] for the restriction pipeline.
pub fn restrict_to_labels(tree: &str, keep: &HashSet<String>) -> Result<String, MatchError> {
    let restricted = matching::restrict(&newick::parse_newick(tree)?, keep)?;
    Ok(newick::to_newick(&restricted))
}
