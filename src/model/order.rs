//! Canonical child ordering.
//!
//! Two trees with the same topology and labels serialize to the same text
//! once both are in canonical order, so topological comparison reduces to
//! string equality of the serializations.

use crate::model::tree::Tree;

/// Reorders the children of every reachable internal node so that they
/// are sorted by the lexicographically smallest leaf label found in each
/// child's subtree.
///
/// The sort is stable: children whose subtrees share the same smallest
/// leaf label keep their relative order. A leaf's own label is its key,
/// including the empty label, which sorts before all others.
pub fn canonical_order(tree: &mut Tree) {
    let post_order: Vec<_> = tree.nodes_in_order().to_vec();

    // Smallest leaf label per subtree, computed bottom-up.
    let mut min_label: Vec<Option<String>> = vec![None; tree.num_nodes()];
    for &index in &post_order {
        let node = &tree[index];
        min_label[index] = if node.is_leaf() {
            Some(node.label().to_string())
        } else {
            node.children()
                .iter()
                .filter_map(|&child| min_label[child].clone())
                .min()
        };
    }

    for &index in &post_order {
        if tree[index].is_leaf() {
            continue;
        }
        let mut children = tree[index].children().to_vec();
        children.sort_by(|&a, &b| min_label[a].cmp(&min_label[b]));
        tree[index].set_children(children);
    }
    tree.bump_generation();
}
