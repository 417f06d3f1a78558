//! Newick serialization.

use crate::model::traverse::Visit;
use crate::model::tree::Tree;
use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Extra buffer in Newick string capacity estimate
const BUFFER_CHARS: usize = 10;

/// Bytes that force a label into single quotes
const QUOTE_FORCING: &[u8] = b"()[],:;' \t\n\r";

/// Escapes a label for Newick output.
///
/// A label containing structural characters, whitespace, or a quote is
/// wrapped in single quotes with embedded quotes doubled; any other
/// label, including the empty one, is passed through unchanged.
pub fn escape_label(label: &str) -> Cow<'_, str> {
    if label.bytes().any(|b| QUOTE_FORCING.contains(&b)) {
        Cow::Owned(format!("'{}'", label.replace('\'', "''")))
    } else {
        Cow::Borrowed(label)
    }
}

/// Returns the Newick representation of the tree, terminated with `;`.
///
/// Serialization is driven by the Euler tour: `(` at a node's first
/// visit, `,` between child subtrees, `)` plus the label at its last
/// visit. Children are written in their stored order; run
/// [`canonical_order`](crate::model::order::canonical_order) first if a
/// canonical serialization is wanted. Edge length text is written back
/// verbatim wherever present, the root included.
///
/// # Example
/// ```
/// use mastree::newick::{parse_newick, to_newick};
///
/// let tree = parse_newick("((Kea:1.0,Kaka:1.2)nestor:0.5,Kakapo:2.1);").unwrap();
/// assert_eq!(to_newick(&tree), "((Kea:1.0,Kaka:1.2)nestor:0.5,Kakapo:2.1);");
/// ```
pub fn to_newick(tree: &Tree) -> String {
    let mut newick = String::with_capacity(estimate_newick_len(tree));
    for (index, visit) in tree.tour() {
        match visit {
            Visit::First => newick.push('('),
            Visit::Between => newick.push(','),
            Visit::Last | Visit::Leaf => {
                if visit == Visit::Last {
                    newick.push(')');
                }
                let node = &tree[index];
                newick.push_str(&escape_label(node.label()));
                if let Some(length) = node.length() {
                    newick.push(':');
                    newick.push_str(length);
                }
            }
        }
    }
    newick.push(';');

    newick
}

/// Writes the given trees to a file in Newick format, one tree per line.
///
/// # Errors
/// Returns an I/O error if the file cannot be created or written.
pub fn write_newick_file<P: AsRef<Path>>(path: P, trees: &[Tree]) -> io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    for tree in trees {
        writer.write_all(to_newick(tree).as_bytes())?;
        writer.write_all(b"\n")?;
    }
    writer.flush()
}

/// Estimates the length of the Newick string for a tree: structural
/// characters plus label and edge length text, summed over the whole
/// arena. Detached nodes make this a slight overestimate, which is fine
/// for capacity.
fn estimate_newick_len(tree: &Tree) -> usize {
    (0..tree.num_nodes())
        .map(|index| {
            let node = &tree[index];
            let length_len = node.length().map_or(0, |text| text.len() + 1);
            node.label().len() + length_len + 3
        })
        .sum::<usize>()
        + BUFFER_CHARS
}
