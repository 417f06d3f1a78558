//! Recursive-descent parser for Newick trees.
//!
//! # Format
//! The supported Newick grammar:
//! * `tree ::= node ';'`
//! * `node ::= clade | leaf`
//! * `clade ::= '(' node (',' node)* ')' [label] [edge_length]`
//! * `leaf ::= label [edge_length]`
//! * `edge_length ::= ':' text`
//!
//! Furthermore:
//! * Arity is arbitrary; `(A,B,C)` is a single trifurcation
//! * Internal nodes and the root may carry labels
//! * A leaf label may be empty, as in `(,B)r;`
//! * Labels may be single-quoted, with `''` escaping an embedded quote
//! * Edge length text is kept verbatim; it is never parsed as a number
//! * Whitespace and `[...]` comments may occur between tokens,
//!   just not inside an unquoted label or an edge length

use crate::model::tree::{NodeIndex, Tree};
use crate::newick::error::NewickError;
use crate::newick::scanner::Scanner;

/// Bytes that end an unquoted label: structure, whitespace, comments
const LABEL_DELIMITERS: &[u8] = b"()[],:; \t\n\r";

/// Bytes that end edge length text (same set; a length cannot hold ':')
const LENGTH_DELIMITERS: &[u8] = b"()[],:; \t\n\r";

// ============================================================================
// PARSING API (pub)
// ============================================================================
/// Parses a single Newick tree from the given text.
///
/// Trailing whitespace and comments after the closing `;` are allowed;
/// any other trailing text is an error.
///
/// # Example
/// ```
/// use mastree::newick::parse_newick;
///
/// let tree = parse_newick("((Kea:1.0,Kaka:1.2)nestor:0.5,Kakapo:2.1);").unwrap();
/// assert_eq!(tree.num_leaves(), 3);
/// ```
pub fn parse_newick(input: &str) -> Result<Tree, NewickError> {
    let mut scanner = Scanner::new(input);
    let tree = parse_tree(&mut scanner)?;

    scanner.skip_trivia()?;
    if !scanner.is_eof() {
        return Err(NewickError::invalid(&scanner, "trailing text after tree"));
    }
    Ok(tree)
}

/// Parses all semicolon-terminated Newick trees from the given text.
///
/// Trees may share lines or span several; whitespace and comments
/// between trees are skipped. Returns an empty vector for blank input.
pub fn parse_forest(input: &str) -> Result<Vec<Tree>, NewickError> {
    let mut scanner = Scanner::new(input);
    let mut trees = Vec::new();

    loop {
        scanner.skip_trivia()?;
        if scanner.is_eof() {
            return Ok(trees);
        }
        trees.push(parse_tree(&mut scanner)?);
    }
}

// ============================================================================
// Recursive descent (private)
// ============================================================================
/// Parses one `node ';'` and returns the finished tree.
fn parse_tree(scanner: &mut Scanner) -> Result<Tree, NewickError> {
    let mut tree = Tree::new();
    let root = parse_node(scanner, &mut tree)?;
    tree.set_root(root);

    scanner.skip_trivia()?;
    if !scanner.consume_if(b';') {
        return Err(match scanner.peek() {
            Some(b) => NewickError::invalid(
                scanner,
                format!("expected ';' at end of tree but found {:?}", b as char),
            ),
            None => NewickError::unexpected_eof(scanner),
        });
    }
    Ok(tree)
}

/// Parses a node, dispatching on `(` between clade and leaf.
fn parse_node(scanner: &mut Scanner, tree: &mut Tree) -> Result<NodeIndex, NewickError> {
    scanner.skip_trivia()?;
    if scanner.peek() == Some(b'(') {
        parse_clade(scanner, tree)
    } else {
        parse_leaf(scanner, tree)
    }
}

/// Parses `'(' node (',' node)* ')' [label] [edge_length]`, adds the
/// internal node to the tree, and returns its index.
fn parse_clade(scanner: &mut Scanner, tree: &mut Tree) -> Result<NodeIndex, NewickError> {
    scanner.bump(); // opening '('

    let mut children = vec![parse_node(scanner, tree)?];
    loop {
        scanner.skip_trivia()?;
        if scanner.consume_if(b',') {
            children.push(parse_node(scanner, tree)?);
        } else {
            break;
        }
    }

    if !scanner.consume_if(b')') {
        return Err(match scanner.peek() {
            Some(b) => NewickError::invalid(
                scanner,
                format!("expected ',' or ')' after child but found {:?}", b as char),
            ),
            None => NewickError::unexpected_eof(scanner),
        });
    }

    scanner.skip_trivia()?;
    let label = scanner.read_label(LABEL_DELIMITERS)?;
    let length = parse_length(scanner)?;

    let index = tree.add_node(label, length);
    for child in children {
        tree.add_child(index, child);
    }
    Ok(index)
}

/// Parses `label [edge_length]`, adds the leaf to the tree, and returns
/// its index. The label may be empty.
fn parse_leaf(scanner: &mut Scanner, tree: &mut Tree) -> Result<NodeIndex, NewickError> {
    let label = scanner.read_label(LABEL_DELIMITERS)?;
    let length = parse_length(scanner)?;
    Ok(tree.add_node(label, length))
}

/// Parses an optional `':' text` edge length, keeping the text verbatim.
fn parse_length(scanner: &mut Scanner) -> Result<Option<String>, NewickError> {
    scanner.skip_trivia()?;
    if !scanner.consume_if(b':') {
        return Ok(None);
    }
    scanner.skip_trivia()?;

    let text = scanner.read_unquoted_label(LENGTH_DELIMITERS);
    if text.is_empty() {
        return Err(NewickError::invalid(scanner, "expected edge length after ':'"));
    }
    Ok(Some(text))
}
