/// Structural editing primitives and their errors
pub mod edit;
/// Single tree node: label, edge length text, links
pub mod node;
/// Canonical child ordering
pub mod order;
/// Euler-tour traversal
pub mod traverse;
/// Tree structure and queries
pub mod tree;
