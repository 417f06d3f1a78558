//! Newick format parsing and serialization.
//!
//! This module reads and writes rooted, multifurcating, leaf-labeled
//! trees in Newick notation. Edge lengths are carried as verbatim text,
//! so a parse-serialize round trip reproduces them exactly.
//!
//! # Quick API
//! * [`parse_newick`] - parses a single tree from a string
//! * [`parse_forest`] - parses all semicolon-terminated trees in a string
//! * [`to_newick`] - serializes a tree, terminated with `;`
//! * [`write_newick_file`] - writes trees to a file, one per line

pub mod error;
mod parser;
mod scanner;
mod writer;

pub use self::error::NewickError;
pub use self::parser::{parse_forest, parse_newick};
pub use self::writer::{escape_label, to_newick, write_newick_file};
