//! Reading tree and frequency files.
//!
//! Tree files hold one Newick tree per line; `-` reads standard input
//! instead. A line that fails to parse is logged and skipped rather than
//! aborting the whole file. Frequency files hold one integer per line
//! and are strict: a bad integer is an error.

use crate::model::tree::Tree;
use crate::newick::parse_newick;
use std::fs;
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

/// Error raised while loading input files.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// The file (or stdin) could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A frequency line did not hold a non-negative integer.
    #[error("invalid frequency {text:?} on line {line} of {path}")]
    InvalidFrequency {
        path: String,
        line: usize,
        text: String,
    },
}

/// One tree read from a corpus file, with its provenance.
#[derive(Debug, Clone)]
pub struct CorpusTree {
    /// 1-based line number in the source file.
    pub line: usize,
    /// The line's text as read, for echoing matches back verbatim.
    pub text: String,
    /// The parsed tree.
    pub tree: Tree,
}

/// Reads one Newick tree per line from the given file, or from standard
/// input when the path is `-`.
///
/// Blank lines are skipped; unparseable lines are logged with their line
/// number and skipped.
pub fn read_trees(path: &str) -> Result<Vec<CorpusTree>, CorpusError> {
    let contents = read_source(path)?;

    let mut trees = Vec::new();
    for (number, raw_line) in contents.lines().enumerate() {
        let line = number + 1;
        let text = raw_line.trim();
        if text.is_empty() {
            continue;
        }
        match parse_newick(text) {
            Ok(tree) => trees.push(CorpusTree {
                line,
                text: text.to_string(),
                tree,
            }),
            Err(error) => {
                warn!(path, line, %error, "skipping unparseable tree");
            }
        }
    }
    Ok(trees)
}

/// Reads one integer per line from a frequency file.
pub fn read_frequencies<P: AsRef<Path>>(path: P) -> Result<Vec<usize>, CorpusError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| CorpusError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let mut frequencies = Vec::new();
    for (number, raw_line) in contents.lines().enumerate() {
        let text = raw_line.trim();
        if text.is_empty() {
            continue;
        }
        let frequency = text
            .parse::<usize>()
            .map_err(|_| CorpusError::InvalidFrequency {
                path: path.display().to_string(),
                line: number + 1,
                text: text.to_string(),
            })?;
        frequencies.push(frequency);
    }
    Ok(frequencies)
}

/// Reads a whole file, or standard input for `-`.
fn read_source(path: &str) -> Result<String, CorpusError> {
    if path == "-" {
        let mut contents = String::new();
        std::io::stdin()
            .read_to_string(&mut contents)
            .map_err(|source| CorpusError::Io {
                path: "<stdin>".to_string(),
                source,
            })?;
        Ok(contents)
    } else {
        fs::read_to_string(path).map_err(|source| CorpusError::Io {
            path: path.to_string(),
            source,
        })
    }
}
