//! Error type for Newick parsing.

use crate::newick::scanner::Scanner;
use thiserror::Error;

/// Default length of context provided by a parse error
const DEFAULT_CONTEXT_LENGTH: usize = 50;

// =#========================================================================#=
// NEWICK ERROR
// =#========================================================================#=
/// Error raised while parsing Newick text, with the byte position and a
/// snippet of the input around it.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NewickError {
    /// Input ended in the middle of a tree.
    #[error("unexpected end of input at position {position}")]
    UnexpectedEof { position: usize },

    /// A `[` comment was opened but never closed.
    #[error("unclosed comment at position {position}")]
    UnclosedComment { position: usize },

    /// A `'` quoted label was opened but never closed.
    #[error("unclosed quoted label at position {position}")]
    UnclosedQuote { position: usize },

    /// The input does not follow the Newick grammar.
    #[error("invalid newick: {message} at position {position}\n  context: {context}")]
    Invalid {
        message: String,
        position: usize,
        context: String,
    },
}

impl NewickError {
    /// Convenience constructor for UnexpectedEof
    pub(crate) fn unexpected_eof(scanner: &Scanner) -> Self {
        NewickError::UnexpectedEof {
            position: scanner.position(),
        }
    }

    /// Convenience constructor for UnclosedComment
    pub(crate) fn unclosed_comment(scanner: &Scanner) -> Self {
        NewickError::UnclosedComment {
            position: scanner.position(),
        }
    }

    /// Convenience constructor for UnclosedQuote
    pub(crate) fn unclosed_quote(scanner: &Scanner) -> Self {
        NewickError::UnclosedQuote {
            position: scanner.position(),
        }
    }

    /// Convenience constructor for Invalid, capturing position and context
    pub(crate) fn invalid(scanner: &Scanner, message: impl Into<String>) -> Self {
        NewickError::Invalid {
            message: message.into(),
            position: scanner.position(),
            context: scanner.context(DEFAULT_CONTEXT_LENGTH),
        }
    }
}
