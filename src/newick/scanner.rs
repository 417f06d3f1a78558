//! Low-level byte scanner for Newick text.
//!
//! [Scanner] walks an in-memory byte slice with peeking, consuming, and
//! quote-aware label reading. It assumes ASCII-compatible input; label
//! bytes are carried through untouched.

use crate::newick::error::NewickError;

// =#========================================================================#=
// SCANNER
// =#========================================================================#=
/// A byte-by-byte scanner over Newick text.
///
/// # Features
/// - Peek and consume single bytes
/// - Whitespace and `[...]` comment skipping
/// - Quote-aware label reading (single quotes, `''` escaping)
/// - Context extraction for error reporting
pub struct Scanner<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> Scanner<'a> {
    /// Creates a scanner over the given text.
    pub fn new(input: &'a str) -> Self {
        Scanner {
            bytes: input.as_bytes(),
            position: 0,
        }
    }

    /// Peeks at the current byte without consuming it.
    #[inline(always)]
    pub fn peek(&self) -> Option<u8> {
        self.bytes.get(self.position).copied()
    }

    /// Returns the current byte and advances past it.
    #[inline(always)]
    pub fn bump(&mut self) -> Option<u8> {
        let byte = self.peek();
        if byte.is_some() {
            self.position += 1;
        }
        byte
    }

    /// Returns whether the end of input has been reached.
    pub fn is_eof(&self) -> bool {
        self.position >= self.bytes.len()
    }

    /// Returns the current byte offset in the input.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns up to `k` bytes from the current position as a string,
    /// for error reporting.
    pub fn context(&self, k: usize) -> String {
        let end = (self.position + k).min(self.bytes.len());
        String::from_utf8_lossy(&self.bytes[self.position..end]).into_owned()
    }

    /// Consumes the current byte if it equals `ch`.
    pub fn consume_if(&mut self, ch: u8) -> bool {
        if self.peek() == Some(ch) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    /// Skips all consecutive whitespace: space, tab, newline, carriage
    /// return.
    pub fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek() {
            if b == b' ' || b == b'\t' || b == b'\n' || b == b'\r' {
                self.position += 1;
            } else {
                break;
            }
        }
    }

    /// Skips a `[...]` comment if one starts here.
    ///
    /// # Returns
    /// * `Ok(true)` - A comment was found and consumed
    /// * `Ok(false)` - No comment at the current position
    /// * `Err(NewickError)` - Comment was opened but never closed
    pub fn skip_comment(&mut self) -> Result<bool, NewickError> {
        if !self.consume_if(b'[') {
            return Ok(false);
        }
        while let Some(b) = self.bump() {
            if b == b']' {
                return Ok(true);
            }
        }
        Err(NewickError::unclosed_comment(self))
    }

    /// Skips all consecutive whitespace and `[...]` comments.
    pub fn skip_trivia(&mut self) -> Result<(), NewickError> {
        self.skip_whitespace();
        while self.skip_comment()? {
            self.skip_whitespace();
        }
        Ok(())
    }

    /// Reads a label, quoted or unquoted.
    ///
    /// Dispatches on a leading `'`. An unquoted label runs until any of
    /// the given delimiter bytes and may be empty.
    pub fn read_label(&mut self, delimiters: &[u8]) -> Result<String, NewickError> {
        if self.peek() == Some(b'\'') {
            self.read_quoted_label()
        } else {
            Ok(self.read_unquoted_label(delimiters))
        }
    }

    /// Reads a label enclosed in single quotes, with `''` unescaped to a
    /// single quote.
    ///
    /// Assumes the opening quote has not been consumed yet.
    fn read_quoted_label(&mut self) -> Result<String, NewickError> {
        self.bump(); // opening '

        let mut label = Vec::new();
        while let Some(b) = self.bump() {
            if b == b'\'' {
                if self.peek() == Some(b'\'') {
                    label.push(b'\'');
                    self.bump();
                } else {
                    return Ok(String::from_utf8_lossy(&label).into_owned());
                }
            } else {
                label.push(b);
            }
        }
        Err(NewickError::unclosed_quote(self))
    }

    /// Reads an unquoted label until any of the given delimiters or EOF.
    ///
    /// The delimiters are ASCII, so the slice boundaries always fall
    /// between characters of the UTF-8 input.
    pub(crate) fn read_unquoted_label(&mut self, delimiters: &[u8]) -> String {
        let start = self.position;
        while let Some(b) = self.peek() {
            if delimiters.contains(&b) {
                break;
            }
            self.position += 1;
        }
        String::from_utf8_lossy(&self.bytes[start..self.position]).into_owned()
    }
}
