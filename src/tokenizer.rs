//! Whitespace-delimited tokenizer.

use log::trace;
use std::iter::FusedIterator;

use crate::psi::{is_space, is_word, Cursor, Span};

/// What to do with a final token that is not followed by whitespace.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TrailingToken {
    /// End of input counts as whitespace.
    #[default]
    Accept,
    /// Drop the token.
    Drop,
}

/// How token columns are counted.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ColumnMode {
    /// 1-based byte offset from the start of the file.
    #[default]
    File,
    /// 1-based byte offset from the start of the token's line.
    Line,
}

/// Tokenizer settings.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// Handling of a token at end of input.
    pub trailing: TrailingToken,
    /// Column numbering.
    pub columns: ColumnMode,
}

/// A single whitespace-delimited token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    /// Raw bytes of the token.
    pub lexeme: &'a [u8],
    /// Location of the token in the buffer.
    pub span: Span,
    /// 1-based line of the first byte.
    pub line: usize,
    /// 1-based column of the first byte, see [`ColumnMode`].
    pub column: usize,
}

/// Lazy iterator over the tokens of a buffer, see [`tokenize`].
#[derive(Clone, Debug)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Tokens<'a> {
    content: &'a [u8],
    cursor: Cursor,
    options: ScanOptions,
}

/// Split `content` into tokens.
///
/// A token is a maximal run of ASCII alphanumeric or punctuation bytes with whitespace on both
/// sides. Runs containing any other byte are skipped as a whole.
pub fn tokenize(content: &[u8], options: ScanOptions) -> Tokens<'_> {
    Tokens {
        content,
        cursor: Cursor::new(),
        options,
    }
}

impl<'a> Tokens<'a> {
    fn token(&self, span: Span, line: usize, column: usize) -> Token<'a> {
        Token {
            lexeme: &self.content[span.lo..=span.hi],
            span,
            line,
            column,
        }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        let content = self.content;
        loop {
            self.cursor.skip_while(content, is_space);
            let line = self.cursor.line();
            let column = match self.options.columns {
                ColumnMode::File => self.cursor.pos() + 1,
                ColumnMode::Line => self.cursor.column_in_line(),
            };
            let run = self.cursor.skip_while(content, is_word);
            match (run, self.cursor.peek(content)) {
                (Some(span), Some(b)) if is_space(b) => return Some(self.token(span, line, column)),
                (Some(span), None) => {
                    return match self.options.trailing {
                        TrailingToken::Accept => Some(self.token(span, line, column)),
                        TrailingToken::Drop => {
                            trace!("Dropping trailing token at {}", span.lo);
                            None
                        }
                    };
                }
                (None, None) => return None,
                (_, Some(b)) => {
                    trace!("Skipping run with byte {:#04x} at {}", b, self.cursor.pos());
                    self.cursor.skip_while(content, |b| !is_space(b));
                }
            }
        }
    }
}

impl FusedIterator for Tokens<'_> {}
