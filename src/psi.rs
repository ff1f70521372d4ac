//! Byte-level scanning primitives: spans, the scan cursor and byte classes.

/// Is `b` whitespace in the classic C sense?
///
/// Unlike [`u8::is_ascii_whitespace`], this includes the vertical tab.
///
/// ```
/// use lexfind::psi::is_space;
/// assert!(is_space(b'\x0b'));
/// assert!(is_space(b'\r'));
/// assert!(!is_space(b'_'));
/// ```
pub fn is_space(b: u8) -> bool {
    b == b' ' || (b'\t'..=b'\r').contains(&b)
}

/// Is `b` a word byte, ie. ASCII alphanumeric or punctuation?
///
/// ```
/// use lexfind::psi::is_word;
/// assert!(is_word(b'a'));
/// assert!(is_word(b'-'));
/// assert!(!is_word(b' '));
/// assert!(!is_word(0xc3));
/// ```
pub fn is_word(b: u8) -> bool {
    b.is_ascii_graphic()
}

/// A span in the currently scanned file.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Span {
    /// Starting byte index of the span.
    pub lo: usize,
    /// End byte index of the span, inclusive.
    pub hi: usize,
}

/// Position of a scan inside a byte buffer.
///
/// # Examples
///
/// ```
/// use lexfind::psi::Cursor;
///
/// let content = b"  \n\nfoo";
/// let mut cursor = Cursor::new();
/// cursor.skip_while(content, |b| b.is_ascii_whitespace());
/// assert_eq!(cursor.pos(), 4);
/// assert_eq!(cursor.line(), 3);
/// assert_eq!(cursor.column_in_line(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cursor {
    /// Current byte offset.
    pos: usize,
    /// Current line number, starting from 1.
    line: usize,
    /// Byte offset where the current line starts.
    line_start: usize,
}

impl Default for Cursor {
    fn default() -> Self {
        Cursor::new()
    }
}

impl Cursor {
    /// Cursor at the start of a buffer.
    pub fn new() -> Cursor {
        Cursor {
            pos: 0,
            line: 1,
            line_start: 0,
        }
    }

    /// Current byte offset.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Current 1-based line number.
    pub fn line(&self) -> usize {
        self.line
    }

    /// 1-based offset of the cursor from the start of the current line.
    pub fn column_in_line(&self) -> usize {
        self.pos - self.line_start + 1
    }

    /// Peek the byte under the cursor, or None at the end of `content`.
    pub fn peek(&self, content: &[u8]) -> Option<u8> {
        content.get(self.pos).copied()
    }

    /// Consume a single byte, keeping line bookkeeping up to date.
    pub fn bump(&mut self, content: &[u8]) -> Option<u8> {
        let b = self.peek(content)?;
        self.pos += 1;
        if b == b'\n' {
            self.line += 1;
            self.line_start = self.pos;
        }
        Some(b)
    }

    /// Consume bytes while `f` holds. Returns the span of the consumed bytes, or None if nothing
    /// was consumed.
    pub fn skip_while(&mut self, content: &[u8], mut f: impl FnMut(u8) -> bool) -> Option<Span> {
        let lo = self.pos;
        while let Some(b) = self.peek(content) {
            if !f(b) {
                break;
            }
            self.bump(content);
        }
        if self.pos > lo {
            Some(Span {
                lo,
                hi: self.pos - 1,
            })
        } else {
            None
        }
    }
}
