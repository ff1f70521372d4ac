//! Query handling and matching.

use log::{debug, warn};

use crate::error::{Error, Result};
use crate::psi::is_space;
use crate::tokenizer::Token;

/// A literal query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Query {
    text: String,
}

impl Query {
    /// Create a query, rejecting queries longer than `max_length` bytes.
    ///
    /// ```
    /// use lexfind::query::Query;
    /// let query = Query::new("foo", Some(1024)).unwrap();
    /// assert!(query.matches(b"foo"));
    /// assert!(!query.matches(b"Foo"));
    /// assert!(!query.matches(b"foobar"));
    /// assert!(Query::new("foo", Some(2)).is_err());
    /// ```
    pub fn new(text: &str, max_length: Option<usize>) -> Result<Query> {
        debug!("Query string: {}", text);
        if let Some(max) = max_length {
            if text.len() > max {
                return Err(Error::QueryTooLong {
                    len: text.len(),
                    max,
                });
            }
        }
        if text.is_empty() || text.bytes().any(is_space) {
            warn!("Query {:?} can never match a whitespace-delimited token", text);
        }
        Ok(Query {
            text: text.to_string(),
        })
    }

    /// The query text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Does `lexeme` equal the query byte for byte?
    pub fn matches(&self, lexeme: &[u8]) -> bool {
        lexeme.len() == self.text.len() && lexeme == self.text.as_bytes()
    }

    /// Get all tokens from `tokens` which match this query.
    pub fn find<'a, I>(&'a self, tokens: I) -> impl Iterator<Item = Token<'a>> + 'a
    where
        I: IntoIterator<Item = Token<'a>>,
        I::IntoIter: 'a,
    {
        tokens.into_iter().filter(move |t| self.matches(t.lexeme))
    }
}
