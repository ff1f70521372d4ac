//! Append-only storage for found matches.

use log::debug;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Number of entries a store has room for before it first grows.
pub const DEFAULT_CAPACITY: usize = 10;

/// A single found occurrence of the query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchEntry {
    lexeme: String,
    path: PathBuf,
    line: usize,
    column: usize,
}

impl MatchEntry {
    /// Create an entry. Both `lexeme` and `path` must fit in `max_length` bytes, if given.
    ///
    /// ```
    /// use lexfind::store::MatchEntry;
    /// use std::path::Path;
    ///
    /// let entry = MatchEntry::new(b"foo", Path::new("a.txt"), 2, 7, Some(1024)).unwrap();
    /// assert_eq!(entry.lexeme(), "foo");
    /// assert_eq!(entry.line(), 2);
    /// assert!(MatchEntry::new(b"foo", Path::new("a.txt"), 2, 7, Some(4)).is_err());
    /// ```
    pub fn new(
        lexeme: &[u8],
        path: &Path,
        line: usize,
        column: usize,
        max_length: Option<usize>,
    ) -> Result<MatchEntry> {
        if let Some(max) = max_length {
            if lexeme.len() > max {
                return Err(Error::LexemeTooLong {
                    len: lexeme.len(),
                    max,
                });
            }
            let len = path.as_os_str().len();
            if len > max {
                return Err(Error::PathTooLong {
                    path: path.to_path_buf(),
                    len,
                    max,
                });
            }
        }
        Ok(MatchEntry {
            lexeme: String::from_utf8_lossy(lexeme).into_owned(),
            path: path.to_path_buf(),
            line,
            column,
        })
    }

    /// The matched text.
    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }

    /// File the match was found in.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 1-based line of the match.
    pub fn line(&self) -> usize {
        self.line
    }

    /// 1-based column of the match.
    pub fn column(&self) -> usize {
        self.column
    }
}

/// Ordered, append-only collection of [`MatchEntry`] values.
///
/// Capacity starts at a fixed size and doubles whenever the store is full.
///
/// ```
/// use lexfind::store::{MatchEntry, ResultStore};
/// use std::path::Path;
///
/// let mut store = ResultStore::with_capacity(2).unwrap();
/// for line in 1..=3 {
///     let entry = MatchEntry::new(b"x", Path::new("f"), line, 1, None).unwrap();
///     store.append(entry).unwrap();
/// }
/// assert_eq!(store.capacity(), 4);
/// assert_eq!(store.iter().map(|e| e.line()).collect::<Vec<_>>(), vec![1, 2, 3]);
/// ```
#[derive(Clone, Debug)]
pub struct ResultStore {
    entries: Vec<MatchEntry>,
    capacity: usize,
}

impl Default for ResultStore {
    fn default() -> Self {
        ResultStore::new()
    }
}

impl ResultStore {
    /// Store with room for [`DEFAULT_CAPACITY`] entries.
    pub fn new() -> ResultStore {
        ResultStore {
            entries: Vec::with_capacity(DEFAULT_CAPACITY),
            capacity: DEFAULT_CAPACITY,
        }
    }

    /// Store with room for `capacity` entries. `capacity` must be nonzero.
    pub fn with_capacity(capacity: usize) -> Result<ResultStore> {
        if capacity == 0 {
            return Err(Error::InvalidCapacity);
        }
        let mut entries = Vec::new();
        entries
            .try_reserve_exact(capacity)
            .map_err(|_| Error::Allocation {
                requested: capacity,
            })?;
        Ok(ResultStore { entries, capacity })
    }

    /// Add `entry` after all previous entries, doubling the capacity first if the store is full.
    pub fn append(&mut self, entry: MatchEntry) -> Result<()> {
        if self.entries.len() >= self.capacity {
            self.grow()?;
        }
        self.entries.push(entry);
        Ok(())
    }

    fn grow(&mut self) -> Result<()> {
        let requested = self
            .capacity
            .checked_mul(2)
            .ok_or(Error::Allocation {
                requested: usize::MAX,
            })?;
        debug!("Growing result store from {} to {}", self.capacity, requested);
        self.entries
            .try_reserve_exact(requested - self.entries.len())
            .map_err(|_| Error::Allocation { requested })?;
        self.capacity = requested;
        Ok(())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Are there no entries?
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries the store can hold before growing.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get the `index`th entry in insertion order.
    pub fn get(&self, index: usize) -> Option<&MatchEntry> {
        self.entries.get(index)
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, MatchEntry> {
        self.entries.iter()
    }

    /// Free the storage.
    pub fn release(self) {
        debug!("Releasing {} results", self.entries.len());
    }
}

impl<'a> IntoIterator for &'a ResultStore {
    type Item = &'a MatchEntry;
    type IntoIter = std::slice::Iter<'a, MatchEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for ResultStore {
    type Item = MatchEntry;
    type IntoIter = std::vec::IntoIter<MatchEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
