//! Searching files and directories.

use ignore::WalkBuilder;
use log::{debug, info, warn};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::options::Options;
use crate::query::Query;
use crate::store::{MatchEntry, ResultStore, DEFAULT_CAPACITY};
use crate::tokenizer::{tokenize, ColumnMode, ScanOptions, TrailingToken};

/// What a path points to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PathKind {
    /// Anything that is not a directory.
    File,
    /// A directory.
    Directory,
}

impl PathKind {
    /// Classify `path` by its metadata, following symlinks.
    pub fn classify(path: &Path) -> Result<PathKind> {
        let attr = fs::metadata(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(if attr.is_dir() {
            PathKind::Directory
        } else {
            PathKind::File
        })
    }

    /// Classify a walked entry, only touching the filesystem again for symlinks.
    pub fn of_entry(entry: &ignore::DirEntry) -> Result<PathKind> {
        match entry.file_type() {
            Some(ty) if !entry.path_is_symlink() => Ok(if ty.is_dir() {
                PathKind::Directory
            } else {
                PathKind::File
            }),
            _ => PathKind::classify(entry.path()),
        }
    }
}

/// Builder for [`Searcher`].
#[derive(Clone, Debug)]
pub struct SearcherBuilder {
    query: String,
    max_length: Option<usize>,
    capacity: usize,
    depth: usize,
    scan: ScanOptions,
    sort: bool,
}

impl SearcherBuilder {
    /// Start building a search for `query`.
    pub fn new(query: &str) -> SearcherBuilder {
        SearcherBuilder {
            query: query.to_string(),
            max_length: None,
            capacity: DEFAULT_CAPACITY,
            depth: 1,
            scan: ScanOptions::default(),
            sort: false,
        }
    }

    /// Maximum length of matched tokens and paths. None disables the check.
    pub fn max_length(mut self, max_length: Option<usize>) -> Self {
        self.max_length = max_length;
        self
    }

    /// Initial capacity of the result store.
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// How many directory levels to descend. 1 means immediate children only.
    pub fn depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    /// Handling of a final token without trailing whitespace.
    pub fn trailing(mut self, trailing: TrailingToken) -> Self {
        self.scan.trailing = trailing;
        self
    }

    /// Column numbering.
    pub fn columns(mut self, columns: ColumnMode) -> Self {
        self.scan.columns = columns;
        self
    }

    /// Visit directory entries sorted by file name.
    pub fn sort_by_name(mut self, sort: bool) -> Self {
        self.sort = sort;
        self
    }

    /// Validate the settings and allocate the result store.
    pub fn build(self) -> Result<Searcher> {
        let query = Query::new(&self.query, self.max_length)?;
        let store = ResultStore::with_capacity(self.capacity)?;
        Ok(Searcher {
            query,
            max_length: self.max_length,
            depth: self.depth,
            scan: self.scan,
            sort: self.sort,
            store,
        })
    }
}

impl From<&Options> for SearcherBuilder {
    fn from(options: &Options) -> Self {
        SearcherBuilder::new(&options.query)
            .max_length(options.max_length)
            .initial_capacity(options.initial_capacity)
            .depth(options.depth)
            .trailing(options.trailing)
            .columns(options.columns)
            .sort_by_name(options.sort)
    }
}

/// Searches paths for a query, collecting every match into a single [`ResultStore`].
#[derive(Debug)]
pub struct Searcher {
    query: Query,
    max_length: Option<usize>,
    depth: usize,
    scan: ScanOptions,
    sort: bool,
    store: ResultStore,
}

impl Searcher {
    /// Start building a search for `query`.
    pub fn builder(query: &str) -> SearcherBuilder {
        SearcherBuilder::new(query)
    }

    /// Search a file, or the entries of a directory.
    ///
    /// Paths which cannot be read are logged and skipped. Only errors which should end the whole
    /// run are returned.
    pub fn search_path(&mut self, path: &Path) -> Result<()> {
        debug!("Searching {} for {:?}", path.display(), self.query.as_str());
        match PathKind::classify(path) {
            Ok(PathKind::File) => self.search_file_logged(path),
            Ok(PathKind::Directory) => self.search_directory(path),
            Err(e) => recover(e),
        }
    }

    fn search_directory(&mut self, path: &Path) -> Result<()> {
        debug!("Walking {} to depth {}", path.display(), self.depth);
        let mut walker = WalkBuilder::new(path);
        walker.standard_filters(false).max_depth(Some(self.depth));
        if self.sort {
            walker.sort_by_file_name(|a, b| a.cmp(b));
        }
        for entry in walker.build() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    recover(e.into())?;
                    continue;
                }
            };
            match PathKind::of_entry(&entry) {
                Ok(PathKind::File) => self.search_file_logged(entry.path())?,
                Ok(PathKind::Directory) => {}
                Err(e) => recover(e)?,
            }
        }
        Ok(())
    }

    fn search_file_logged(&mut self, path: &Path) -> Result<()> {
        match self.search_file(path) {
            Ok(n) => {
                debug!("{}: {} matches", path.display(), n);
                Ok(())
            }
            Err(e) => recover(e),
        }
    }

    /// Search a single file, returning the number of matches found in it.
    pub fn search_file(&mut self, path: &Path) -> Result<usize> {
        if let Some(max) = self.max_length {
            let len = path.as_os_str().len();
            if len > max {
                return Err(Error::PathTooLong {
                    path: path.to_path_buf(),
                    len,
                    max,
                });
            }
        }
        let content = fs::read(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut found = 0;
        for token in self.query.find(tokenize(&content, self.scan)) {
            debug!("Match: {:?}", &token);
            let entry = MatchEntry::new(
                token.lexeme,
                path,
                token.line,
                token.column,
                self.max_length,
            )?;
            self.store.append(entry)?;
            found += 1;
        }
        Ok(found)
    }

    /// Matches found so far.
    pub fn results(&self) -> &ResultStore {
        &self.store
    }

    /// Finish the search.
    pub fn into_results(self) -> ResultStore {
        self.store
    }
}

fn recover(e: Error) -> Result<()> {
    if e.is_recoverable() {
        warn!("{}", e);
        Ok(())
    } else {
        Err(e)
    }
}

/// Search `options.path` with `options` and return all matches.
pub fn run(options: &Options) -> Result<ResultStore> {
    let mut searcher = SearcherBuilder::from(options).build()?;
    searcher.search_path(&options.path)?;
    let results = searcher.into_results();
    info!("Found {} matches", results.len());
    Ok(results)
}
