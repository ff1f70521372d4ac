#![warn(missing_docs)]
#![warn(clippy::unwrap_used)]
//! lexfind -- Find whitespace-delimited tokens equal to a query in files.

mod argparse;
pub mod error;
pub mod options;
pub mod printer;
pub mod psi;
pub mod query;
pub mod run;
pub mod store;
pub mod tokenizer;

pub use error::{Error, Result};
pub use run::{run, PathKind, Searcher, SearcherBuilder};
pub use store::{MatchEntry, ResultStore};
