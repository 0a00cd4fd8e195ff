//! A module containing the [`StockError`] enum, which contains the errors of the synchronization.

use std::{io, path::PathBuf};

/// Represents any type of error that could happen when synchronizing the stock list.
#[derive(thiserror::Error, Debug)]
pub enum StockError {
    /// A required file doesn't exist.
    #[error("file not found at {}", .0.display())]
    MissingFile(
        /// The path to the missing file.
        PathBuf,
    ),
    /// The content of a JSON file is malformed.
    #[error("malformed JSON data in {}", .path.display())]
    Parse {
        /// The path to the file.
        path: PathBuf,
        /// The parse error.
        #[source]
        source: serde_json::Error,
    },
    /// The stocks couldn't be written as JSON.
    #[error("couldn't write JSON data to {}", .path.display())]
    Serialize {
        /// The path to the file.
        path: PathBuf,
        /// The serialization error.
        #[source]
        source: serde_json::Error,
    },
    /// An error that happened when reading or writing a file.
    #[error("I/O error on {}", .path.display())]
    Io {
        /// The path to the file.
        path: PathBuf,
        /// The I/O error.
        #[source]
        source: io::Error,
    },
}

impl StockError {
    pub(crate) fn io<P: Into<PathBuf>>(path: P) -> impl FnOnce(io::Error) -> Self {
        move |source| Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Represents the result of a computation that could return a [`StockError`].
pub type StockResult<T = ()> = Result<T, StockError>;
