//! Loader error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading definition files
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file could not be opened or read
    #[error("Unable to read {}: {source}", .path.display())]
    Read {
        /// File that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}
