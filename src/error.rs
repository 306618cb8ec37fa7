use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort a whole open attempt. Never fatal to the process.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The file extension is not one of the recognized archive families.
    #[error("unsupported archive format: '{extension}'")]
    UnsupportedFormat { extension: String },

    /// The container could not be opened at all.
    #[error("can't open archive {}", path.display())]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Failures scoped to a single archive entry. The entry is skipped and
/// extraction continues with the next one.
#[derive(Debug, Error)]
pub enum EntryError {
    #[error("failed to read entry {name}")]
    ReadFailed {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("entry {name} has no content")]
    Empty { name: String },

    /// Directory or non-page extension.
    #[error("entry {name} is not a page")]
    Unrecognized { name: String },
}
