//! Archive ingestion: format dispatch, page filtering and the two extraction
//! strategies that feed a [`PageStore`](crate::store::PageStore).

mod extract;
mod rar_source;
mod zip_source;

use std::path::Path;

pub use extract::{
    DecodeReport, EntryHeader, Extractor, Outcome, PageSink, RandomAccessArchive,
    RandomAccessExtractor, StreamingArchive, StreamingExtractor,
};
pub use rar_source::RarStream;

use crate::error::{ArchiveError, EntryError};
use crate::store::Page;

/// Entry extensions treated as pages. Matched exactly, case-sensitive.
pub const PAGE_EXTENSIONS: &[&str] = &[".png", ".jpg", ".jpeg", ".gif"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    /// `.zip` / `.cbz`, entries can be listed up front.
    Zip,
    /// `.rar` / `.cbr`, entries only come in stream order.
    Rar,
}

impl ArchiveFormat {
    /// Archive family named by the extension of `path`.
    ///
    /// # Errors
    /// Returns [`ArchiveError::UnsupportedFormat`] for any other extension.
    pub fn detect(path: &Path) -> Result<Self, ArchiveError> {
        let name = path.to_string_lossy();
        match extension(name.trim()) {
            ".zip" | ".cbz" => Ok(Self::Zip),
            ".rar" | ".cbr" => Ok(Self::Rar),
            other => Err(ArchiveError::UnsupportedFormat {
                extension: other.to_string(),
            }),
        }
    }
}

/// Suffix of the last `/`-separated element starting at its final dot,
/// or `""` when there is none.
pub fn extension(name: &str) -> &str {
    let base = name.rfind('/').map_or(0, |slash| slash + 1);
    name[base..].rfind('.').map_or("", |dot| &name[base + dot..])
}

pub fn is_page_name(name: &str) -> bool {
    PAGE_EXTENSIONS.contains(&extension(name))
}

fn check_page_entry(name: &str, is_dir: bool) -> Result<(), EntryError> {
    if is_dir || name.ends_with('/') || !is_page_name(name) {
        return Err(EntryError::Unrecognized {
            name: name.to_string(),
        });
    }
    Ok(())
}

fn into_page(name: &str, content: Vec<u8>) -> Result<Page, EntryError> {
    if content.is_empty() {
        return Err(EntryError::Empty {
            name: name.to_string(),
        });
    }
    Ok(Page::new(name, content))
}

fn open_failed(
    path: &Path,
    source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
) -> ArchiveError {
    ArchiveError::OpenFailed {
        path: path.to_path_buf(),
        source: source.into(),
    }
}

/// Picks the extractor for `path` by extension and opens the container.
///
/// # Errors
/// Fails when the extension is unsupported or the container cannot be opened.
pub fn open(path: &Path) -> Result<Box<dyn Extractor>, ArchiveError> {
    match ArchiveFormat::detect(path)? {
        ArchiveFormat::Zip => {
            let archive = zip_source::open(path)?;
            Ok(Box::new(RandomAccessExtractor::new(archive)))
        }
        ArchiveFormat::Rar => {
            let stream = RarStream::open(path)?;
            Ok(Box::new(StreamingExtractor::new(stream)))
        }
    }
}
