use std::io;
use std::mem;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use unrar::error::UnrarError;
use unrar::{Archive, CursorBeforeFile, CursorBeforeHeader, OpenArchive, Process};

use super::{EntryHeader, StreamingArchive, open_failed};
use crate::error::ArchiveError;

type BeforeHeader = OpenArchive<Process, CursorBeforeHeader>;

enum Cursor {
    BeforeHeader(BeforeHeader),
    BeforeFile(OpenArchive<Process, CursorBeforeFile>),
    Done,
}

/// Forward-only reader over a rar container.
///
/// unrar gives up its handle when reading an entry fails, so the stream keeps
/// the path and the number of headers already seen to reopen the container
/// just past the broken entry.
pub struct RarStream {
    path: PathBuf,
    consumed: usize,
    cursor: Cursor,
}

impl RarStream {
    /// Opens `path` for sequential extraction.
    ///
    /// # Errors
    /// Returns [`ArchiveError::OpenFailed`] if unrar cannot open the container.
    pub fn open(path: &Path) -> Result<Self, ArchiveError> {
        let archive = Archive::new(path)
            .open_for_processing()
            .map_err(|err| open_failed(path, err))?;
        Ok(Self {
            path: path.to_path_buf(),
            consumed: 0,
            cursor: Cursor::BeforeHeader(archive),
        })
    }

    fn resume(&mut self) {
        self.cursor = match reopen_after(&self.path, self.consumed) {
            Ok(Some(archive)) => Cursor::BeforeHeader(archive),
            Ok(None) => Cursor::Done,
            Err(err) => {
                warn!(path = %self.path.display(), "can't resume rar stream: {err}");
                Cursor::Done
            }
        };
    }
}

/// Reopens the container and skips its first `entries` entries. `None` when
/// the container holds fewer entries than that.
fn reopen_after(path: &Path, entries: usize) -> Result<Option<BeforeHeader>, UnrarError> {
    let mut archive = Archive::new(path).open_for_processing()?;
    for _ in 0..entries {
        match archive.read_header()? {
            Some(entry) => archive = entry.skip()?,
            None => return Ok(None),
        }
    }
    Ok(Some(archive))
}

impl StreamingArchive for RarStream {
    fn next_header(&mut self) -> Option<EntryHeader> {
        let archive = match mem::replace(&mut self.cursor, Cursor::Done) {
            Cursor::BeforeHeader(archive) => archive,
            Cursor::BeforeFile(entry) => match entry.skip() {
                Ok(archive) => archive,
                Err(err) => {
                    debug!("rar stream ended while skipping an entry: {err}");
                    return None;
                }
            },
            Cursor::Done => return None,
        };

        match archive.read_header() {
            Ok(Some(entry)) => {
                let header = entry.entry();
                let next = EntryHeader {
                    name: header.filename.to_string_lossy().into_owned(),
                    is_dir: header.is_directory(),
                };
                self.consumed += 1;
                self.cursor = Cursor::BeforeFile(entry);
                Some(next)
            }
            Ok(None) => None,
            Err(err) => {
                debug!("rar stream ended on a bad header: {err}");
                None
            }
        }
    }

    fn read_current(&mut self) -> io::Result<Vec<u8>> {
        match mem::replace(&mut self.cursor, Cursor::Done) {
            Cursor::BeforeFile(entry) => match entry.read() {
                Ok((content, rest)) => {
                    self.cursor = Cursor::BeforeHeader(rest);
                    Ok(content)
                }
                Err(err) => {
                    self.resume();
                    Err(io::Error::other(err))
                }
            },
            other => {
                self.cursor = other;
                Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "no rar entry is positioned for reading",
                ))
            }
        }
    }
}
