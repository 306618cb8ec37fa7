use std::fs::File;
use std::io::{self, Read, Seek};
use std::path::Path;

use tracing::debug;
use zip::ZipArchive;

use super::{RandomAccessArchive, open_failed};
use crate::error::ArchiveError;

pub(super) fn open(path: &Path) -> Result<ZipArchive<File>, ArchiveError> {
    let file = File::open(path).map_err(|err| open_failed(path, err))?;
    ZipArchive::new(file).map_err(|err| open_failed(path, err))
}

impl<R: Read + Seek> RandomAccessArchive for ZipArchive<R> {
    fn file_names(&mut self) -> Vec<String> {
        let mut names = Vec::with_capacity(self.len());
        for index in 0..self.len() {
            match self.by_index_raw(index) {
                Ok(file) if file.is_dir() => {}
                Ok(file) => names.push(file.name().to_string()),
                Err(err) => debug!(index, "skipping unreadable zip header: {err}"),
            }
        }
        names
    }

    fn read(&mut self, name: &str) -> io::Result<Vec<u8>> {
        let mut file = self.by_name(name).map_err(io::Error::other)?;
        let mut content = Vec::new();
        file.read_to_end(&mut content)?;
        Ok(content)
    }
}
