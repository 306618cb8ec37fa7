use std::io;

use tracing::{debug, trace};

use super::{check_page_entry, into_page};
use crate::error::EntryError;
use crate::store::{Generation, Page, PageStore};

/// Write handle into a [`PageStore`] bound to one open attempt.
#[derive(Debug, Clone, Copy)]
pub struct PageSink<'a> {
    store: &'a PageStore,
    generation: Generation,
}

impl<'a> PageSink<'a> {
    pub fn new(store: &'a PageStore, generation: Generation) -> Self {
        Self { store, generation }
    }

    pub fn is_current(&self) -> bool {
        self.store.is_current(self.generation)
    }

    fn append(&self, page: Page) -> bool {
        self.store.append(self.generation, page)
    }

    fn replace_all(&self, pages: Vec<Page>) -> bool {
        self.store.replace_all(self.generation, pages)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    /// A newer open attempt reset the store before this one finished.
    Superseded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeReport {
    pub pages: usize,
    pub unrecognized: usize,
    pub empty: usize,
    pub failed: usize,
    pub outcome: Outcome,
}

impl DecodeReport {
    fn new() -> Self {
        Self {
            pages: 0,
            unrecognized: 0,
            empty: 0,
            failed: 0,
            outcome: Outcome::Completed,
        }
    }

    fn record(&mut self, err: &EntryError) {
        match err {
            EntryError::Unrecognized { name } => {
                trace!(entry = %name, "skipping non-page entry");
                self.unrecognized += 1;
            }
            EntryError::Empty { name } => {
                debug!(entry = %name, "skipping empty entry");
                self.empty += 1;
            }
            EntryError::ReadFailed { name, source } => {
                debug!(entry = %name, "skipping unreadable entry: {source}");
                self.failed += 1;
            }
        }
    }
}

/// Moves the pages of one opened archive into the store. Whatever the
/// strategy, a completed extraction leaves the store sorted by entry name.
pub trait Extractor {
    fn extract(&mut self, sink: &PageSink<'_>) -> DecodeReport;
}

/// Container that can list every entry up front and read them in any order.
pub trait RandomAccessArchive {
    /// Names of every non-directory entry, in archive order.
    fn file_names(&mut self) -> Vec<String>;

    fn read(&mut self, name: &str) -> io::Result<Vec<u8>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryHeader {
    pub name: String,
    pub is_dir: bool,
}

/// Container that only yields entries in stream order.
pub trait StreamingArchive {
    /// Moves past the current entry (skipping its payload if unread) to the
    /// next header. `None` once the stream is exhausted or broken.
    fn next_header(&mut self) -> Option<EntryHeader>;

    /// Payload of the entry last returned by [`next_header`](Self::next_header).
    fn read_current(&mut self) -> io::Result<Vec<u8>>;
}

/// List, sort by name, then extract: pages reach the store already in final
/// order, one append at a time.
pub struct RandomAccessExtractor<A> {
    archive: A,
}

impl<A: RandomAccessArchive> RandomAccessExtractor<A> {
    pub fn new(archive: A) -> Self {
        Self { archive }
    }

    fn read_page(&mut self, name: &str) -> Result<Page, EntryError> {
        check_page_entry(name, false)?;
        let content = self
            .archive
            .read(name)
            .map_err(|source| EntryError::ReadFailed {
                name: name.to_string(),
                source,
            })?;
        into_page(name, content)
    }
}

impl<A: RandomAccessArchive> Extractor for RandomAccessExtractor<A> {
    fn extract(&mut self, sink: &PageSink<'_>) -> DecodeReport {
        let mut report = DecodeReport::new();
        let mut names = self.archive.file_names();
        names.sort();

        for name in names {
            if !sink.is_current() {
                report.outcome = Outcome::Superseded;
                break;
            }
            match self.read_page(&name) {
                Ok(page) => {
                    if !sink.append(page) {
                        report.outcome = Outcome::Superseded;
                        break;
                    }
                    report.pages += 1;
                }
                Err(err) => report.record(&err),
            }
        }
        report
    }
}

/// Extract in stream order, buffer, sort by name, then publish the whole
/// collection with a single `replace_all`.
pub struct StreamingExtractor<S> {
    stream: S,
}

impl<S: StreamingArchive> StreamingExtractor<S> {
    pub fn new(stream: S) -> Self {
        Self { stream }
    }

    fn read_page(&mut self, header: &EntryHeader) -> Result<Page, EntryError> {
        check_page_entry(&header.name, header.is_dir)?;
        let content = self
            .stream
            .read_current()
            .map_err(|source| EntryError::ReadFailed {
                name: header.name.clone(),
                source,
            })?;
        into_page(&header.name, content)
    }
}

impl<S: StreamingArchive> Extractor for StreamingExtractor<S> {
    fn extract(&mut self, sink: &PageSink<'_>) -> DecodeReport {
        let mut report = DecodeReport::new();
        let mut buffered = Vec::new();

        while let Some(header) = self.stream.next_header() {
            if !sink.is_current() {
                report.outcome = Outcome::Superseded;
                return report;
            }
            match self.read_page(&header) {
                Ok(page) => buffered.push(page),
                Err(err) => report.record(&err),
            }
        }

        buffered.sort_by(|a, b| a.name.cmp(&b.name));
        let count = buffered.len();
        if sink.replace_all(buffered) {
            report.pages = count;
        } else {
            report.outcome = Outcome::Superseded;
        }
        report
    }
}
