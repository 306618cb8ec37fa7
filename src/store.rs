//! Thread-safe ordered page collection plus the display cursor.
//!
//! Every read and write goes through a single reader/writer lock, so a reader
//! never observes a half-applied reset or append. Each `reset` starts a new
//! generation; writes tagged with an older generation are rejected, which keeps
//! a superseded decode from leaking pages into the collection of a newer one.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// One decoded page: the archive entry name and its raw encoded image bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub name: String,
    pub content: Arc<[u8]>,
}

impl Page {
    pub fn new(name: impl Into<String>, content: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Token identifying one open attempt. Issued by [`PageStore::reset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

/// Where the cursor sits relative to the collection at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagePosition {
    pub index: usize,
    pub count: usize,
}

#[derive(Debug, Default)]
struct Inner {
    pages: Vec<Page>,
    cursor: usize,
    generation: u64,
}

#[derive(Debug, Default)]
pub struct PageStore {
    inner: RwLock<Inner>,
}

impl PageStore {
    /// Empty store at generation zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // Pages are immutable once stored, so a poisoned guard still holds a
    // consistent collection.
    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Drops every page, moves the cursor back to 0 and opens a new generation.
    pub fn reset(&self) -> Generation {
        let mut inner = self.write();
        inner.pages = Vec::new();
        inner.cursor = 0;
        inner.generation += 1;
        Generation(inner.generation)
    }

    /// Whether `generation` is still the one issued by the latest reset.
    #[must_use]
    pub fn is_current(&self, generation: Generation) -> bool {
        self.read().generation == generation.0
    }

    /// Adds a page at the end. Returns `false` (and drops the page) when
    /// `generation` has been superseded.
    #[must_use]
    pub fn append(&self, generation: Generation, page: Page) -> bool {
        let mut inner = self.write();
        if inner.generation != generation.0 {
            return false;
        }
        inner.pages.push(page);
        true
    }

    /// Swaps in a complete, already ordered collection. The cursor is kept.
    /// Returns `false` when `generation` has been superseded.
    #[must_use]
    pub fn replace_all(&self, generation: Generation, pages: Vec<Page>) -> bool {
        let mut inner = self.write();
        if inner.generation != generation.0 {
            return false;
        }
        inner.pages = pages;
        true
    }

    /// Number of pages stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().pages.len()
    }

    /// Whether no page has been stored yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().pages.is_empty()
    }

    /// Clone of the page at `index`, if present.
    #[must_use]
    pub fn at(&self, index: usize) -> Option<Page> {
        self.read().pages.get(index).cloned()
    }

    /// Index of the page to display.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.read().cursor
    }

    /// Copy of the whole collection in its current order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Page> {
        self.read().pages.clone()
    }

    /// Page under the cursor, or `None` when the collection is empty or the
    /// cursor sits one past the last page.
    #[must_use]
    pub fn current(&self) -> Option<(Page, PagePosition)> {
        let inner = self.read();
        let page = inner.pages.get(inner.cursor)?.clone();
        Some((
            page,
            PagePosition {
                index: inner.cursor,
                count: inner.pages.len(),
            },
        ))
    }

    /// Moves the cursor forward while it is below the page count. The cursor
    /// may therefore land on `len()`, one past the last page.
    pub fn advance(&self) -> usize {
        let mut inner = self.write();
        if inner.cursor < inner.pages.len() {
            inner.cursor += 1;
        }
        inner.cursor
    }

    /// Moves the cursor back, stopping at 0.
    pub fn retreat(&self) -> usize {
        let mut inner = self.write();
        if inner.cursor > 0 {
            inner.cursor -= 1;
        }
        inner.cursor
    }
}
