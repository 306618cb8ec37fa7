use std::sync::Arc;

use tracing::trace;

use crate::screen::Screen;
use crate::store::{PagePosition, PageStore};

/// Moves the cursor and asks the screen to show whatever is under it.
#[derive(Clone)]
pub struct Navigator {
    store: Arc<PageStore>,
    screen: Arc<dyn Screen>,
}

impl Navigator {
    pub fn new(store: Arc<PageStore>, screen: Arc<dyn Screen>) -> Self {
        Self { store, screen }
    }

    pub fn store(&self) -> &Arc<PageStore> {
        &self.store
    }

    pub fn screen(&self) -> &Arc<dyn Screen> {
        &self.screen
    }

    /// Advances while the cursor is below the page count, so it can come to
    /// rest one past the last page. Returns the new cursor.
    pub fn next(&self) -> usize {
        let cursor = self.store.advance();
        self.render_current();
        cursor
    }

    /// Steps back, stopping at the first page. Returns the new cursor.
    pub fn previous(&self) -> usize {
        let cursor = self.store.retreat();
        self.render_current();
        cursor
    }

    /// Shows the page under the cursor. Nothing happens while the collection
    /// is empty or the cursor is past the last page.
    pub fn render_current(&self) {
        let Some((page, position)) = self.store.current() else {
            trace!(cursor = self.store.cursor(), "nothing to render");
            return;
        };
        self.screen.show(&page, position);
        self.screen.set_title(&title_for(position));
    }
}

pub fn title_for(position: PagePosition) -> String {
    format!("ComicView - {} of {}", position.index, position.count)
}
