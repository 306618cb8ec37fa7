#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use comic_view::geometry::WindowGeometry;
use comic_view::screen::Screen;
use comic_view::store::{Page, PagePosition, PageStore};
use comic_view::tasks::navigation::Navigator;
use zip::write::SimpleFileOptions;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shown {
    Page(String, PagePosition),
    Title(String),
    Viewport(WindowGeometry),
}

/// Screen double that records every call in order.
#[derive(Debug, Default)]
pub struct RecordingScreen {
    calls: Mutex<Vec<Shown>>,
}

impl RecordingScreen {
    pub fn calls(&self) -> Vec<Shown> {
        self.calls.lock().unwrap().clone()
    }

    pub fn pages(&self) -> Vec<(String, PagePosition)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Shown::Page(name, position) => Some((name, position)),
                _ => None,
            })
            .collect()
    }

    pub fn titles(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Shown::Title(title) => Some(title),
                _ => None,
            })
            .collect()
    }
}

impl Screen for RecordingScreen {
    fn show(&self, page: &Page, position: PagePosition) {
        self.calls
            .lock()
            .unwrap()
            .push(Shown::Page(page.name.clone(), position));
    }

    fn set_title(&self, title: &str) {
        self.calls
            .lock()
            .unwrap()
            .push(Shown::Title(title.to_string()));
    }

    fn set_viewport(&self, geometry: WindowGeometry) {
        self.calls.lock().unwrap().push(Shown::Viewport(geometry));
    }
}

pub fn navigator() -> (Navigator, Arc<PageStore>, Arc<RecordingScreen>) {
    let store = Arc::new(PageStore::new());
    let screen = Arc::new(RecordingScreen::default());
    let navigator = Navigator::new(store.clone(), screen.clone());
    (navigator, store, screen)
}

pub fn fill(store: &PageStore, names: &[&str]) {
    let generation = store.reset();
    for name in names {
        assert!(store.append(generation, Page::new(*name, name.as_bytes().to_vec())));
    }
}

pub fn names(store: &PageStore) -> Vec<String> {
    store.snapshot().into_iter().map(|p| p.name).collect()
}

/// Writes a zip archive; names ending in `/` become directory entries.
pub fn write_zip(path: &Path, entries: &[(&str, &str)]) {
    let mut writer = zip::ZipWriter::new(File::create(path).unwrap());
    let options = SimpleFileOptions::default();
    for (name, content) in entries {
        if name.ends_with('/') {
            writer.add_directory(*name, options).unwrap();
        } else {
            writer.start_file(*name, options).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
    }
    writer.finish().unwrap();
}

/// Polls `check` until it holds or `timeout` elapses.
pub async fn eventually(timeout: Duration, mut check: impl FnMut() -> bool) -> bool {
    let deadline = tokio::time::Instant::now() + timeout;
    while tokio::time::Instant::now() < deadline {
        if check() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    check()
}
