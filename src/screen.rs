//! Render sink. The core only hands over the page bytes to show; decoding and
//! scaling happen behind the [`Screen`] trait.

use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::geometry::WindowGeometry;
use crate::store::{Page, PagePosition};

pub trait Screen: Send + Sync {
    fn show(&self, page: &Page, position: PagePosition);
    fn set_title(&self, title: &str);
    fn set_viewport(&self, geometry: WindowGeometry);
}

/// Largest size with the page's aspect ratio that fits the viewport. A page
/// that is taller relative to the viewport is driven by height, otherwise by
/// width.
pub fn fit_to_viewport(page_w: u32, page_h: u32, view_w: u32, view_h: u32) -> (u32, u32) {
    let pw = f64::from(page_w.max(1));
    let ph = f64::from(page_h.max(1));
    let vw = f64::from(view_w.max(1));
    let vh = f64::from(view_h.max(1));
    let scale = if pw / ph <= vw / vh { vh / ph } else { vw / pw };
    let w = (pw * scale).round().max(1.0);
    let h = (ph * scale).round().max(1.0);
    (w as u32, h as u32)
}

#[derive(Debug)]
enum ScreenCommand {
    Show { page: Page, position: PagePosition },
    Title(String),
    Viewport(WindowGeometry),
}

/// Headless screen: decodes and scales pages with the `image` crate on a
/// blocking worker, optionally writing each frame to a snapshot file.
#[derive(Debug, Clone)]
pub struct ImageScreen {
    tx: UnboundedSender<ScreenCommand>,
}

impl ImageScreen {
    /// Starts the render worker. It exits once every handle has been dropped.
    pub fn spawn(viewport: WindowGeometry, snapshot: Option<PathBuf>) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let worker = tokio::task::spawn_blocking(move || render_loop(rx, viewport, snapshot));
        (Self { tx }, worker)
    }

    fn send(&self, command: ScreenCommand) {
        if self.tx.send(command).is_err() {
            debug!("render worker gone; dropping screen command");
        }
    }
}

impl Screen for ImageScreen {
    fn show(&self, page: &Page, position: PagePosition) {
        self.send(ScreenCommand::Show {
            page: page.clone(),
            position,
        });
    }

    fn set_title(&self, title: &str) {
        self.send(ScreenCommand::Title(title.to_string()));
    }

    fn set_viewport(&self, geometry: WindowGeometry) {
        self.send(ScreenCommand::Viewport(geometry));
    }
}

fn render_loop(
    mut rx: UnboundedReceiver<ScreenCommand>,
    mut viewport: WindowGeometry,
    snapshot: Option<PathBuf>,
) {
    while let Some(first) = rx.blocking_recv() {
        // Only the newest queued frame is worth decoding.
        let mut frame = None;
        let mut next = Some(first);
        while let Some(command) = next {
            match command {
                ScreenCommand::Show { page, position } => frame = Some((page, position)),
                ScreenCommand::Title(title) => info!(%title, "title"),
                ScreenCommand::Viewport(geometry) => viewport = geometry,
            }
            next = rx.try_recv().ok();
        }
        if let Some((page, position)) = frame {
            render(&page, position, viewport, snapshot.as_deref());
        }
    }
    debug!("render worker exiting");
}

fn render(page: &Page, position: PagePosition, viewport: WindowGeometry, snapshot: Option<&Path>) {
    let decoded = match image::load_from_memory(&page.content) {
        Ok(decoded) => decoded,
        Err(err) => {
            warn!(page = %page.name, "failed to decode page: {err}");
            return;
        }
    };
    let (width, height) = fit_to_viewport(decoded.width(), decoded.height(), viewport.w, viewport.h);
    let scaled = decoded.resize_exact(width, height, FilterType::Triangle);
    info!(
        page = %page.name,
        index = position.index,
        count = position.count,
        width,
        height,
        "page rendered"
    );
    if let Some(path) = snapshot {
        if let Err(err) = scaled.save(path) {
            warn!(path = %path.display(), "failed to write snapshot: {err}");
        }
    }
}
