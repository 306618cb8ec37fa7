use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tokio::select;
use tokio::sync::mpsc::{Receiver, Sender};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::events::{AutoAdvance, Intent};
use crate::geometry::{GeometryFile, WindowGeometry};
use crate::store::PageStore;
use crate::tasks::decoder;
use crate::tasks::navigation::Navigator;

/// Single consumer of user intents.
pub struct Dispatcher {
    navigator: Navigator,
    auto_advance: Sender<AutoAdvance>,
    geometry: GeometryFile,
}

impl Dispatcher {
    pub fn new(
        navigator: Navigator,
        auto_advance: Sender<AutoAdvance>,
        geometry: GeometryFile,
    ) -> Self {
        Self {
            navigator,
            auto_advance,
            geometry,
        }
    }

    fn store(&self) -> &Arc<PageStore> {
        self.navigator.store()
    }

    pub async fn handle(&self, intent: Intent) {
        match intent {
            Intent::NextRequested => {
                self.navigator.next();
            }
            Intent::PreviousRequested => {
                self.navigator.previous();
            }
            Intent::AutoAdvanceArmed => self.signal(AutoAdvance::Armed).await,
            Intent::AutoAdvanceDisarmed => self.signal(AutoAdvance::Disarmed).await,
            Intent::OpenRequested(path) => self.open(path),
            Intent::ViewportChanged(geometry) => self.viewport_changed(geometry),
        }
    }

    async fn signal(&self, signal: AutoAdvance) {
        if self.auto_advance.send(signal).await.is_err() {
            warn!(?signal, "auto-advance loop is gone");
        }
    }

    /// Resets the store and starts decoding in the background. A decode that
    /// is still running for an earlier open is left to notice it was
    /// superseded.
    fn open(&self, path: PathBuf) {
        let generation = self.store().reset();
        info!(path = %path.display(), "opening archive");
        drop(decoder::spawn(path, generation, self.navigator.clone()));
    }

    fn viewport_changed(&self, geometry: WindowGeometry) {
        if let Err(err) = self.geometry.save(&geometry) {
            warn!("failed to persist window geometry: {err:#}");
        }
        self.navigator.screen().set_viewport(geometry);
        self.navigator.render_current();
    }
}

pub async fn run(
    mut intents: Receiver<Intent>,
    dispatcher: Dispatcher,
    cancel: CancellationToken,
) -> Result<()> {
    loop {
        select! {
            _ = cancel.cancelled() => break,
            intent = intents.recv() => match intent {
                Some(intent) => {
                    debug!(?intent, "intent");
                    dispatcher.handle(intent).await;
                }
                None => {
                    debug!("intent source closed");
                    break;
                }
            }
        }
    }
    Ok(())
}
