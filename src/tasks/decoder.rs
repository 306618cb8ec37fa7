use std::path::{Path, PathBuf};

use tokio::task::JoinHandle;
use tracing::{info, instrument, warn};

use crate::archive::{self, DecodeReport, Outcome, PageSink};
use crate::error::ArchiveError;
use crate::store::Generation;
use crate::tasks::navigation::Navigator;

pub const LOADING_TITLE: &str = "Loading...";

/// Decodes `path` on the blocking pool. The caller has already reset the
/// store and hands over the generation that reset issued.
pub fn spawn(
    path: PathBuf,
    generation: Generation,
    navigator: Navigator,
) -> JoinHandle<Result<DecodeReport, ArchiveError>> {
    tokio::task::spawn_blocking(move || decode(&path, generation, &navigator))
}

/// Opens the archive, streams its pages into the store and finally renders
/// whatever the cursor points at. Archive-level failures are logged and
/// returned; they never leave pages behind.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn decode(
    path: &Path,
    generation: Generation,
    navigator: &Navigator,
) -> Result<DecodeReport, ArchiveError> {
    let mut extractor = match archive::open(path) {
        Ok(extractor) => extractor,
        Err(err) => {
            warn!("{err}");
            navigator.render_current();
            return Err(err);
        }
    };

    navigator.screen().set_title(LOADING_TITLE);
    let report = extractor.extract(&PageSink::new(navigator.store(), generation));
    match report.outcome {
        Outcome::Completed => info!(
            pages = report.pages,
            unrecognized = report.unrecognized,
            empty = report.empty,
            failed = report.failed,
            "archive decoded"
        ),
        Outcome::Superseded => info!(
            pages = report.pages,
            "archive decode superseded by a newer open"
        ),
    }
    navigator.render_current();
    Ok(report)
}
