//! Binary entrypoint for comic-view.
//!
//! Wires the page store, the archive decoder, the intent dispatcher and the
//! auto-advance loop together. User intents arrive as lines on stdin.

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use comic_view::config::Configuration;
use comic_view::events::{AutoAdvance, Intent};
use comic_view::geometry::GeometryFile;
use comic_view::input::{parse_intent, path_from_uri};
use comic_view::screen::ImageScreen;
use comic_view::store::PageStore;
use comic_view::tasks::dispatcher::{self, Dispatcher};
use comic_view::tasks::{auto_advance, navigation::Navigator};

#[derive(Debug, Parser)]
#[command(name = "comic-view", version, about = "page viewer for zip/cbz and rar/cbr archives")]
struct Args {
    /// Archive to open at startup
    #[arg(value_name = "ARCHIVE")]
    archive: Option<String>,
    /// Path to YAML config
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Write every rendered frame to this image file
    #[arg(long, value_name = "FILE")]
    snapshot: Option<PathBuf>,
    /// Increase log verbosity (repeatable); -v also reports skipped archive entries
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_ascii_lowercase())),
        )
        .with_target(false)
        .compact()
        .init();
}

fn load_configuration(path: Option<&PathBuf>) -> Result<Configuration> {
    let cfg = match path {
        Some(path) => Configuration::from_yaml_file(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => Configuration::default(),
    };
    cfg.validated().context("invalid configuration values")
}

/// Forwards stdin lines as intents. Runs on a plain thread so a pending read
/// never holds up shutdown. Dropping the sender at end of input lets the
/// dispatcher drain what is queued before it stops.
fn spawn_stdin_reader(intents: mpsc::Sender<Intent>) {
    std::thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    tracing::warn!("stdin read failed: {err}");
                    break;
                }
            };
            match parse_intent(&line) {
                Some(intent) => {
                    if intents.blocking_send(intent).is_err() {
                        return;
                    }
                }
                None => tracing::debug!(%line, "ignoring unrecognized input"),
            }
        }
        tracing::info!("stdin closed");
    });
}

#[tokio::main]
async fn main() -> Result<()> {
    let Args {
        archive,
        config,
        snapshot,
        verbose,
    } = Args::parse();
    init_tracing(verbose);

    let cfg = load_configuration(config.as_ref())?;
    tracing::debug!("configuration: {cfg:?}");

    let geometry = GeometryFile::new(cfg.geometry_path.clone());
    let viewport = geometry.load_or_default();

    // Channels (small/bounded)
    let (intent_tx, intent_rx) = mpsc::channel::<Intent>(16); // Input -> Dispatcher
    let (auto_tx, auto_rx) = mpsc::channel::<AutoAdvance>(1); // Dispatcher -> AutoAdvance

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::warn!("ctrl-c handler failed: {err}");
                return;
            }
            tracing::info!("ctrl-c received; initiating shutdown");
            cancel.cancel();
        });
    }

    let (screen, render_worker) = ImageScreen::spawn(viewport, snapshot);
    let store = Arc::new(PageStore::new());
    let navigator = Navigator::new(store, Arc::new(screen));

    let mut tasks = JoinSet::new();

    // AutoAdvance
    tasks.spawn({
        let navigator = navigator.clone();
        let period = cfg.auto_advance_interval;
        let cancel = cancel.clone();
        async move {
            auto_advance::run(auto_rx, navigator, period, cancel)
                .await
                .context("auto-advance task failed")
        }
    });

    // Dispatcher
    tasks.spawn({
        let dispatcher = Dispatcher::new(navigator, auto_tx, geometry);
        let cancel = cancel.clone();
        async move {
            let result = dispatcher::run(intent_rx, dispatcher, cancel.clone()).await;
            cancel.cancel();
            result.context("dispatcher task failed")
        }
    });

    if let Some(archive) = archive {
        intent_tx
            .send(Intent::OpenRequested(path_from_uri(archive.trim())))
            .await
            .context("dispatcher stopped before the startup archive was queued")?;
    }
    spawn_stdin_reader(intent_tx);

    cancel.cancelled().await;

    while let Some(res) = tasks.join_next().await {
        match res {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::error!("task error: {e:?}"),
            Err(e) => tracing::error!("join error: {e}"),
        }
    }

    // Decodes still in flight keep a screen handle; the worker stops with the last one.
    drop(render_worker);
    Ok(())
}
