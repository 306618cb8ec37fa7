use std::time::Duration;

use anyhow::Result;
use tokio::select;
use tokio::sync::mpsc::Receiver;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::events::AutoAdvance;
use crate::tasks::navigation::Navigator;

/// Turns the page every `period` while armed.
///
/// The armed flag is owned by this loop alone; other tasks only send
/// [`AutoAdvance`] signals into `control`.
pub async fn run(
    mut control: Receiver<AutoAdvance>,
    navigator: Navigator,
    period: Duration,
    cancel: CancellationToken,
) -> Result<()> {
    let mut armed = false;
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        select! {
            _ = cancel.cancelled() => break,

            signal = control.recv() => match signal {
                Some(signal) => {
                    armed = signal == AutoAdvance::Armed;
                    info!(armed, "auto-advance toggled");
                }
                None => {
                    debug!("auto-advance control closed");
                    break;
                }
            },

            _ = ticker.tick() => {
                if armed {
                    let cursor = navigator.next();
                    debug!(cursor, "auto-advance tick");
                }
            }
        }
    }
    Ok(())
}
