use std::path::PathBuf;

use crate::geometry::WindowGeometry;

/// Everything the user can ask for, whatever device it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    NextRequested,
    PreviousRequested,
    AutoAdvanceArmed,
    AutoAdvanceDisarmed,
    OpenRequested(PathBuf),
    /// The window moved or was resized.
    ViewportChanged(WindowGeometry),
}

/// Control signal for the auto-advance loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoAdvance {
    Armed,
    Disarmed,
}
