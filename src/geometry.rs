//! Persisted window geometry. The record lives in a small JSON file and is
//! read once at startup, then rewritten whenever the viewport moves or resizes.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct WindowGeometry {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl Default for WindowGeometry {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            w: 800,
            h: 1100,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeometryFile {
    path: PathBuf,
}

impl GeometryFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Missing file means first run; anything unreadable falls back to defaults too.
    pub fn load_or_default(&self) -> WindowGeometry {
        match self.load() {
            Ok(Some(geometry)) => geometry,
            Ok(None) => {
                debug!(path = %self.path.display(), "no saved geometry; using defaults");
                WindowGeometry::default()
            }
            Err(err) => {
                warn!("ignoring saved geometry: {err:#}");
                WindowGeometry::default()
            }
        }
    }

    fn load(&self) -> Result<Option<WindowGeometry>> {
        let data = match fs::read(&self.path) {
            Ok(value) => value,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err).with_context(|| format!("failed to read {}", self.path.display()));
            }
        };
        let geometry = serde_json::from_slice::<WindowGeometry>(&data)
            .with_context(|| format!("failed to parse {}", self.path.display()))?;
        Ok(Some(geometry))
    }

    /// Writes `geometry` as pretty JSON, creating parent directories.
    ///
    /// # Errors
    /// Returns an error if the directory or the file cannot be written.
    pub fn save(&self, geometry: &WindowGeometry) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create parent dir at {}", parent.display()))?;
        }
        let json = serde_json::to_vec_pretty(geometry)?;
        fs::write(&self.path, json)
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        Ok(())
    }
}
