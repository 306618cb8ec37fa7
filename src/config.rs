use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Result, ensure};
use serde::Deserialize;

const GEOMETRY_FILE_NAME: &str = ".comicview";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Configuration {
    /// Delay between automatic page turns while auto-advance is armed.
    #[serde(with = "humantime_serde")]
    pub auto_advance_interval: Duration,
    /// Where the window geometry record is read at startup and written on change.
    pub geometry_path: PathBuf,
}

impl Configuration {
    const fn default_auto_advance_interval() -> Duration {
        Duration::from_secs(4)
    }

    fn default_geometry_path() -> PathBuf {
        std::env::var_os("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
            .join(GEOMETRY_FILE_NAME)
    }

    /// Parse a configuration from a YAML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not valid YAML.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let s = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&s)?)
    }

    /// Validate runtime invariants that cannot be expressed via serde defaults alone.
    pub fn validated(self) -> Result<Self> {
        ensure!(
            self.auto_advance_interval > Duration::ZERO,
            "auto-advance-interval must be positive"
        );
        ensure!(
            !self.geometry_path.as_os_str().is_empty(),
            "geometry-path must not be empty"
        );
        Ok(self)
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            auto_advance_interval: Self::default_auto_advance_interval(),
            geometry_path: Self::default_geometry_path(),
        }
    }
}
