//! Application settings loaded from a JSON file.
//!
//! Every field has a default so SizeSleuth works without a settings file.

use crate::diagnostics::DEFAULT_LOG_FILE;
use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Default settings file name, looked up in the working directory.
pub const DEFAULT_SETTINGS_FILE: &str = "sizesleuth.json";

/// Environment variable that overrides the settings file location.
pub const SETTINGS_ENV_VAR: &str = "SIZESLEUTH_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where the diagnostic log is appended.
    pub log_path: PathBuf,
    /// Ask before deleting anything.
    pub confirm_delete: bool,
    /// Start in dark mode.
    pub dark_mode: bool,
    /// Directory pre-filled in the path field when none is given on the
    /// command line.
    pub start_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from(DEFAULT_LOG_FILE),
            confirm_delete: true,
            dark_mode: true,
            start_dir: None,
        }
    }
}

impl Settings {
    /// Loads settings from a JSON file at `path`.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`] if the file does not exist.
    /// - [`CoreError::Settings`] if the JSON is malformed.
    /// - [`CoreError::Io`] for any other read failure.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => CoreError::NotFound(path.to_path_buf()),
            _ => CoreError::Io(e),
        })?;
        serde_json::from_str(&content).map_err(|e| CoreError::Settings(e.to_string()))
    }

    /// Like [`load`](Self::load), but falls back to defaults.
    ///
    /// A missing file is normal and only noted at debug level; any other
    /// failure is logged as a warning.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(CoreError::NotFound(_)) => {
                debug!("No settings file at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                warn!("Ignoring settings file {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Settings file location: `$SIZESLEUTH_CONFIG` if set, otherwise
    /// `sizesleuth.json` in the working directory.
    pub fn default_path() -> PathBuf {
        std::env::var_os(SETTINGS_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE))
    }

    /// Pick the directory to show first: explicit argument, then
    /// `start_dir`, then the current directory.
    pub fn initial_dir(&self, cli_arg: Option<PathBuf>) -> Option<PathBuf> {
        cli_arg
            .or_else(|| self.start_dir.clone())
            .or_else(|| std::env::current_dir().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn defaults() {
        let s = Settings::default();
        assert_eq!(s.log_path, PathBuf::from("sizesleuth.log"));
        assert!(s.confirm_delete);
        assert!(s.dark_mode);
        assert!(s.start_dir.is_none());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("settings.json");
        fs::write(&path, r#"{ "confirm_delete": false }"#).unwrap();

        let s = Settings::load(&path).unwrap();
        assert!(!s.confirm_delete);
        assert!(s.dark_mode);
        assert_eq!(s.log_path, PathBuf::from("sizesleuth.log"));
    }

    #[test]
    fn malformed_file_is_a_settings_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(Settings::load(&path), Err(CoreError::Settings(_))));
        assert_eq!(Settings::load_or_default(&path), Settings::default());
    }

    #[test]
    fn missing_file_is_not_found() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("absent.json");
        assert!(matches!(Settings::load(&path), Err(CoreError::NotFound(_))));
        assert_eq!(Settings::load_or_default(&path), Settings::default());
    }

    #[test]
    fn cli_argument_wins_over_start_dir() {
        let s = Settings {
            start_dir: Some(PathBuf::from("/from/settings")),
            ..Settings::default()
        };
        assert_eq!(
            s.initial_dir(Some(PathBuf::from("/from/cli"))),
            Some(PathBuf::from("/from/cli"))
        );
        assert_eq!(s.initial_dir(None), Some(PathBuf::from("/from/settings")));
    }

    #[test]
    fn round_trips_through_json() {
        let s = Settings {
            dark_mode: false,
            start_dir: Some(PathBuf::from("/home/me")),
            ..Settings::default()
        };
        let json = serde_json::to_string(&s).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}
