//! Persisted user settings (lives in the OS config directory).

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::model::SortConfig;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Simulated round-trip time of a refresh.
    pub refresh_latency_ms: u64,
    /// JSON collection to load on refresh; sample data when unset.
    pub data_file: Option<PathBuf>,
    /// Last used ordering.
    pub sort: SortConfig,
    /// How many changes can be undone.
    pub undo_depth: usize,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            refresh_latency_ms: 800,
            data_file: None,
            sort: SortConfig::default(),
            undo_depth: 1,
        }
    }
}

impl AppSettings {
    pub fn refresh_latency(&self) -> Duration {
        Duration::from_millis(self.refresh_latency_ms)
    }

    /// Read settings from `path`, falling back to defaults when missing or malformed.
    pub fn load(path: &Path) -> Self {
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to read settings, using defaults"
                );
                return Self::default();
            }
        };
        serde_json::from_str(&contents).unwrap_or_else(|e| {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "malformed settings, using defaults"
            );
            Self::default()
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), crate::error::IoError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

/// Directory holding `settings.json`.
pub fn config_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "AutomationDashboard")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}
