// Adapter settings management and persistence
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::AdapterError;

const DEFAULT_STATS_INTERVAL_MS: u64 = 1000;

/// Telemetry settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetrySettings {
    pub stats_interval_ms: u64,
    pub info_source: String, // Value of the `source` field in p2p-info
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            stats_interval_ms: DEFAULT_STATS_INTERVAL_MS,
            info_source: "p2p-media-loader".to_string(),
        }
    }
}

/// Main adapter settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterSettings {
    pub version: i32, // Settings schema version for future migrations
    pub native_hls_mime: String,
    pub plugin_name: String,
    pub telemetry: TelemetrySettings,
}

impl Default for AdapterSettings {
    fn default() -> Self {
        Self {
            version: 1,
            native_hls_mime: "application/vnd.apple.mpegurl".to_string(),
            plugin_name: "p2pMediaLoader".to_string(),
            telemetry: TelemetrySettings::default(),
        }
    }
}

impl AdapterSettings {
    /// Get the settings file path
    pub fn get_settings_path(dir: &Path) -> PathBuf {
        dir.join("adapter-settings.json")
    }

    /// Telemetry flush period. A zero interval falls back to the default.
    pub fn stats_interval(&self) -> Duration {
        if self.telemetry.stats_interval_ms == 0 {
            log::warn!(
                "Stats interval of 0ms is not allowed, using {}ms",
                DEFAULT_STATS_INTERVAL_MS
            );
            return Duration::from_millis(DEFAULT_STATS_INTERVAL_MS);
        }
        Duration::from_millis(self.telemetry.stats_interval_ms)
    }

    /// Load settings from file, or return defaults if file doesn't exist
    pub fn load(dir: &Path) -> Result<Self, AdapterError> {
        let path = Self::get_settings_path(dir);

        if !path.exists() {
            log::debug!("No adapter settings file found, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let mut settings: AdapterSettings = serde_json::from_str(&content)?;

        if settings.telemetry.stats_interval_ms == 0 {
            log::warn!(
                "Stats interval of 0ms is not allowed, using {}ms",
                DEFAULT_STATS_INTERVAL_MS
            );
            settings.telemetry.stats_interval_ms = DEFAULT_STATS_INTERVAL_MS;
        }

        log::debug!("Loaded adapter settings from {:?}", path);
        Ok(settings)
    }

    /// Save settings to file
    pub fn save(&self, dir: &Path) -> Result<(), AdapterError> {
        // Ensure directory exists
        fs::create_dir_all(dir)?;

        let path = Self::get_settings_path(dir);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(&path, content)?;

        log::debug!("Saved adapter settings to {:?}", path);
        Ok(())
    }
}
