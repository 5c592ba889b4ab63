//! Notifier configuration: defaults, the user overlay, and the merge.
//!
//! The config file is optional and partial. A user who only wants a
//! different error sound writes `{"sounds":{"error":"Bip"}}` and every
//! other field keeps its default.

use fs_err as fs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name under `~/.config/opencode/`.
pub const CONFIG_FILE: &str = "kdco-notify.json";

/// Process-wide notification policy. Loaded once at startup, read-only
/// thereafter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotifyConfig {
    /// Notify for child/sub-session events (default: false).
    pub notify_child_sessions: bool,
    /// Sound per event type.
    pub sounds: Sounds,
    /// Local-time window during which notifications are suppressed.
    pub quiet_hours: QuietHours,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sounds {
    pub idle: String,
    pub error: String,
    pub permission: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuietHours {
    pub enabled: bool,
    /// "HH:MM" local time.
    pub start: String,
    /// "HH:MM" local time.
    pub end: String,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            notify_child_sessions: false,
            sounds: Sounds {
                idle: "Glass".to_string(),
                error: "Basso".to_string(),
                permission: "Submarine".to_string(),
            },
            quiet_hours: QuietHours {
                enabled: false,
                start: "22:00".to_string(),
                end: "08:00".to_string(),
            },
        }
    }
}

/// Partial user config as parsed from disk. Every field is optional so the
/// merge can backfill defaults key by key.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigOverlay {
    pub notify_child_sessions: Option<bool>,
    pub sounds: SoundsOverlay,
    pub quiet_hours: QuietHoursOverlay,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SoundsOverlay {
    pub idle: Option<String>,
    pub error: Option<String>,
    pub permission: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct QuietHoursOverlay {
    pub enabled: Option<bool>,
    pub start: Option<String>,
    pub end: Option<String>,
}

impl NotifyConfig {
    /// Deep-merges a user overlay onto the defaults: top-level keys shallow,
    /// `sounds` and `quiet_hours` one level deep.
    pub fn merged(overlay: ConfigOverlay) -> Self {
        let defaults = Self::default();
        Self {
            notify_child_sessions: overlay
                .notify_child_sessions
                .unwrap_or(defaults.notify_child_sessions),
            sounds: Sounds {
                idle: overlay.sounds.idle.unwrap_or(defaults.sounds.idle),
                error: overlay.sounds.error.unwrap_or(defaults.sounds.error),
                permission: overlay
                    .sounds
                    .permission
                    .unwrap_or(defaults.sounds.permission),
            },
            quiet_hours: QuietHours {
                enabled: overlay
                    .quiet_hours
                    .enabled
                    .unwrap_or(defaults.quiet_hours.enabled),
                start: overlay.quiet_hours.start.unwrap_or(defaults.quiet_hours.start),
                end: overlay.quiet_hours.end.unwrap_or(defaults.quiet_hours.end),
            },
        }
    }
}

/// Returns the path to the user config file.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".config").join("opencode").join(CONFIG_FILE))
}

/// Loads the notifier configuration, returning defaults on any failure.
/// The config file is optional; a missing or malformed file is not an error.
pub fn load_config() -> NotifyConfig {
    config_path()
        .map(|p| load_config_from(&p))
        .unwrap_or_default()
}

/// Loads configuration from an explicit path (injectable for tests).
pub fn load_config_from(path: &Path) -> NotifyConfig {
    fs::read_to_string(path)
        .ok()
        .and_then(|c| serde_json::from_str::<ConfigOverlay>(&c).ok())
        .map(NotifyConfig::merged)
        .unwrap_or_default()
}
