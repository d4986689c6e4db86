//! Configuration file loading and parsing
//!
//! Loads configuration from `~/.config/deckview/config.toml`

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::{DeckSettings, EdgePolicy};
use crate::error::{DeckviewError, Result};
use crate::handler::mouse::DEFAULT_SWIPE_MIN_DISTANCE;
use crate::view::SurfaceLayout;

/// Main configuration file structure
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    /// General settings
    pub general: GeneralConfig,
    /// Slide navigation settings
    pub navigation: NavigationConfig,
    /// UI display settings
    pub ui: UiConfig,
}

/// General application settings
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Enable mouse support (controls and drag gestures)
    pub mouse_enabled: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            mouse_enabled: true,
        }
    }
}

/// Navigation settings
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// What Next does on the last slide: "clamp" or "wrap"
    pub edge_policy: EdgePolicy,
    /// How long a slide change holds the transition gate
    pub transition_ms: u64,
    /// Minimum horizontal drag, in cells, that counts as a swipe
    pub swipe_min_distance: u16,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            edge_policy: EdgePolicy::Clamp,
            transition_ms: 450,
            swipe_min_distance: DEFAULT_SWIPE_MIN_DISTANCE,
        }
    }
}

/// UI display settings
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub show_progress_dots: bool,
    pub show_progress_bar: bool,
    pub show_counter: bool,
    /// Bottom live-region line
    pub show_announcement: bool,
    /// Tooltip auto-dismiss delay
    pub tooltip_timeout_secs: u64,
    /// How long "Copied!" stays up
    pub copy_confirm_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_progress_dots: true,
            show_progress_bar: true,
            show_counter: true,
            show_announcement: true,
            tooltip_timeout_secs: 10,
            copy_confirm_ms: 2000,
        }
    }
}

impl ConfigFile {
    /// Get the config directory path (~/.config/deckview)
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("deckview"))
    }

    /// Get the config file path (~/.config/deckview/config.toml)
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("config.toml"))
    }

    /// Load configuration from file
    ///
    /// Returns the default config if the file doesn't exist. A file that
    /// can't be parsed also yields the default, together with the error so
    /// the caller can report it once logging is set up.
    pub fn load() -> (Self, Option<DeckviewError>) {
        let Some(path) = Self::config_path().filter(|p| p.exists()) else {
            return (Self::default(), None);
        };
        match Self::load_from(&path) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| DeckviewError::config(format!("{}: {}", path.display(), e.message())))
    }

    /// Timing, policy and surface settings for the presenter
    pub fn deck_settings(&self) -> DeckSettings {
        DeckSettings {
            policy: self.navigation.edge_policy,
            transition: Duration::from_millis(self.navigation.transition_ms),
            tooltip_timeout: Duration::from_secs(self.ui.tooltip_timeout_secs),
            copy_confirm: Duration::from_millis(self.ui.copy_confirm_ms),
            layout: SurfaceLayout {
                progress: self.ui.show_progress_dots || self.ui.show_progress_bar,
                counter: self.ui.show_counter,
                announcement: self.ui.show_announcement,
            },
        }
    }
}
