//! Configuration module for plotty-rs
//!
//! This module handles the state that persists between runs: the last
//! function, the last view, the mouse mode, UI preferences and plot settings.
//!
//! # App Data Location
//!
//! Application data is stored in the platform-appropriate location:
//! - **Linux**: `~/.local/share/dev.plotty.plotty-rs/`
//! - **macOS**: `~/Library/Application Support/dev.plotty.plotty-rs/`
//! - **Windows**: `%APPDATA%\dev.plotty.plotty-rs\`
//!
//! # Files
//!
//! - `app_state.json` - Last session and preferences
//! - `presets.toml` - Optional user presets (see [`crate::presets`])
//! - `logs/` - Daily rolling log files
//!
//! # Example
//!
//! ```ignore
//! use plotty_rs::config::AppState;
//!
//! let mut state = AppState::load_or_default();
//! state.last_expression = Some("a*sin(x)".to_string());
//! state.save()?;
//! ```

pub mod settings;

pub use settings::*;

use crate::controller::MouseMode;
use crate::error::{PlottyError, Result, ResultExt};
use crate::viewport::Viewport;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application identifier for data directories
pub const APP_ID: &str = "dev.plotty.plotty-rs";

/// App state filename
pub const APP_STATE_FILE: &str = "app_state.json";

/// User presets filename
pub const PRESETS_FILE: &str = "presets.toml";

/// Log directory name inside the app data directory
pub const LOG_DIR: &str = "logs";

/// Function shown on first launch
pub const DEFAULT_EXPRESSION: &str = "a*sin(k*(x - phi)) + c";

// ==================== App Data Directory ====================

/// Get the application data directory path
pub fn app_data_dir() -> Option<PathBuf> {
    dirs_next::data_dir().map(|p| p.join(APP_ID))
}

/// Ensure the app data directory exists
pub fn ensure_app_data_dir() -> Result<PathBuf> {
    let dir = app_data_dir().ok_or_else(|| {
        PlottyError::Config("Could not determine app data directory".to_string())
    })?;

    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| {
            PlottyError::Config(format!("Failed to create app data directory: {}", e))
        })?;
    }

    Ok(dir)
}

/// Get the path to the app state file
pub fn app_state_path() -> Option<PathBuf> {
    app_data_dir().map(|p| p.join(APP_STATE_FILE))
}

/// Get the path to the user presets file
pub fn presets_path() -> Option<PathBuf> {
    app_data_dir().map(|p| p.join(PRESETS_FILE))
}

/// Get the log directory path
pub fn log_dir() -> Option<PathBuf> {
    app_data_dir().map(|p| p.join(LOG_DIR))
}

// ==================== App State ====================

/// Persistent application state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    /// Version for future migration support
    #[serde(default = "default_app_state_version")]
    pub version: u32,

    /// Function text that was plotted when the app was closed
    #[serde(default)]
    pub last_expression: Option<String>,

    /// View that was shown when the app was closed
    #[serde(default)]
    pub last_viewport: Option<Viewport>,

    /// What dragging on the plot does
    #[serde(default)]
    pub mouse_mode: MouseMode,

    #[serde(default)]
    pub ui_preferences: UiPreferences,

    #[serde(default)]
    pub plot: PlotSettings,
}

fn default_app_state_version() -> u32 {
    1
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            version: 1,
            last_expression: None,
            last_viewport: None,
            mouse_mode: MouseMode::default(),
            ui_preferences: UiPreferences::default(),
            plot: PlotSettings::default(),
        }
    }
}

impl AppState {
    /// Load app state from the default location
    pub fn load() -> Result<Self> {
        let path = app_state_path().ok_or_else(|| {
            PlottyError::Config("Could not determine app state path".to_string())
        })?;
        Self::load_from(path)
    }

    /// Load app state from `path`; a missing file gives the defaults
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| PlottyError::Config(format!("Failed to read app state: {}", e)))?;

        serde_json::from_str(&content)
            .map_err(|e| PlottyError::Config(format!("Failed to parse app state: {}", e)))
    }

    /// Load app state, returning defaults on any error
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!("Failed to load app state, using defaults: {}", e);
            Self::default()
        })
    }

    /// Save app state to the default location
    pub fn save(&self) -> Result<()> {
        let dir = ensure_app_data_dir()?;
        self.save_to(dir.join(APP_STATE_FILE))
    }

    /// Save app state as pretty-printed JSON to `path`
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self).context("Failed to serialize app state")?;

        std::fs::write(path, content)
            .map_err(|e| PlottyError::Config(format!("Failed to write app state: {}", e)))
    }

    /// The function to plot on startup
    pub fn startup_expression(&self) -> &str {
        self.last_expression
            .as_deref()
            .unwrap_or(DEFAULT_EXPRESSION)
    }

    /// The view to show on startup, if the stored one is still usable
    pub fn startup_viewport(&self) -> Option<Viewport> {
        self.last_viewport.filter(Viewport::is_valid)
    }
}

/// UI preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiPreferences {
    /// Enable dark mode
    #[serde(default = "default_true")]
    pub dark_mode: bool,

    /// Width of the function curve in points
    #[serde(default = "default_line_width")]
    pub line_width: f32,

    /// Draw the grid behind the curve
    #[serde(default = "default_true")]
    pub show_grid: bool,

    /// Write parameter values into the plot title instead of their names
    #[serde(default)]
    pub show_parameter_values: bool,

    /// Width of the side panel holding the sliders
    #[serde(default = "default_panel_width")]
    pub control_panel_width: f32,
}

fn default_true() -> bool {
    true
}

fn default_line_width() -> f32 {
    2.0
}

fn default_panel_width() -> f32 {
    280.0
}

impl Default for UiPreferences {
    fn default() -> Self {
        Self {
            dark_mode: true,
            line_width: default_line_width(),
            show_grid: true,
            show_parameter_values: false,
            control_panel_width: default_panel_width(),
        }
    }
}
