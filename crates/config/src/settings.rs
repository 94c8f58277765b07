// Application settings
// Loaded from ~/.config/gridmark/settings.json

use gridmark_selection::SelectionOptions;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Log verbosity when no flag or environment override is given
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Directive understood by env-filter style loggers
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Off => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Selection
    #[serde(rename = "selection.rowOverlayColumn")]
    pub row_overlay_column: String,

    #[serde(rename = "selection.primaryColumns")]
    pub primary_columns: Vec<String>,

    #[serde(rename = "selection.selectCellPreservesRows")]
    pub select_cell_preserves_rows: bool,

    // Logging
    #[serde(rename = "log.level")]
    pub log_level: LogLevel,
}

impl Default for Settings {
    fn default() -> Self {
        let engine = SelectionOptions::default();
        Self {
            // Selection
            row_overlay_column: engine.row_overlay_col,
            primary_columns: engine.primary_cols,
            select_cell_preserves_rows: engine.select_cell_preserves_rows,
            // Logging
            log_level: LogLevel::default(),
        }
    }
}

/// Failure reading or writing a settings file
#[derive(Debug)]
pub enum SettingsError {
    Io { path: PathBuf, message: String },
    Parse { path: PathBuf, message: String },
    Invalid(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io { path, message } => write!(f, "{}: {}", path.display(), message),
            SettingsError::Parse { path, message } => {
                write!(f, "{}: invalid settings: {}", path.display(), message)
            }
            SettingsError::Invalid(message) => write!(f, "invalid settings: {}", message),
        }
    }
}

impl std::error::Error for SettingsError {}

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gridmark");
        config_dir.join("settings.json")
    }

    /// Load settings from the default location, falling back to defaults
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{}; using default settings", e);
                Self::default()
            }
        }
    }

    /// Load settings from an explicit file. Missing keys take defaults.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let contents = fs::read_to_string(path).map_err(|e| SettingsError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let settings = Self::parse(&contents).map_err(|message| SettingsError::Parse {
            path: path.to_path_buf(),
            message,
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Parse settings JSON, ignoring lines starting with `//`
    pub fn parse(contents: &str) -> Result<Self, String> {
        let cleaned: String = contents
            .lines()
            .filter(|line| !line.trim().starts_with("//"))
            .collect::<Vec<_>>()
            .join("\n");

        serde_json::from_str(&cleaned).map_err(|e| e.to_string())
    }

    /// Reject values the engine cannot work with
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.row_overlay_column.is_empty() {
            return Err(SettingsError::Invalid(
                "selection.rowOverlayColumn must not be empty".to_string(),
            ));
        }
        if self.primary_columns.iter().any(String::is_empty) {
            return Err(SettingsError::Invalid(
                "selection.primaryColumns must not contain empty ids".to_string(),
            ));
        }
        Ok(())
    }

    /// Save current settings, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        let io_err = |e: std::io::Error| SettingsError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| SettingsError::Invalid(e.to_string()))?;

        fs::write(path, json).map_err(io_err)
    }

    /// Default settings file with comments, for `config init` style output
    pub fn default_file_contents() -> &'static str {
        r#"{
    // Column whose cells mean "this row is selected"
    "selection.rowOverlayColumn": "__row__",

    // Clicking the only selected cell in one of these columns deselects it
    "selection.primaryColumns": ["name"],

    // Keep row selections when a single cell is clicked programmatically
    "selection.selectCellPreservesRows": true,

    // Logging: "off", "error", "warn", "info", "debug", "trace"
    "log.level": "warn"
}
"#
    }
}
