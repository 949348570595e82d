//! Application configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{InventoryError, Result};

/// Default store file name, relative to the working directory
pub const DEFAULT_DATABASE: &str = "inventory.db";

/// Default SQLite busy timeout in milliseconds
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5000;

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// SQLite store file
    pub database: PathBuf,

    /// Log file used while the terminal UI owns the screen
    pub log_file: PathBuf,

    /// Title shown above the form
    pub title: String,

    /// SQLite busy timeout in milliseconds
    pub busy_timeout_ms: u64,

    /// Fixed drawing area
    pub viewport: ViewportSettings,

    /// Table column widths
    pub columns: ColumnWidths,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: PathBuf::from(DEFAULT_DATABASE),
            log_file: PathBuf::from("stockroom.log"),
            title: "Stockroom".to_string(),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            viewport: ViewportSettings::default(),
            columns: ColumnWidths::default(),
        }
    }
}

impl AppConfig {
    /// Set the store file
    pub fn with_database(mut self, path: impl Into<PathBuf>) -> Self {
        self.database = path.into();
        self
    }

    /// Load configuration from a TOML file. Missing keys keep their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            InventoryError::Config(format!("cannot read '{}': {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Render the configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| InventoryError::Config(e.to_string()))
    }

    fn validate(&self) -> Result<()> {
        if self.database.as_os_str().is_empty() {
            return Err(InventoryError::Config("database path is empty".to_string()));
        }
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Err(InventoryError::Config(format!(
                "viewport must be non-empty, got {}x{}",
                self.viewport.width, self.viewport.height
            )));
        }
        Ok(())
    }
}

/// Size of the drawing area in terminal cells. The layout never grows past it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportSettings {
    pub width: u16,
    pub height: u16,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            width: 90,
            height: 30,
        }
    }
}

/// Column widths in terminal cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnWidths {
    pub number: u16,
    pub name: u16,
    pub quantity: u16,
    pub edit: u16,
    pub delete: u16,
}

impl Default for ColumnWidths {
    fn default() -> Self {
        Self {
            number: 6,
            name: 24,
            quantity: 10,
            edit: 10,
            delete: 8,
        }
    }
}

impl ColumnWidths {
    /// Widths in display order: No, Name, Quantity, Edit, Delete
    pub fn as_array(&self) -> [u16; 5] {
        [self.number, self.name, self.quantity, self.edit, self.delete]
    }
}
