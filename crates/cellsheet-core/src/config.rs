//! Sheet configuration loaded from TOML.
//!
//! ```toml
//! rows = 50
//! columns = 26
//! ```

use std::path::{Path, PathBuf};

use cellsheet_engine::engine::MAX_COLUMNS;
use directories::ProjectDirs;
use serde::Deserialize;
use tracing::warn;

use crate::error::{Result, SheetError};

const MAX_CONFIG_FILE_BYTES: u64 = 65_536;

pub const DEFAULT_ROWS: usize = 50;
pub const DEFAULT_COLUMNS: usize = 26;

/// Grid dimensions of a sheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct SheetConfig {
    pub rows: usize,
    pub columns: usize,
}

impl Default for SheetConfig {
    fn default() -> Self {
        SheetConfig {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
        }
    }
}

impl SheetConfig {
    pub fn new(rows: usize, columns: usize) -> Result<Self> {
        let config = SheetConfig { rows, columns };
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SheetConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a config file, refusing anything larger than 64 KiB.
    pub fn load(path: &Path) -> Result<Self> {
        let len = std::fs::metadata(path)?.len();
        if len > MAX_CONFIG_FILE_BYTES {
            return Err(SheetError::ConfigTooLarge {
                path: path.to_path_buf(),
                len,
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load `sheet.toml` from the user config directory, or the defaults.
    ///
    /// A file that exists but cannot be used is logged and ignored.
    pub fn discover() -> Self {
        let Some(path) = user_config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load(&path) {
            Ok(config) => config,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "ignoring sheet config");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.columns == 0 || self.columns > MAX_COLUMNS {
            return Err(SheetError::InvalidDimensions {
                rows: self.rows,
                columns: self.columns,
            });
        }
        Ok(())
    }
}

fn user_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "cellsheet")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("sheet.toml");
    Some(path)
}
