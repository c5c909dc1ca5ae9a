//! Error types for Cellsheet core.

use std::path::PathBuf;

use thiserror::Error;

/// Errors returned to callers of the sheet API.
///
/// Reference problems inside a formula are not errors at this level; they
/// become the cell's value (see [`crate::sheet::CellError`]).
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Refusing to read {}: file too large ({len} bytes)", .path.display())]
    ConfigTooLarge { path: PathBuf, len: u64 },

    #[error("Invalid sheet size {rows}x{columns}: need at least 1 row and 1 to 26 columns")]
    InvalidDimensions { rows: usize, columns: usize },

    #[error("No cell at {0}")]
    InvalidTag(String),
}

pub type Result<T> = std::result::Result<T, SheetError>;
