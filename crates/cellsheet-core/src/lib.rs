//! cellsheet-core - UI-agnostic sheet model with dependency-driven recalculation.

pub mod config;
pub mod error;
pub mod sheet;

pub use config::SheetConfig;
pub use error::{Result, SheetError};
pub use sheet::{Cell, CellError, CellState, Recalc, Spreadsheet};

pub use cellsheet_engine::engine::CellRef;
