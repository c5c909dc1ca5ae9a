//! Sheet state and recalculation (UI-agnostic).

mod cell;
mod ops;
mod state;

pub use cell::{Cell, CellError, CellState, Grid};
pub use ops::Recalc;
pub use state::Spreadsheet;
