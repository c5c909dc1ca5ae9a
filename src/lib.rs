//! cellsheet - Grid of named cells with formulas that recompute when the
//! cells they read change.
//!
//! ```
//! use cellsheet::Spreadsheet;
//!
//! let mut sheet = Spreadsheet::default();
//! sheet.set_text("B1", "=A1*2").unwrap();
//! sheet.set_text("A1", "21").unwrap();
//! assert_eq!(sheet.current_value("B1"), "42");
//! ```

pub use cellsheet_core::{
    Cell, CellError, CellRef, CellState, Recalc, Result, SheetConfig, SheetError, Spreadsheet,
};
pub use cellsheet_engine::engine::{ExpressionTree, evaluate_expression};
pub use cellsheet_engine::{ParseError, engine};
