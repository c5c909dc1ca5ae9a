use cellsheet_engine::engine::CellRef;
use dashmap::DashMap;
use thiserror::Error;

/// A formula problem local to one cell. `Display` gives the value shown in
/// the cell.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellError {
    #[error("!(bad reference)")]
    BadReference,

    #[error("!(self reference)")]
    SelfReference,

    #[error("!(circular reference)")]
    CircularReference,

    #[error("!(parse error)")]
    Parse,
}

/// Where a cell ended up after its last recompute.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CellState {
    #[default]
    Empty,
    Literal,
    FormulaOk,
    FormulaError(CellError),
}

impl CellState {
    pub fn is_error(&self) -> bool {
        matches!(self, CellState::FormulaError(_))
    }
}

/// A cell as entered (`text`) and as displayed (`value`).
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    pub cell_ref: CellRef,
    pub text: String,
    pub value: String,
    pub state: CellState,
}

impl Cell {
    pub fn new(cell_ref: CellRef) -> Cell {
        Cell {
            cell_ref,
            text: String::new(),
            value: String::new(),
            state: CellState::Empty,
        }
    }

    pub fn tag(&self) -> String {
        self.cell_ref.to_string()
    }

    /// True for a cell that was never written or has been cleared.
    pub fn is_blank(&self) -> bool {
        self.text.is_empty() && self.value.is_empty()
    }
}

/// Sparse cell storage; positions without an entry read as blank cells.
pub type Grid = DashMap<CellRef, Cell>;
