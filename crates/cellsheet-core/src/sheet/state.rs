use cellsheet_engine::engine::{CellRef, DependencyGraph};

use super::cell::{Cell, Grid};
use crate::config::SheetConfig;
use crate::error::Result;

/// UI-agnostic sheet: cell texts, derived values, and the dependency graph.
pub struct Spreadsheet {
    pub(crate) config: SheetConfig,
    /// Written cells only; blank cells have no entry.
    pub(crate) grid: Grid,
    /// Referenced name -> cells whose formulas read it
    pub(crate) graph: DependencyGraph,
}

impl Spreadsheet {
    /// Create an empty sheet. The config is assumed valid; see [`SheetConfig::new`].
    pub fn new(config: SheetConfig) -> Self {
        Spreadsheet {
            config,
            grid: Grid::new(),
            graph: DependencyGraph::new(),
        }
    }

    pub fn with_size(rows: usize, columns: usize) -> Result<Self> {
        Ok(Self::new(SheetConfig::new(rows, columns)?))
    }

    pub fn config(&self) -> &SheetConfig {
        &self.config
    }

    pub fn row_count(&self) -> usize {
        self.config.rows
    }

    pub fn column_count(&self) -> usize {
        self.config.columns
    }

    /// Resolve a tag to a cell position inside this sheet.
    pub fn resolve(&self, tag: &str) -> Option<CellRef> {
        CellRef::from_tag(tag).filter(|r| r.is_within(self.config.rows, self.config.columns))
    }

    /// The cell at `tag`, or None if the tag is malformed or out of bounds.
    pub fn cell(&self, tag: &str) -> Option<Cell> {
        let cell_ref = self.resolve(tag)?;
        Some(self.cell_at_ref(cell_ref))
    }

    pub fn cell_at(&self, row: usize, col: usize) -> Option<Cell> {
        let cell_ref = CellRef::new(row, col);
        cell_ref
            .is_within(self.config.rows, self.config.columns)
            .then(|| self.cell_at_ref(cell_ref))
    }

    fn cell_at_ref(&self, cell_ref: CellRef) -> Cell {
        self.grid
            .get(&cell_ref)
            .map(|entry| entry.clone())
            .unwrap_or_else(|| Cell::new(cell_ref))
    }

    /// Displayed value of `tag`; empty for blank or unknown cells.
    pub fn current_value(&self, tag: &str) -> String {
        self.cell(tag).map(|c| c.value).unwrap_or_default()
    }

    /// Text as entered at `tag`; empty for blank or unknown cells.
    pub fn current_text(&self, tag: &str) -> String {
        self.cell(tag).map(|c| c.text).unwrap_or_default()
    }

    /// Tags of the cells whose formulas read `tag`.
    pub fn dependents_of(&self, tag: &str) -> Vec<String> {
        self.graph.dependents_of(tag).map(str::to_string).collect()
    }

    pub fn dependency_graph(&self) -> &DependencyGraph {
        &self.graph
    }

    /// Every non-blank cell in row-major order.
    pub fn cells(&self) -> Vec<Cell> {
        let mut cells: Vec<Cell> = self
            .grid
            .iter()
            .filter(|entry| !entry.is_blank())
            .map(|entry| entry.value().clone())
            .collect();
        cells.sort_by_key(|cell| cell.cell_ref);
        cells
    }
}

impl Default for Spreadsheet {
    fn default() -> Self {
        Self::new(SheetConfig::default())
    }
}
