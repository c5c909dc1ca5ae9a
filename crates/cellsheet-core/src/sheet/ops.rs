use std::collections::HashSet;

use cellsheet_engine::engine::{CellRef, ExpressionTree, detect_cycle, format_number, parse_number};
use tracing::debug;

use super::cell::{Cell, CellError, CellState};
use super::state::Spreadsheet;
use crate::error::{Result, SheetError};

/// Cells whose values were assigned during one recompute pass, in order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Recalc {
    pub updated: Vec<CellRef>,
}

impl Recalc {
    pub fn is_empty(&self) -> bool {
        self.updated.is_empty()
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.updated.iter().any(|r| r.to_string() == tag)
    }
}

/// How a recompute learns whether the cell closes a cycle.
#[derive(Clone, Copy, Debug)]
enum CycleCheck {
    /// Search the graph from the cell.
    Search,
    /// Already decided by the cascade's plan.
    Known(bool),
}

/// Formula body of `text`: an `=` followed by at least two characters.
fn formula_body(text: &str) -> Option<&str> {
    let body = text.strip_prefix('=')?;
    (body.chars().count() >= 2).then_some(body)
}

impl Spreadsheet {
    /// Record new text for `tag` and recompute it and its dependents.
    pub fn set_text(&mut self, tag: &str, text: &str) -> Result<Recalc> {
        if !self.record_text(tag, text)? {
            return Ok(Recalc::default());
        }
        self.recompute(tag)
    }

    /// Collaborator entry point for an edited cell; same as [`Spreadsheet::set_text`].
    pub fn on_text_changed(&mut self, tag: &str, text: &str) -> Result<Recalc> {
        self.set_text(tag, text)
    }

    /// Store `text` at `tag` without recomputing anything.
    ///
    /// Returns false when the text is unchanged, in which case there is
    /// nothing to recompute.
    pub fn record_text(&mut self, tag: &str, text: &str) -> Result<bool> {
        let cell_ref = self.resolve_or_err(tag)?;
        if self.current_text(tag) == text {
            return Ok(false);
        }
        let mut cell = self
            .grid
            .entry(cell_ref)
            .or_insert_with(|| Cell::new(cell_ref));
        cell.text = text.to_string();
        Ok(true)
    }

    /// Recompute `tag` from its text, then every cell that reads it.
    ///
    /// A cell that ends in an error does not pass the update on to its own
    /// dependents.
    pub fn recompute(&mut self, tag: &str) -> Result<Recalc> {
        let cell_ref = self.resolve_or_err(tag)?;
        let mut recalc = Recalc::default();

        let state = self.recompute_cell(cell_ref, CycleCheck::Search);
        recalc.updated.push(cell_ref);
        if !state.is_error() {
            self.cascade(cell_ref, &mut recalc);
        }
        Ok(recalc)
    }

    fn resolve_or_err(&self, tag: &str) -> Result<CellRef> {
        self.resolve(tag)
            .ok_or_else(|| SheetError::InvalidTag(tag.to_string()))
    }

    /// Walk the transitive dependents of `origin` in dependency order. A cell is
    /// recomputed once, and only if something recomputed without error in this
    /// pass reads into it.
    fn cascade(&mut self, origin: CellRef, recalc: &mut Recalc) {
        let origin_tag = origin.to_string();
        let plan = self.graph.recalc_plan(&origin_tag);
        if plan.order.is_empty() {
            return;
        }
        debug!(
            cell = %origin_tag,
            pending = plan.order.len(),
            cyclic = plan.cyclic.len(),
            "cascading recompute"
        );

        let mut triggered: HashSet<String> =
            self.graph.dependents_of(&origin_tag).map(str::to_string).collect();

        for tag in &plan.order {
            if !triggered.contains(tag) {
                continue;
            }
            let Some(cell_ref) = self.resolve(tag) else {
                continue;
            };
            // Texts do not change during a cascade, so neither do the edges
            // the plan was computed from.
            let check = CycleCheck::Known(plan.cyclic.contains(tag));
            let state = self.recompute_cell(cell_ref, check);
            recalc.updated.push(cell_ref);
            if !state.is_error() {
                triggered.extend(self.graph.dependents_of(tag).map(str::to_string));
            }
        }
    }

    /// Recompute a single cell's value from its text, rebuilding its edges.
    fn recompute_cell(&mut self, cell_ref: CellRef, check: CycleCheck) -> CellState {
        let tag = cell_ref.to_string();
        let text = self
            .grid
            .get(&cell_ref)
            .map(|cell| cell.text.clone())
            .unwrap_or_default();

        self.graph.remove_dependent(&tag);

        if text.is_empty() {
            self.grid.remove(&cell_ref);
            debug!(cell = %tag, "cleared");
            return CellState::Empty;
        }

        let (value, state) = match formula_body(&text) {
            Some(formula) => match self.evaluate_formula(&tag, formula, check) {
                Ok(result) => (format_number(result), CellState::FormulaOk),
                Err(err) => (err.to_string(), CellState::FormulaError(err)),
            },
            None => (text, CellState::Literal),
        };
        debug!(cell = %tag, value = %value, ?state, "recomputed");

        let mut cell = self
            .grid
            .entry(cell_ref)
            .or_insert_with(|| Cell::new(cell_ref));
        cell.value = value;
        cell.state = state;
        state
    }

    /// Compile `formula` for the cell `tag`, register its edges, bind the
    /// referenced cells' values, and evaluate.
    fn evaluate_formula(
        &mut self,
        tag: &str,
        formula: &str,
        check: CycleCheck,
    ) -> std::result::Result<f64, CellError> {
        let mut tree = ExpressionTree::compile(formula).map_err(|err| {
            debug!(cell = %tag, formula, error = %err, "formula does not parse");
            CellError::Parse
        })?;

        let names = tree.variable_names();
        for name in &names {
            self.graph.add_dependency(name, tag);
        }

        for name in &names {
            let Some(source) = self.resolve(name.trim()) else {
                return Err(CellError::BadReference);
            };
            let value = self
                .grid
                .get(&source)
                .map(|cell| parse_number(&cell.value))
                .unwrap_or(0.0);
            tree.set_variable(name, value);

            if name == tag {
                return Err(CellError::SelfReference);
            }
        }

        let circular = match check {
            CycleCheck::Search => match detect_cycle(&self.graph, tag, &names) {
                Some(path) => {
                    debug!(cell = %tag, path = ?path, "circular reference");
                    true
                }
                None => false,
            },
            CycleCheck::Known(circular) => circular,
        };
        if circular {
            return Err(CellError::CircularReference);
        }

        Ok(tree.evaluate())
    }
}
