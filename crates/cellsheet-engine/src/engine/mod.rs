//! Formula engine API.
//!
//! This module provides the expression pipeline and the graph primitives used
//! by the recalculation layer:
//!
//! - [`Operator`], [`is_operator`], [`rank`] - Static operator registry
//! - [`parse`] - Shunting-yard conversion to postfix [`Token`]s
//! - [`ExpressionTree`], [`Node`], [`Bindings`] - Compiled expressions
//! - [`CellRef`] - Cell tag parsing (A1 notation <-> row/col indices)
//! - [`DependencyGraph`], [`detect_cycle`] - Dependency tracking
//! - [`format_number`], [`parse_number`] - Cell value conversions

mod cell_ref;
mod cycle;
mod deps;
mod eval;
mod format;
mod operator;
mod parse;
mod tree;

pub use cell_ref::{CellRef, MAX_COLUMNS};
pub use cycle::detect_cycle;
pub use deps::{DependencyGraph, RecalcPlan};
pub use eval::evaluate_expression;
pub use format::{format_number, parse_number};
pub use operator::{Associativity, OPERATORS, Operator, associativity, construct, is_operator, rank};
pub use parse::{Token, parse, postfix_string};
pub use tree::{Bindings, ExpressionTree, Node};
