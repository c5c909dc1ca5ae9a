//! Tree evaluation.

use super::tree::{Bindings, ExpressionTree, Node};
use crate::error::Result;

impl Node {
    /// Reduce this node to a number using the current `bindings`.
    ///
    /// A variable missing from `bindings` yields NaN. That cannot happen for a
    /// tree evaluated against its own bindings, which are seeded on compile.
    pub fn evaluate(&self, bindings: &Bindings) -> f64 {
        match self {
            Node::Constant(value) => *value,
            Node::Variable(name) => bindings.get(name).unwrap_or(f64::NAN),
            Node::BinaryOp { op, left, right } => {
                op.apply(left.evaluate(bindings), right.evaluate(bindings))
            }
        }
    }
}

/// Compile and evaluate `expression` with every variable at 0.0.
pub fn evaluate_expression(expression: &str) -> Result<f64> {
    Ok(ExpressionTree::compile(expression)?.evaluate())
}
