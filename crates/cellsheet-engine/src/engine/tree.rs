//! Expression trees and their binding environment.
//!
//! A tree is compiled once from an expression string and never changes shape.
//! Variables are resolved by name against the [`Bindings`] owned by the
//! [`ExpressionTree`] that created them; only those values change between
//! evaluations.

use std::collections::HashMap;
use std::str::FromStr;

use tracing::trace;

use super::operator::{Operator, construct};
use super::parse::{Token, parse};
use crate::error::{ParseError, Result};

/// A node of a compiled expression.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Constant(f64),
    Variable(String),
    BinaryOp {
        op: Operator,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    pub fn binary(op: Operator, left: Node, right: Node) -> Node {
        Node::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

/// Name to value table shared by every variable of one tree.
///
/// Names keep the order in which they were first bound. There is no way to
/// remove a name, so a variable created against these bindings always resolves.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Bindings {
    order: Vec<String>,
    values: HashMap<String, f64>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// Bind `name`, inserting it if it is not yet known.
    pub fn set(&mut self, name: &str, value: f64) {
        match self.values.get_mut(name) {
            Some(slot) => *slot = value,
            None => {
                self.order.push(name.to_string());
                self.values.insert(name.to_string(), value);
            }
        }
    }

    /// Seed `name` with 0.0 unless it is already bound.
    fn seed(&mut self, name: &str) {
        if !self.values.contains_key(name) {
            self.set(name, 0.0);
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Bound names in first-seen order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// A compiled expression together with its binding environment.
#[derive(Clone, Debug, PartialEq)]
pub struct ExpressionTree {
    root: Node,
    bindings: Bindings,
}

impl ExpressionTree {
    /// Parse and compile an infix expression.
    ///
    /// Every operand that is not a number becomes a variable bound to 0.0.
    pub fn compile(expression: &str) -> Result<ExpressionTree> {
        let tokens = parse(expression)?;
        let mut bindings = Bindings::new();
        let root = compile_postfix(tokens, &mut bindings)?;
        trace!(expression, variables = bindings.len(), "compiled expression");
        Ok(ExpressionTree { root, bindings })
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    /// Names of the variables referenced by the expression, in first-seen order.
    pub fn variable_names(&self) -> Vec<String> {
        self.bindings.names().map(str::to_string).collect()
    }

    pub fn set_variable(&mut self, name: &str, value: f64) {
        self.bindings.set(name, value);
    }

    pub fn evaluate(&self) -> f64 {
        self.root.evaluate(&self.bindings)
    }
}

impl FromStr for ExpressionTree {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self> {
        ExpressionTree::compile(s)
    }
}

fn compile_postfix(tokens: Vec<Token>, bindings: &mut Bindings) -> Result<Node> {
    let mut nodes: Vec<Node> = Vec::new();

    for token in tokens {
        match token {
            Token::Operator(op) => {
                // First pop is the right operand.
                let underflow = || ParseError::StackUnderflow {
                    operator: op.symbol(),
                };
                let right = nodes.pop().ok_or_else(underflow)?;
                let left = nodes.pop().ok_or_else(underflow)?;
                let node = construct(op.symbol(), left, right)
                    .ok_or(ParseError::UnknownOperator { symbol: op.symbol() })?;
                nodes.push(node);
            }
            // Surrounding spaces stay in a variable's name but not in a number.
            Token::Operand(text) => match text.trim().parse::<f64>() {
                Ok(value) => nodes.push(Node::Constant(value)),
                Err(_) => {
                    bindings.seed(&text);
                    nodes.push(Node::Variable(text));
                }
            },
            Token::LeftParen => return Err(ParseError::UnmatchedLeftParen),
        }
    }

    match nodes.len() {
        0 => Err(ParseError::Empty),
        1 => Ok(nodes.remove(0)),
        count => Err(ParseError::DanglingOperands { count }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_compile_builds_left_and_right_children() {
        let tree = ExpressionTree::compile("7-x").unwrap();
        assert_eq!(
            tree.root(),
            &Node::binary(
                Operator::Subtract,
                Node::Constant(7.0),
                Node::Variable("x".to_string())
            )
        );
    }

    #[test]
    fn test_compiled_operators_come_from_the_registry() {
        for op in crate::engine::OPERATORS {
            let expression = format!("2{}x", op.symbol());
            let tree = ExpressionTree::compile(&expression).unwrap();
            let expected = construct(
                op.symbol(),
                Node::Constant(2.0),
                Node::Variable("x".to_string()),
            );
            assert_eq!(Some(tree.root().clone()), expected);
        }
    }

    #[test]
    fn test_variables_are_seeded_once_in_order() {
        let tree = ExpressionTree::compile("B2+A1*B2").unwrap();
        assert_eq!(tree.variable_names(), vec!["B2", "A1"]);
        assert_eq!(tree.bindings().get("A1"), Some(0.0));
        assert_eq!(tree.bindings().len(), 2);
    }

    #[test]
    fn test_constants_do_not_bind() {
        let tree = ExpressionTree::compile("1.5*4").unwrap();
        assert!(tree.bindings().is_empty());
        assert_eq!(tree.evaluate(), 6.0);
    }

    #[test]
    fn test_set_variable_inserts_unknown_names() {
        let mut tree = ExpressionTree::compile("a").unwrap();
        tree.set_variable("b", 3.0);
        assert!(tree.bindings().contains("b"));
        assert_eq!(tree.variable_names(), vec!["a", "b"]);
    }

    #[test]
    fn test_malformed_expressions_fail() {
        assert_eq!(
            ExpressionTree::compile("3+").unwrap_err(),
            ParseError::StackUnderflow { operator: '+' }
        );
        assert_eq!(
            ExpressionTree::compile("*3").unwrap_err(),
            ParseError::StackUnderflow { operator: '*' }
        );
        assert_eq!(
            ExpressionTree::compile("(3+3").unwrap_err(),
            ParseError::UnmatchedLeftParen
        );
        assert_eq!(
            ExpressionTree::compile("3)").unwrap_err(),
            ParseError::UnmatchedRightParen { position: 1 }
        );
        assert_eq!(ExpressionTree::compile("").unwrap_err(), ParseError::Empty);
        assert_eq!(ExpressionTree::compile("()").unwrap_err(), ParseError::Empty);
        assert_eq!(
            ExpressionTree::compile("(1)(2)").unwrap_err(),
            ParseError::DanglingOperands { count: 2 }
        );
    }

    #[test]
    fn test_from_str() {
        let tree: ExpressionTree = "2*(3+4)".parse().unwrap();
        assert_eq!(tree.evaluate(), 14.0);
    }
}
