//! Binary operator registry.
//!
//! The four arithmetic operators live in a fixed table. Ranks use an inverted
//! scale: a lower rank binds tighter, so `*` and `/` (rank 3) are applied
//! before `+` and `-` (rank 4).

use super::tree::Node;

/// How operators of equal rank group.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
}

/// A binary arithmetic operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

/// Every operator the parser recognizes.
pub const OPERATORS: [Operator; 4] = [
    Operator::Multiply,
    Operator::Divide,
    Operator::Add,
    Operator::Subtract,
];

impl Operator {
    pub fn from_symbol(symbol: char) -> Option<Operator> {
        OPERATORS.into_iter().find(|op| op.symbol() == symbol)
    }

    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
        }
    }

    pub fn rank(self) -> u8 {
        match self {
            Operator::Multiply | Operator::Divide => 3,
            Operator::Add | Operator::Subtract => 4,
        }
    }

    pub fn associativity(self) -> Associativity {
        Associativity::Left
    }

    /// Apply the operator with IEEE-754 semantics (`x / 0.0` is infinite or NaN).
    pub fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            Operator::Add => left + right,
            Operator::Subtract => left - right,
            Operator::Multiply => left * right,
            Operator::Divide => left / right,
        }
    }
}

pub fn is_operator(symbol: char) -> bool {
    Operator::from_symbol(symbol).is_some()
}

pub fn rank(symbol: char) -> Option<u8> {
    Operator::from_symbol(symbol).map(Operator::rank)
}

pub fn associativity(symbol: char) -> Option<Associativity> {
    Operator::from_symbol(symbol).map(Operator::associativity)
}

/// Build the binary node for `symbol` over the given children.
pub fn construct(symbol: char, left: Node, right: Node) -> Option<Node> {
    Operator::from_symbol(symbol).map(|op| Node::binary(op, left, right))
}
