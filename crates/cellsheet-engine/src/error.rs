//! Error types for the formula engine.

use thiserror::Error;

/// Errors raised while turning an expression string into a tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unmatched ')' at offset {position}")]
    UnmatchedRightParen { position: usize },

    #[error("unmatched '('")]
    UnmatchedLeftParen,

    #[error("operator '{operator}' is missing an operand")]
    StackUnderflow { operator: char },

    #[error("no operator is registered for '{symbol}'")]
    UnknownOperator { symbol: char },

    #[error("expression is empty")]
    Empty,

    #[error("expression leaves {count} operands without an operator")]
    DanglingOperands { count: usize },
}

pub type Result<T> = std::result::Result<T, ParseError>;
