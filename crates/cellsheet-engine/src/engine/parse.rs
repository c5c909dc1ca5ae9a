//! Shunting-yard conversion from infix to postfix.
//!
//! Tokens are split only at operator characters and parentheses. Everything
//! between two boundaries is one operand, whitespace included, so `"A1 + 2"`
//! yields the operands `"A1 "` and `" 2"`.

use std::fmt;

use tracing::trace;

use super::operator::{Associativity, Operator};
use crate::error::{ParseError, Result};

/// One postfix token.
#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    /// Literal operand text, later read as a number or a variable name.
    Operand(String),
    Operator(Operator),
    /// A `(` that was never closed; the compiler rejects it.
    LeftParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Operand(text) => f.write_str(text),
            Token::Operator(op) => write!(f, "{}", op.symbol()),
            Token::LeftParen => f.write_str("("),
        }
    }
}

/// Render a token sequence separated by single spaces.
pub fn postfix_string(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Clone, Copy)]
enum Pending {
    Op(Operator),
    LeftParen,
}

/// Convert an infix expression into postfix tokens.
///
/// Only a `)` with no matching `(` fails here. Other malformed input (missing
/// operands, an unclosed `(`) passes through and is rejected when compiling.
pub fn parse(expression: &str) -> Result<Vec<Token>> {
    let mut output = Vec::new();
    let mut stack: Vec<Pending> = Vec::new();
    let mut operand_start: Option<usize> = None;

    for (i, c) in expression.char_indices() {
        let op = Operator::from_symbol(c);
        if op.is_none() && c != '(' && c != ')' {
            operand_start.get_or_insert(i);
            continue;
        }

        if let Some(start) = operand_start.take() {
            output.push(Token::Operand(expression[start..i].to_string()));
        }

        match (c, op) {
            ('(', _) => stack.push(Pending::LeftParen),
            (')', _) => loop {
                match stack.pop() {
                    Some(Pending::LeftParen) => break,
                    Some(Pending::Op(popped)) => output.push(Token::Operator(popped)),
                    None => return Err(ParseError::UnmatchedRightParen { position: i }),
                }
            },
            (_, Some(op)) => push_operator(op, &mut stack, &mut output),
            _ => unreachable!("boundary characters are operators or parentheses"),
        }
    }

    if let Some(start) = operand_start {
        output.push(Token::Operand(expression[start..].to_string()));
    }

    while let Some(pending) = stack.pop() {
        output.push(match pending {
            Pending::Op(op) => Token::Operator(op),
            Pending::LeftParen => Token::LeftParen,
        });
    }

    trace!(expression, postfix = %postfix_string(&output), "parsed expression");
    Ok(output)
}

fn push_operator(op: Operator, stack: &mut Vec<Pending>, output: &mut Vec<Token>) {
    // Pop while the stacked operator must be applied before `op`.
    while let Some(&Pending::Op(top)) = stack.last() {
        if !yields_to(op, top) {
            break;
        }
        stack.pop();
        output.push(Token::Operator(top));
    }
    stack.push(Pending::Op(op));
}

/// Whether `incoming` has to wait for `top`. Lower rank binds tighter.
fn yields_to(incoming: Operator, top: Operator) -> bool {
    incoming.rank() > top.rank()
        || (incoming.rank() == top.rank() && incoming.associativity() == Associativity::Left)
}
