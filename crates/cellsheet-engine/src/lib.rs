//! cellsheet_engine - Formula parsing, evaluation, and dependency tracking.

pub mod engine;
pub mod error;

pub use error::{ParseError, Result};

#[cfg(test)]
mod tests {
    use crate::engine::*;
    use proptest::prelude::*;

    fn eval(expression: &str) -> f64 {
        ExpressionTree::compile(expression).unwrap().evaluate()
    }

    #[test]
    fn test_basic_arithmetic() {
        assert_eq!(eval("3+3"), 6.0);
        assert_eq!(eval("3-3"), 0.0);
        assert_eq!(eval("3*3"), 9.0);
        assert_eq!(eval("3/3"), 1.0);
        assert_eq!(eval("3+4+5+6"), 18.0);
        assert_eq!(eval("3*3*2*1*6"), 108.0);
        assert_eq!(eval("120/10/2/6"), 1.0);
    }

    #[test]
    fn test_zero_operands() {
        assert_eq!(eval("0/5"), 0.0);
        assert_eq!(eval("0*5"), 0.0);
    }

    #[test]
    fn test_divide_by_zero_is_infinite() {
        assert_eq!(eval("5/0"), f64::INFINITY);
    }

    #[test]
    fn test_unbound_identifier_defaults_to_zero() {
        assert_eq!(eval("string"), 0.0);
        assert_eq!(eval("(string)"), 0.0);

        let mut tree = ExpressionTree::compile("(string)+1").unwrap();
        tree.set_variable("string", 1.0);
        assert_eq!(tree.evaluate(), 2.0);
    }

    #[test]
    fn test_precedence() {
        assert_eq!(eval("3+3/3"), 4.0);
        assert_eq!(eval("3-3*2+3"), 0.0);
        assert_eq!(eval("3+3*3"), 12.0);
        assert_eq!(eval("3*2+3"), 9.0);
    }

    #[test]
    fn test_parentheses() {
        assert_eq!(eval("(3+3)+3"), 9.0);
        assert_eq!(eval("(3-3)+(2+3)"), 5.0);
        assert_eq!(eval("(3+3)*3"), 18.0);
        assert_eq!(eval("(3-3)*(2+3)"), 0.0);
        assert_eq!(eval("((3-3)*(2+3))"), 0.0);
        assert_eq!(eval("(3-3)/(2+3)"), 0.0);

        let mut tree = ExpressionTree::compile("(rabbit*(2+3))").unwrap();
        tree.set_variable("rabbit", 2.0);
        assert_eq!(tree.evaluate(), 10.0);
    }

    #[test]
    fn test_spaced_numbers_are_constants() {
        let tree = ExpressionTree::compile("3 + 3").unwrap();
        assert!(tree.variable_names().is_empty());
        assert_eq!(tree.evaluate(), 6.0);
    }

    #[test]
    fn test_spaced_variable_keeps_its_spaces() {
        let mut tree = ExpressionTree::compile("a + 1").unwrap();
        assert_eq!(tree.variable_names(), vec!["a "]);
        tree.set_variable("a ", 2.0);
        assert_eq!(tree.evaluate(), 3.0);
    }

    proptest! {
        #[test]
        fn prop_evaluate_is_idempotent(a in -1000i32..1000, b in -1000i32..1000, c in 1i32..1000) {
            let mut tree = ExpressionTree::compile("x*y+z/x-y").unwrap();
            tree.set_variable("x", a as f64);
            tree.set_variable("y", b as f64);
            tree.set_variable("z", c as f64);
            let first = tree.evaluate();
            let second = tree.evaluate();
            prop_assert!(first == second || (first.is_nan() && second.is_nan()));
        }

        #[test]
        fn prop_subtraction_chains_group_left(a in 0u16..500, b in 0u16..500, c in 0u16..500) {
            let expression = format!("{a}-{b}-{c}");
            let expected = (a as f64 - b as f64) - c as f64;
            prop_assert_eq!(eval(&expression), expected);
        }

        #[test]
        fn prop_multiplication_binds_tighter(a in 0u16..500, b in 0u16..500, c in 0u16..500) {
            let expression = format!("{a}+{b}*{c}");
            prop_assert_eq!(eval(&expression), a as f64 + b as f64 * c as f64);
        }
    }
}
