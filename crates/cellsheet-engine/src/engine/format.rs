/// Format an evaluation result for display as a cell value.
///
/// Finite values use the shortest representation that parses back to the same
/// number. Every output of this function is accepted by [`parse_number`].
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n.is_sign_positive() { "Infinity" } else { "-Infinity" }.to_string()
    } else {
        n.to_string()
    }
}

/// Numeric view of a cell value: empty or non-numeric text reads as zero.
pub fn parse_number(value: &str) -> f64 {
    if value.is_empty() {
        return 0.0;
    }
    value.trim().parse::<f64>().unwrap_or(0.0)
}
