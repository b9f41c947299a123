use crate::errors::{Error, Result};

/// Return a 'minimal' representation of the given number
///
/// Up to six fractional digits are kept; `-0` and non-finite values are
/// written as `0` so the output is always valid path data.
pub fn fstr(x: f64) -> String {
    if !x.is_finite() {
        return "0".to_string();
    }
    let x = if x.abs() < 1e9 {
        (x * 1e6).round() / 1e6
    } else {
        x
    };
    if x == 0. {
        return "0".to_string();
    }
    if x == x.trunc() && x.abs() < 1e15 {
        return format!("{x:.0}");
    }
    let result = format!("{x:.6}");
    if result.contains('.') {
        result.trim_end_matches('0').trim_end_matches('.').into()
    } else {
        result
    }
}

/// Parse a string to an f64
pub fn strp(s: &str) -> Result<f64> {
    let s = s.trim();
    s.parse()
        .map_err(|_| Error::InvalidValue("number".to_string(), s.to_string()))
}

/// Returns iterator over whitespace-or-comma separated values
pub fn attr_split(input: &str) -> impl Iterator<Item = String> + '_ {
    input
        .split_whitespace()
        .flat_map(|v| v.split(','))
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
}
