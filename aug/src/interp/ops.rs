//! Operator and string primitive semantics, independent of evaluation

use super::error::{InterpResult, RuntimeError};
use crate::ast::{BinOp, CmpOp};

/// Integer arithmetic with two's-complement wrapping.
/// Division and remainder truncate toward zero.
pub fn arith(op: BinOp, a: i64, b: i64) -> InterpResult<i64> {
    match op {
        BinOp::Add => Ok(a.wrapping_add(b)),
        BinOp::Sub => Ok(a.wrapping_sub(b)),
        BinOp::Mul => Ok(a.wrapping_mul(b)),
        BinOp::Div | BinOp::Mod if b == 0 => Err(RuntimeError::division_by_zero()),
        BinOp::Div => Ok(a.wrapping_div(b)),
        BinOp::Mod => Ok(a.wrapping_rem(b)),
    }
}

/// Integer comparison for `= <> < > <= >=`.
/// Returns `None` for the string operators.
pub fn compare_ints(op: CmpOp, a: i64, b: i64) -> Option<bool> {
    match op {
        CmpOp::Eq => Some(a == b),
        CmpOp::NotEq => Some(a != b),
        CmpOp::Lt => Some(a < b),
        CmpOp::Gt => Some(a > b),
        CmpOp::LtEq => Some(a <= b),
        CmpOp::GtEq => Some(a >= b),
        CmpOp::StrEq | CmpOp::StrNotEq => None,
    }
}

/// String comparison for `==` and `!=`.
/// Returns `None` for the integer operators.
pub fn compare_strs(op: CmpOp, a: &str, b: &str) -> Option<bool> {
    match op {
        CmpOp::StrEq => Some(a == b),
        CmpOp::StrNotEq => Some(a != b),
        _ => None,
    }
}

/// `length(s)`: number of characters
pub fn length(s: &str) -> i64 {
    s.chars().count() as i64
}

/// `position(s, sub)`: 1-based character index of the first match, 0 if absent
pub fn position(s: &str, sub: &str) -> i64 {
    match s.find(sub) {
        Some(byte_idx) => s[..byte_idx].chars().count() as i64 + 1,
        None => 0,
    }
}

/// `substring(s, start, len)`: 1-based inclusive start.
///
/// Empty when `start` is outside `1..=length(s)` or `len <= 0`; a range that
/// runs past the end is clamped to it.
pub fn substring(s: &str, start: i64, len: i64) -> String {
    let total = length(s);
    if start < 1 || start > total || len <= 0 {
        return String::new();
    }
    let end = start.saturating_add(len - 1).min(total);
    s.chars()
        .skip((start - 1) as usize)
        .take((end - start + 1) as usize)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncating_division() {
        assert_eq!(arith(BinOp::Div, 7, 2).unwrap(), 3);
        assert_eq!(arith(BinOp::Mod, 7, 2).unwrap(), 1);
        assert_eq!(arith(BinOp::Div, -7, 2).unwrap(), -3);
        assert_eq!(arith(BinOp::Mod, -7, 2).unwrap(), -1);
        assert_eq!(arith(BinOp::Div, 7, -2).unwrap(), -3);
        assert_eq!(arith(BinOp::Mod, 7, -2).unwrap(), 1);
    }

    #[test]
    fn test_division_and_modulo_by_zero() {
        assert!(arith(BinOp::Div, 1, 0).is_err());
        assert!(arith(BinOp::Mod, 1, 0).is_err());
    }

    #[test]
    fn test_wrapping_arithmetic() {
        assert_eq!(arith(BinOp::Add, i64::MAX, 1).unwrap(), i64::MIN);
        assert_eq!(arith(BinOp::Sub, i64::MIN, 1).unwrap(), i64::MAX);
        assert_eq!(arith(BinOp::Div, i64::MIN, -1).unwrap(), i64::MIN);
        assert_eq!(arith(BinOp::Mod, i64::MIN, -1).unwrap(), 0);
    }

    #[test]
    fn test_compare_ints() {
        assert_eq!(compare_ints(CmpOp::Eq, 3, 3), Some(true));
        assert_eq!(compare_ints(CmpOp::NotEq, 3, 3), Some(false));
        assert_eq!(compare_ints(CmpOp::Lt, 2, 3), Some(true));
        assert_eq!(compare_ints(CmpOp::Gt, 2, 3), Some(false));
        assert_eq!(compare_ints(CmpOp::LtEq, 3, 3), Some(true));
        assert_eq!(compare_ints(CmpOp::GtEq, 2, 3), Some(false));
        assert_eq!(compare_ints(CmpOp::StrEq, 1, 1), None);
    }

    #[test]
    fn test_compare_strs() {
        assert_eq!(compare_strs(CmpOp::StrEq, "a", "a"), Some(true));
        assert_eq!(compare_strs(CmpOp::StrNotEq, "a", "a"), Some(false));
        assert_eq!(compare_strs(CmpOp::Gt, "b", "a"), None);
    }

    #[test]
    fn test_length() {
        assert_eq!(length(""), 0);
        assert_eq!(length("hello"), 5);
        assert_eq!(length("héllo"), 5);
    }

    #[test]
    fn test_position() {
        assert_eq!(position("hello", "ll"), 3);
        assert_eq!(position("hello", "z"), 0);
        assert_eq!(position("hello", "h"), 1);
        assert_eq!(position("hello", ""), 1);
        assert_eq!(position("héllo", "l"), 3);
    }

    #[test]
    fn test_substring() {
        assert_eq!(substring("hello", 2, 3), "ell");
        assert_eq!(substring("hello", 4, 10), "lo");
        assert_eq!(substring("hello", 0, 2), "");
        assert_eq!(substring("hello", 1, 0), "");
        assert_eq!(substring("hello", 6, 1), "");
        assert_eq!(substring("hello", 5, 1), "o");
        assert_eq!(substring("hello", 1, -3), "");
        assert_eq!(substring("hello", 2, i64::MAX), "ello");
        assert_eq!(substring("", 1, 1), "");
    }
}
