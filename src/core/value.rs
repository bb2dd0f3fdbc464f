//! Value module for novadb
//!
//! Values are plain `serde_json` values; a document is the top-level
//! object that one store persists as one file.

use std::fmt;
use std::str::FromStr;

use serde_json::Number;

use crate::core::errors::{Result, StoreError};

pub use serde_json::Value;

/// The whole persisted structure: an insertion-ordered map of top-level keys
pub type Document = serde_json::Map<String, Value>;

/// Get a string representation of the value's type
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Convert an arithmetic result back into a JSON number.
///
/// Integral results that fit an `i64` are stored as integers so that
/// `5 + 3` persists as `8` rather than `8.0`.
pub fn number_from_f64(n: f64) -> Option<Value> {
    if !n.is_finite() {
        return None;
    }
    if n.fract() == 0.0 && n >= i64::MIN as f64 && n <= i64::MAX as f64 {
        return Some(Value::Number(Number::from(n as i64)));
    }
    Number::from_f64(n).map(Value::Number)
}

/// Arithmetic operators accepted by `Database::math`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathOperator {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
}

impl MathOperator {
    /// Apply the operator to two operands
    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            MathOperator::Add => lhs + rhs,
            MathOperator::Sub => lhs - rhs,
            MathOperator::Mul => lhs * rhs,
            MathOperator::Div => lhs / rhs,
            MathOperator::Rem => lhs % rhs,
            MathOperator::Pow => lhs.powf(rhs),
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            MathOperator::Add => "+",
            MathOperator::Sub => "-",
            MathOperator::Mul => "*",
            MathOperator::Div => "/",
            MathOperator::Rem => "%",
            MathOperator::Pow => "**",
        }
    }
}

impl FromStr for MathOperator {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "+" => Ok(MathOperator::Add),
            "-" => Ok(MathOperator::Sub),
            "*" => Ok(MathOperator::Mul),
            "/" => Ok(MathOperator::Div),
            "%" => Ok(MathOperator::Rem),
            "**" => Ok(MathOperator::Pow),
            other => Err(StoreError::InvalidArgument(format!(
                "'{}' is not a math operator (expected one of + - * / % **)",
                other
            ))),
        }
    }
}

impl fmt::Display for MathOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_type_names() {
        assert_eq!(type_name(&json!(null)), "null");
        assert_eq!(type_name(&json!(true)), "boolean");
        assert_eq!(type_name(&json!(1.5)), "number");
        assert_eq!(type_name(&json!("x")), "string");
        assert_eq!(type_name(&json!([1])), "array");
        assert_eq!(type_name(&json!({"a": 1})), "object");
    }

    #[test]
    fn test_number_from_f64() {
        assert_eq!(number_from_f64(8.0), Some(json!(8)));
        assert_eq!(number_from_f64(-100.0), Some(json!(-100)));
        assert_eq!(number_from_f64(2.5), Some(json!(2.5)));
        assert_eq!(number_from_f64(f64::INFINITY), None);
        assert_eq!(number_from_f64(f64::NAN), None);
    }

    #[test]
    fn test_operators() {
        assert_eq!("**".parse::<MathOperator>().unwrap(), MathOperator::Pow);
        assert_eq!(MathOperator::Pow.apply(2.0, 10.0), 1024.0);
        assert_eq!(MathOperator::Rem.apply(7.0, 3.0), 1.0);
        assert_eq!(MathOperator::Div.to_string(), "/");
        assert!(matches!("^".parse::<MathOperator>(), Err(StoreError::InvalidArgument(_))));
    }
}
