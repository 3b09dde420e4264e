//! Evaluated values and their coercions.

use crate::error::RenderError;
use std::fmt;

/// Result of evaluating template text
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    /// Type text from an evaluator: booleans, integers, decimals, otherwise text.
    pub fn infer(text: &str) -> Value {
        let trimmed = text.trim();
        if trimmed.eq_ignore_ascii_case("true") {
            return Value::Bool(true);
        }
        if trimmed.eq_ignore_ascii_case("false") {
            return Value::Bool(false);
        }
        if let Ok(i) = trimmed.parse::<i64>() {
            return Value::Int(i);
        }
        if trimmed.contains('.') {
            if let Ok(f) = trimmed.parse::<f64>() {
                if f.is_finite() {
                    return Value::Float(f);
                }
            }
        }
        Value::Text(text.to_string())
    }

    /// Render as display text
    pub fn as_text(&self) -> String {
        self.to_string()
    }

    /// Integer coercion; fractional parts are truncated.
    pub fn to_int(&self) -> Result<i32, RenderError> {
        let wide = self.to_wide("int")?;
        i32::try_from(wide).map_err(|_| self.coercion("int"))
    }

    /// Short coercion for legacy durability.
    pub fn to_short(&self) -> Result<i16, RenderError> {
        let wide = self.to_wide("short")?;
        i16::try_from(wide).map_err(|_| self.coercion("short"))
    }

    /// Truthiness: `true`, `yes`, `on`, `1` and non-zero numbers.
    pub fn to_bool(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::Text(s) => matches!(
                s.trim().to_ascii_lowercase().as_str(),
                "true" | "yes" | "on" | "1"
            ),
        }
    }

    fn to_wide(&self, expected: &'static str) -> Result<i64, RenderError> {
        match self {
            Value::Int(i) => Ok(*i),
            Value::Float(f) if f.is_finite() => Ok(f.trunc() as i64),
            Value::Bool(b) => Ok(i64::from(*b)),
            Value::Text(s) => {
                let trimmed = s.trim();
                if let Ok(i) = trimmed.parse::<i64>() {
                    return Ok(i);
                }
                match trimmed.parse::<f64>() {
                    Ok(f) if f.is_finite() => Ok(f.trunc() as i64),
                    _ => Err(self.coercion(expected)),
                }
            }
            _ => Err(self.coercion(expected)),
        }
    }

    fn coercion(&self, expected: &'static str) -> RenderError {
        RenderError::Coercion {
            expected,
            found: self.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}
