//! Script values and the token-to-value parser.
//!
//! Script arguments are loosely typed: a token becomes null, a boolean,
//! a string or a number. Interpretation against parameter semantics is
//! left to the operation handlers.

use std::fmt;

use serde::{Serialize, Serializer};

// ──────────────────────────────────────────────
// Values
// ──────────────────────────────────────────────

/// A primitive script value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    Str(String),
}

impl Value {
    /// Returns a human-readable type name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "None",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::Str(_) => "str",
        }
    }

    /// The numeric payload, if this is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The numeric payload as an integer, if it is a number with no fractional part.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) if n.fract() == 0.0 && n.abs() < 9.0e15 => Some(*n as i64),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

/// Renders the value in script syntax: `None`, `True`, `5`, `5.5`, `"text"`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "None"),
            Value::Bool(true) => write!(f, "True"),
            Value::Bool(false) => write!(f, "False"),
            Value::Number(_) => match self.as_i64() {
                Some(i) => write!(f, "{}", i),
                None => write!(f, "{}", self.as_f64().unwrap_or_default()),
            },
            Value::Str(s) => {
                let quoted = serde_json::to_string(s).map_err(|_| fmt::Error)?;
                write!(f, "{}", quoted)
            }
        }
    }
}

/// Integral numbers serialize as JSON integers so reports read `5`, not `5.0`.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => match self.as_i64() {
                Some(i) => serializer.serialize_i64(i),
                None => serializer.serialize_f64(*n),
            },
            Value::Str(s) => serializer.serialize_str(s),
        }
    }
}

// ──────────────────────────────────────────────
// Token parsing
// ──────────────────────────────────────────────

/// Convert one argument token into a value. First match wins:
///
/// 1. `None` / `null` → null
/// 2. `True` / `False` → boolean
/// 3. matching outer quotes → string with the quotes stripped (no unescaping)
/// 4. a finite float in decimal or scientific notation → number
/// 5. anything else → the raw token as a string
pub fn parse_value(token: &str) -> Value {
    let s = token.trim();
    match s {
        "None" | "null" => return Value::Null,
        "True" => return Value::Bool(true),
        "False" => return Value::Bool(false),
        _ => {}
    }
    if is_quoted(s) {
        return Value::Str(s[1..s.len() - 1].to_string());
    }
    if let Some(n) = parse_number(s) {
        return Value::Number(n);
    }
    Value::Str(s.to_string())
}

fn is_quoted(s: &str) -> bool {
    s.len() >= 2
        && ((s.starts_with('"') && s.ends_with('"')) || (s.starts_with('\'') && s.ends_with('\'')))
}

fn parse_number(s: &str) -> Option<f64> {
    // f64::from_str also accepts "inf" and "NaN"; those stay strings.
    if !s.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    s.parse::<f64>().ok().filter(|n| n.is_finite())
}
