use std::fmt;

use serde::{Deserialize, Serialize};

/// Which frontend stage rejected a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// The line is not of the form `name(args)`.
    Syntax,
    /// The head identifier is not in the catalog.
    UnknownOperation,
}

/// A per-line frontend problem. The line is skipped; the script continues.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// 1-based line number.
    pub line: u32,
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    pub fn syntax(line: u32, raw: &str) -> Self {
        Diagnostic {
            line,
            kind: DiagnosticKind::Syntax,
            message: format!("cannot parse line: \"{}\"", raw.trim()),
        }
    }

    pub fn unknown_operation(line: u32, name: &str) -> Self {
        Diagnostic {
            line,
            kind: DiagnosticKind::UnknownOperation,
            message: format!(
                "unknown operation \"{}\"; run `codescape ops` to list available operations",
                name
            ),
        }
    }

    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "kind":    self.kind,
            "line":    self.line,
            "message": self.message,
        })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}
