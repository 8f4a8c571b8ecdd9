//! Script transpiler: script text → normalized calls + diagnostics.
//!
//! Lines are processed independently. A line that fails to split or names
//! an unknown operation produces a diagnostic and is skipped; every other
//! line yields exactly one [`NormalizedCall`].

use serde::Serialize;

use crate::error::Diagnostic;
use crate::lexer::{comment_start, split_call, strip_comment, RawCall};
use crate::resolve::{parse_args, resolve_args};
use crate::signature::{Catalog, OperationSignature};
use crate::value::Value;

/// A fully resolved call, ready for execution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedCall {
    pub operation: String,
    /// Same length and order as the operation's parameters.
    pub args: Vec<Value>,
    pub original: String,
    pub line: u32,
}

/// Output of [`transpile`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Transpiled {
    pub calls: Vec<NormalizedCall>,
    /// One rendering per input line, annotations included.
    pub normalized_code: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

/// What became of a single script line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    Blank,
    Comment(String),
    Call(NormalizedCall),
    Malformed(Diagnostic),
    Unknown { head: String, diagnostic: Diagnostic },
}

/// Transpile one line. `line_no` is 1-based.
pub fn transpile_line(raw: &str, line_no: u32, catalog: &Catalog) -> LineOutcome {
    let code = strip_comment(raw).trim();
    if code.is_empty() {
        return match comment_start(raw) {
            Some(idx) => LineOutcome::Comment(raw[idx + 1..].trim().to_string()),
            None => LineOutcome::Blank,
        };
    }

    let RawCall {
        head,
        args_text,
        line,
        original,
    } = match split_call(code, line_no, raw) {
        Some(call) => call,
        None => return LineOutcome::Malformed(Diagnostic::syntax(line_no, raw)),
    };

    let Some(signature) = catalog.get(&head) else {
        let diagnostic = Diagnostic::unknown_operation(line_no, &head);
        return LineOutcome::Unknown { head, diagnostic };
    };

    let parsed = parse_args(&args_text);
    LineOutcome::Call(NormalizedCall {
        operation: head,
        args: resolve_args(&parsed, signature),
        original,
        line,
    })
}

/// Transpile a whole script against the given catalog.
pub fn transpile(source: &str, catalog: &Catalog) -> Transpiled {
    let mut out = Transpiled::default();

    for (idx, raw) in source.lines().enumerate() {
        let line_no = idx as u32 + 1;
        match transpile_line(raw, line_no, catalog) {
            LineOutcome::Blank => out.normalized_code.push("// (empty line)".to_string()),
            LineOutcome::Comment(text) => out.normalized_code.push(format!("// {}", text)),
            LineOutcome::Call(call) => {
                let rendered = match catalog.get(&call.operation) {
                    Some(sig) => render_call(&call, sig),
                    None => format!("{}(...)", call.operation),
                };
                out.normalized_code.push(rendered);
                out.calls.push(call);
            }
            LineOutcome::Malformed(diag) => {
                tracing::debug!(line = line_no, "line does not match call shape");
                out.normalized_code
                    .push(format!("// ⚠ cannot parse: {}", raw.trim()));
                out.diagnostics.push(diag);
            }
            LineOutcome::Unknown { head, diagnostic } => {
                tracing::debug!(line = line_no, operation = %head, "unknown operation");
                out.normalized_code
                    .push(format!("// ⚠ unknown operation: {}", head));
                out.diagnostics.push(diagnostic);
            }
        }
    }
    out
}

/// Render a call with every parameter spelled out by keyword.
pub fn render_call(call: &NormalizedCall, signature: &OperationSignature) -> String {
    let args: Vec<String> = signature
        .parameters
        .iter()
        .zip(&call.args)
        .map(|(p, v)| format!("{}={}", p, v))
        .collect();
    format!("{}({})", call.operation, args.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DiagnosticKind;

    #[test]
    fn transpiles_positional_call_with_defaults() {
        let out = transpile("build_house(5, 5)", &Catalog::builtin());
        assert!(out.diagnostics.is_empty());
        assert_eq!(out.calls.len(), 1);
        let call = &out.calls[0];
        assert_eq!(call.operation, "build_house");
        assert_eq!(
            call.args,
            vec![
                Value::Number(5.0),
                Value::Number(5.0),
                Value::Number(1.0),
                Value::Str(String::new()),
            ]
        );
        assert_eq!(
            out.normalized_code,
            vec!["build_house(row=5, col=5, floors=1, name=\"\")"]
        );
    }

    #[test]
    fn blank_and_comment_lines_are_no_ops() {
        let out = transpile("\n# plan the city\n   \nbuild_park()", &Catalog::builtin());
        assert!(out.diagnostics.is_empty());
        assert_eq!(out.calls.len(), 1);
        assert_eq!(out.calls[0].line, 4);
        assert_eq!(
            out.normalized_code[..3],
            [
                "// (empty line)".to_string(),
                "// plan the city".to_string(),
                "// (empty line)".to_string(),
            ]
        );
    }

    #[test]
    fn syntax_error_is_recorded_and_skipped() {
        let out = transpile("build_house 5 5\nbuild_pool()", &Catalog::builtin());
        assert_eq!(out.diagnostics.len(), 1);
        assert_eq!(out.diagnostics[0].line, 1);
        assert_eq!(out.diagnostics[0].kind, DiagnosticKind::Syntax);
        assert_eq!(out.normalized_code[0], "// ⚠ cannot parse: build_house 5 5");
        assert_eq!(out.calls.len(), 1);
        assert_eq!(out.calls[0].operation, "build_pool");
    }

    #[test]
    fn unknown_operation_is_recorded_and_skipped() {
        let out = transpile("clear_all()\nfoo(1,2)", &Catalog::builtin());
        assert_eq!(out.calls.len(), 1);
        assert_eq!(out.calls[0].operation, "clear_all");
        assert_eq!(out.diagnostics.len(), 1);
        assert_eq!(out.diagnostics[0].line, 2);
        assert_eq!(out.diagnostics[0].kind, DiagnosticKind::UnknownOperation);
        assert_eq!(out.normalized_code[1], "// ⚠ unknown operation: foo");
    }

    #[test]
    fn assignment_and_trailing_comment() {
        let out = transpile(
            "home = build_house(row=3, name='Villa #2')  # mine",
            &Catalog::builtin(),
        );
        let call = &out.calls[0];
        assert_eq!(call.args[0], Value::Number(3.0));
        assert_eq!(call.args[3], Value::Str("Villa #2".into()));
        assert_eq!(call.original, "home = build_house(row=3, name='Villa #2')  # mine");
    }

    #[test]
    fn one_rendering_per_input_line() {
        let src = "build_house()\n\nbad line\nnope()\n# c";
        let out = transpile(src, &Catalog::builtin());
        assert_eq!(out.normalized_code.len(), 5);
        assert_eq!(out.diagnostics.len(), 2);
    }
}
