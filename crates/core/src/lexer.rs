//! Line-level lexing: comment stripping, call-shape splitting and
//! top-level argument tokenization.
//!
//! This is a best-effort scanner, not a grammar. Unbalanced brackets and
//! unterminated quotes never fail; they only degrade token boundaries.

use std::sync::OnceLock;

use regex::Regex;

/// A call line split into its head identifier and raw argument text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCall {
    pub head: String,
    pub args_text: String,
    /// 1-based line number in the script.
    pub line: u32,
    /// The source line as written, trimmed.
    pub original: String,
}

/// Remove a trailing `#` comment. A `#` inside a quoted string is text.
pub fn strip_comment(line: &str) -> &str {
    match comment_start(line) {
        Some(idx) => &line[..idx],
        None => line,
    }
}

/// Byte offset of the first unquoted `#`, if any.
pub fn comment_start(line: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (idx, c) in line.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '\'' | '"' => quote = Some(c),
                '#' => return Some(idx),
                _ => {}
            },
        }
    }
    None
}

fn call_pattern() -> &'static Regex {
    static CALL: OnceLock<Regex> = OnceLock::new();
    CALL.get_or_init(|| {
        // optional `name =` prefix, head identifier, `(`, greedy body, `)`, trailing space
        Regex::new(r"^(?:[A-Za-z_]\w*\s*=\s*)?([A-Za-z_]\w*)\s*\((.*)\)\s*$")
            .expect("call-line pattern must compile")
    })
}

/// Split a comment-free, trimmed line into head and argument text.
///
/// Returns `None` when the line does not have the `head(args)` shape.
/// An assignment prefix (`x = op(...)`) is accepted and discarded.
pub fn split_call(line: &str, line_no: u32, original: &str) -> Option<RawCall> {
    let caps = call_pattern().captures(line)?;
    Some(RawCall {
        head: caps[1].to_string(),
        args_text: caps[2].to_string(),
        line: line_no,
        original: original.trim().to_string(),
    })
}

/// Split raw argument text on top-level commas.
///
/// A comma is top-level when the `(`/`[` nesting depth is zero and no
/// quoted string is open. Tokens are trimmed; empty input yields no tokens.
pub fn split_args(args_text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    if args_text.trim().is_empty() {
        return tokens;
    }

    let mut current = String::new();
    let mut depth: i32 = 0;
    let mut quote: Option<char> = None;

    for c in args_text.chars() {
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            current.push(c);
            continue;
        }
        match c {
            '\'' | '"' => {
                quote = Some(c);
                current.push(c);
            }
            '(' | '[' => {
                depth += 1;
                current.push(c);
            }
            ')' | ']' => {
                depth -= 1;
                current.push(c);
            }
            ',' if depth == 0 => {
                tokens.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    if !current.trim().is_empty() {
        tokens.push(current.trim().to_string());
    }
    tokens
}
