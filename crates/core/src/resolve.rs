//! Argument parsing and resolution against an operation signature.
//!
//! Resolution only fixes the *shape* of the argument vector. Whether a
//! value makes sense for its parameter is decided by the handler at
//! execution time.

use std::collections::BTreeMap;

use crate::lexer::split_args;
use crate::signature::OperationSignature;
use crate::value::{parse_value, Value};

/// Positional and keyword arguments of one call, in source form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedArgs {
    pub positional: Vec<Value>,
    /// Later duplicates overwrite earlier ones.
    pub keyword: BTreeMap<String, Value>,
}

/// Tokenize raw argument text and classify each token.
///
/// A token is a keyword argument when it has an `=` past its first
/// character and the text before that `=` holds no quote character.
pub fn parse_args(args_text: &str) -> ParsedArgs {
    let mut parsed = ParsedArgs::default();
    for token in split_args(args_text) {
        match keyword_split(&token) {
            Some((key, raw)) => {
                parsed.keyword.insert(key.to_string(), parse_value(raw));
            }
            None => parsed.positional.push(parse_value(&token)),
        }
    }
    parsed
}

fn keyword_split(token: &str) -> Option<(&str, &str)> {
    let eq = token.find('=')?;
    if eq == 0 {
        return None;
    }
    let key = &token[..eq];
    if key.contains(['\'', '"']) {
        return None;
    }
    Some((key.trim(), &token[eq + 1..]))
}

/// Merge parsed arguments into a vector aligned with `signature.parameters`.
///
/// Starts from the defaults, overwrites by position, then by name.
/// Extra positionals and unknown keywords are dropped silently.
pub fn resolve_args(parsed: &ParsedArgs, signature: &OperationSignature) -> Vec<Value> {
    let mut args = signature.defaults.clone();
    for (slot, value) in args.iter_mut().zip(&parsed.positional) {
        *slot = value.clone();
    }
    for (key, value) in &parsed.keyword {
        if let Some(idx) = signature.param_index(key) {
            args[idx] = value.clone();
        }
    }
    args
}
