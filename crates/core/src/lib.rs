//! codescape-core: the CodeScape script frontend.
//!
//! Turns line-oriented call scripts (`build_house(5, 5, name="Home")`)
//! into normalized operation calls plus per-line diagnostics. Nothing in
//! this crate executes a call; see `codescape-eval` for that.
//!
//! # Public API
//!
//! - [`transpile()`] -- run every stage over a script
//! - [`Catalog`] / [`OperationSignature`] -- the operations a script may call
//! - [`NormalizedCall`] -- a resolved call, ready for execution
//! - [`Diagnostic`] -- a per-line syntax or unknown-operation report
//! - [`Value`] -- a primitive script value
//!
//! The individual stages ([`lexer`], [`value::parse_value`],
//! [`resolve`]) are public for selective use.

pub mod error;
pub mod lexer;
pub mod resolve;
pub mod signature;
pub mod transpile;
pub mod value;

// ── Convenience re-exports: key types ────────────────────────────────

pub use error::{Diagnostic, DiagnosticKind};
pub use lexer::RawCall;
pub use resolve::ParsedArgs;
pub use signature::{Catalog, OperationSignature};
pub use transpile::{NormalizedCall, Transpiled};
pub use value::Value;

// ── Convenience re-exports: pipeline entry points ────────────────────

pub use lexer::{split_args, split_call, strip_comment};
pub use resolve::{parse_args, resolve_args};
pub use transpile::transpile;
pub use value::parse_value;
