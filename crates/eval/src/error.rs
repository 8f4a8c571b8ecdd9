//! Error types for placement handlers and mask loading.

/// Failures raised by placement handlers.
///
/// The `Display` text is what ends up in a failed execution result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    /// The ring search found no free land within the search radius.
    #[error("no free tile for {kind} within {radius} tiles of ({row}, {col})")]
    NoFreeCell {
        kind: String,
        row: i64,
        col: i64,
        radius: u32,
    },

    /// An exact placement targeted a cell that is water, out of bounds or taken.
    #[error("tile ({row}, {col}) is not free land")]
    CellUnavailable { row: i64, col: i64 },

    /// An argument has the wrong type for its parameter.
    #[error("invalid argument '{param}': expected {expected}, got {got}")]
    InvalidArgument {
        param: String,
        expected: String,
        got: String,
    },

    /// A parameter that has no usable default was left as None.
    #[error("missing argument '{param}'")]
    MissingArgument { param: String },

    /// A numeric argument does not fit the parameter's range.
    #[error("argument '{param}' out of range: {value}")]
    OutOfRange { param: String, value: String },
}

/// Failures building a validity mask.
#[derive(Debug, thiserror::Error)]
pub enum MaskError {
    #[error("mask is empty")]
    Empty,

    #[error("mask row {row} has {len} cells, expected {expected}")]
    Ragged {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("mask must be square: {rows} rows of {cols} cells")]
    NotSquare { rows: usize, cols: usize },

    #[error("unknown mask glyph '{glyph}' at row {row}, column {col}")]
    UnknownGlyph { glyph: char, row: usize, col: usize },

    #[error("invalid mask JSON: {0}")]
    Json(#[from] serde_json::Error),
}
