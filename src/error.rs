use std::io;

use thiserror::Error;

/// Errors raised by the structural operations of the crate.
///
/// Numeric anomalies (dividing by zero, normalizing a zero vector) are not
/// errors; they surface as IEEE infinities or NaN in the returned values.
#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot multiply a {left_rows}x{left_columns} matrix by a {right_rows}x{right_columns} matrix")]
    DimensionMismatch {
        left_rows: usize,
        left_columns: usize,
        right_rows: usize,
        right_columns: usize,
    },

    #[error("cannot multiply a matrix with {columns} columns by a tuple of length {len}")]
    TupleLengthMismatch { columns: usize, len: usize },

    #[error("matrix row {row} has {found} elements, expected {expected}")]
    JaggedRows { row: usize, expected: usize, found: usize },

    #[error("index ({row}, {col}) is outside a {rows}x{columns} matrix")]
    ElementOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        columns: usize,
    },

    #[error("pixel ({x}, {y}) is outside a {width}x{height} canvas")]
    PixelOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("a {width}x{height} canvas has more pixels than can be addressed")]
    CanvasTooLarge { width: usize, height: usize },

    #[error("a {rows}x{columns} matrix has more elements than can be addressed")]
    MatrixTooLarge { rows: usize, columns: usize },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
