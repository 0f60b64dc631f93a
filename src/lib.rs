#![warn(
    unused,
    future_incompatible,
    nonstandard_style,
    rust_2018_idioms,
    rust_2021_compatibility
)]
#![deny(unsafe_code)]

//! Linear-time encodable codes over prime fields.
//!
//! A [`LinearCode`] is built recursively: each level shrinks the message with a sparse
//! "precode", encodes the shrunk message recursively, then expands that inner codeword with a
//! sparse "postcode". Small messages bottom out in a Reed-Solomon style encoding.
//! [`LinearCode::reverse_encode`] applies the transpose of the whole (never materialized)
//! generator matrix with the same recursive structure.
//!
//! # References
//! - Brakedown: https://eprint.iacr.org/2021/1043

use thiserror::Error;

pub mod code;
pub mod encode;
pub mod field;
pub mod params;
pub mod sparse;
#[cfg(test)]
pub mod test_utils;

pub use code::LinearCode;
pub use params::{CodeSpec, LevelParams, Ratio};
pub use sparse::SparseMatrix;

/// Custom error type for code construction and encoding
#[derive(Debug, Error)]
pub enum CodeError {
    #[error("Index ({row}, {col}) out of range for {rows}x{cols} matrix")]
    IndexOutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    #[error("Vector length mismatch: expected {expected}, found {found}")]
    LengthMismatch { expected: usize, found: usize },
    #[error("Dimension mismatch at level {level}: expected {expected}, found {found}")]
    DimensionMismatch {
        level: usize,
        expected: usize,
        found: usize,
    },
    #[error("Inverse of zero")]
    DivisionByZero,
    #[error("Field too small for {len} distinct evaluation points")]
    FieldTooSmall { len: usize },
    #[error("Invalid parameter: {0}")]
    InvalidParam(String),
    #[error("Uncategorized: {0}")]
    Anyhow(#[from] anyhow::Error),
}
