//! Error types shared by every part of the crate.

use std::io;

use thiserror::Error;

/// Everything that can go wrong while building, feeding or training a
/// network.
#[derive(Debug, Error)]
pub enum Error {
    /// A network or layer was described with unusable hyperparameters, e.g.
    /// fewer than two layer sizes, an empty layer, or a learn rate outside of
    /// `(0, 1]`.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A vector handed to a layer does not have the length the layer was
    /// built for.
    #[error("shape mismatch: expected {expected} values, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// A training batch is empty, malformed, or its records disagree on
    /// their input/output lengths.
    #[error("invalid training data: {0}")]
    InvalidTrainingData(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Returns `ShapeMismatch` unless `actual == expected`.
pub(crate) fn check_len(expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(Error::ShapeMismatch { expected, actual })
    }
}
