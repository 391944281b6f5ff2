// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Error types for the transcoding core
//!
//! Every failure is local and synchronous and goes straight to the caller.

use thiserror::Error;

/// Errors raised while preparing model inputs or decoding model outputs
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TranscodeError {
    /// Zero-size or otherwise unusable source image
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    /// Tensor shape does not match what the model contract requires
    #[error("Shape mismatch: expected {expected}, got {actual:?}")]
    ShapeMismatch {
        expected: String,
        actual: Vec<usize>,
    },

    /// Reduction requested over an empty sequence
    #[error("Empty input: {0}")]
    EmptyInput(&'static str),

    /// Decoded answer span is reversed or falls outside the token sequence
    #[error("Invalid answer span: start={start}, end={end}, sequence length={len}")]
    InvalidSpan { start: usize, end: usize, len: usize },

    /// Framed token sequence does not fit the model's fixed input length
    #[error("Token sequence too long: {len} tokens (max: {max})")]
    SequenceTooLong { len: usize, max: usize },

    /// NaN or infinite value where a score was expected
    #[error("Non-finite value at index {index}")]
    NonFiniteValue { index: usize },

    /// Token not present in the vocabulary
    #[error("Unknown token: {0}")]
    UnknownToken(String),
}

impl TranscodeError {
    /// Build a shape mismatch error from an expected-shape description
    pub fn shape_mismatch(expected: impl Into<String>, actual: &[usize]) -> Self {
        Self::ShapeMismatch {
            expected: expected.into(),
            actual: actual.to_vec(),
        }
    }
}

/// Result alias used across the transcoding core
pub type Result<T> = std::result::Result<T, TranscodeError>;
