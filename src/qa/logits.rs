// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Logit tensor helpers: axis split, softmax and argmax

use ndarray::{Array2, ArrayView2, ArrayViewD, Axis, Ix3};

use crate::error::{Result, TranscodeError};

/// Size of the trailing (start, end) axis of a QA model output
pub const LOGIT_PAIR: usize = 2;

/// Split a `[batch, seq_len, 2]` output into start and end logits
///
/// Index 0 of the trailing axis holds start logits and index 1 end logits.
/// Both results drop the trailing axis: `[batch, seq_len]`.
///
/// # Errors
/// `ShapeMismatch` unless the output is rank 3 with a trailing dimension of 2.
pub fn split_logits(output: ArrayViewD<'_, f32>) -> Result<(Array2<f32>, Array2<f32>)> {
    let shape = output.shape().to_vec();
    if shape.len() != 3 || shape[2] != LOGIT_PAIR {
        return Err(TranscodeError::shape_mismatch("[batch, seq_len, 2]", &shape));
    }

    let output = output
        .into_dimensionality::<Ix3>()
        .map_err(|_| TranscodeError::shape_mismatch("[batch, seq_len, 2]", &shape))?;

    let start = output.index_axis(Axis(2), 0).to_owned();
    let end = output.index_axis(Axis(2), 1).to_owned();
    Ok((start, end))
}

/// Numerically stable softmax over a slice
///
/// The maximum is subtracted before exponentiating so large logits do not
/// overflow. An empty slice yields an empty vector.
pub fn softmax_slice(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|&x| (x - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

/// Softmax along the sequence axis of a `[batch, seq_len]` tensor
pub fn softmax(logits: ArrayView2<'_, f32>) -> Array2<f32> {
    let mut probs = Array2::<f32>::zeros(logits.raw_dim());
    for (src, mut dst) in logits.rows().into_iter().zip(probs.rows_mut()) {
        let row: Vec<f32> = src.iter().copied().collect();
        for (d, p) in dst.iter_mut().zip(softmax_slice(&row)) {
            *d = p;
        }
    }
    probs
}

/// Index of the first maximum value
///
/// Ties resolve to the smallest index.
///
/// # Errors
/// - `EmptyInput` on an empty slice
/// - `NonFiniteValue` if any value is NaN
pub fn argmax(values: &[f32]) -> Result<usize> {
    if values.is_empty() {
        return Err(TranscodeError::EmptyInput("argmax over an empty sequence"));
    }
    if let Some(index) = values.iter().position(|v| v.is_nan()) {
        return Err(TranscodeError::NonFiniteValue { index });
    }

    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > values[best] {
            best = i;
        }
    }
    Ok(best)
}
