// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Answer span decoding for extractive question answering
//!
//! The QA model scores every token position twice: once as the answer start
//! and once as the answer end. The decoder turns both score streams into
//! probability distributions, picks the most likely start and end, and reads
//! the answer text back out of the token sequence.

use ndarray::{ArrayView2, ArrayViewD, Axis};
use tracing::debug;

use super::logits::{argmax, softmax, split_logits};
use super::sequence::TokenSequence;
use crate::error::{Result, TranscodeError};

/// Prefix marking a WordPiece continuation token
const CONTINUATION_PREFIX: &str = "##";

/// Inclusive `(start, end)` range of token positions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerSpan {
    start: usize,
    end: usize,
}

impl AnswerSpan {
    /// Build a span, checking `start <= end < len`
    pub fn new(start: usize, end: usize, len: usize) -> Result<Self> {
        if end < start || end >= len {
            return Err(TranscodeError::InvalidSpan { start, end, len });
        }
        Ok(Self { start, end })
    }

    /// First token position
    pub fn start(&self) -> usize {
        self.start
    }

    /// Last token position (inclusive)
    pub fn end(&self) -> usize {
        self.end
    }

    /// Number of tokens covered, at least 1
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }
}

/// Join tokens into answer text
///
/// Tokens are separated by single spaces; WordPiece continuations (`##ing`)
/// are glued onto the preceding token.
pub fn join_tokens<S: AsRef<str>>(tokens: &[S]) -> String {
    let mut text = String::new();
    for token in tokens {
        let token = token.as_ref();
        match token.strip_prefix(CONTINUATION_PREFIX) {
            Some(piece) if !text.is_empty() => text.push_str(piece),
            _ => {
                if !text.is_empty() {
                    text.push(' ');
                }
                text.push_str(token);
            }
        }
    }
    text
}

/// Decode the answer span from start/end logits of shape `[1, seq_len]`
///
/// # Errors
/// - `ShapeMismatch` if either logits tensor does not have a batch of 1
/// - `EmptyInput` if the logits are empty
/// - `NonFiniteValue` if a logit is NaN or infinite
/// - `InvalidSpan` if the end precedes the start or either index falls
///   outside `tokens`
pub fn decode_answer(
    tokens: &TokenSequence,
    start_logits: ArrayView2<'_, f32>,
    end_logits: ArrayView2<'_, f32>,
) -> Result<(AnswerSpan, String)> {
    let start_index = most_likely_position(start_logits)?;
    let end_index = most_likely_position(end_logits)?;
    debug!("Answer span candidates: start={}, end={}", start_index, end_index);

    let span = AnswerSpan::new(start_index, end_index, tokens.len())?;
    let text = join_tokens(&tokens.as_slice()[span.start()..=span.end()]);
    Ok((span, text))
}

/// Decode the answer directly from a raw `[1, seq_len, 2]` model output
pub fn decode_qa_answer(
    tokens: &TokenSequence,
    model_output: ArrayViewD<'_, f32>,
) -> Result<(AnswerSpan, String)> {
    let (start_logits, end_logits) = split_logits(model_output)?;
    decode_answer(tokens, start_logits.view(), end_logits.view())
}

fn most_likely_position(logits: ArrayView2<'_, f32>) -> Result<usize> {
    if logits.nrows() != 1 {
        return Err(TranscodeError::shape_mismatch("[1, seq_len]", logits.shape()));
    }
    // A single NaN or inf poisons the whole softmax row
    if let Some(index) = logits.iter().position(|v| !v.is_finite()) {
        return Err(TranscodeError::NonFiniteValue { index });
    }
    let probs = softmax(logits);
    let row = probs.index_axis(Axis(0), 0).to_vec();
    argmax(&row)
}
