// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! BERT QA input framing
//!
//! Produces the three model inputs of the static BERT QA model:
//! - `data0`: token ids `[1, seq_length]`
//! - `data1`: segment ids `[1, seq_length]`
//! - `data2`: valid length `[1]`

use anyhow::Result;
use ndarray::{Array1, Array2, ArrayD};
use tracing::debug;

use super::sequence::{pad, TokenSequence, CLS_TOKEN, PAD_TOKEN, SEP_TOKEN};
use super::tokenizer::Tokenize;
use super::vocab::Vocabulary;
use crate::error::TranscodeError;

/// Model-ready QA inputs plus the padded tokens used to read the answer back
#[derive(Debug, Clone)]
pub struct QaInput {
    /// `[CLS] question [SEP] paragraph [SEP] [PAD]...`
    pub tokens: TokenSequence,
    /// Token ids as f32, `[1, seq_length]`
    pub input_ids: Array2<f32>,
    /// Segment ids as f32, `[1, seq_length]`
    pub token_types: Array2<f32>,
    /// Question + paragraph token count, `[1]`
    pub valid_length: Array1<f32>,
}

impl QaInput {
    /// Inputs in model order: ids, segment ids, valid length
    pub fn to_predictor_inputs(&self) -> Vec<ArrayD<f32>> {
        vec![
            self.input_ids.clone().into_dyn(),
            self.token_types.clone().into_dyn(),
            self.valid_length.clone().into_dyn(),
        ]
    }
}

/// Tokenize a question/paragraph pair and frame it for the QA model
///
/// Both texts are lowercased first. The valid length counts question and
/// paragraph tokens only (special tokens excluded), and segment ids mark
/// `len(question)` zeros followed by `len(paragraph)` ones, zero-padded.
///
/// # Errors
/// - tokenizer failures
/// - `SequenceTooLong` when the framed tokens exceed `seq_length`
/// - `UnknownToken` when a token is missing and the vocabulary has no `[UNK]`
pub fn build_qa_input<T: Tokenize + ?Sized>(
    tokenizer: &T,
    vocab: &Vocabulary,
    question: &str,
    paragraph: &str,
    seq_length: usize,
) -> Result<QaInput> {
    let question_tokens = tokenizer.tokenize(&question.to_lowercase())?;
    let paragraph_tokens = tokenizer.tokenize(&paragraph.to_lowercase())?;
    let valid_length = question_tokens.len() + paragraph_tokens.len();
    debug!("Valid length: {}", valid_length);

    let mut segments = pad(&[], 0.0f32, question_tokens.len());
    segments.extend(pad(&[], 1.0f32, paragraph_tokens.len()));
    let token_types = pad(&segments, 0.0, seq_length);

    let mut framed = Vec::with_capacity(valid_length + 3);
    framed.push(CLS_TOKEN.to_string());
    framed.extend(question_tokens);
    framed.push(SEP_TOKEN.to_string());
    framed.extend(paragraph_tokens);
    framed.push(SEP_TOKEN.to_string());

    if framed.len() > seq_length {
        return Err(TranscodeError::SequenceTooLong {
            len: framed.len(),
            max: seq_length,
        }
        .into());
    }

    let tokens = TokenSequence::new(framed).padded(PAD_TOKEN, seq_length);
    debug!("Pre-processed tokens: {:?}", tokens.as_slice());

    let ids: Vec<f32> = vocab
        .token_to_ids(tokens.as_slice())?
        .into_iter()
        .map(|id| id as f32)
        .collect();

    Ok(QaInput {
        input_ids: Array2::from_shape_vec((1, seq_length), ids)?,
        token_types: Array2::from_shape_vec((1, seq_length), token_types)?,
        valid_length: Array1::from_elem(1, valid_length as f32),
        tokens,
    })
}
