// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! End-to-end BERT question answering
//!
//! tokenize -> frame -> predict -> decode. The pipeline owns no mutable
//! state, so one instance can serve concurrent callers when its predictor and
//! tokenizer can.

use anyhow::{Context, Result};
use tracing::info;

use super::decoder::{decode_qa_answer, AnswerSpan};
use super::input::{build_qa_input, QaInput};
use super::tokenizer::Tokenize;
use super::vocab::Vocabulary;
use crate::config::DEFAULT_SEQ_LENGTH;
use crate::predictor::Predictor;

/// Decoded answer with the span it was read from
#[derive(Debug, Clone, PartialEq)]
pub struct QaAnswer {
    /// Answer text
    pub text: String,
    /// Token span within the padded input sequence
    pub span: AnswerSpan,
    /// Tokens of the span, unjoined
    pub tokens: Vec<String>,
}

/// Question answering pipeline around an opaque predictor
pub struct BertQaPipeline<P, T> {
    predictor: P,
    tokenizer: T,
    vocab: Vocabulary,
    seq_length: usize,
}

impl<P: Predictor, T: Tokenize> BertQaPipeline<P, T> {
    /// Create a pipeline with the default sequence length (384)
    pub fn new(predictor: P, tokenizer: T, vocab: Vocabulary) -> Self {
        Self {
            predictor,
            tokenizer,
            vocab,
            seq_length: DEFAULT_SEQ_LENGTH,
        }
    }

    /// Override the fixed model sequence length
    pub fn with_seq_length(mut self, seq_length: usize) -> Self {
        self.seq_length = seq_length;
        self
    }

    /// Model sequence length
    pub fn seq_length(&self) -> usize {
        self.seq_length
    }

    /// Tokenize and frame a question/paragraph pair without running the model
    pub fn prepare(&self, question: &str, paragraph: &str) -> Result<QaInput> {
        build_qa_input(
            &self.tokenizer,
            &self.vocab,
            question,
            paragraph,
            self.seq_length,
        )
    }

    /// Answer `question` from `paragraph`
    pub fn answer(&self, question: &str, paragraph: &str) -> Result<QaAnswer> {
        info!("Question: {}", question);
        let input = self.prepare(question, paragraph)?;

        let outputs = self
            .predictor
            .predict(&input.to_predictor_inputs())
            .context("QA prediction failed")?;
        let logits = outputs
            .first()
            .ok_or_else(|| anyhow::anyhow!("QA model returned no outputs"))?;

        let (span, text) = decode_qa_answer(&input.tokens, logits.view())?;
        info!("Answer: {}", text);

        Ok(QaAnswer {
            text,
            span,
            tokens: input.tokens.as_slice()[span.start()..=span.end()].to_vec(),
        })
    }
}
