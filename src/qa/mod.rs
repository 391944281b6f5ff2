// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Extractive question answering pre/post-processing
//!
//! Components:
//! - `sequence` - Token sequences and fixed-length padding
//! - `tokenizer` - Tokenizer collaborators
//! - `vocab` - Token to id lookup
//! - `input` - BERT input framing
//! - `logits` - Logit split, softmax and argmax
//! - `decoder` - Answer span decoding
//! - `pipeline` - End-to-end QA around a predictor

pub mod decoder;
pub mod input;
pub mod logits;
pub mod pipeline;
pub mod sequence;
pub mod tokenizer;
pub mod vocab;

pub use decoder::{decode_answer, decode_qa_answer, join_tokens, AnswerSpan};
pub use input::{build_qa_input, QaInput};
pub use logits::{argmax, softmax, softmax_slice, split_logits};
pub use pipeline::{BertQaPipeline, QaAnswer};
pub use sequence::{pad, Token, TokenSequence};
pub use tokenizer::{BasicTokenizer, HfTokenizer, Tokenize};
pub use vocab::Vocabulary;
