// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use tracing::info;

use crate::config::TranscodeConfig;
use crate::predictor::OnnxPredictor;
use crate::qa::{BasicTokenizer, BertQaPipeline, HfTokenizer, Tokenize, Vocabulary};

pub const DEFAULT_QUESTION: &str = "When did BBC Japan start broadcasting?";

pub const DEFAULT_PARAGRAPH: &str = "BBC Japan was a general entertainment Channel.\n \
    Which operated between December 2004 and April 2006.\n\
    It ceased operations after its Japanese distributor folded.";

/// Arguments for the qa command
#[derive(Args, Debug)]
pub struct QaArgs {
    /// ONNX QA model file (overrides config)
    #[arg(long, alias = "model-path-prefix")]
    pub model_path: Option<PathBuf>,

    /// Vocabulary JSON (overrides config)
    #[arg(long)]
    pub model_vocab: Option<PathBuf>,

    /// HuggingFace tokenizer.json (overrides config)
    #[arg(long)]
    pub tokenizer: Option<PathBuf>,

    /// The input question
    #[arg(long, default_value = DEFAULT_QUESTION)]
    pub input_question: String,

    /// The paragraph containing the answer
    #[arg(long, default_value = DEFAULT_PARAGRAPH)]
    pub input_answer: String,

    /// Maximum length of the sequence (overrides config)
    #[arg(long)]
    pub seq_length: Option<usize>,
}

/// Answer a question with the BERT QA model
pub fn run(args: QaArgs, config: &TranscodeConfig) -> Result<()> {
    let qa = &config.qa;
    let model_path = args.model_path.unwrap_or_else(|| qa.model_path.clone());
    let vocab_path = args.model_vocab.unwrap_or_else(|| qa.vocab_path.clone());
    let seq_length = args.seq_length.unwrap_or(qa.seq_length);

    let tokenizer: Box<dyn Tokenize> = match args.tokenizer.or_else(|| qa.tokenizer_path.clone()) {
        Some(path) => Box::new(HfTokenizer::from_file(path)?),
        None => Box::new(BasicTokenizer),
    };
    let vocab = Vocabulary::from_json_file(&vocab_path)?;
    info!("Loaded vocabulary with {} tokens", vocab.len());

    let predictor = OnnxPredictor::new(&model_path, config.device)?;
    let pipeline = BertQaPipeline::new(predictor, tokenizer, vocab).with_seq_length(seq_length);

    info!("Answer paragraph: {}", args.input_answer);
    let answer = pipeline.answer(&args.input_question, &args.input_answer)?;
    println!(
        "Answer: {} (tokens {}..={})",
        answer.text,
        answer.span.start(),
        answer.span.end()
    );

    Ok(())
}
