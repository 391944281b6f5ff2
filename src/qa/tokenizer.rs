// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Tokenizer collaborators for the QA pipeline

use anyhow::{anyhow, Result};
use std::path::Path;
use tokenizers::Tokenizer;

use super::sequence::Token;

/// Splits text into tokens
pub trait Tokenize {
    fn tokenize(&self, text: &str) -> Result<Vec<Token>>;
}

/// Whitespace tokenizer that also splits out ASCII punctuation
///
/// `"Japan, 2004."` becomes `["Japan", ",", "2004", "."]`. Case is kept;
/// the QA input builder lowercases text before tokenizing.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicTokenizer;

impl Tokenize for BasicTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        for word in text.split_whitespace() {
            let mut current = String::new();
            for ch in word.chars() {
                if ch.is_ascii_punctuation() {
                    if !current.is_empty() {
                        tokens.push(std::mem::take(&mut current));
                    }
                    tokens.push(ch.to_string());
                } else {
                    current.push(ch);
                }
            }
            if !current.is_empty() {
                tokens.push(current);
            }
        }
        Ok(tokens)
    }
}

/// HuggingFace `tokenizers` adapter (WordPiece etc.)
///
/// Special tokens are not added: the QA input builder frames the sequence
/// itself.
#[derive(Clone)]
pub struct HfTokenizer {
    tokenizer: Tokenizer,
}

impl std::fmt::Debug for HfTokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HfTokenizer")
            .field("vocab_size", &self.tokenizer.get_vocab_size(true))
            .finish()
    }
}

impl HfTokenizer {
    /// Load a `tokenizer.json` file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            anyhow::bail!("Tokenizer file not found: {}", path.display());
        }
        let tokenizer = Tokenizer::from_file(path)
            .map_err(|e| anyhow!("Failed to load tokenizer: {}", e))?;
        Ok(Self { tokenizer })
    }

    /// Wrap an already constructed tokenizer
    pub fn new(tokenizer: Tokenizer) -> Self {
        Self { tokenizer }
    }
}

impl Tokenize for HfTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<Token>> {
        let encoding = self
            .tokenizer
            .encode(text, false)
            .map_err(|e| anyhow!("Tokenization failed: {}", e))?;
        Ok(encoding.get_tokens().to_vec())
    }
}

impl<T: Tokenize + ?Sized> Tokenize for &T {
    fn tokenize(&self, text: &str) -> Result<Vec<Token>> {
        (**self).tokenize(text)
    }
}

impl<T: Tokenize + ?Sized> Tokenize for Box<T> {
    fn tokenize(&self, text: &str) -> Result<Vec<Token>> {
        (**self).tokenize(text)
    }
}
