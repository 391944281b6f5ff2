// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Token sequences and fixed-length padding

use std::ops::Index;

/// Padding token appended to reach the model sequence length
pub const PAD_TOKEN: &str = "[PAD]";

/// Classification token opening every BERT input
pub const CLS_TOKEN: &str = "[CLS]";

/// Separator token closing each BERT segment
pub const SEP_TOKEN: &str = "[SEP]";

/// Placeholder for tokens missing from the vocabulary
pub const UNK_TOKEN: &str = "[UNK]";

/// A single text unit
pub type Token = String;

/// Pad `sequence` with `pad_value` up to `target_len`
///
/// Always returns a new vector. Sequences already at or beyond `target_len`
/// are passed through unchanged: nothing is truncated here, callers that need
/// a hard limit check the length themselves.
pub fn pad<T: Clone>(sequence: &[T], pad_value: T, target_len: usize) -> Vec<T> {
    let mut padded = Vec::with_capacity(target_len.max(sequence.len()));
    padded.extend_from_slice(sequence);
    if padded.len() < target_len {
        padded.resize(target_len, pad_value);
    }
    padded
}

/// Immutable ordered sequence of tokens
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSequence {
    tokens: Vec<Token>,
}

impl TokenSequence {
    /// Create a sequence from owned tokens
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    /// New sequence padded with `pad_token` to `target_len` (see [`pad`])
    pub fn padded(&self, pad_token: &str, target_len: usize) -> Self {
        Self::new(pad(&self.tokens, pad_token.to_string(), target_len))
    }

    /// Number of tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the sequence holds no tokens
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Borrow the tokens
    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    /// Iterate over the tokens
    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Consume into the underlying vector
    pub fn into_inner(self) -> Vec<Token> {
        self.tokens
    }
}

impl Index<usize> for TokenSequence {
    type Output = Token;

    fn index(&self, index: usize) -> &Token {
        &self.tokens[index]
    }
}

impl From<Vec<Token>> for TokenSequence {
    fn from(tokens: Vec<Token>) -> Self {
        Self::new(tokens)
    }
}

impl From<Vec<&str>> for TokenSequence {
    fn from(tokens: Vec<&str>) -> Self {
        Self::new(tokens.into_iter().map(str::to_string).collect())
    }
}

impl FromIterator<Token> for TokenSequence {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a TokenSequence {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
