// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Vocabulary lookup for BERT token ids
//!
//! Reads the `vocab.json` layout shipped with the QA model:
//! `{"idx_to_token": [...], "token_to_idx": {...}}`. Either half may be
//! omitted; the missing one is derived from the other.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use super::sequence::{Token, UNK_TOKEN};
use crate::error::TranscodeError;

#[derive(Debug, Deserialize)]
struct VocabFile {
    #[serde(default)]
    idx_to_token: Vec<String>,
    #[serde(default)]
    token_to_idx: HashMap<String, u32>,
}

/// Token <-> id mapping
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    idx_to_token: Vec<String>,
    token_to_idx: HashMap<String, u32>,
}

impl Vocabulary {
    /// Build a vocabulary where each token's id is its position
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let idx_to_token: Vec<String> = tokens.into_iter().map(Into::into).collect();
        let token_to_idx = idx_to_token
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), i as u32))
            .collect();
        Self {
            idx_to_token,
            token_to_idx,
        }
    }

    /// Load a vocabulary JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            anyhow::bail!("Vocabulary file not found: {}", path.display());
        }
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read vocabulary {}", path.display()))?;
        Self::from_json_str(&content)
    }

    /// Parse vocabulary JSON text
    pub fn from_json_str(content: &str) -> Result<Self> {
        let file: VocabFile =
            serde_json::from_str(content).context("Failed to parse vocabulary JSON")?;

        if file.token_to_idx.is_empty() {
            return Ok(Self::from_tokens(file.idx_to_token));
        }

        let mut idx_to_token = file.idx_to_token;
        if idx_to_token.is_empty() {
            let mut pairs: Vec<(&String, &u32)> = file.token_to_idx.iter().collect();
            pairs.sort_by_key(|pair| *pair.1);
            idx_to_token = pairs.into_iter().map(|(t, _)| t.clone()).collect();
        }

        Ok(Self {
            idx_to_token,
            token_to_idx: file.token_to_idx,
        })
    }

    /// Number of known tokens
    pub fn len(&self) -> usize {
        self.token_to_idx.len()
    }

    /// Whether the vocabulary is empty
    pub fn is_empty(&self) -> bool {
        self.token_to_idx.is_empty()
    }

    /// Id of `token`
    ///
    /// # Errors
    /// `UnknownToken` if the token is not in the vocabulary.
    pub fn index_of(&self, token: &str) -> Result<u32, TranscodeError> {
        self.token_to_idx
            .get(token)
            .copied()
            .ok_or_else(|| TranscodeError::UnknownToken(token.to_string()))
    }

    /// Token stored at `index`, if any
    pub fn token_at(&self, index: u32) -> Option<&str> {
        self.idx_to_token.get(index as usize).map(String::as_str)
    }

    /// Map tokens to ids, substituting `[UNK]` for unknown tokens
    ///
    /// # Errors
    /// `UnknownToken` if a token is missing and the vocabulary has no `[UNK]`.
    pub fn token_to_ids(&self, tokens: &[Token]) -> Result<Vec<u32>, TranscodeError> {
        let unk = self.token_to_idx.get(UNK_TOKEN).copied();
        tokens
            .iter()
            .map(|token| match self.token_to_idx.get(token.as_str()) {
                Some(&idx) => Ok(idx),
                None => unk.ok_or_else(|| TranscodeError::UnknownToken(token.clone())),
            })
            .collect()
    }
}
