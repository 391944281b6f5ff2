// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for the example pipelines
//!
//! Loaded from a TOML file, from environment variables, or built from
//! defaults. Device selection is only ever handed to the predictor.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::warn;

use crate::vision::preprocessing::{DEFAULT_INPUT_HEIGHT, DEFAULT_INPUT_WIDTH};

/// Default BERT QA sequence length
pub const DEFAULT_SEQ_LENGTH: usize = 384;

/// Default minimum score for reported detections
pub const DEFAULT_SCORE_THRESHOLD: f32 = 0.5;

/// Default maximum number of reported detections
pub const DEFAULT_TOP_K: usize = 5;

/// Execution device handed to the predictor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    #[default]
    Cpu,
    Gpu,
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Device::Cpu => write!(f, "cpu"),
            Device::Gpu => write!(f, "gpu"),
        }
    }
}

impl FromStr for Device {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "cpu" => Ok(Device::Cpu),
            "gpu" | "cuda" => Ok(Device::Gpu),
            other => anyhow::bail!("Unknown device '{}' (expected cpu or gpu)", other),
        }
    }
}

/// Object detection example settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Path to the detection model
    pub model_path: PathBuf,
    /// Model input width in pixels
    pub input_width: u32,
    /// Model input height in pixels
    pub input_height: u32,
    /// Minimum detection score to report
    pub score_threshold: f32,
    /// Maximum number of detections to report
    pub top_k: usize,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("./models/ssd_resnet50_512/model.onnx"),
            input_width: DEFAULT_INPUT_WIDTH,
            input_height: DEFAULT_INPUT_HEIGHT,
            score_threshold: DEFAULT_SCORE_THRESHOLD,
            top_k: DEFAULT_TOP_K,
        }
    }
}

/// BERT question answering example settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QaConfig {
    /// Path to the QA model
    pub model_path: PathBuf,
    /// Path to the vocabulary JSON (`idx_to_token` / `token_to_idx`)
    pub vocab_path: PathBuf,
    /// Optional HuggingFace `tokenizer.json`; the basic tokenizer is used when unset
    pub tokenizer_path: Option<PathBuf>,
    /// Fixed model sequence length
    pub seq_length: usize,
}

impl Default for QaConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("./models/static_bert_qa/model.onnx"),
            vocab_path: PathBuf::from("./models/static_bert_qa/vocab.json"),
            tokenizer_path: None,
            seq_length: DEFAULT_SEQ_LENGTH,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscodeConfig {
    /// Device for every predictor
    pub device: Device,
    /// Object detection settings
    pub detection: DetectionConfig,
    /// Question answering settings
    pub qa: QaConfig,
}

impl TranscodeConfig {
    /// Load configuration from a TOML file; missing keys take defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config TOML")
    }

    /// Create configuration from environment variables
    ///
    /// Environment variables:
    /// - `TRANSCODE_DEVICE`: cpu/gpu (default: cpu)
    /// - `INFER_ON_GPU`: `1` selects gpu when `TRANSCODE_DEVICE` is unset
    /// - `DETECTION_MODEL_PATH`: detection model file
    /// - `QA_MODEL_PATH`: QA model file
    /// - `QA_VOCAB_PATH`: QA vocabulary JSON
    /// - `QA_SEQ_LENGTH`: QA sequence length
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Override fields from environment variables
    pub fn apply_env(&mut self) {
        if let Some(device) = env_override::<Device>("TRANSCODE_DEVICE") {
            self.device = device;
        } else if env::var("INFER_ON_GPU").map(|v| v == "1").unwrap_or(false) {
            self.device = Device::Gpu;
        }

        if let Ok(path) = env::var("DETECTION_MODEL_PATH") {
            self.detection.model_path = PathBuf::from(path);
        }
        if let Ok(path) = env::var("QA_MODEL_PATH") {
            self.qa.model_path = PathBuf::from(path);
        }
        if let Ok(path) = env::var("QA_VOCAB_PATH") {
            self.qa.vocab_path = PathBuf::from(path);
        }
        if let Some(len) = env_override::<usize>("QA_SEQ_LENGTH") {
            self.qa.seq_length = len;
        }
    }
}

/// Read and parse an environment override; unset yields `None`
fn env_override<T: FromStr>(name: &str) -> Option<T> {
    env::var(name)
        .ok()
        .and_then(|raw| parse_override(name, &raw))
}

/// Parse an override value, warning and ignoring it when unparseable
fn parse_override<T: FromStr>(name: &str, raw: &str) -> Option<T> {
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring invalid {}={:?}, keeping configured value", name, raw);
            None
        }
    }
}
