// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod cli;
pub mod config;
pub mod error;
pub mod predictor;
pub mod qa;
pub mod version;
pub mod vision;

// Re-export the transcoding entry points
pub use config::{Device, TranscodeConfig};
pub use error::TranscodeError;
pub use predictor::{OnnxPredictor, Predictor};
pub use qa::{decode_qa_answer, AnswerSpan, BertQaPipeline, QaAnswer, TokenSequence};
pub use vision::{encode_image_for_model, Detection, ObjectDetectionPipeline};
