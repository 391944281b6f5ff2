// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Vision pre/post-processing for image predictors
//!
//! This module provides:
//! - Image loading and format detection
//! - Planar tensor encoding (resize + RGB extraction)
//! - Object detection around an opaque predictor

pub mod detection;
pub mod image_utils;
pub mod preprocessing;

pub use detection::{parse_detections, Detection, ObjectDetectionPipeline};
pub use image_utils::{decode_base64_image, decode_image_bytes, detect_format, load_image, ImageError, ImageInfo};
pub use preprocessing::{encode_image_for_model, resize, to_batched_tensor, to_planar_tensor};
