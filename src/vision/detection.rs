// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Object detection around an opaque predictor
//!
//! Encodes an image into the `[1, 3, H, W]` input the detector expects, runs
//! the predictor, and reads SSD-style detections back out of the first
//! output tensor.

use anyhow::{Context, Result};
use image::DynamicImage;
use ndarray::{ArrayD, ArrayViewD, Axis, Ix3};
use tracing::{debug, info};

use super::preprocessing::{
    encode_image_for_model, to_batched_tensor, DEFAULT_INPUT_HEIGHT, DEFAULT_INPUT_WIDTH,
};
use crate::config::{DEFAULT_SCORE_THRESHOLD, DEFAULT_TOP_K};
use crate::error::TranscodeError;
use crate::predictor::Predictor;

/// Values per detection row: class id, score, xmin, ymin, xmax, ymax
pub const DETECTION_ROW: usize = 6;

/// A single detected object
///
/// Coordinates are as emitted by the model, normally fractions of the input
/// width and height.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    /// Class index
    pub class_id: usize,
    /// Confidence score
    pub score: f32,
    pub xmin: f32,
    pub ymin: f32,
    pub xmax: f32,
    pub ymax: f32,
}

impl Detection {
    /// Box width
    pub fn width(&self) -> f32 {
        self.xmax - self.xmin
    }

    /// Box height
    pub fn height(&self) -> f32 {
        self.ymax - self.ymin
    }

    /// Scale fractional coordinates to pixel coordinates of a `width` x `height` image
    pub fn to_pixels(&self, width: u32, height: u32) -> [f32; 4] {
        [
            self.xmin * width as f32,
            self.ymin * height as f32,
            self.xmax * width as f32,
            self.ymax * height as f32,
        ]
    }
}

/// Parse a `[1, N, 6]` detector output
///
/// Rows with a negative class id are padding and skipped. Detections below
/// `score_threshold` are dropped, the rest are sorted by descending score and
/// capped at `top_k`.
pub fn parse_detections(
    output: ArrayViewD<'_, f32>,
    score_threshold: f32,
    top_k: usize,
) -> Result<Vec<Detection>, TranscodeError> {
    let shape = output.shape().to_vec();
    if shape.len() != 3 || shape[0] != 1 || shape[2] != DETECTION_ROW {
        return Err(TranscodeError::shape_mismatch("[1, N, 6]", &shape));
    }

    let output = output
        .into_dimensionality::<Ix3>()
        .map_err(|_| TranscodeError::shape_mismatch("[1, N, 6]", &shape))?;
    let rows = output.index_axis_move(Axis(0), 0);
    let mut detections: Vec<Detection> = rows
        .outer_iter()
        .filter(|row| row[0] >= 0.0 && row[1] >= score_threshold)
        .map(|row| Detection {
            class_id: row[0] as usize,
            score: row[1],
            xmin: row[2],
            ymin: row[3],
            xmax: row[4],
            ymax: row[5],
        })
        .collect();

    // Stable sort keeps model order among equal scores
    detections.sort_by(|a, b| b.score.total_cmp(&a.score));
    detections.truncate(top_k);
    Ok(detections)
}

/// Object detection pipeline: encode -> predict -> parse
pub struct ObjectDetectionPipeline<P> {
    predictor: P,
    input_width: u32,
    input_height: u32,
    score_threshold: f32,
    top_k: usize,
}

impl<P: Predictor> ObjectDetectionPipeline<P> {
    /// Create a pipeline with the default 224x224 input
    pub fn new(predictor: P) -> Self {
        Self {
            predictor,
            input_width: DEFAULT_INPUT_WIDTH,
            input_height: DEFAULT_INPUT_HEIGHT,
            score_threshold: DEFAULT_SCORE_THRESHOLD,
            top_k: DEFAULT_TOP_K,
        }
    }

    /// Set the model input size
    pub fn with_input_size(mut self, width: u32, height: u32) -> Self {
        self.input_width = width;
        self.input_height = height;
        self
    }

    /// Set the minimum reported score (clamped to 0.0-1.0)
    pub fn with_score_threshold(mut self, threshold: f32) -> Self {
        self.score_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    /// Set the maximum number of reported detections
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Model input size as `(width, height)`
    pub fn input_size(&self) -> (u32, u32) {
        (self.input_width, self.input_height)
    }

    /// Run the predictor and return its raw outputs
    pub fn predict(&self, image: DynamicImage) -> Result<Vec<ArrayD<f32>>> {
        let planar = encode_image_for_model(image, self.input_width, self.input_height)?;
        let input = to_batched_tensor(planar).into_dyn();
        debug!("Detection input shape: {:?}", input.shape());

        self.predictor
            .predict(&[input])
            .context("Detection prediction failed")
    }

    /// Run the predictor and parse detections from its first output
    pub fn detect(&self, image: DynamicImage) -> Result<Vec<Detection>> {
        let outputs = self.predict(image)?;
        let output = outputs
            .first()
            .ok_or_else(|| anyhow::anyhow!("Detection model returned no outputs"))?;

        let detections = parse_detections(output.view(), self.score_threshold, self.top_k)?;
        info!("Detected {} objects", detections.len());
        Ok(detections)
    }
}
