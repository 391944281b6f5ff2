// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use tracing::info;

use crate::config::TranscodeConfig;
use crate::predictor::OnnxPredictor;
use crate::vision::{load_image, ObjectDetectionPipeline};

/// Arguments for the detect command
#[derive(Args, Debug)]
pub struct DetectArgs {
    /// ONNX detection model file (overrides config)
    #[arg(long, alias = "model-path-prefix")]
    pub model_path: Option<PathBuf>,

    /// Input image
    #[arg(long, default_value = "/images/dog.jpg")]
    pub input_image: PathBuf,

    /// Model input width (overrides config)
    #[arg(long)]
    pub width: Option<u32>,

    /// Model input height (overrides config)
    #[arg(long)]
    pub height: Option<u32>,

    /// Minimum detection score (overrides config)
    #[arg(long)]
    pub threshold: Option<f32>,
}

/// Run object detection on a single image
pub fn run(args: DetectArgs, config: &TranscodeConfig) -> Result<()> {
    let detection = &config.detection;
    let model_path = args
        .model_path
        .unwrap_or_else(|| detection.model_path.clone());
    let width = args.width.unwrap_or(detection.input_width);
    let height = args.height.unwrap_or(detection.input_height);

    let predictor = OnnxPredictor::new(&model_path, config.device)?;
    let pipeline = ObjectDetectionPipeline::new(predictor)
        .with_input_size(width, height)
        .with_score_threshold(args.threshold.unwrap_or(detection.score_threshold))
        .with_top_k(detection.top_k);

    let (image, image_info) = load_image(&args.input_image)?;
    info!(
        "Loaded {} ({}x{}, {:?})",
        args.input_image.display(),
        image_info.width,
        image_info.height,
        image_info.format
    );

    let detections = pipeline.detect(image)?;
    if detections.is_empty() {
        println!("No objects detected");
    }
    for det in &detections {
        let [x1, y1, x2, y2] = det.to_pixels(image_info.width, image_info.height);
        println!(
            "class={} score={:.3} box=({:.1}, {:.1}, {:.1}, {:.1})",
            det.class_id, det.score, x1, y1, x2, y2
        );
    }

    Ok(())
}
