// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image preprocessing for vision predictors
//!
//! Turns a decoded bitmap into the planar `[3, H, W]` float tensor the
//! detection model consumes. Pixel intensities are passed through as raw
//! 0-255 values: the model applies its own normalization internally.

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};
use ndarray::{Array3, Array4, Axis};
use tracing::debug;

use crate::error::{Result, TranscodeError};

/// Default detection input width (SSD / ResNet style models)
pub const DEFAULT_INPUT_WIDTH: u32 = 224;

/// Default detection input height
pub const DEFAULT_INPUT_HEIGHT: u32 = 224;

/// Number of colour channels in the planar tensor (R, G, B)
pub const CHANNELS: usize = 3;

/// Interpolation used by [`resize`]. Fixed so encoded tensors are reproducible.
pub const RESIZE_FILTER: FilterType = FilterType::Triangle;

/// Resize an image to exactly `target_width` x `target_height`
///
/// Aspect ratio is not preserved; the model input descriptor is fixed, so the
/// image is stretched with bilinear interpolation.
///
/// # Errors
/// `InvalidImage` if the source or the target has a zero dimension.
pub fn resize(image: &DynamicImage, target_width: u32, target_height: u32) -> Result<DynamicImage> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(TranscodeError::InvalidImage(format!(
            "source image has zero size ({}x{})",
            width, height
        )));
    }
    if target_width == 0 || target_height == 0 {
        return Err(TranscodeError::InvalidImage(format!(
            "target size must be non-zero ({}x{})",
            target_width, target_height
        )));
    }

    debug!(
        "Resizing image {}x{} -> {}x{}",
        width, height, target_width, target_height
    );
    Ok(image.resize_exact(target_width, target_height, RESIZE_FILTER))
}

/// Convert an image to a planar `[3, H, W]` tensor
///
/// Channel order is R, G, B and each value is the raw intensity as f32, so
/// `tensor[[c, row, col]]` lives at flat offset `c*h*w + row*w + col`.
/// Alpha is dropped and grayscale is expanded to RGB.
///
/// The image is consumed: its pixel buffer is released when this returns,
/// on success and on error alike.
pub fn to_planar_tensor(image: DynamicImage) -> Result<Array3<f32>> {
    let rgb = image.into_rgb8();
    let (w, h) = rgb.dimensions();
    if w == 0 || h == 0 {
        return Err(TranscodeError::InvalidImage(format!(
            "cannot encode zero-size image ({}x{})",
            w, h
        )));
    }

    let (w, h) = (w as usize, h as usize);
    let mut tensor = Array3::<f32>::zeros((CHANNELS, h, w));

    // Row-major walk keeps the planar offsets in order
    for row in 0..h {
        for col in 0..w {
            let pixel = rgb.get_pixel(col as u32, row as u32);
            for c in 0..CHANNELS {
                tensor[[c, row, col]] = pixel[c] as f32;
            }
        }
    }

    Ok(tensor)
}

/// Resize and encode an image in one step: the tensor a vision predictor expects
///
/// Output shape is `[3, height, width]`.
pub fn encode_image_for_model(image: DynamicImage, width: u32, height: u32) -> Result<Array3<f32>> {
    let resized = resize(&image, width, height)?;
    drop(image);
    to_planar_tensor(resized)
}

/// Add the leading batch axis: `[3, H, W]` -> `[1, 3, H, W]` (NCHW)
pub fn to_batched_tensor(planar: Array3<f32>) -> Array4<f32> {
    planar.insert_axis(Axis(0))
}
