// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Image tensor encoding tests
//!
//! Verifies the planar `[C, H, W]` layout, exact resize dimensions and the
//! end-to-end encode path on synthetic images.

use fabstir_transcode::vision::{
    decode_image_bytes, encode_image_for_model, load_image, resize, to_batched_tensor,
    to_planar_tensor,
};
use fabstir_transcode::TranscodeError;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use std::io::Cursor;

fn solid(width: u32, height: u32, color: [u8; 3]) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(color)))
}

fn png_bytes(image: &DynamicImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

#[test]
fn test_solid_red_encodes_to_single_channel() {
    let tensor = encode_image_for_model(solid(100, 50, [255, 0, 0]), 2, 2).unwrap();

    assert_eq!(tensor.shape(), &[3, 2, 2]);
    assert!(tensor.index_axis(ndarray::Axis(0), 0).iter().all(|&v| v == 255.0));
    assert!(tensor.index_axis(ndarray::Axis(0), 1).iter().all(|&v| v == 0.0));
    assert!(tensor.index_axis(ndarray::Axis(0), 2).iter().all(|&v| v == 0.0));
}

#[test]
fn test_resize_is_exact_for_various_sizes() {
    let source = solid(640, 480, [10, 20, 30]);
    for (w, h) in [(224, 224), (1, 1), (300, 17), (1024, 768)] {
        let resized = resize(&source, w, h).unwrap();
        assert_eq!((resized.width(), resized.height()), (w, h));
    }
}

#[test]
fn test_planar_shape_matches_image() {
    let tensor = to_planar_tensor(solid(7, 3, [1, 2, 3])).unwrap();
    assert_eq!(tensor.shape(), &[3, 3, 7]);
    assert_eq!(tensor.len(), 3 * 3 * 7);
}

#[test]
fn test_planar_layout_per_pixel() {
    // Left pixel red, right pixel blue
    let mut img = RgbImage::new(2, 1);
    img.put_pixel(0, 0, Rgb([255, 0, 0]));
    img.put_pixel(1, 0, Rgb([0, 0, 255]));

    let tensor = to_planar_tensor(DynamicImage::ImageRgb8(img)).unwrap();
    let flat: Vec<f32> = tensor.iter().copied().collect();
    assert_eq!(flat, vec![255.0, 0.0, 0.0, 0.0, 0.0, 255.0]);
}

#[test]
fn test_rgba_source_drops_alpha() {
    let img = RgbaImage::from_pixel(4, 4, Rgba([0, 128, 0, 10]));
    let tensor = encode_image_for_model(DynamicImage::ImageRgba8(img), 4, 4).unwrap();

    assert_eq!(tensor.shape(), &[3, 4, 4]);
    assert!(tensor.index_axis(ndarray::Axis(0), 1).iter().all(|&v| v == 128.0));
}

#[test]
fn test_zero_sized_inputs_rejected() {
    let empty = DynamicImage::ImageRgb8(RgbImage::new(0, 0));
    assert!(matches!(
        encode_image_for_model(empty, 224, 224),
        Err(TranscodeError::InvalidImage(_))
    ));
    assert!(matches!(
        encode_image_for_model(solid(4, 4, [0, 0, 0]), 0, 224),
        Err(TranscodeError::InvalidImage(_))
    ));
}

#[test]
fn test_batched_tensor_adds_leading_axis() {
    let planar = encode_image_for_model(solid(640, 480, [5, 5, 5]), 224, 224).unwrap();
    let batched = to_batched_tensor(planar);
    assert_eq!(batched.shape(), &[1, 3, 224, 224]);
}

#[test]
fn test_encode_from_decoded_bytes() {
    let bytes = png_bytes(&solid(32, 16, [0, 0, 200]));
    let (image, info) = decode_image_bytes(&bytes).unwrap();
    assert_eq!((info.width, info.height), (32, 16));

    let tensor = encode_image_for_model(image, 8, 8).unwrap();
    assert!(tensor.index_axis(ndarray::Axis(0), 2).iter().all(|&v| v == 200.0));
}

#[test]
fn test_encode_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dog.png");
    std::fs::write(&path, png_bytes(&solid(64, 48, [9, 9, 9]))).unwrap();

    let (image, _) = load_image(&path).unwrap();
    let tensor = encode_image_for_model(image, 224, 224).unwrap();
    assert_eq!(tensor.shape(), &[3, 224, 224]);
}
