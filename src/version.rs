// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Version information for the Fabstir transcoding examples

/// Semantic version number
pub const VERSION_NUMBER: &str = env!("CARGO_PKG_VERSION");

/// Build date
pub const BUILD_DATE: &str = "2026-10-19";

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "planar-image-encoding",
    "bilinear-resize",
    "ssd-detection-parsing",
    "bert-qa-framing",
    "qa-span-decoding",
    "onnx-predictor",
    "cpu-gpu-device-selection",
];

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("Fabstir Transcode {} ({})", VERSION_NUMBER, BUILD_DATE)
}

/// Get full version info as JSON
pub fn get_version_info() -> serde_json::Value {
    serde_json::json!({
        "version": VERSION_NUMBER,
        "date": BUILD_DATE,
        "features": FEATURES,
    })
}
