// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Configuration loading from TOML files and the environment

use fabstir_transcode::{Device, TranscodeConfig};
use std::io::Write;
use std::path::PathBuf;

const ENV_VARS: [&str; 6] = [
    "TRANSCODE_DEVICE",
    "INFER_ON_GPU",
    "DETECTION_MODEL_PATH",
    "QA_MODEL_PATH",
    "QA_VOCAB_PATH",
    "QA_SEQ_LENGTH",
];

fn clear_env() {
    for var in ENV_VARS {
        std::env::remove_var(var);
    }
}

#[test]
fn test_load_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
device = "gpu"

[detection]
model_path = "/models/ssd/model.onnx"
input_width = 512
input_height = 512
score_threshold = 0.3

[qa]
vocab_path = "/models/bert/vocab.json"
seq_length = 128
"#
    )
    .unwrap();

    let config = TranscodeConfig::from_file(file.path()).unwrap();
    assert_eq!(config.device, Device::Gpu);
    assert_eq!(config.detection.model_path, PathBuf::from("/models/ssd/model.onnx"));
    assert_eq!(config.detection.input_width, 512);
    assert_eq!(config.detection.top_k, 5);
    assert_eq!(config.qa.seq_length, 128);
    assert_eq!(config.qa.vocab_path, PathBuf::from("/models/bert/vocab.json"));
}

#[test]
fn test_missing_config_file() {
    let err = TranscodeConfig::from_file("/nonexistent/transcode.toml").unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}

// Single test so env mutation never races within this binary
#[test]
fn test_environment_overrides() {
    clear_env();
    assert_eq!(TranscodeConfig::from_env(), TranscodeConfig::default());

    std::env::set_var("INFER_ON_GPU", "1");
    assert_eq!(TranscodeConfig::from_env().device, Device::Gpu);

    std::env::set_var("TRANSCODE_DEVICE", "cpu");
    std::env::set_var("QA_MODEL_PATH", "/env/bert.onnx");
    std::env::set_var("QA_SEQ_LENGTH", "256");
    std::env::set_var("DETECTION_MODEL_PATH", "/env/ssd.onnx");
    let config = TranscodeConfig::from_env();
    assert_eq!(config.device, Device::Cpu);
    assert_eq!(config.qa.model_path, PathBuf::from("/env/bert.onnx"));
    assert_eq!(config.qa.seq_length, 256);
    assert_eq!(config.detection.model_path, PathBuf::from("/env/ssd.onnx"));

    // Unparseable values are skipped (with a warning), not fatal
    std::env::set_var("QA_SEQ_LENGTH", "not-a-number");
    assert_eq!(TranscodeConfig::from_env().qa.seq_length, 384);

    std::env::set_var("TRANSCODE_DEVICE", "gpu1");
    std::env::remove_var("INFER_ON_GPU");
    let mut config = TranscodeConfig::from_toml_str("device = \"gpu\"\n").unwrap();
    config.apply_env();
    assert_eq!(config.device, Device::Gpu);
    std::env::remove_var("TRANSCODE_DEVICE");

    // File values are overridden by the environment
    let mut config = TranscodeConfig::from_toml_str("[qa]\nseq_length = 64\n").unwrap();
    std::env::set_var("QA_SEQ_LENGTH", "96");
    config.apply_env();
    assert_eq!(config.qa.seq_length, 96);

    clear_env();
}
