// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod detect;
pub mod qa;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{Device, TranscodeConfig};

/// Fabstir transcoding examples CLI
#[derive(Parser, Debug)]
#[command(name = "transcode-cli")]
#[command(version)]
#[command(about = "Run example predictors with image and QA pre/post-processing", long_about = None)]
pub struct Cli {
    /// TOML configuration file
    #[arg(long, global = true, env = "TRANSCODE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Execution device (cpu/gpu)
    #[arg(long, global = true)]
    pub device: Option<Device>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Encode an image and run the object detector
    Detect(detect::DetectArgs),

    /// Answer a question from a paragraph with BERT QA
    Qa(qa::QaArgs),
}

impl Cli {
    /// Resolve configuration: file (or defaults), then environment, then flags
    pub fn resolve_config(&self) -> Result<TranscodeConfig> {
        let mut config = match &self.config {
            Some(path) => TranscodeConfig::from_file(path)?,
            None => TranscodeConfig::default(),
        };
        config.apply_env();
        if let Some(device) = self.device {
            config.device = device;
        }
        Ok(config)
    }
}

/// Execute CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let config = cli.resolve_config()?;
    match cli.command {
        Commands::Detect(args) => detect::run(args, &config),
        Commands::Qa(args) => qa::run(args, &config),
    }
}
