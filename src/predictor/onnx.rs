// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! ONNX Runtime predictor
//!
//! Wraps an `ort` session behind the [`Predictor`] contract. Inputs are bound
//! positionally to the model's declared input names, so callers only need to
//! know the order (e.g. `data0, data1, data2` for BERT QA).

use anyhow::{anyhow, Context, Result};
use ndarray::ArrayD;
use ort::execution_providers::{CPUExecutionProvider, CUDAExecutionProvider};
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Value;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

use super::Predictor;
use crate::config::Device;

/// Intra-op thread count for CPU execution
const INTRA_THREADS: usize = 4;

/// Predictor backed by an ONNX Runtime session
#[derive(Clone)]
pub struct OnnxPredictor {
    /// ONNX Runtime session (shared, locked per call)
    session: Arc<Mutex<Session>>,
    /// Declared model input names, in order
    input_names: Vec<String>,
    /// Device the session ended up on
    device: Device,
}

impl std::fmt::Debug for OnnxPredictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxPredictor")
            .field("input_names", &self.input_names)
            .field("device", &self.device)
            .finish_non_exhaustive()
    }
}

impl OnnxPredictor {
    /// Load an ONNX model for the requested device
    ///
    /// `Device::Gpu` tries the CUDA execution provider first and falls back to
    /// CPU when it cannot be initialized.
    ///
    /// # Errors
    /// Returns error if the model file is missing or ONNX Runtime rejects it.
    pub fn new<P: AsRef<Path>>(model_path: P, device: Device) -> Result<Self> {
        let model_path = model_path.as_ref();
        if !model_path.exists() {
            anyhow::bail!("ONNX model file not found: {}", model_path.display());
        }

        info!(
            "Loading predictor model from {} ({})",
            model_path.display(),
            device
        );

        let (session, device) = match device {
            Device::Gpu => match Self::build_cuda_session(model_path) {
                Ok(session) => {
                    info!("CUDA execution provider initialized");
                    (session, Device::Gpu)
                }
                Err(e) => {
                    warn!("CUDA execution provider failed: {}", e);
                    warn!("Falling back to CPU execution provider");
                    (Self::build_cpu_session(model_path)?, Device::Cpu)
                }
            },
            Device::Cpu => (Self::build_cpu_session(model_path)?, Device::Cpu),
        };

        let input_names: Vec<String> = session
            .inputs
            .iter()
            .map(|input| input.name.clone())
            .collect();
        debug!("Predictor inputs: {:?}", input_names);

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            input_names,
            device,
        })
    }

    fn build_cuda_session(model_path: &Path) -> Result<Session> {
        Session::builder()
            .context("Failed to create session builder")?
            .with_execution_providers([CUDAExecutionProvider::default()
                .build()
                .error_on_failure()])
            .context("Failed to set CUDA execution provider")?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .context("Failed to set optimization level")?
            .commit_from_file(model_path)
            .context(format!(
                "Failed to load ONNX model from {}",
                model_path.display()
            ))
    }

    fn build_cpu_session(model_path: &Path) -> Result<Session> {
        Session::builder()
            .context("Failed to create session builder")?
            .with_execution_providers([CPUExecutionProvider::default().build()])
            .context("Failed to set CPU execution provider")?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .context("Failed to set optimization level")?
            .with_intra_threads(INTRA_THREADS)
            .context("Failed to set intra threads")?
            .commit_from_file(model_path)
            .context(format!(
                "Failed to load ONNX model from {}",
                model_path.display()
            ))
    }

    /// Declared model input names
    pub fn input_names(&self) -> &[String] {
        &self.input_names
    }

    /// Device the session runs on
    pub fn device(&self) -> Device {
        self.device
    }
}

impl Predictor for OnnxPredictor {
    fn predict(&self, inputs: &[ArrayD<f32>]) -> Result<Vec<ArrayD<f32>>> {
        if inputs.len() != self.input_names.len() {
            anyhow::bail!(
                "Model expects {} inputs, got {}",
                self.input_names.len(),
                inputs.len()
            );
        }

        let mut bound = Vec::with_capacity(inputs.len());
        for (name, tensor) in self.input_names.iter().zip(inputs) {
            let value = Value::from_array(tensor.clone())
                .context(format!("Failed to create input tensor '{}'", name))?;
            bound.push((name.clone(), value));
        }

        let mut session = self
            .session
            .lock()
            .map_err(|_| anyhow!("Predictor session lock poisoned"))?;
        let output_count = session.outputs.len();
        let outputs = session.run(bound).context("Inference failed")?;

        let mut results = Vec::with_capacity(output_count);
        for i in 0..output_count {
            let array = outputs[i]
                .try_extract_array::<f32>()
                .context("Failed to extract output tensor")?;
            debug!("Output {} shape: {:?}", i, array.shape());
            results.push(array.to_owned());
        }

        Ok(results)
    }
}
