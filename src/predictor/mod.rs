// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Predictor collaborator contract
//!
//! The model runtime is opaque to the transcoding core: it receives an ordered
//! list of f32 tensors and returns an ordered list of f32 tensors. Device
//! placement, model files and batching all live behind this trait.

pub mod onnx;

use anyhow::Result;
use ndarray::ArrayD;

pub use onnx::OnnxPredictor;

/// Synchronous model executor
pub trait Predictor {
    /// Run the model on `inputs` (in the model's declared input order)
    fn predict(&self, inputs: &[ArrayD<f32>]) -> Result<Vec<ArrayD<f32>>>;
}

impl<P: Predictor + ?Sized> Predictor for &P {
    fn predict(&self, inputs: &[ArrayD<f32>]) -> Result<Vec<ArrayD<f32>>> {
        (**self).predict(inputs)
    }
}

impl<P: Predictor + ?Sized> Predictor for Box<P> {
    fn predict(&self, inputs: &[ArrayD<f32>]) -> Result<Vec<ArrayD<f32>>> {
        (**self).predict(inputs)
    }
}

impl<P: Predictor + ?Sized> Predictor for std::sync::Arc<P> {
    fn predict(&self, inputs: &[ArrayD<f32>]) -> Result<Vec<ArrayD<f32>>> {
        (**self).predict(inputs)
    }
}
