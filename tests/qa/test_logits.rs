// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Logit split, softmax and argmax properties

use fabstir_transcode::qa::{argmax, softmax, softmax_slice, split_logits};
use fabstir_transcode::TranscodeError;
use ndarray::{Array2, Array3, Axis};

#[test]
fn test_split_separates_interleaved_streams() {
    // [1, 5, 2]: start logits are 0..5, end logits are 10..15
    let flat: Vec<f32> = (0..5).flat_map(|i| [i as f32, 10.0 + i as f32]).collect();
    let output = Array3::from_shape_vec((1, 5, 2), flat).unwrap().into_dyn();

    let (start, end) = split_logits(output.view()).unwrap();
    assert_eq!(start.shape(), &[1, 5]);
    assert_eq!(end.shape(), &[1, 5]);
    assert_eq!(start.row(0).to_vec(), vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    assert_eq!(end.row(0).to_vec(), vec![10.0, 11.0, 12.0, 13.0, 14.0]);
}

#[test]
fn test_split_keeps_batch_axis() {
    let output = Array3::<f32>::ones((3, 8, 2)).into_dyn();
    let (start, end) = split_logits(output.view()).unwrap();
    assert_eq!(start.shape(), &[3, 8]);
    assert_eq!(end.shape(), &[3, 8]);
}

#[test]
fn test_split_rejects_bad_shapes() {
    for shape in [vec![1, 5], vec![1, 5, 3], vec![1, 1, 5, 2]] {
        let output = ndarray::ArrayD::<f32>::zeros(ndarray::IxDyn(&shape));
        match split_logits(output.view()) {
            Err(TranscodeError::ShapeMismatch { actual, .. }) => assert_eq!(actual, shape),
            other => panic!("expected ShapeMismatch, got {:?}", other),
        }
    }
}

#[test]
fn test_softmax_is_a_distribution() {
    let inputs: [&[f32]; 5] = [
        &[0.0],
        &[1.0, 2.0, 3.0],
        &[-50.0, 0.0, 50.0, 88.0],
        &[3.3, 3.3, 3.3, 3.3, 3.3],
        &[-1e-3, 7.5, -12.0, 0.25, 4.0, 9.0],
    ];

    for logits in inputs {
        let probs = softmax_slice(logits);
        assert_eq!(probs.len(), logits.len());
        assert!(probs.iter().all(|&p| (0.0..=1.0).contains(&p)));
        let sum: f32 = probs.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5, "sum {} for {:?}", sum, logits);
    }
}

#[test]
fn test_softmax_preserves_argmax() {
    let logits = Array2::from_shape_vec((1, 6), vec![0.3, -2.0, 4.1, 4.0, 1.0, 0.0]).unwrap();
    let probs = softmax(logits.view());
    let row = probs.index_axis(Axis(0), 0).to_vec();
    assert_eq!(argmax(&row).unwrap(), 2);
}

#[test]
fn test_argmax_returns_first_maximum() {
    assert_eq!(argmax(&[0.25, 0.25, 0.25, 0.25]).unwrap(), 0);
    assert_eq!(argmax(&[0.1, 0.45, 0.45]).unwrap(), 1);
}

#[test]
fn test_argmax_empty_sequence() {
    assert_eq!(
        argmax(&[]),
        Err(TranscodeError::EmptyInput("argmax over an empty sequence"))
    );
}

#[test]
fn test_argmax_rejects_nan() {
    assert_eq!(
        argmax(&[f32::NAN, 9.0]),
        Err(TranscodeError::NonFiniteValue { index: 0 })
    );
}
