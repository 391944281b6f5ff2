// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Sequence padding and QA input framing tests

use fabstir_transcode::qa::sequence::{PAD_TOKEN, SEP_TOKEN};
use fabstir_transcode::qa::{build_qa_input, pad, BasicTokenizer, TokenSequence, Vocabulary};
use fabstir_transcode::TranscodeError;
use std::io::Write;

fn bbc_vocab() -> Vocabulary {
    Vocabulary::from_tokens([
        "[PAD]", "[UNK]", "[CLS]", "[SEP]", "when", "did", "bbc", "japan", "start",
        "broadcasting", "?", "between", "december", "2004", "and", "april", "2006", ".",
    ])
}

#[test]
fn test_pad_round_trip() {
    let original = vec!["a", "b", "c"];
    for target in [3, 4, 10, 384] {
        let padded = pad(&original, "[PAD]", target);
        assert_eq!(padded.len(), target);
        assert_eq!(&padded[..original.len()], original.as_slice());
        assert!(padded[original.len()..].iter().all(|t| *t == "[PAD]"));
    }
}

#[test]
fn test_pad_never_truncates() {
    let original = vec![1, 2, 3, 4, 5];
    assert_eq!(pad(&original, 0, 2), original);
    assert_eq!(pad(&original, 0, 5), original);
}

#[test]
fn test_pad_empty_sequence() {
    assert_eq!(pad::<f32>(&[], 1.0, 3), vec![1.0, 1.0, 1.0]);
    assert!(pad::<f32>(&[], 1.0, 0).is_empty());
}

#[test]
fn test_token_sequence_padding_keeps_original() {
    let seq = TokenSequence::from(vec!["[CLS]", "bbc"]);
    let padded = seq.padded(PAD_TOKEN, 4);
    assert_eq!(seq.len(), 2);
    assert_eq!(padded.len(), 4);
    assert_eq!(padded[3], PAD_TOKEN);
}

#[test]
fn test_qa_input_for_bbc_question() {
    let input = build_qa_input(
        &BasicTokenizer,
        &bbc_vocab(),
        "When did BBC Japan start broadcasting?",
        "Between December 2004 and April 2006.",
        32,
    )
    .unwrap();

    // 7 question tokens + 7 paragraph tokens
    assert_eq!(input.valid_length.to_vec(), vec![14.0]);
    assert_eq!(input.tokens.len(), 32);
    assert_eq!(input.tokens[0], "[CLS]");
    assert_eq!(input.tokens[8], SEP_TOKEN);
    assert_eq!(input.tokens[16], SEP_TOKEN);
    assert_eq!(input.tokens[17], PAD_TOKEN);

    let types = input.token_types.row(0).to_vec();
    assert!(types[..7].iter().all(|&t| t == 0.0));
    assert!(types[7..14].iter().all(|&t| t == 1.0));
    assert!(types[14..].iter().all(|&t| t == 0.0));

    // [CLS] when ...
    assert_eq!(input.input_ids[[0, 0]], 2.0);
    assert_eq!(input.input_ids[[0, 1]], 4.0);
    assert_eq!(input.input_ids[[0, 31]], 0.0);
}

#[test]
fn test_qa_input_too_long() {
    let err = build_qa_input(
        &BasicTokenizer,
        &bbc_vocab(),
        "when did bbc japan start broadcasting?",
        "between december 2004 and april 2006.",
        16,
    )
    .unwrap_err();
    assert_eq!(
        err.downcast_ref::<TranscodeError>(),
        Some(&TranscodeError::SequenceTooLong { len: 17, max: 16 })
    );
}

#[test]
fn test_qa_input_with_vocab_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"idx_to_token": ["[PAD]", "[UNK]", "[CLS]", "[SEP]", "bbc"]}}"#
    )
    .unwrap();

    let vocab = Vocabulary::from_json_file(file.path()).unwrap();
    let input = build_qa_input(&BasicTokenizer, &vocab, "BBC", "japan", 6).unwrap();
    let ids: Vec<f32> = input.input_ids.row(0).to_vec();
    assert_eq!(ids, vec![2.0, 4.0, 3.0, 1.0, 3.0, 0.0]);
}
