#![allow(dead_code)]

pub mod onnx;

use fraudguard::{Scorer, ScorerError, ScoringModel, Sequence, Vocabulary, OOV_INDEX};

/// Deterministic stand-in for the ONNX model: the share of OOV tokens.
#[derive(Debug)]
pub struct OovShareModel;

impl ScoringModel for OovShareModel {
    fn predict(&self, sequence: &Sequence) -> Result<f32, ScorerError> {
        let tokens = &sequence.as_slice()[..sequence.token_count()];
        if tokens.is_empty() {
            return Ok(0.0);
        }
        let unknown = tokens.iter().filter(|&&i| i == OOV_INDEX).count();
        Ok(unknown as f32 / tokens.len() as f32)
    }
}

#[derive(Debug)]
pub struct BrokenModel;

impl ScoringModel for BrokenModel {
    fn predict(&self, _sequence: &Sequence) -> Result<f32, ScorerError> {
        Err(ScorerError::ModelError("Failed to run model: output buffer missing".into()))
    }
}

#[derive(Debug)]
pub struct PanickingModel;

impl ScoringModel for PanickingModel {
    fn predict(&self, _sequence: &Sequence) -> Result<f32, ScorerError> {
        panic!("kernel fault")
    }
}

pub fn test_vocabulary() -> Vocabulary {
    Vocabulary::from_tokens(vec!["", "[UNK]", "hello", "world", "your", "account"])
}

pub fn scorer_with(model: impl ScoringModel + 'static) -> Scorer {
    Scorer::builder()
        .with_model(model)
        .expect("model")
        .with_vocabulary(test_vocabulary())
        .expect("vocabulary")
        .build()
        .expect("Failed to create scorer")
}
