use serde::Serialize;

mod error;
mod model;
mod preprocess;
mod scorer;
mod vocabulary;
pub mod builder;

pub use builder::ScorerBuilder;
pub use error::{LoadError, ScorerError};
pub use model::{OnnxModel, ScoringModel};
pub use preprocess::{preprocess, Sequence, SEQUENCE_LENGTH};
pub use scorer::Scorer;
pub use vocabulary::{Vocabulary, OOV_INDEX, PAD_INDEX};

/// Information about the resources a scorer was built from
#[derive(Debug, Clone, Serialize)]
pub struct ScorerInfo {
    /// Path to the ONNX model file, if the model was loaded from disk
    pub model_path: Option<String>,
    /// Path to the vocabulary file, if it was loaded from disk
    pub vocabulary_path: Option<String>,
    /// Number of distinct tokens in the vocabulary
    pub vocabulary_size: usize,
    /// Width of every sequence handed to the model
    pub sequence_length: usize,
}
