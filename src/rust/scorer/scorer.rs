use std::sync::Arc;

use log::debug;

use super::builder::ScorerBuilder;
use super::error::ScorerError;
use super::model::ScoringModel;
use super::preprocess::{preprocess, Sequence, SEQUENCE_LENGTH};
use super::vocabulary::Vocabulary;
use super::ScorerInfo;

/// A thread-safe text scorer: vocabulary lookup, fixed-width padding and a
/// single model call.
///
/// Both the vocabulary and the model are immutable once built and held
/// behind `Arc`, so cloning a `Scorer` is cheap and clones share state.
///
/// ```rust
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use fraudguard::{Scorer, ScorerError, ScoringModel, Sequence, Vocabulary};
///
/// #[derive(Debug)]
/// struct AlwaysHalf;
///
/// impl ScoringModel for AlwaysHalf {
///     fn predict(&self, _sequence: &Sequence) -> Result<f32, ScorerError> {
///         Ok(0.5)
///     }
/// }
///
/// let scorer = Scorer::builder()
///     .with_model(AlwaysHalf)?
///     .with_vocabulary(Vocabulary::from_tokens(vec!["", "[UNK]", "urgent"]))?
///     .build()?;
///
/// assert_eq!(scorer.score("urgent: reply now")?, 0.5);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Scorer {
    pub(crate) model_path: Option<String>,
    pub(crate) vocabulary_path: Option<String>,
    pub(crate) vocabulary: Arc<Vocabulary>,
    pub(crate) model: Arc<dyn ScoringModel>,
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<Scorer>();
    }
};

impl Scorer {
    /// Creates a new ScorerBuilder for fluent construction
    pub fn builder() -> ScorerBuilder {
        ScorerBuilder::new()
    }

    /// Returns information about the scorer's loaded resources
    pub fn info(&self) -> ScorerInfo {
        ScorerInfo {
            model_path: self.model_path.clone(),
            vocabulary_path: self.vocabulary_path.clone(),
            vocabulary_size: self.vocabulary.len(),
            sequence_length: SEQUENCE_LENGTH,
        }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Converts `text` into the model's input sequence without scoring it.
    pub fn preprocess(&self, text: &str) -> Sequence {
        preprocess(text, &self.vocabulary)
    }

    /// Scores a single text.
    ///
    /// Empty text is valid input and is scored as an all-padding sequence.
    pub fn score(&self, text: &str) -> Result<f32, ScorerError> {
        let sequence = self.preprocess(text);
        debug!(
            "Preprocessed {} tokens into a sequence of {}",
            sequence.token_count(),
            SEQUENCE_LENGTH
        );
        self.model.predict(&sequence)
    }
}
