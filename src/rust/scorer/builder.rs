use std::path::Path;
use std::sync::Arc;

use log::info;

use super::error::ScorerError;
use super::model::{OnnxModel, ScoringModel};
use super::scorer::Scorer;
use super::vocabulary::Vocabulary;
use crate::artifacts::verify_file;
use crate::runtime::RuntimeConfig;

/// A builder for constructing a Scorer with a fluent interface.
///
/// Both a model and a vocabulary must be supplied, either loaded from files
/// or handed over directly.
#[derive(Default, Debug)]
pub struct ScorerBuilder {
    model_path: Option<String>,
    vocabulary_path: Option<String>,
    model: Option<Arc<dyn ScoringModel>>,
    vocabulary: Option<Vocabulary>,
    runtime_config: RuntimeConfig,
}

impl ScorerBuilder {
    /// Creates a new empty ScorerBuilder instance with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the runtime configuration used when loading an ONNX model file.
    ///
    /// Must be called before [`with_model_file`](Self::with_model_file) to take effect.
    ///
    /// # Example
    /// ```
    /// use fraudguard::{ScorerBuilder, RuntimeConfig};
    ///
    /// let builder = ScorerBuilder::new()
    ///     .with_runtime_config(RuntimeConfig::default().with_threads(2, 1));
    /// ```
    pub fn with_runtime_config(mut self, config: RuntimeConfig) -> Self {
        self.runtime_config = config;
        self
    }

    /// Loads the ONNX model at `model_path`.
    ///
    /// When `expected_sha256` is given the file is hashed first and a mismatch
    /// aborts the load.
    ///
    /// # Returns
    /// * `Result<Self, ScorerError>` - The builder instance if successful, or an error if:
    ///   - A model is already set
    ///   - The file is missing or its checksum does not match
    ///   - ONNX Runtime fails to load it or the model structure is invalid
    pub fn with_model_file(
        mut self,
        model_path: impl AsRef<Path>,
        expected_sha256: Option<&str>,
    ) -> Result<Self, ScorerError> {
        if self.model.is_some() {
            return Err(ScorerError::BuildError("Model already set".to_string()));
        }
        let model_path = model_path.as_ref();
        if let Some(hash) = expected_sha256 {
            verify_file(model_path, hash, "model")?;
        }

        let model = OnnxModel::load(model_path, &self.runtime_config)?;
        info!("Model loaded successfully");

        self.model_path = Some(model_path.to_string_lossy().to_string());
        self.model = Some(Arc::new(model));
        Ok(self)
    }

    /// Uses an already constructed model, e.g. a fake in tests.
    pub fn with_model(mut self, model: impl ScoringModel + 'static) -> Result<Self, ScorerError> {
        if self.model.is_some() {
            return Err(ScorerError::BuildError("Model already set".to_string()));
        }
        self.model = Some(Arc::new(model));
        Ok(self)
    }

    /// Loads the vocabulary JSON array at `vocabulary_path`.
    ///
    /// # Returns
    /// * `Result<Self, ScorerError>` - The builder instance if successful, or an error if:
    ///   - A vocabulary is already set
    ///   - The file is missing or its checksum does not match
    ///   - The file is not a JSON array of strings
    pub fn with_vocabulary_file(
        mut self,
        vocabulary_path: impl AsRef<Path>,
        expected_sha256: Option<&str>,
    ) -> Result<Self, ScorerError> {
        if self.vocabulary.is_some() {
            return Err(ScorerError::BuildError("Vocabulary already set".to_string()));
        }
        let vocabulary_path = vocabulary_path.as_ref();
        if let Some(hash) = expected_sha256 {
            verify_file(vocabulary_path, hash, "vocabulary")?;
        }

        let vocabulary = Vocabulary::from_file(vocabulary_path)?;
        self.vocabulary_path = Some(vocabulary_path.to_string_lossy().to_string());
        self.vocabulary = Some(vocabulary);
        Ok(self)
    }

    /// Uses an already constructed vocabulary.
    ///
    /// # Example
    /// ```
    /// use fraudguard::{ScorerBuilder, Vocabulary};
    ///
    /// let builder = ScorerBuilder::new()
    ///     .with_vocabulary(Vocabulary::from_tokens(vec!["", "[UNK]", "prize"]));
    /// assert!(builder.is_ok());
    /// ```
    pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Result<Self, ScorerError> {
        if self.vocabulary.is_some() {
            return Err(ScorerError::BuildError("Vocabulary already set".to_string()));
        }
        self.vocabulary = Some(vocabulary);
        Ok(self)
    }

    /// Builds and returns the final Scorer instance
    ///
    /// # Returns
    /// * `Result<Scorer, ScorerError>` - The constructed Scorer if successful, or an error if
    ///   the model or the vocabulary is missing
    pub fn build(self) -> Result<Scorer, ScorerError> {
        let model = self
            .model
            .ok_or_else(|| ScorerError::BuildError("No model loaded".into()))?;
        let vocabulary = self
            .vocabulary
            .ok_or_else(|| ScorerError::BuildError("No vocabulary loaded".into()))?;

        Ok(Scorer {
            model_path: self.model_path,
            vocabulary_path: self.vocabulary_path,
            vocabulary: Arc::new(vocabulary),
            model,
        })
    }
}
