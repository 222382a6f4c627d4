use ort::Error as OrtError;
use std::fmt;

/// Represents the different types of errors that can occur while scoring a single text.
#[derive(Debug)]
pub enum ScorerError {
    /// Error occurred while loading or running the ONNX model
    ModelError(String),
    /// Error occurred during the build phase
    BuildError(String),
    /// Error occurred while making predictions
    PredictionError(String),
    /// A model or vocabulary artifact could not be loaded or verified
    LoadError(LoadError),
}

impl fmt::Display for ScorerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ModelError(msg) => write!(f, "Model error: {}", msg),
            Self::BuildError(msg) => write!(f, "Build error: {}", msg),
            Self::PredictionError(msg) => write!(f, "Prediction error: {}", msg),
            Self::LoadError(err) => write!(f, "Load error: {}", err),
        }
    }
}

impl std::error::Error for ScorerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::LoadError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<OrtError> for ScorerError {
    fn from(err: OrtError) -> Self {
        ScorerError::ModelError(err.to_string())
    }
}

/// Errors raised while loading the model artifact or the vocabulary at startup.
///
/// Every variant is fatal: the service refuses to start.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("{file_type} file not found: {path}")]
    NotFound { file_type: String, path: String },
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Vocabulary is not a JSON array of strings: {0}")]
    InvalidVocabulary(#[from] serde_json::Error),
    #[error("Failed to load model: {0}")]
    InvalidModel(String),
    #[error("Hash mismatch: expected {expected}, got {actual} for {file_type} file")]
    HashMismatch {
        file_type: String,
        expected: String,
        actual: String,
    },
}

impl From<OrtError> for LoadError {
    fn from(err: OrtError) -> Self {
        LoadError::InvalidModel(err.to_string())
    }
}

impl From<LoadError> for ScorerError {
    fn from(err: LoadError) -> Self {
        ScorerError::LoadError(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_load_error_is_kept_as_source() {
        let err: ScorerError = LoadError::NotFound {
            file_type: "vocabulary".to_string(),
            path: "/missing/vocabulary.json".to_string(),
        }
        .into();

        assert_eq!(
            err.to_string(),
            "Load error: vocabulary file not found: /missing/vocabulary.json"
        );
        let source = err.source().expect("load error source");
        assert!(matches!(
            source.downcast_ref::<LoadError>(),
            Some(LoadError::NotFound { .. })
        ));
    }

    #[test]
    fn test_load_error_chain_reaches_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = ScorerError::from(LoadError::from(io));

        let load = err.source().expect("load error");
        let io = load.source().expect("io error");
        assert!(io.downcast_ref::<std::io::Error>().is_some());
    }

    #[test]
    fn test_other_variants_have_no_source() {
        assert!(ScorerError::PredictionError("empty".into()).source().is_none());
        assert!(ScorerError::BuildError("No model loaded".into()).source().is_none());
    }
}
