//! A thread-safe text scorer and the HTTP service around it.
//!
//! Text is lowercased, split on whitespace, mapped through a fixed vocabulary
//! (unknown tokens become index 1, padding is index 0) into a sequence of
//! exactly 100 indices, and scored by a binary classifier exported to ONNX.
//!
//! # Basic Usage
//!
//! ```rust,no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use fraudguard::Scorer;
//!
//! let scorer = Scorer::builder()
//!     .with_model_file("fraud_model.onnx", None)?
//!     .with_vocabulary_file("vocabulary.json", None)?
//!     .build()?;
//!
//! let score = scorer.score("Your account is suspended, verify now")?;
//! println!("Fraud score: {}", score);
//! # Ok(())
//! # }
//! ```
//!
//! # Serving
//!
//! [`server::create_router`] exposes the scorer as `POST /predict`, taking
//! `{"text": "..."}` and answering `{"score": 0.97}` or, on any failure,
//! `500` with `{"error": "..."}`.

pub mod artifacts;
pub mod config;
mod runtime;
pub mod scorer;
pub mod server;

pub use runtime::{create_session_builder, RuntimeConfig};
pub use scorer::{
    preprocess, LoadError, OnnxModel, Scorer, ScorerBuilder, ScorerError, ScorerInfo, ScoringModel,
    Sequence, Vocabulary, OOV_INDEX, PAD_INDEX, SEQUENCE_LENGTH,
};

/// Installs the `env_logger` backend, defaulting to `info` when `RUST_LOG` is unset.
pub fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}
