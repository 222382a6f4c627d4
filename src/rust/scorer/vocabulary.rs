use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::{info, warn};

use super::error::LoadError;

/// Index reserved for padding positions.
pub const PAD_INDEX: i64 = 0;
/// Index assigned to every token the vocabulary does not know.
pub const OOV_INDEX: i64 = 1;

/// Token-to-index lookup table built from the training vocabulary.
///
/// The index of a token is its position in the source list, so the first two
/// entries of a trained vocabulary are the padding and OOV placeholders and
/// real tokens start at index 2. When the list repeats a string, the last
/// position wins.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    index: HashMap<String, i64>,
    source_len: usize,
}

impl Vocabulary {
    /// Builds a vocabulary from an ordered token list.
    ///
    /// # Example
    /// ```
    /// use fraudguard::Vocabulary;
    ///
    /// let vocab = Vocabulary::from_tokens(vec!["", "[UNK]", "win", "prize"]);
    /// assert_eq!(vocab.index_of("prize"), 3);
    /// assert_eq!(vocab.index_of("lottery"), 1);
    /// ```
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut index = HashMap::new();
        let mut source_len = 0;
        for (position, token) in tokens.into_iter().enumerate() {
            index.insert(token.into(), position as i64);
            source_len = position + 1;
        }
        Self { index, source_len }
    }

    /// Loads a vocabulary from a JSON array of strings.
    ///
    /// # Errors
    /// - `NotFound` if the file does not exist
    /// - `IoError` if the file cannot be read
    /// - `InvalidVocabulary` if the content is not a JSON array of strings
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(LoadError::NotFound {
                file_type: "vocabulary".to_string(),
                path: path.display().to_string(),
            });
        }

        info!("Loading vocabulary from {:?}", path);
        let bytes = fs::read(path)?;
        let tokens: Vec<String> = serde_json::from_slice(&bytes)?;
        let vocab = Self::from_tokens(tokens);

        if vocab.is_empty() {
            warn!("Vocabulary at {:?} is empty, every token will map to the OOV index", path);
        } else if vocab.len() < vocab.source_len {
            warn!(
                "Vocabulary at {:?} has {} duplicate entries, later positions take precedence",
                path,
                vocab.source_len - vocab.len()
            );
        }
        info!("Vocabulary loaded successfully ({} entries)", vocab.source_len);
        Ok(vocab)
    }

    /// Returns the index of `token`, or [`OOV_INDEX`] when it is unknown.
    ///
    /// The lookup is exact; callers lowercase the token first.
    pub fn index_of(&self, token: &str) -> i64 {
        self.index.get(token).copied().unwrap_or(OOV_INDEX)
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Length of the list the vocabulary was built from, duplicates included.
    pub fn source_len(&self) -> usize {
        self.source_len
    }
}
