use super::vocabulary::{Vocabulary, PAD_INDEX};

/// Width of the index sequence the model was trained on.
pub const SEQUENCE_LENGTH: usize = 100;

/// A fixed-width row of vocabulary indices, ready to be fed to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sequence([i64; SEQUENCE_LENGTH]);

impl Sequence {
    pub fn as_slice(&self) -> &[i64] {
        &self.0
    }

    /// Number of leading positions before the first padding index.
    pub fn token_count(&self) -> usize {
        self.0.iter().take_while(|&&i| i != PAD_INDEX).count()
    }
}

impl AsRef<[i64]> for Sequence {
    fn as_ref(&self) -> &[i64] {
        &self.0
    }
}

/// Converts raw text into the index sequence expected by the model.
///
/// The text is lowercased and split on whitespace, each token is looked up
/// in `vocabulary` (unknown tokens become the OOV index), and the result is
/// right-padded with the padding index or right-truncated to
/// [`SEQUENCE_LENGTH`]. Punctuation is kept attached to its token.
///
/// # Example
/// ```
/// use fraudguard::{preprocess, Vocabulary, SEQUENCE_LENGTH};
///
/// let vocab = Vocabulary::from_tokens(vec!["", "[UNK]", "verify", "account"]);
/// let sequence = preprocess("Verify your ACCOUNT", &vocab);
/// assert_eq!(&sequence.as_slice()[..4], &[2, 1, 3, 0]);
/// assert_eq!(sequence.as_slice().len(), SEQUENCE_LENGTH);
/// ```
pub fn preprocess(text: &str, vocabulary: &Vocabulary) -> Sequence {
    let lowered = text.to_lowercase();
    let mut row = [PAD_INDEX; SEQUENCE_LENGTH];
    let tokens = lowered.split(is_separator).filter(|token| !token.is_empty());
    for (slot, token) in row.iter_mut().zip(tokens) {
        *slot = vocabulary.index_of(token);
    }
    Sequence(row)
}

/// Unicode whitespace plus the ASCII file, group, record and unit
/// separators (U+001C..=U+001F), which the training pipeline also split on.
fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}
