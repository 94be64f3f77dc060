//! Parser configuration.

use crate::error::{Error, Result};

/// Tunables shared by every grammar rule of one parser.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParserConfig {
    /// Deepest nesting of comments, quoted strings, angle addresses and
    /// groups that will be entered. Openers found beyond this depth are
    /// treated as ordinary text.
    pub max_nesting_depth: usize,
    /// Decode RFC 2047 encoded-words in phrases and unstructured values.
    pub decode_encoded_words: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            max_nesting_depth: 64,
            decode_encoded_words: true,
        }
    }
}

impl ParserConfig {
    /// Check that every value is usable.
    pub fn validate(&self) -> Result<()> {
        if self.max_nesting_depth == 0 {
            return Err(Error::InvalidConfig("max_nesting_depth must be at least 1".into()));
        }
        Ok(())
    }

    /// Set the nesting ceiling.
    pub fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }

    /// Enable or disable encoded-word decoding.
    pub fn with_encoded_words(mut self, decode: bool) -> Self {
        self.decode_encoded_words = decode;
        self
    }
}
