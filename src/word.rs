use crate::error::WordleError;
use std::fmt;

/// Fixed word length; the design generalizes but this crate fixes L = 5.
pub const L: usize = 5;

/// An immutable, validated, lowercase-ASCII-canonicalized five-letter word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Word([u8; L]);

impl Word {
    /// Validates and canonicalizes a word: rejects anything whose trimmed
    /// length isn't `L` or that contains a non-alphabetic byte.
    pub fn parse(raw: &str) -> Result<Self, WordleError> {
        let trimmed = raw.trim();
        if trimmed.len() != L {
            return Err(WordleError::BadWord {
                word: trimmed.to_string(),
                reason: "word must be exactly 5 letters",
            });
        }
        let mut bytes = [0u8; L];
        for (i, b) in trimmed.bytes().enumerate() {
            if !b.is_ascii_alphabetic() {
                return Err(WordleError::BadWord {
                    word: trimmed.to_string(),
                    reason: "word must contain only letters",
                });
            }
            bytes[i] = b.to_ascii_lowercase();
        }
        Ok(Word(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; L] {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        // Safe: every byte was checked to be ASCII alphabetic at construction.
        std::str::from_utf8(&self.0).expect("Word bytes are always valid ASCII")
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for Word {
    type Error = WordleError;

    fn try_from(raw: &str) -> Result<Self, Self::Error> {
        Word::parse(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_five_letter_words_case_insensitively() {
        assert_eq!(Word::parse("CRATE").unwrap().as_str(), "crate");
        assert_eq!(Word::parse("crate").unwrap().as_str(), "crate");
        assert_eq!(Word::parse("  crate  ").unwrap().as_str(), "crate");
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(Word::parse("cat").is_err());
        assert!(Word::parse("crates").is_err());
    }

    #[test]
    fn rejects_non_alphabetic() {
        assert!(Word::parse("cr4te").is_err());
        assert!(Word::parse("cr-te").is_err());
    }
}
