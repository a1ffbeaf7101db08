use crate::error::WordleError;
use crate::word::Word;
use std::path::Path;

// Generated by build.rs from data/solutions.txt and data/guesses.txt:
//   pub const SOLUTIONS: [(&str, u32); S];   // lexicographically sorted, with frequency weight
//   pub const GUESSES: [&str; A];             // lexicographically sorted, superset of SOLUTIONS
//   pub static SOLUTION_INDEX: phf::Map<&'static str, usize>;
//   pub static GUESS_INDEX: phf::Map<&'static str, usize>;
include!(concat!(env!("OUT_DIR"), "/dictionary.rs"));

/// The default bundled solution list, as validated `Word`s in the same
/// (lexicographic) order as `SOLUTIONS`.
pub fn default_solutions() -> Vec<Word> {
    SOLUTIONS
        .iter()
        .map(|&(word, _)| Word::parse(word).expect("bundled solution list is pre-validated"))
        .collect()
}

/// The default bundled allowed-guess list, as validated `Word`s in the same
/// order as `GUESSES`.
pub fn default_guesses() -> Vec<Word> {
    GUESSES
        .iter()
        .map(|&word| Word::parse(word).expect("bundled guess list is pre-validated"))
        .collect()
}

/// Frequency-derived prior weight for the default solution list, uniform (1.0)
/// for any word not found there.
pub fn default_weight(word: &Word) -> f64 {
    SOLUTION_INDEX
        .get(word.as_str())
        .map(|&i| SOLUTIONS[i].1 as f64)
        .unwrap_or(1.0)
}

/// Loads a word list file: UTF-8 text, one word per line, blank lines
/// skipped. Any remaining line that isn't a valid `Word` is a `BAD_WORD`
/// error naming the offending line.
pub fn load_words(path: impl AsRef<Path>) -> Result<Vec<Word>, WordleError> {
    let text = std::fs::read_to_string(path.as_ref()).map_err(|_| WordleError::BadWord {
        word: path.as_ref().display().to_string(),
        reason: "could not read word-list file",
    })?;

    let mut words = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match Word::parse(line) {
            Ok(word) => words.push(word),
            Err(e) => {
                log::warn!("{}:{}: rejected word list line {line:?}: {e}", path.as_ref().display(), lineno + 1);
                return Err(e);
            }
        }
    }
    Ok(words)
}
