use crate::error::WordleError;
use crate::pattern::{encode, score};
use crate::word::{Word, L};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::{Read, Write};
use std::path::Path;

const MAGIC: [u8; 4] = *b"WRDM";
const VERSION: u16 = 1;

#[derive(Serialize, Deserialize)]
struct Header {
    magic: [u8; 4],
    version: u16,
    l: u8,
    s: u32,
    a: u32,
}

#[derive(Serialize, Deserialize)]
struct Meta {
    header: Header,
    solutions: Vec<([u8; L], f64)>,
    guesses: Vec<[u8; L]>,
}

/// The dense S×A outcome matrix: M[s, g] is the pattern code produced by
/// guessing `guesses[g]` when the true solution is `solutions[s]`.
///
/// Stored column-major (`data[g * S + s]`) so that `column` can return a
/// contiguous slice and the parallel build can hand out whole columns.
#[derive(Debug)]
pub struct Matrix {
    solutions: Vec<Word>,
    solution_weights: Vec<f64>,
    guesses: Vec<Word>,
    guess_index: HashMap<Word, usize>,
    data: Vec<u8>,
}

impl Matrix {
    pub fn solutions(&self) -> &[Word] {
        &self.solutions
    }

    pub fn solution_weights(&self) -> &[f64] {
        &self.solution_weights
    }

    pub fn guesses(&self) -> &[Word] {
        &self.guesses
    }

    pub fn num_solutions(&self) -> usize {
        self.solutions.len()
    }

    pub fn num_guesses(&self) -> usize {
        self.guesses.len()
    }

    pub fn guess_index(&self, word: &Word) -> Result<usize, WordleError> {
        self.guess_index
            .get(word)
            .copied()
            .ok_or_else(|| WordleError::UnknownGuess {
                word: word.to_string(),
            })
    }

    #[inline]
    pub fn get(&self, s: usize, g: usize) -> u8 {
        self.data[g * self.solutions.len() + s]
    }

    /// O(1) view of one guess column across every solution row.
    pub fn column(&self, g: usize) -> &[u8] {
        let n = self.solutions.len();
        &self.data[g * n..(g + 1) * n]
    }

    /// Iterates `(survivor_index, code)` for a guess column restricted to a
    /// survivor set, without materializing a new column.
    pub fn row_restricted_column<'a>(
        &'a self,
        g: usize,
        survivors: &'a [u32],
    ) -> impl Iterator<Item = (u32, u8)> + 'a {
        let column = self.column(g);
        survivors.iter().map(move |&s| (s, column[s as usize]))
    }

    /// Builds the matrix, scoring every (solution, guess) pair. Guess
    /// columns are independent and are filled in parallel.
    pub fn build(solutions: &[Word], guesses: &[Word], weights: Option<&[f64]>) -> Matrix {
        let s_len = solutions.len();
        let a_len = guesses.len();
        let mut data = vec![0u8; s_len * a_len];

        data.par_chunks_mut(s_len).enumerate().for_each(|(g, col)| {
            for (s, slot) in col.iter_mut().enumerate() {
                *slot = encode(&score(&solutions[s], &guesses[g]));
            }
        });

        let solution_weights = match weights {
            Some(w) => {
                assert_eq!(w.len(), s_len, "weights must align with solutions");
                w.to_vec()
            }
            None => vec![1.0; s_len],
        };

        let guess_index = guesses
            .iter()
            .enumerate()
            .map(|(i, &w)| (w, i))
            .collect();

        Matrix {
            solutions: solutions.to_vec(),
            solution_weights,
            guesses: guesses.to_vec(),
            guess_index,
            data,
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), WordleError> {
        let meta = Meta {
            header: Header {
                magic: MAGIC,
                version: VERSION,
                l: L as u8,
                s: self.solutions.len() as u32,
                a: self.guesses.len() as u32,
            },
            solutions: self
                .solutions
                .iter()
                .zip(self.solution_weights.iter())
                .map(|(w, &weight)| (*w.as_bytes(), weight))
                .collect(),
            guesses: self.guesses.iter().map(|w| *w.as_bytes()).collect(),
        };

        let mut file = std::fs::File::create(path.as_ref()).map_err(|_| WordleError::CorruptMatrix {
            reason: "could not create matrix file",
        })?;
        bincode::serialize_into(&mut file, &meta).map_err(|_| WordleError::CorruptMatrix {
            reason: "failed to encode matrix header",
        })?;
        file.write_all(&self.data).map_err(|_| WordleError::CorruptMatrix {
            reason: "failed to write matrix body",
        })?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Matrix, WordleError> {
        let mut file = std::fs::File::open(path.as_ref()).map_err(|_| WordleError::CorruptMatrix {
            reason: "could not open matrix file",
        })?;

        let meta: Meta = bincode::deserialize_from(&mut file).map_err(|_| WordleError::CorruptMatrix {
            reason: "failed to decode matrix header",
        })?;

        if meta.header.magic != MAGIC || meta.header.version != VERSION || meta.header.l as usize != L {
            return Err(WordleError::CorruptMatrix {
                reason: "magic/version/word-length mismatch",
            });
        }
        if meta.header.s as usize != meta.solutions.len() || meta.header.a as usize != meta.guesses.len() {
            return Err(WordleError::CorruptMatrix {
                reason: "header solution/guess counts do not match the encoded lists",
            });
        }

        let s_len = meta.solutions.len();
        let a_len = meta.guesses.len();
        let mut data = Vec::new();
        file.read_to_end(&mut data).map_err(|_| WordleError::CorruptMatrix {
            reason: "failed to read matrix body",
        })?;
        if data.len() != s_len * a_len {
            return Err(WordleError::CorruptMatrix {
                reason: "matrix body length does not match S*A",
            });
        }

        let solutions: Vec<Word> = meta
            .solutions
            .iter()
            .map(|(bytes, _)| bytes_to_word(bytes))
            .collect::<Result<_, _>>()?;
        let solution_weights = meta.solutions.iter().map(|(_, w)| *w).collect();
        let guesses: Vec<Word> = meta
            .guesses
            .iter()
            .map(bytes_to_word)
            .collect::<Result<_, _>>()?;
        let guess_index = guesses.iter().enumerate().map(|(i, &w)| (w, i)).collect();

        Ok(Matrix {
            solutions,
            solution_weights,
            guesses,
            guess_index,
            data,
        })
    }
}

fn bytes_to_word(bytes: &[u8; L]) -> Result<Word, WordleError> {
    let s = std::str::from_utf8(bytes).map_err(|_| WordleError::CorruptMatrix {
        reason: "non-UTF8 word bytes in matrix blob",
    })?;
    Word::parse(s).map_err(|_| WordleError::CorruptMatrix {
        reason: "invalid word bytes in matrix blob",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(s: &str) -> Word {
        Word::parse(s).unwrap()
    }

    fn small_matrix() -> Matrix {
        let solutions = vec![w("crate"), w("trace"), w("slate"), w("board")];
        let guesses = vec![w("crate"), w("trace"), w("slate"), w("board"), w("fusil")];
        Matrix::build(&solutions, &guesses, None)
    }

    #[test]
    fn matches_direct_scoring() {
        let m = small_matrix();
        for (s, &solution) in m.solutions().iter().enumerate() {
            for (g, &guess) in m.guesses().iter().enumerate() {
                assert_eq!(m.get(s, g), encode(&score(&solution, &guess)));
            }
        }
    }

    #[test]
    fn self_solve_is_terminal() {
        let m = small_matrix();
        for (i, &word) in m.solutions().iter().enumerate() {
            let g = m.guess_index(&word).unwrap();
            assert_eq!(m.get(i, g), crate::pattern::TERMINAL_CODE);
        }
    }

    #[test]
    fn column_matches_get() {
        let m = small_matrix();
        let g = m.guess_index(&w("fusil")).unwrap();
        let column = m.column(g);
        for s in 0..m.num_solutions() {
            assert_eq!(column[s], m.get(s, g));
        }
    }

    #[test]
    fn row_restricted_column_subsets_correctly() {
        let m = small_matrix();
        let g = m.guess_index(&w("trace")).unwrap();
        let survivors = vec![0u32, 2];
        let restricted: Vec<_> = m.row_restricted_column(g, &survivors).collect();
        assert_eq!(restricted, vec![(0, m.get(0, g)), (2, m.get(2, g))]);
    }

    #[test]
    fn round_trips_through_disk() {
        let m = small_matrix();
        let path = std::env::temp_dir().join("wordle_entropy_test_matrix.bin");
        m.save(&path).unwrap();
        let loaded = Matrix::load(&path).unwrap();
        assert_eq!(loaded.num_solutions(), m.num_solutions());
        assert_eq!(loaded.num_guesses(), m.num_guesses());
        for s in 0..m.num_solutions() {
            for g in 0..m.num_guesses() {
                assert_eq!(loaded.get(s, g), m.get(s, g));
            }
        }
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn load_rejects_bad_magic() {
        let path = std::env::temp_dir().join("wordle_entropy_test_bad_matrix.bin");
        std::fs::write(&path, b"not a matrix blob at all").unwrap();
        let err = Matrix::load(&path).unwrap_err();
        assert!(matches!(err, WordleError::CorruptMatrix { .. }));
        std::fs::remove_file(&path).ok();
    }
}
