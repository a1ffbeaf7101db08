use super::{Player, ENDGAME_THRESHOLD};
use crate::error::WordleError;
use crate::matrix::Matrix;
use crate::posterior::Posterior;
use crate::word::Word;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;

const CACHE_SIZE: usize = 1024;

/// Ranks every remaining guess by the entropy of the outcome distribution it
/// induces and plays the highest-scoring one. One step of lookahead: it
/// never considers what a guess sets up for the turn after.
pub struct Greedy {
    matrix: Arc<Matrix>,
    posterior: Posterior,
    cache: LruCache<u64, usize>,
}

impl Greedy {
    pub fn new(matrix: Arc<Matrix>) -> Greedy {
        let posterior = Posterior::initial(matrix.clone());
        Greedy {
            matrix,
            posterior,
            cache: LruCache::new(NonZeroUsize::new(CACHE_SIZE).unwrap()),
        }
    }

    fn best_guess_column(&mut self) -> usize {
        let fp = self.posterior.fingerprint();
        if let Some(&g) = self.cache.get(&fp) {
            return g;
        }
        let started = std::time::Instant::now();
        let g = self
            .posterior
            .all_candidate_entropies()
            .first()
            .map(|&(g, _)| g)
            .expect("posterior is never empty");
        log::debug!(
            "greedy: ranked {} candidates over {} survivors in {:?}",
            self.matrix.num_guesses(),
            self.posterior.len(),
            started.elapsed()
        );
        self.cache.put(fp, g);
        g
    }
}

impl Player for Greedy {
    fn posterior(&self) -> &Posterior {
        &self.posterior
    }

    fn reset(&mut self) {
        self.posterior = Posterior::initial(self.matrix.clone());
    }

    fn next_guess(&mut self) -> Word {
        if self.posterior.len() <= ENDGAME_THRESHOLD {
            return self.posterior.first_survivor();
        }
        let g = self.best_guess_column();
        self.matrix.guesses()[g]
    }

    fn observe(&mut self, guess: Word, code: u8) -> Result<(), WordleError> {
        let g = self.matrix.guess_index(&guess)?;
        self.posterior = self.posterior.filter(code, g)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{encode, score};
    use crate::word::Word;

    fn w(s: &str) -> Word {
        Word::parse(s).unwrap()
    }

    fn small_matrix() -> Arc<Matrix> {
        let solutions = vec![w("crate"), w("trace"), w("slate"), w("board"), w("fusil")];
        let guesses = solutions.clone();
        Arc::new(Matrix::build(&solutions, &guesses, None))
    }

    #[test]
    fn converges_to_the_solution() {
        let matrix = small_matrix();
        let mut player = Greedy::new(matrix.clone());
        let solution = w("crate");
        for _ in 0..6 {
            let guess = player.next_guess();
            let code = encode(&score(&solution, &guess));
            player.observe(guess, code).unwrap();
            if guess == solution {
                return;
            }
        }
        panic!("greedy player failed to converge within 6 guesses");
    }

    #[test]
    fn endgame_skips_ranking_once_two_or_fewer_survive() {
        let matrix = small_matrix();
        let mut player = Greedy::new(matrix.clone());
        // Narrow down to exactly two survivors by hand, then check the next
        // guess is simply the lexicographically first one rather than
        // whatever maximizes entropy.
        let g = matrix.guess_index(&w("fusil")).unwrap();
        let all_absent_code = matrix.get(matrix.solutions().iter().position(|&s| s == w("board")).unwrap(), g);
        player.observe(w("fusil"), all_absent_code).unwrap();
        if player.posterior().len() <= 2 {
            let guess = player.next_guess();
            assert_eq!(guess, player.posterior().first_survivor());
        }
    }

    #[test]
    fn reset_restores_the_full_posterior() {
        let matrix = small_matrix();
        let mut player = Greedy::new(matrix.clone());
        let guess = player.next_guess();
        player.observe(guess, 0).ok();
        player.reset();
        assert_eq!(player.posterior().len(), matrix.num_solutions());
    }
}
