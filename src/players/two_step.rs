use super::{Player, ENDGAME_THRESHOLD};
use crate::error::WordleError;
use crate::matrix::Matrix;
use crate::posterior::Posterior;
use crate::word::Word;
use lru::LruCache;
use rayon::prelude::*;
use std::num::NonZeroUsize;
use std::sync::Arc;

const CACHE_SIZE: usize = 512;
/// How many step-1 candidates (by raw entropy) get the more expensive
/// two-step lookahead.
const SHORTLIST_SIZE: usize = 8;

/// Ranks its shortlist of highest-entropy guesses by how much information
/// they're expected to yield two guesses out, not just one: `E1(g) +
/// E[E2 | g]`, where the second term averages the best achievable
/// second-guess entropy over every outcome `g` could produce, weighted by
/// its probability.
pub struct TwoStep {
    matrix: Arc<Matrix>,
    posterior: Posterior,
    opening: Option<Word>,
    guesses_so_far: usize,
    cache: LruCache<u64, usize>,
}

impl TwoStep {
    pub fn new(matrix: Arc<Matrix>) -> TwoStep {
        Self::with_opening(matrix, None)
    }

    /// `opening`, if given, is played unconditionally on the first guess of
    /// each game — it's cheapest to precompute offline once rather than pay
    /// the full two-step search for the one posterior every game starts
    /// from.
    pub fn with_opening(matrix: Arc<Matrix>, opening: Option<Word>) -> TwoStep {
        let posterior = Posterior::initial(matrix.clone());
        TwoStep {
            matrix,
            posterior,
            opening,
            guesses_so_far: 0,
            cache: LruCache::new(NonZeroUsize::new(CACHE_SIZE).unwrap()),
        }
    }

    fn expected_second_step_entropy(posterior: &Posterior, g1: usize) -> f64 {
        let total: f64 = posterior.weights().iter().sum();
        posterior
            .partition_by(g1)
            .into_iter()
            .map(|(_, sub)| {
                let p = sub.weights().iter().sum::<f64>() / total;
                let best_e2 = if sub.len() <= 1 {
                    0.0
                } else {
                    sub.all_candidate_entropies()
                        .first()
                        .map(|&(_, e)| e)
                        .unwrap_or(0.0)
                };
                p * best_e2
            })
            .sum()
    }

    fn best_guess_column(&mut self) -> usize {
        let fp = self.posterior.fingerprint();
        if let Some(&g) = self.cache.get(&fp) {
            return g;
        }

        let started = std::time::Instant::now();
        let e1 = self.posterior.all_candidate_entropies();
        let shortlist = &e1[..e1.len().min(SHORTLIST_SIZE)];

        let scored: Vec<(usize, f64, f64)> = shortlist
            .par_iter()
            .map(|&(g, e1_score)| {
                let e2 = Self::expected_second_step_entropy(&self.posterior, g);
                (g, e1_score + e2, e1_score)
            })
            .collect();

        let (g, _, _) = scored
            .into_iter()
            .max_by(|a, b| {
                a.1.partial_cmp(&b.1)
                    .unwrap()
                    .then(a.2.partial_cmp(&b.2).unwrap())
                    .then(b.0.cmp(&a.0))
            })
            .expect("shortlist is never empty when the posterior is non-trivial");

        log::debug!(
            "two-step: ranked {} candidates ({} shortlisted) over {} survivors in {:?}",
            e1.len(),
            shortlist.len(),
            self.posterior.len(),
            started.elapsed()
        );
        self.cache.put(fp, g);
        g
    }
}

impl Player for TwoStep {
    fn posterior(&self) -> &Posterior {
        &self.posterior
    }

    fn reset(&mut self) {
        self.posterior = Posterior::initial(self.matrix.clone());
        self.guesses_so_far = 0;
    }

    fn next_guess(&mut self) -> Word {
        if self.guesses_so_far == 0 {
            if let Some(opening) = self.opening {
                return opening;
            }
        }
        if self.posterior.len() <= ENDGAME_THRESHOLD {
            return self.posterior.first_survivor();
        }
        let g = self.best_guess_column();
        self.matrix.guesses()[g]
    }

    fn observe(&mut self, guess: Word, code: u8) -> Result<(), WordleError> {
        let g = self.matrix.guess_index(&guess)?;
        self.posterior = self.posterior.filter(code, g)?;
        self.guesses_so_far += 1;
        Ok(())
    }
}
