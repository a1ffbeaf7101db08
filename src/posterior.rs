use crate::error::WordleError;
use crate::matrix::Matrix;
use crate::pattern::MAX_MASK_ENUM;
use crate::word::Word;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// The belief state: a weighted subset of solutions (`survivors`) still
/// consistent with every pattern observed so far, plus a shared, read-only
/// handle to the full outcome matrix.
///
/// `survivors` is kept in ascending index order, which is the same order as
/// `Matrix::solutions` (itself lexicographically sorted), so "first
/// survivor" always means "lexicographically smallest surviving word".
#[derive(Clone)]
pub struct Posterior {
    matrix: Arc<Matrix>,
    survivors: Vec<u32>,
    weights: Vec<f64>,
    fingerprint: u64,
}

impl Posterior {
    /// The initial posterior over every solution in the matrix, weighted by
    /// `Matrix::solution_weights`.
    pub fn initial(matrix: Arc<Matrix>) -> Posterior {
        let survivors: Vec<u32> = (0..matrix.num_solutions() as u32).collect();
        let weights = matrix.solution_weights().to_vec();
        Posterior::new(matrix, survivors, weights)
    }

    fn new(matrix: Arc<Matrix>, survivors: Vec<u32>, weights: Vec<f64>) -> Posterior {
        let fingerprint = fingerprint(&survivors, &weights);
        Posterior {
            matrix,
            survivors,
            weights,
            fingerprint,
        }
    }

    pub fn matrix(&self) -> &Arc<Matrix> {
        &self.matrix
    }

    pub fn survivors(&self) -> &[u32] {
        &self.survivors
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Stable identity for memoization: equal survivor sets (and, for
    /// non-uniform weights, equal weights) hash identically regardless of
    /// construction path.
    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    pub fn len(&self) -> usize {
        self.survivors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.survivors.is_empty()
    }

    fn total_weight(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Lexicographically smallest surviving word — the endgame pick.
    pub fn first_survivor(&self) -> Word {
        self.matrix.solutions()[self.survivors[0] as usize]
    }

    /// Heaviest-weighted surviving word — the named alternative endgame
    /// pick (§4.6 of the spec mentions this as an acceptable variant).
    pub fn heaviest_survivor(&self) -> Word {
        let (idx, _) = self
            .weights
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap())
            .expect("posterior is never empty");
        self.matrix.solutions()[self.survivors[idx] as usize]
    }

    /// Remaining uncertainty, in bits.
    pub fn entropy(&self) -> f64 {
        entropy_of(self.weights.iter().copied(), self.total_weight())
    }

    /// Expected information gain (entropy of the outcome distribution) of
    /// guessing column `g` against the current survivors.
    pub fn candidate_entropy(&self, g: usize) -> f64 {
        let total = self.total_weight();
        let mut buckets = [0.0f64; MAX_MASK_ENUM];
        for (i, (_, code)) in self.matrix.row_restricted_column(g, &self.survivors).enumerate() {
            buckets[code as usize] += self.weights[i];
        }
        entropy_of(buckets.into_iter(), total)
    }

    /// Every guess column's entropy, descending by score, ties broken by
    /// ascending guess index (which is itself lexicographic: `Matrix::guesses`
    /// is sorted).
    pub fn all_candidate_entropies(&self) -> Vec<(usize, f64)> {
        let mut scored: Vec<(usize, f64)> = (0..self.matrix.num_guesses())
            .map(|g| (g, self.candidate_entropy(g)))
            .collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap().then(a.0.cmp(&b.0)));
        scored
    }

    /// Splits the posterior into one child per outcome code that guessing
    /// column `g` can actually produce against the current survivors. Used
    /// by the two-step player to look one guess further ahead without
    /// re-filtering from scratch for every possible code.
    pub fn partition_by(&self, g: usize) -> Vec<(u8, Posterior)> {
        let mut buckets: std::collections::HashMap<u8, (Vec<u32>, Vec<f64>)> =
            std::collections::HashMap::new();
        for (i, (s, code)) in self.matrix.row_restricted_column(g, &self.survivors).enumerate() {
            let entry = buckets.entry(code).or_default();
            entry.0.push(s);
            entry.1.push(self.weights[i]);
        }
        buckets
            .into_iter()
            .map(|(code, (survivors, weights))| (code, Posterior::new(self.matrix.clone(), survivors, weights)))
            .collect()
    }

    /// Refines the posterior by the observed `(code, guess_column)` pair.
    /// `EMPTY_POSTERIOR` if nothing survives — an inconsistent feedback
    /// sequence.
    pub fn filter(&self, code: u8, g: usize) -> Result<Posterior, WordleError> {
        let mut new_survivors = Vec::new();
        let mut new_weights = Vec::new();
        for (i, (s, c)) in self.matrix.row_restricted_column(g, &self.survivors).enumerate() {
            if c == code {
                new_survivors.push(s);
                new_weights.push(self.weights[i]);
            }
        }
        if new_survivors.is_empty() {
            return Err(WordleError::EmptyPosterior);
        }
        Ok(Posterior::new(self.matrix.clone(), new_survivors, new_weights))
    }
}

fn entropy_of(weights: impl Iterator<Item = f64>, total: f64) -> f64 {
    weights
        .filter(|&w| w > 0.0)
        .map(|w| {
            let p = w / total;
            -p * p.log2()
        })
        .sum()
}

fn fingerprint(survivors: &[u32], weights: &[f64]) -> u64 {
    let mut hasher = DefaultHasher::new();
    survivors.hash(&mut hasher);
    if weights.iter().any(|&w| (w - 1.0).abs() > f64::EPSILON) {
        for w in weights {
            w.to_bits().hash(&mut hasher);
        }
    }
    hasher.finish()
}
