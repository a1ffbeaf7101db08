mod greedy;
mod two_step;

pub use greedy::Greedy;
pub use two_step::TwoStep;

use crate::error::WordleError;
use crate::posterior::Posterior;
use crate::word::Word;

/// Shared shape of both ranking strategies: hold a posterior, pick a guess
/// from it, then narrow it by the observed feedback.
pub trait Player {
    fn posterior(&self) -> &Posterior;
    fn reset(&mut self);
    fn next_guess(&mut self) -> Word;
    fn observe(&mut self, guess: Word, code: u8) -> Result<(), WordleError>;
}

/// When two or fewer solutions remain, guessing for information is no
/// better than guessing to win: take the lexicographically first survivor
/// outright rather than spend a turn ranking a two- or one-element set.
pub(crate) const ENDGAME_THRESHOLD: usize = 2;
