use crate::word::{Word, L};
use itertools::iproduct;

/// Per-position feedback for one guessed letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Mark {
    /// Green: right letter, right position.
    Correct,
    /// Yellow: right letter, wrong position.
    Misplaced,
    /// Gray: letter not present (or already accounted for by a duplicate).
    Absent,
}

/// A full five-position feedback pattern for one guess.
pub type Pattern = [Mark; L];

const POWERS_OF_THREE: [u16; L] = [1, 3, 9, 27, 81];

/// The pattern code meaning "every position correct" — a solved game.
pub const TERMINAL_CODE: u8 = 3u16.pow(L as u32) as u8 - 1;

/// Size of any accumulator array indexed by a pattern code.
pub const MAX_MASK_ENUM: usize = 3usize.pow(L as u32);

/// Scores a guess against a target, handling duplicate letters the way
/// Wordle does: correct placements are resolved first and consumed out of
/// the target's letter pool, then remaining guess letters are matched
/// against whatever of the target is left.
pub fn score(target: &Word, guess: &Word) -> Pattern {
    let target = target.as_bytes();
    let guess = guess.as_bytes();
    let mut pattern = [Mark::Absent; L];

    // Count of each target letter not yet claimed by a Correct or Misplaced mark.
    let mut remaining = [0u8; 26];
    for (i, (&t, &g)) in target.iter().zip(guess.iter()).enumerate() {
        if t == g {
            pattern[i] = Mark::Correct;
        } else {
            remaining[(t - b'a') as usize] += 1;
        }
    }

    for (i, &g) in guess.iter().enumerate() {
        if pattern[i] == Mark::Correct {
            continue;
        }
        let idx = (g - b'a') as usize;
        if remaining[idx] > 0 {
            pattern[i] = Mark::Misplaced;
            remaining[idx] -= 1;
        }
    }

    pattern
}

/// Packs a pattern into its base-3 code, least-significant position first.
pub fn encode(pattern: &Pattern) -> u8 {
    pattern
        .iter()
        .enumerate()
        .map(|(i, mark)| {
            let digit = match mark {
                Mark::Absent => 0u16,
                Mark::Misplaced => 1,
                Mark::Correct => 2,
            };
            digit * POWERS_OF_THREE[i]
        })
        .sum::<u16>() as u8
}

/// Unpacks a base-3 code back into a pattern.
pub fn decode(code: u8) -> Pattern {
    let mut code = code as u16;
    let mut pattern = [Mark::Absent; L];
    for slot in pattern.iter_mut() {
        *slot = match code % 3 {
            0 => Mark::Absent,
            1 => Mark::Misplaced,
            2 => Mark::Correct,
            _ => unreachable!(),
        };
        code /= 3;
    }
    pattern
}

/// All 243 possible five-position patterns, in code order.
pub fn all_patterns() -> impl Iterator<Item = Pattern> {
    iproduct!(
        [Mark::Absent, Mark::Misplaced, Mark::Correct],
        [Mark::Absent, Mark::Misplaced, Mark::Correct],
        [Mark::Absent, Mark::Misplaced, Mark::Correct],
        [Mark::Absent, Mark::Misplaced, Mark::Correct],
        [Mark::Absent, Mark::Misplaced, Mark::Correct]
    )
    .map(|(a, b, c, d, e)| [a, b, c, d, e])
}
