//! Progression gate: whether the next quiz in the catalog unlocks.

use crate::scoring::ResultTally;

/// Correct answers needed to unlock the next quiz: half the questions,
/// rounded up.
pub fn required_correct(total: usize) -> usize {
    total.div_ceil(2)
}

/// Pass when `correct >= ceil(total / 2)`.
pub fn can_advance(tally: &ResultTally) -> bool {
    tally.correct >= required_correct(tally.total)
}
