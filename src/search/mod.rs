//! Implements the [Negamax] game-tree search with [Alpha-Beta pruning] and
//! static futility pruning, returning the whole principal variation rather
//! than just the chosen move.
//!
//! [Negamax]: https://en.wikipedia.org/wiki/Negamax
//! [Alpha-Beta pruning]: https://en.wikipedia.org/wiki/Alpha%E2%80%93beta_pruning

mod negamax;

pub use negamax::best_move;

use arrayvec::ArrayVec;
use itertools::Itertools;

use crate::chess::core::{Move, MAX_MOVES};

/// Search depth in plies.
pub type Depth = u8;

/// A principal variation: the chosen move followed by the predicted
/// continuation for both sides, bounded by the same capacity as a move
/// list.
pub type Line = ArrayVec<Move, MAX_MOVES>;

/// The outcome of a search call: the principal variation and its score
/// from the searching side's perspective.
///
/// An empty line means "no move available" — the position was terminal
/// (or, in degenerate non-terminal nodes, the caller treats it the same
/// way).
#[derive(Clone, Debug)]
pub struct SearchResult {
    #[allow(missing_docs)]
    pub line: Line,
    #[allow(missing_docs)]
    pub score: f64,
}

impl SearchResult {
    /// The move the engine chose, if the position allowed one.
    #[must_use]
    pub fn best(&self) -> Option<Move> {
        self.line.first().copied()
    }

    /// The predicted line as space-separated reference moves, e.g.
    /// `"e2e4 e7e5 g1f3"`. Handy for logging and the puzzle harness.
    #[must_use]
    pub fn principal_variation(&self) -> String {
        self.line.iter().map(Move::reference_notation).join(" ")
    }
}
