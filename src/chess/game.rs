//! The engine-facing game state: the current position bundled with the
//! history needed for repetition detection, the fifty-move clock,
//! per-search statistics, the evaluation cache and the evaluation weights.
//!
//! Everything the search and evaluator touch lives in this one value, so a
//! trainer worker owns its whole world: states are never shared and never
//! synchronised.

use arrayvec::ArrayVec;

use crate::chess::core::{Move, MoveList, PieceKind, Player};
use crate::chess::movegen;
use crate::chess::position::Position;
use crate::evaluation::transposition::TranspositionTable;
use crate::evaluation::weights::Weights;
use crate::search::{self, Depth, SearchResult};

/// Repetition detection looks this far back. Recording silently stops once
/// the buffer is full; a single game or puzzle line never gets close.
const HISTORY_CAPACITY: usize = 200;

/// Counters accumulated during one search call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Positions evaluated from scratch (transposition-table misses).
    pub evaluations: u64,
    /// Evaluations answered by the transposition table.
    pub tt_hits: u64,
    /// Subtrees cut off by the alpha-beta window.
    pub alpha_beta_prunes: u64,
    /// Moves skipped by static futility pruning.
    pub futility_prunes: u64,
}

/// A complete, self-contained game: the single value threaded through
/// search, evaluation and puzzle playback.
pub struct GameState {
    position: Position,
    history: ArrayVec<Position, HISTORY_CAPACITY>,
    halfmove_clock: u32,
    pub(crate) stats: SearchStats,
    pub(crate) tt: TranspositionTable,
    pub(crate) weights: Weights,
}

impl GameState {
    /// A fresh game from the standard starting position.
    #[must_use]
    pub fn new(weights: Weights) -> Self {
        Self::from_position(Position::starting(), weights)
    }

    /// A game starting from an arbitrary position (e.g. a puzzle FEN), with
    /// empty history and a zeroed halfmove clock.
    #[must_use]
    pub fn from_position(position: Position, weights: Weights) -> Self {
        Self {
            position,
            history: ArrayVec::new(),
            halfmove_clock: 0,
            stats: SearchStats::default(),
            tt: TranspositionTable::new(),
            weights,
        }
    }

    /// The current position.
    #[must_use]
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// The active evaluation weights.
    #[must_use]
    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    /// Counters from the most recent search call.
    #[must_use]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Plies since the last capture or pawn move; 100 is a fifty-move draw.
    #[must_use]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// Overrides the halfmove clock (used to verify fifty-move behaviour).
    pub fn set_halfmove_clock(&mut self, plies: u32) {
        self.halfmove_clock = plies;
    }

    /// Number of positions recorded so far. The evaluator's development
    /// penalty grows with this.
    #[must_use]
    pub fn moves_played(&self) -> usize {
        self.history.len()
    }

    /// Legal moves for `side` in the current position, in generator order.
    #[must_use]
    pub fn legal_moves(&self, side: Player) -> MoveList {
        movegen::legal_moves(&self.position, side)
    }

    /// Plays a move on the game board: applies it, updates the fifty-move
    /// clock and records the resulting position in the repetition history.
    pub fn play(&mut self, next_move: &Move) {
        let is_pawn_move = self
            .position
            .at(next_move.from)
            .is_some_and(|piece| piece.kind == PieceKind::Pawn);
        let is_capture = self.position.at(next_move.to).is_some();

        self.position.make_move(next_move);

        if is_pawn_move || is_capture {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        self.record_history();
    }

    /// Parses and plays a reference move (`e2e4`, `e7e8q`). The move is
    /// applied as given: the only sanity check is that it starts on an
    /// occupied square, which is what puzzle playback needs to reject
    /// corrupt reference lines.
    ///
    /// # Errors
    ///
    /// Fails on a malformed string or an empty origin square; the board is
    /// left untouched in both cases.
    pub fn play_reference_move(&mut self, uci: &str) -> anyhow::Result<()> {
        let next_move = Move::from_uci(uci)?;
        if self.position.at(next_move.from).is_none() {
            anyhow::bail!("reference move {uci} starts on an empty square");
        }
        self.play(&next_move);
        Ok(())
    }

    /// Records the current position for threefold-repetition detection.
    pub fn record_history(&mut self) {
        if self.history.len() < self.history.capacity() {
            self.history.push(self.position.clone());
        }
    }

    /// How many recorded positions match `position` by piece identity.
    #[must_use]
    pub fn repetition_count(&self, position: &Position) -> usize {
        self.history
            .iter()
            .filter(|past| past.same_occupancy(position))
            .count()
    }

    /// Statically evaluates the current position (White-positive score).
    pub fn evaluate(&mut self) -> f64 {
        let position = self.position.clone();
        crate::evaluation::evaluate(self, &position)
    }

    /// Runs the alpha-beta search and returns the best move with its
    /// principal continuation and score from `side`'s perspective. The
    /// chosen move is *not* played; call [`GameState::play`] to commit it.
    pub fn search(&mut self, max_depth: Depth, side: Player) -> SearchResult {
        search::best_move(self, max_depth, side)
    }

    pub(crate) fn reset_stats(&mut self) {
        self.stats = SearchStats::default();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn clock_resets_on_pawn_moves_and_captures() {
        let mut game = GameState::new(Weights::baseline());
        game.play(&Move::from_uci("g1f3").unwrap());
        game.play(&Move::from_uci("b8c6").unwrap());
        assert_eq!(game.halfmove_clock(), 2);
        game.play(&Move::from_uci("e2e4").unwrap());
        assert_eq!(game.halfmove_clock(), 0);
        game.play(&Move::from_uci("d7d5").unwrap());
        game.play(&Move::from_uci("f3e5").unwrap());
        assert_eq!(game.halfmove_clock(), 1);
        // Knight takes the d5 pawn.
        game.play(&Move::from_uci("e5d5").unwrap());
        assert_eq!(game.halfmove_clock(), 0);
    }

    #[test]
    fn history_counts_repetitions_by_occupancy() {
        let mut game = GameState::new(Weights::baseline());
        for _ in 0..2 {
            game.play(&Move::from_uci("g1f3").unwrap());
            game.play(&Move::from_uci("g8f6").unwrap());
            game.play(&Move::from_uci("f3g1").unwrap());
            game.play(&Move::from_uci("f6g8").unwrap());
        }
        // The starting occupancy recurred after each knight round trip.
        assert_eq!(game.repetition_count(&Position::starting()), 2);
        assert_eq!(game.moves_played(), 8);
    }

    #[test]
    fn reference_moves_validate_their_origin() {
        let mut game = GameState::new(Weights::baseline());
        assert!(game.play_reference_move("e2e4").is_ok());
        assert!(game.play_reference_move("e5e6").is_err());
        assert!(game.play_reference_move("zzzz").is_err());
        // The failed attempts left the board alone.
        assert_eq!(game.moves_played(), 1);
    }

    #[test]
    fn reference_promotion_is_applied() {
        let (position, _) = Position::from_fen("8/4P3/8/8/2k5/8/8/4K3 w - - 0 1").unwrap();
        let mut game = GameState::from_position(position, Weights::baseline());
        game.play_reference_move("e7e8r").unwrap();
        assert_eq!(
            game.position().at(crate::chess::core::Square::E8).unwrap().kind,
            PieceKind::Rook
        );
    }
}
