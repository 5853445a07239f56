//! The evaluator's tunable parameter vector: scalar term magnitudes, seven
//! piece-square tables, and the move-direction/move-distance score tables.
//! Roughly 550 individual values in total — the search space of the
//! trainer in [`crate::training`].
//!
//! Every weight carries its own mutation bounds; the trainer perturbs a
//! parent set with bounded Gaussian noise to produce candidates and writes
//! the best set found so far to a plain-text report.

use std::fs;
use std::path::Path;

use anyhow::Context;
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// An 8×8 bonus table indexed `[file][rank]` (a-file first, rank 1 first).
///
/// The same absolute-square value serves both colours (White adds, Black
/// subtracts), so the baseline tables are rank-symmetric: a square and its
/// vertical mirror carry the same bonus.
pub type PieceSquareTable = [[f64; 8]; 8];

/// The complete set of tunable evaluation and search weights.
///
/// Scores are expressed in centipawn-like units: a pawn of material is
/// worth 100. The move-direction and move-distance tables are carried and
/// trained alongside the rest of the vector and persisted with it.
#[derive(Clone, Debug, PartialEq)]
#[allow(missing_docs)]
pub struct Weights {
    // Development and piece positioning.
    pub development_penalty_per_move: f64,
    pub global_position_table_scale: f64,
    pub knight_backstop_penalty: f64,
    pub knight_edge_penalty: f64,
    pub slider_mobility_per_square: f64,

    // Pawn evaluation.
    pub undefended_central_pawn_penalty: f64,
    pub central_pawn_bonus: f64,
    pub pawn_promotion_immediate_bonus: f64,
    pub pawn_promotion_immediate_distance: f64,
    pub pawn_promotion_delayed_bonus: f64,
    pub pawn_promotion_delayed_distance: f64,

    // King safety and castling.
    pub king_hasmoved_penalty: f64,
    pub king_center_exposure_penalty: f64,
    pub castling_bonus: f64,
    pub king_adjacent_attack_bonus: f64,

    // Tactical support terms.
    pub defended_piece_support_bonus: f64,
    pub defended_piece_weaker_penalty: f64,
    pub undefended_piece_penalty: f64,

    // Check and stalemate.
    pub check_penalty_white: f64,
    pub check_bonus_black: f64,
    pub stalemate_black_penalty: f64,
    pub stalemate_white_penalty: f64,

    // Endgame king island (term currently disabled in the evaluator; the
    // weights stay in the vector and the report).
    pub endgame_king_island_max_norm: f64,
    pub endgame_king_island_bonus_scale: f64,

    // Search pruning and terminal scores.
    pub static_futility_prune_margin: f64,
    pub checkmate_score: f64,
    pub stalemate_score: f64,
    pub draw_score: f64,

    // Piece-square tables.
    pub pawn_pst: PieceSquareTable,
    pub knight_pst: PieceSquareTable,
    pub bishop_pst: PieceSquareTable,
    pub rook_pst: PieceSquareTable,
    pub queen_pst: PieceSquareTable,
    pub king_pst_mg: PieceSquareTable,
    pub king_pst_eg: PieceSquareTable,

    // Move-direction score tables (one entry per generator pattern).
    pub pawn_move_scores: [f64; 4],
    pub knight_move_scores: [f64; 8],
    pub bishop_move_scores: [f64; 4],
    pub rook_move_scores: [f64; 4],
    pub queen_move_scores: [f64; 8],
    pub king_move_scores: [f64; 8],

    // Move-distance score tables.
    pub pawn_move_distance_scores: [f64; 2],
    pub knight_move_distance_scores: [f64; 8],
    pub bishop_move_distance_scores: [f64; 7],
    pub rook_move_distance_scores: [f64; 7],
    pub queen_move_distance_scores: [f64; 7],
    pub king_move_distance_scores: [f64; 1],
}

/// Material values indexed by [`crate::chess::core::PieceKind`]
/// discriminant: pawn, knight, bishop, rook, queen, king.
pub const PIECE_VALUES: [f64; 6] = [100.0, 300.0, 300.0, 500.0, 900.0, 20000.0];

/// Centre emphasis applied to every piece, peaking on d4/d5/e4/e5. Indexed
/// `[file][rank]` like the piece-square tables.
pub const CENTER_TABLE: [[f64; 8]; 8] = [
    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.0],
    [0.0, 1.0, 2.0, 2.0, 2.0, 2.0, 1.0, 0.0],
    [0.0, 1.0, 2.0, 3.0, 3.0, 2.0, 1.0, 0.0],
    [0.0, 1.0, 2.0, 3.0, 3.0, 2.0, 1.0, 0.0],
    [0.0, 1.0, 2.0, 2.0, 2.0, 2.0, 1.0, 0.0],
    [0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
];

const PAWN_PST: PieceSquareTable = [
    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    [0.0, 2.0, 4.0, 6.0, 6.0, 4.0, 2.0, 0.0],
    [0.0, 4.0, 8.0, 12.0, 12.0, 8.0, 4.0, 0.0],
    [0.0, 6.0, 12.0, 20.0, 20.0, 12.0, 6.0, 0.0],
    [0.0, 6.0, 12.0, 20.0, 20.0, 12.0, 6.0, 0.0],
    [0.0, 4.0, 8.0, 12.0, 12.0, 8.0, 4.0, 0.0],
    [0.0, 2.0, 4.0, 6.0, 6.0, 4.0, 2.0, 0.0],
    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
];

const KNIGHT_PST: PieceSquareTable = [
    [-40.0, -30.0, -20.0, -20.0, -20.0, -20.0, -30.0, -40.0],
    [-30.0, -10.0, 0.0, 5.0, 5.0, 0.0, -10.0, -30.0],
    [-20.0, 0.0, 10.0, 15.0, 15.0, 10.0, 0.0, -20.0],
    [-20.0, 5.0, 15.0, 20.0, 20.0, 15.0, 5.0, -20.0],
    [-20.0, 5.0, 15.0, 20.0, 20.0, 15.0, 5.0, -20.0],
    [-20.0, 0.0, 10.0, 15.0, 15.0, 10.0, 0.0, -20.0],
    [-30.0, -10.0, 0.0, 5.0, 5.0, 0.0, -10.0, -30.0],
    [-40.0, -30.0, -20.0, -20.0, -20.0, -20.0, -30.0, -40.0],
];

const BISHOP_PST: PieceSquareTable = [
    [-20.0, -10.0, -10.0, -10.0, -10.0, -10.0, -10.0, -20.0],
    [-10.0, 0.0, 5.0, 10.0, 10.0, 5.0, 0.0, -10.0],
    [-10.0, 5.0, 10.0, 10.0, 10.0, 10.0, 5.0, -10.0],
    [-10.0, 0.0, 10.0, 12.0, 12.0, 10.0, 0.0, -10.0],
    [-10.0, 0.0, 10.0, 12.0, 12.0, 10.0, 0.0, -10.0],
    [-10.0, 5.0, 10.0, 10.0, 10.0, 10.0, 5.0, -10.0],
    [-10.0, 0.0, 5.0, 10.0, 10.0, 5.0, 0.0, -10.0],
    [-20.0, -10.0, -10.0, -10.0, -10.0, -10.0, -10.0, -20.0],
];

const ROOK_PST: PieceSquareTable = [
    [-5.0, -5.0, -5.0, -5.0, -5.0, -5.0, -5.0, -5.0],
    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    [5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0],
    [10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0],
    [10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0],
    [5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0],
    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    [-5.0, -5.0, -5.0, -5.0, -5.0, -5.0, -5.0, -5.0],
];

const QUEEN_PST: PieceSquareTable = [
    [-20.0, -10.0, -10.0, -5.0, -5.0, -10.0, -10.0, -20.0],
    [-10.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -10.0],
    [-10.0, 0.0, 5.0, 5.0, 5.0, 5.0, 0.0, -10.0],
    [-5.0, 0.0, 5.0, 10.0, 10.0, 5.0, 0.0, -5.0],
    [-5.0, 0.0, 5.0, 10.0, 10.0, 5.0, 0.0, -5.0],
    [-10.0, 0.0, 5.0, 5.0, 5.0, 5.0, 0.0, -10.0],
    [-10.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -10.0],
    [-20.0, -10.0, -10.0, -5.0, -5.0, -10.0, -10.0, -20.0],
];

const KING_PST_MG: PieceSquareTable = [
    [20.0, 5.0, -20.0, -40.0, -40.0, -20.0, 5.0, 20.0],
    [30.0, 10.0, -20.0, -40.0, -40.0, -20.0, 10.0, 30.0],
    [25.0, 0.0, -25.0, -45.0, -45.0, -25.0, 0.0, 25.0],
    [0.0, -15.0, -35.0, -50.0, -50.0, -35.0, -15.0, 0.0],
    [5.0, -15.0, -35.0, -50.0, -50.0, -35.0, -15.0, 5.0],
    [0.0, -10.0, -30.0, -45.0, -45.0, -30.0, -10.0, 0.0],
    [40.0, 15.0, -20.0, -40.0, -40.0, -20.0, 15.0, 40.0],
    [30.0, 10.0, -25.0, -40.0, -40.0, -25.0, 10.0, 30.0],
];

const KING_PST_EG: PieceSquareTable = [
    [-50.0, -30.0, -20.0, -15.0, -15.0, -20.0, -30.0, -50.0],
    [-30.0, -10.0, 0.0, 5.0, 5.0, 0.0, -10.0, -30.0],
    [-20.0, 0.0, 10.0, 15.0, 15.0, 10.0, 0.0, -20.0],
    [-15.0, 5.0, 15.0, 25.0, 25.0, 15.0, 5.0, -15.0],
    [-15.0, 5.0, 15.0, 25.0, 25.0, 15.0, 5.0, -15.0],
    [-20.0, 0.0, 10.0, 15.0, 15.0, 10.0, 0.0, -20.0],
    [-30.0, -10.0, 0.0, 5.0, 5.0, 0.0, -10.0, -30.0],
    [-50.0, -30.0, -20.0, -15.0, -15.0, -20.0, -30.0, -50.0],
];

impl Weights {
    /// The committed baseline the trainer starts from (and falls back to
    /// when the leaderboard is empty).
    #[must_use]
    pub fn baseline() -> Self {
        Self {
            development_penalty_per_move: 3.0,
            global_position_table_scale: 10.0,
            knight_backstop_penalty: 40.0,
            knight_edge_penalty: 30.0,
            slider_mobility_per_square: 5.0,

            undefended_central_pawn_penalty: 20.0,
            central_pawn_bonus: 40.0,
            pawn_promotion_immediate_bonus: 300.0,
            pawn_promotion_immediate_distance: 2.0,
            pawn_promotion_delayed_bonus: 80.0,
            pawn_promotion_delayed_distance: 4.0,

            king_hasmoved_penalty: 100.0,
            king_center_exposure_penalty: 30.0,
            castling_bonus: 50.0,
            king_adjacent_attack_bonus: 20.0,

            defended_piece_support_bonus: 120.0,
            defended_piece_weaker_penalty: 10.0,
            undefended_piece_penalty: 70.0,

            check_penalty_white: 100.0,
            check_bonus_black: 100.0,
            stalemate_black_penalty: 500.0,
            stalemate_white_penalty: 500.0,

            endgame_king_island_max_norm: 16.0,
            endgame_king_island_bonus_scale: 4.0,

            static_futility_prune_margin: 500.0,
            checkmate_score: 999_999_999.0,
            stalemate_score: 500.0,
            draw_score: 0.0,

            pawn_pst: PAWN_PST,
            knight_pst: KNIGHT_PST,
            bishop_pst: BISHOP_PST,
            rook_pst: ROOK_PST,
            queen_pst: QUEEN_PST,
            king_pst_mg: KING_PST_MG,
            king_pst_eg: KING_PST_EG,

            pawn_move_scores: [1.0; 4],
            knight_move_scores: [1.0; 8],
            bishop_move_scores: [1.0; 4],
            rook_move_scores: [1.0; 4],
            queen_move_scores: [1.0; 8],
            king_move_scores: [1.0; 8],

            pawn_move_distance_scores: [1.0; 2],
            knight_move_distance_scores: [1.0; 8],
            bishop_move_distance_scores: [1.0; 7],
            rook_move_distance_scores: [1.0; 7],
            queen_move_distance_scores: [1.0; 7],
            king_move_distance_scores: [1.0],
        }
    }

    /// Produces a child set: every weight shifted by `N(0, sigma)` noise,
    /// clamped to its own bounds. Distance-like and bonus-like weights keep
    /// positive ranges; piece-square entries stay within ±50.
    pub fn mutated<R: Rng>(&self, sigma: f64, rng: &mut R) -> Self {
        let noise = Normal::new(0.0, sigma).expect("mutation rate is positive and finite");
        let mut draw =
            |value: f64, min: f64, max: f64| (value + noise.sample(rng)).clamp(min, max);

        let mut next = self.clone();
        next.development_penalty_per_move = draw(self.development_penalty_per_move, 0.1, 20.0);
        next.global_position_table_scale = draw(self.global_position_table_scale, 1.0, 100.0);
        next.knight_backstop_penalty = draw(self.knight_backstop_penalty, 1.0, 200.0);
        next.knight_edge_penalty = draw(self.knight_edge_penalty, 1.0, 200.0);
        next.slider_mobility_per_square = draw(self.slider_mobility_per_square, 0.1, 50.0);

        next.undefended_central_pawn_penalty =
            draw(self.undefended_central_pawn_penalty, 1.0, 100.0);
        next.central_pawn_bonus = draw(self.central_pawn_bonus, 1.0, 100.0);
        next.pawn_promotion_immediate_bonus =
            draw(self.pawn_promotion_immediate_bonus, 50.0, 1000.0);
        next.pawn_promotion_immediate_distance =
            draw(self.pawn_promotion_immediate_distance, 0.5, 10.0);
        next.pawn_promotion_delayed_bonus = draw(self.pawn_promotion_delayed_bonus, 10.0, 500.0);
        next.pawn_promotion_delayed_distance =
            draw(self.pawn_promotion_delayed_distance, 0.5, 10.0);

        next.king_hasmoved_penalty = draw(self.king_hasmoved_penalty, 1.0, 500.0);
        next.king_center_exposure_penalty = draw(self.king_center_exposure_penalty, 1.0, 200.0);
        next.castling_bonus = draw(self.castling_bonus, 1.0, 500.0);
        next.king_adjacent_attack_bonus = draw(self.king_adjacent_attack_bonus, 0.1, 200.0);

        next.defended_piece_support_bonus = draw(self.defended_piece_support_bonus, 10.0, 500.0);
        next.defended_piece_weaker_penalty = draw(self.defended_piece_weaker_penalty, 0.1, 100.0);
        next.undefended_piece_penalty = draw(self.undefended_piece_penalty, 1.0, 300.0);

        next.check_penalty_white = draw(self.check_penalty_white, 1.0, 500.0);
        next.check_bonus_black = draw(self.check_bonus_black, 1.0, 500.0);
        next.stalemate_black_penalty = draw(self.stalemate_black_penalty, 100.0, 2000.0);
        next.stalemate_white_penalty = draw(self.stalemate_white_penalty, 100.0, 2000.0);

        next.endgame_king_island_max_norm = draw(self.endgame_king_island_max_norm, 1.0, 100.0);
        next.endgame_king_island_bonus_scale =
            draw(self.endgame_king_island_bonus_scale, 0.1, 50.0);

        next.static_futility_prune_margin = draw(self.static_futility_prune_margin, 10.0, 2000.0);
        next.checkmate_score = draw(self.checkmate_score, 1_000_000.0, 1_000_000_000.0);
        next.stalemate_score = draw(self.stalemate_score, 0.0, 2000.0);
        next.draw_score = draw(self.draw_score, -500.0, 500.0);

        for file in 0..8 {
            for rank in 0..8 {
                next.pawn_pst[file][rank] = draw(self.pawn_pst[file][rank], -50.0, 50.0);
                next.knight_pst[file][rank] = draw(self.knight_pst[file][rank], -50.0, 50.0);
                next.bishop_pst[file][rank] = draw(self.bishop_pst[file][rank], -50.0, 50.0);
                next.rook_pst[file][rank] = draw(self.rook_pst[file][rank], -50.0, 50.0);
                next.queen_pst[file][rank] = draw(self.queen_pst[file][rank], -50.0, 50.0);
                next.king_pst_mg[file][rank] = draw(self.king_pst_mg[file][rank], -50.0, 50.0);
                next.king_pst_eg[file][rank] = draw(self.king_pst_eg[file][rank], -50.0, 50.0);
            }
        }

        for i in 0..4 {
            next.pawn_move_scores[i] = draw(self.pawn_move_scores[i], 0.1, 20.0);
            next.bishop_move_scores[i] = draw(self.bishop_move_scores[i], 0.1, 20.0);
            next.rook_move_scores[i] = draw(self.rook_move_scores[i], 0.1, 20.0);
        }
        for i in 0..8 {
            next.knight_move_scores[i] = draw(self.knight_move_scores[i], 0.1, 20.0);
            next.queen_move_scores[i] = draw(self.queen_move_scores[i], 0.1, 20.0);
            next.king_move_scores[i] = draw(self.king_move_scores[i], 0.1, 20.0);
        }

        for i in 0..2 {
            next.pawn_move_distance_scores[i] =
                draw(self.pawn_move_distance_scores[i], 0.1, 20.0);
        }
        for i in 0..8 {
            next.knight_move_distance_scores[i] =
                draw(self.knight_move_distance_scores[i], 0.1, 20.0);
        }
        for i in 0..7 {
            next.bishop_move_distance_scores[i] =
                draw(self.bishop_move_distance_scores[i], 0.1, 20.0);
            next.rook_move_distance_scores[i] =
                draw(self.rook_move_distance_scores[i], 0.1, 20.0);
            next.queen_move_distance_scores[i] =
                draw(self.queen_move_distance_scores[i], 0.1, 20.0);
        }
        next.king_move_distance_scores[0] = draw(self.king_move_distance_scores[0], 0.1, 20.0);

        next
    }

    /// Writes the full weight set to `path` as a human-readable report,
    /// headed by the iteration and score that produced it. The file is
    /// rewritten from scratch on every call — the report always describes
    /// exactly one weight set.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be written.
    pub fn write_report(
        &self,
        path: &Path,
        iteration: usize,
        score: usize,
        total_puzzles: usize,
    ) -> anyhow::Result<()> {
        let mut out = String::new();
        out.push_str("=== BEST PARAMETERS ===\n");
        out.push_str(&format!("iteration: {iteration}\n"));
        out.push_str(&format!("score: {score} / {total_puzzles} puzzles\n\n"));

        out.push_str("# Development and piece positioning\n");
        push_scalar(&mut out, "development_penalty_per_move", self.development_penalty_per_move);
        push_scalar(&mut out, "global_position_table_scale", self.global_position_table_scale);
        push_scalar(&mut out, "knight_backstop_penalty", self.knight_backstop_penalty);
        push_scalar(&mut out, "knight_edge_penalty", self.knight_edge_penalty);
        push_scalar(&mut out, "slider_mobility_per_square", self.slider_mobility_per_square);

        out.push_str("\n# Pawn evaluation\n");
        push_scalar(&mut out, "undefended_central_pawn_penalty", self.undefended_central_pawn_penalty);
        push_scalar(&mut out, "central_pawn_bonus", self.central_pawn_bonus);
        push_scalar(&mut out, "pawn_promotion_immediate_bonus", self.pawn_promotion_immediate_bonus);
        push_scalar(&mut out, "pawn_promotion_immediate_distance", self.pawn_promotion_immediate_distance);
        push_scalar(&mut out, "pawn_promotion_delayed_bonus", self.pawn_promotion_delayed_bonus);
        push_scalar(&mut out, "pawn_promotion_delayed_distance", self.pawn_promotion_delayed_distance);

        out.push_str("\n# King safety and castling\n");
        push_scalar(&mut out, "king_hasmoved_penalty", self.king_hasmoved_penalty);
        push_scalar(&mut out, "king_center_exposure_penalty", self.king_center_exposure_penalty);
        push_scalar(&mut out, "castling_bonus", self.castling_bonus);
        push_scalar(&mut out, "king_adjacent_attack_bonus", self.king_adjacent_attack_bonus);

        out.push_str("\n# Tactical support\n");
        push_scalar(&mut out, "defended_piece_support_bonus", self.defended_piece_support_bonus);
        push_scalar(&mut out, "defended_piece_weaker_penalty", self.defended_piece_weaker_penalty);
        push_scalar(&mut out, "undefended_piece_penalty", self.undefended_piece_penalty);

        out.push_str("\n# Check and stalemate\n");
        push_scalar(&mut out, "check_penalty_white", self.check_penalty_white);
        push_scalar(&mut out, "check_bonus_black", self.check_bonus_black);
        push_scalar(&mut out, "stalemate_black_penalty", self.stalemate_black_penalty);
        push_scalar(&mut out, "stalemate_white_penalty", self.stalemate_white_penalty);

        out.push_str("\n# Endgame king island\n");
        push_scalar(&mut out, "endgame_king_island_max_norm", self.endgame_king_island_max_norm);
        push_scalar(&mut out, "endgame_king_island_bonus_scale", self.endgame_king_island_bonus_scale);

        out.push_str("\n# Search pruning and terminal scores\n");
        push_scalar(&mut out, "static_futility_prune_margin", self.static_futility_prune_margin);
        push_scalar(&mut out, "checkmate_score", self.checkmate_score);
        push_scalar(&mut out, "stalemate_score", self.stalemate_score);
        push_scalar(&mut out, "draw_score", self.draw_score);

        out.push_str("\n# Piece-square tables ([file][rank])\n");
        push_table(&mut out, "pawn_pst", &self.pawn_pst);
        push_table(&mut out, "knight_pst", &self.knight_pst);
        push_table(&mut out, "bishop_pst", &self.bishop_pst);
        push_table(&mut out, "rook_pst", &self.rook_pst);
        push_table(&mut out, "queen_pst", &self.queen_pst);
        push_table(&mut out, "king_pst_mg", &self.king_pst_mg);
        push_table(&mut out, "king_pst_eg", &self.king_pst_eg);

        out.push_str("\n# Move-direction score tables\n");
        push_row(&mut out, "pawn_move_scores", &self.pawn_move_scores);
        push_row(&mut out, "knight_move_scores", &self.knight_move_scores);
        push_row(&mut out, "bishop_move_scores", &self.bishop_move_scores);
        push_row(&mut out, "rook_move_scores", &self.rook_move_scores);
        push_row(&mut out, "queen_move_scores", &self.queen_move_scores);
        push_row(&mut out, "king_move_scores", &self.king_move_scores);

        out.push_str("\n# Move-distance score tables\n");
        push_row(&mut out, "pawn_move_distance_scores", &self.pawn_move_distance_scores);
        push_row(&mut out, "knight_move_distance_scores", &self.knight_move_distance_scores);
        push_row(&mut out, "bishop_move_distance_scores", &self.bishop_move_distance_scores);
        push_row(&mut out, "rook_move_distance_scores", &self.rook_move_distance_scores);
        push_row(&mut out, "queen_move_distance_scores", &self.queen_move_distance_scores);
        push_row(&mut out, "king_move_distance_scores", &self.king_move_distance_scores);

        fs::write(path, out)
            .with_context(|| format!("cannot write weight report to {}", path.display()))
    }
}

impl Default for Weights {
    fn default() -> Self {
        Self::baseline()
    }
}

// `{:?}` prints the shortest representation that round-trips the exact
// f64 value, so nothing is lost between training runs.
fn push_scalar(out: &mut String, name: &str, value: f64) {
    out.push_str(&format!("{name} = {value:?}\n"));
}

fn push_row(out: &mut String, name: &str, values: &[f64]) {
    out.push_str(&format!("{name} = ["));
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(&format!("{value:?}"));
    }
    out.push_str("]\n");
}

fn push_table(out: &mut String, name: &str, table: &PieceSquareTable) {
    out.push_str(&format!("{name} = [\n"));
    for row in table {
        out.push_str("    [");
        for (i, value) in row.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(&format!("{value:?}"));
        }
        out.push_str("],\n");
    }
    out.push_str("]\n");
}
