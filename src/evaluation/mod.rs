//! This module implements "static" [evaluation], i.e. predicting the
//! relative value of a position without [`crate::search`].
//!
//! The score is a weighted sum of material, positional tables, mobility,
//! pawn-structure and king-safety terms, always from White's perspective
//! (positive favours White). Negamax callers flip the sign as needed.
//! Scores are memoised in a per-state transposition table: evaluating the
//! same position twice returns the identical `f64` and costs one lookup.
//!
//! [evaluation]: https://www.chessprogramming.org/Evaluation

pub(crate) mod transposition;
pub mod weights;

use crate::chess::core::{Move, Piece, PieceKind, Player};
use crate::chess::game::GameState;
use crate::chess::movegen;
use crate::chess::position::Position;
use crate::evaluation::weights::{Weights, CENTER_TABLE, PIECE_VALUES};

// Per-table multipliers for the piece-square terms. Kept at unity: the
// tables themselves are trained, so separate scales would be redundant
// degrees of freedom.
const PAWN_PST_SCALE: f64 = 1.0;
const KNIGHT_PST_SCALE: f64 = 1.0;
const BISHOP_PST_SCALE: f64 = 1.0;
const ROOK_PST_SCALE: f64 = 1.0;
const QUEEN_PST_SCALE: f64 = 1.0;
const KING_PST_MG_SCALE: f64 = 1.0;
const KING_PST_EG_SCALE: f64 = 1.0;

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
];

const BISHOP_RAYS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ROOK_RAYS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const RING: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// Evaluates `position` through `state`'s transposition table, updating the
/// evaluation counters. This is the only entry point the search uses.
pub(crate) fn evaluate(state: &mut GameState, position: &Position) -> f64 {
    let key = transposition::position_key(position);
    if let Some(score) = state.tt.probe(key) {
        state.stats.tt_hits += 1;
        return score;
    }
    state.stats.evaluations += 1;
    let score = static_score(position, &state.weights, state.moves_played());
    state.tt.store(key, score);
    score
}

/// The raw weighted sum, independent of any caching. `moves_played` scales
/// the development penalty: sitting on a starting square gets worse the
/// longer the game has gone on.
pub(crate) fn static_score(position: &Position, weights: &Weights, moves_played: usize) -> f64 {
    let mut score = 0.0;
    let endgame = movegen::is_endgame(position);

    let mut white_attacks = [[false; 8]; 8];
    let mut black_attacks = [[false; 8]; 8];
    let mut white_king: Option<(i8, i8)> = None;
    let mut black_king: Option<(i8, i8)> = None;

    for file in 0..8i8 {
        for rank in 0..8i8 {
            let Some(piece) = position.piece_at(file, rank) else {
                continue;
            };
            let sign = piece.side.sign();
            let attacks = match piece.side {
                Player::White => &mut white_attacks,
                Player::Black => &mut black_attacks,
            };

            if piece.kind == PieceKind::King {
                match piece.side {
                    Player::White => white_king = Some((file, rank)),
                    Player::Black => black_king = Some((file, rank)),
                }
            }

            if !piece.has_moved && on_starting_square(&piece, file, rank) {
                score -= sign * weights.development_penalty_per_move * moves_played as f64;
            }

            score += sign * PIECE_VALUES[piece.kind as usize];
            score += sign
                * CENTER_TABLE[file as usize][rank as usize]
                * weights.global_position_table_scale;

            let (table, scale) = match piece.kind {
                PieceKind::Pawn => (&weights.pawn_pst, PAWN_PST_SCALE),
                PieceKind::Knight => (&weights.knight_pst, KNIGHT_PST_SCALE),
                PieceKind::Bishop => (&weights.bishop_pst, BISHOP_PST_SCALE),
                PieceKind::Rook => (&weights.rook_pst, ROOK_PST_SCALE),
                PieceKind::Queen => (&weights.queen_pst, QUEEN_PST_SCALE),
                PieceKind::King if endgame => (&weights.king_pst_eg, KING_PST_EG_SCALE),
                PieceKind::King => (&weights.king_pst_mg, KING_PST_MG_SCALE),
            };
            score += sign * table[file as usize][rank as usize] * scale;

            match piece.kind {
                PieceKind::Pawn => {
                    score += pawn_terms(position, &piece, file, rank, weights);
                    let forward = match piece.side {
                        Player::White => 1,
                        Player::Black => -1,
                    };
                    mark(attacks, file - 1, rank + forward);
                    mark(attacks, file + 1, rank + forward);
                }
                PieceKind::Knight => {
                    score += knight_terms(&piece, file, rank, weights);
                    for (df, dr) in KNIGHT_OFFSETS {
                        mark(attacks, file + df, rank + dr);
                    }
                }
                PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
                    score += slider_mobility(position, &piece, file, rank, weights, attacks);
                }
                PieceKind::King => {
                    if piece.has_moved {
                        score -= sign * weights.king_hasmoved_penalty;
                    }
                    if (file == 3 || file == 4) && (2..=5).contains(&rank) {
                        score -= sign * weights.king_center_exposure_penalty;
                    }
                    for (df, dr) in RING {
                        mark(attacks, file + df, rank + dr);
                    }
                }
            }
        }
    }

    // Pressure on the squares around each king: enemy-controlled squares in
    // a king's ring count against the king's owner.
    if let Some((kf, kr)) = white_king {
        for (df, dr) in RING {
            if attacked(&black_attacks, kf + df, kr + dr) {
                score -= weights.king_adjacent_attack_bonus;
            }
        }
    }
    if let Some((kf, kr)) = black_king {
        for (df, dr) in RING {
            if attacked(&white_attacks, kf + df, kr + dr) {
                score += weights.king_adjacent_attack_bonus;
            }
        }
    }

    // The post-castling configuration (king on the g- or c-file with the
    // rook beside it on f or d) earns a flat bonus.
    let castled = |king: Option<(i8, i8)>, rank: i8, side: Player| {
        let rook_on = |file: i8| {
            position
                .piece_at(file, rank)
                .is_some_and(|piece| piece.kind == PieceKind::Rook && piece.side == side)
        };
        matches!(king, Some((6, r)) if r == rank && rook_on(5))
            || matches!(king, Some((2, r)) if r == rank && rook_on(3))
    };
    if castled(white_king, 0, Player::White) {
        score += weights.castling_bonus;
    }
    if castled(black_king, 7, Player::Black) {
        score -= weights.castling_bonus;
    }

    if movegen::is_in_check(position, Player::White) {
        score -= weights.check_penalty_white;
    }
    if movegen::is_in_check(position, Player::Black) {
        score += weights.check_bonus_black;
    }

    // Drawn-when-winning guard: a stalemated defender overrides the
    // material count with a fixed penalty against the side that allowed it.
    if movegen::is_stalemate(position, Player::Black) && score > 0.0 {
        score = -weights.stalemate_black_penalty;
    }
    if movegen::is_stalemate(position, Player::White) && score < 0.0 {
        score = weights.stalemate_white_penalty;
    }

    score
}

fn mark(attacks: &mut [[bool; 8]; 8], file: i8, rank: i8) {
    if (0..8).contains(&file) && (0..8).contains(&rank) {
        attacks[file as usize][rank as usize] = true;
    }
}

fn attacked(attacks: &[[bool; 8]; 8], file: i8, rank: i8) -> bool {
    (0..8).contains(&file) && (0..8).contains(&rank) && attacks[file as usize][rank as usize]
}

fn on_starting_square(piece: &Piece, file: i8, rank: i8) -> bool {
    let backrank = match piece.side {
        Player::White => 0,
        Player::Black => 7,
    };
    match piece.kind {
        PieceKind::Pawn => {
            rank == match piece.side {
                Player::White => 1,
                Player::Black => 6,
            }
        }
        PieceKind::Rook => (file == 0 || file == 7) && rank == backrank,
        PieceKind::Knight => (file == 1 || file == 6) && rank == backrank,
        PieceKind::Bishop => (file == 2 || file == 5) && rank == backrank,
        PieceKind::Queen => file == 3 && rank == backrank,
        PieceKind::King => file == 4 && rank == backrank,
    }
}

/// Central-pawn support and promotion proximity.
fn pawn_terms(
    position: &Position,
    piece: &Piece,
    file: i8,
    rank: i8,
    weights: &Weights,
) -> f64 {
    let mut score = 0.0;
    let sign = piece.side.sign();

    if (file == 3 || file == 4) && (rank == 3 || rank == 4) {
        // A central pawn is defended iff a friendly pawn sits diagonally
        // behind it.
        let behind = match piece.side {
            Player::White => rank - 1,
            Player::Black => rank + 1,
        };
        let pawn_support = |f: i8| {
            position
                .piece_at(f, behind)
                .is_some_and(|p| p.kind == PieceKind::Pawn && p.side == piece.side)
        };
        if !pawn_support(file - 1) && !pawn_support(file + 1) {
            score -= sign * weights.undefended_central_pawn_penalty;
        }
        score += sign * weights.central_pawn_bonus;
    }

    let promotion_distance = f64::from(match piece.side {
        Player::White => 7 - rank,
        Player::Black => rank,
    });
    if promotion_distance <= weights.pawn_promotion_immediate_distance {
        score += sign
            * weights.pawn_promotion_immediate_bonus
            * (weights.pawn_promotion_immediate_distance - promotion_distance);
    } else if promotion_distance <= weights.pawn_promotion_delayed_distance {
        score += sign
            * weights.pawn_promotion_delayed_bonus
            * (weights.pawn_promotion_delayed_distance - promotion_distance);
    }

    score
}

/// Penalties for passive knights: sitting on the own back rank in front of
/// the minor-piece files, or hugging the board edge.
fn knight_terms(piece: &Piece, file: i8, rank: i8, weights: &Weights) -> f64 {
    let mut score = 0.0;
    let sign = piece.side.sign();
    let backrank = match piece.side {
        Player::White => 0,
        Player::Black => 7,
    };
    if rank == backrank && (2..=5).contains(&file) {
        score -= sign * weights.knight_backstop_penalty;
    }
    if file == 0 || file == 7 {
        score -= sign * weights.knight_edge_penalty;
    }
    score
}

/// Counts reachable squares along each of the slider's rays (the blocker
/// square included) and marks them in the side's attack map.
fn slider_mobility(
    position: &Position,
    piece: &Piece,
    file: i8,
    rank: i8,
    weights: &Weights,
    attacks: &mut [[bool; 8]; 8],
) -> f64 {
    let mut score = 0.0;
    let sign = piece.side.sign();
    let diagonals = piece.kind == PieceKind::Bishop || piece.kind == PieceKind::Queen;
    let straights = piece.kind == PieceKind::Rook || piece.kind == PieceKind::Queen;

    let walk = |df: i8, dr: i8, attacks: &mut [[bool; 8]; 8]| {
        let (mut nf, mut nr) = (file + df, rank + dr);
        let mut mobility = 0.0;
        while (0..8).contains(&nf) && (0..8).contains(&nr) {
            mobility += 1.0;
            mark(attacks, nf, nr);
            if position.piece_at(nf, nr).is_some() {
                break;
            }
            nf += df;
            nr += dr;
        }
        mobility
    };

    if diagonals {
        for (df, dr) in BISHOP_RAYS {
            score += sign * walk(df, dr, attacks) * weights.slider_mobility_per_square;
        }
    }
    if straights {
        for (df, dr) in ROOK_RAYS {
            score += sign * walk(df, dr, attacks) * weights.slider_mobility_per_square;
        }
    }
    score
}

/// Bonus applied at the search root (depth 0 only) for moves that walk a
/// piece toward the enemy king in the endgame: `Δdistance × (5 −
/// distance_after) × 0.5`, but only when the destination square is not
/// capturable. Pawns and the king are excluded.
pub(crate) fn endgame_advancement(position: &Position, next_move: &Move, side: Player) -> f64 {
    if !movegen::is_endgame(position) {
        return 0.0;
    }
    let Some(enemy_king) = position.king_square(!side) else {
        return 0.0;
    };
    let Some(piece) = position.at(next_move.from) else {
        return 0.0;
    };
    if piece.kind == PieceKind::Pawn || piece.kind == PieceKind::King {
        return 0.0;
    }

    let distance_before = next_move.from.distance(enemy_king);
    let distance_after = next_move.to.distance(enemy_king);
    if distance_after >= distance_before {
        return 0.0;
    }

    // Probe the destination with a bare relocation.
    let mut scratch = position.clone();
    scratch.clear(next_move.from);
    scratch.set(next_move.to, piece);
    if movegen::can_be_captured(&scratch, next_move.to) {
        return 0.0;
    }

    f64::from(distance_before - distance_after) * (5.0 - f64::from(distance_after)) * 0.5
}
