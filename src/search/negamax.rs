//! The recursive alpha-beta searcher. One [`GameState`] threads the
//! transposition table, statistics and game history through the recursion;
//! each node works on its own scratch [`Position`], so the owning state's
//! board is never mutated by a search.

use crate::chess::core::Player;
use crate::chess::game::GameState;
use crate::chess::movegen;
use crate::chess::position::Position;
use crate::evaluation;
use crate::search::{Depth, Line, SearchResult};

/// Computes the best move for `side` in the state's current position.
///
/// Before any recursion, a mate-in-one sweep over the legal moves
/// guarantees an immediate checkmate is never lost to pruning. The chosen
/// move is returned, not played.
pub fn best_move(state: &mut GameState, max_depth: Depth, side: Player) -> SearchResult {
    if let Some(mate) = movegen::mate_in_one(state.position(), side) {
        let mut line = Line::new();
        line.push(mate);
        return SearchResult {
            line,
            score: state.weights.checkmate_score,
        };
    }

    state.reset_stats();
    let root = state.position().clone();
    let mate_score = state.weights.checkmate_score;
    negamax(state, &root, 0, max_depth, side, -mate_score, mate_score)
}

/// One negamax node: `position` is this node's board, `side` the player to
/// move here, and the returned score is from `side`'s perspective.
fn negamax(
    state: &mut GameState,
    position: &Position,
    cur_depth: Depth,
    max_depth: Depth,
    side: Player,
    mut alpha: f64,
    beta: f64,
) -> SearchResult {
    let mate_score = state.weights.checkmate_score;
    let mut best = SearchResult {
        line: Line::new(),
        score: -mate_score,
    };

    // Game-ending conditions come before anything else, in a fixed order.
    if movegen::is_checkmate(position, Player::White) {
        best.score = if side == Player::White {
            -mate_score
        } else {
            mate_score
        };
        return best;
    }
    if movegen::is_checkmate(position, Player::Black) {
        best.score = if side == Player::Black {
            -mate_score
        } else {
            mate_score
        };
        return best;
    }
    if movegen::is_stalemate(position, Player::White) {
        best.score = side.sign() * -state.weights.stalemate_score;
        return best;
    }
    if movegen::is_stalemate(position, Player::Black) {
        best.score = side.sign() * state.weights.stalemate_score;
        return best;
    }
    // This node is the third occurrence of a twice-recorded position.
    if state.repetition_count(position) >= 2 {
        best.score = state.weights.draw_score;
        return best;
    }
    if state.halfmove_clock() >= 100 {
        best.score = state.weights.draw_score;
        return best;
    }

    if cur_depth >= max_depth {
        best.score = side.sign() * evaluation::evaluate(state, position);
        return best;
    }

    let moves = movegen::legal_moves(position, side);
    if moves.is_empty() {
        // Unreachable given the terminal checks above; fall back to the
        // evaluation with an empty line rather than a bogus move.
        best.score = side.sign() * evaluation::evaluate(state, position);
        return best;
    }

    let futility_margin = state.weights.static_futility_prune_margin;
    for next_move in &moves {
        let mut child = position.clone();
        child.make_move(next_move);

        // Static futility pruning: once some move has been adopted, skip
        // recursing into children whose standing evaluation already trails
        // the best by more than the margin.
        let static_score = side.sign() * evaluation::evaluate(state, &child);
        if best.score > -mate_score && static_score < best.score - futility_margin {
            state.stats.futility_prunes += 1;
            continue;
        }

        let child_result = negamax(state, &child, cur_depth + 1, max_depth, !side, -beta, -alpha);
        let mut score = -child_result.score;

        // At the root only, nudge pieces toward the enemy king in the
        // endgame.
        if cur_depth == 0 {
            score += evaluation::endgame_advancement(position, next_move, side);
        }

        if score > best.score {
            best.score = score;
            best.line.clear();
            best.line.push(*next_move);
            for continuation in &child_result.line {
                if best.line.is_full() {
                    break;
                }
                best.line.push(*continuation);
            }
        }

        if score > alpha {
            alpha = score;
        }
        if alpha >= beta {
            state.stats.alpha_beta_prunes += 1;
            break;
        }
    }

    // If futility pruning rejected every move, adopt the first legal move
    // with its standing evaluation: a non-terminal node must never report
    // an empty line.
    if best.line.is_empty() {
        let first = moves[0];
        let mut child = position.clone();
        child.make_move(&first);
        best.score = side.sign() * evaluation::evaluate(state, &child);
        best.line.push(first);
    }

    best
}
