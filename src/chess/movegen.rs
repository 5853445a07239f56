//! Legal [move generation] and game-ending detection.
//!
//! Move generation scans the board file-major (a-file first), rank-minor
//! (rank 1 first) and emits each piece's moves in a fixed pattern order.
//! This ordering is part of the engine's contract: the search breaks ties
//! by taking the first best-scoring move, so the emission order decides
//! which of several equal moves gets played — and therefore whether the
//! engine reproduces a reference puzzle line.
//!
//! [move generation]: https://www.chessprogramming.org/Move_Generation

use crate::chess::core::{File, Move, MoveList, Piece, PieceKind, Player, Rank, Square};
use crate::chess::position::Position;

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

const BISHOP_RAYS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

const ROOK_RAYS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

const QUEEN_RAYS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// King steps share the queen's direction order.
const KING_OFFSETS: [(i8, i8); 8] = QUEEN_RAYS;

/// Calculates every legal move for `side`: pseudo-legal generation filtered
/// by a scratch-board check probe. Returns an empty list on terminal
/// positions.
#[must_use]
pub fn legal_moves(position: &Position, side: Player) -> MoveList {
    let mut moves = MoveList::new();
    for file in 0..8i8 {
        for rank in 0..8i8 {
            let Some(piece) = position.piece_at(file, rank) else {
                continue;
            };
            if piece.side != side {
                continue;
            }
            match piece.kind {
                PieceKind::Pawn => pawn_moves(position, file, rank, side, &mut moves),
                PieceKind::Knight => {
                    offset_moves(position, file, rank, side, &KNIGHT_OFFSETS, &mut moves);
                }
                PieceKind::Bishop => ray_moves(position, file, rank, side, &BISHOP_RAYS, &mut moves),
                PieceKind::Rook => ray_moves(position, file, rank, side, &ROOK_RAYS, &mut moves),
                PieceKind::Queen => ray_moves(position, file, rank, side, &QUEEN_RAYS, &mut moves),
                PieceKind::King => {
                    offset_moves(position, file, rank, side, &KING_OFFSETS, &mut moves);
                    castle_moves(position, file, rank, piece, &mut moves);
                }
            }
        }
    }
    moves
}

fn pawn_moves(position: &Position, file: i8, rank: i8, side: Player, moves: &mut MoveList) {
    let dir: i8 = match side {
        Player::White => 1,
        Player::Black => -1,
    };
    let start_rank: i8 = match side {
        Player::White => 1,
        Player::Black => 6,
    };

    // Single push.
    if (0..8).contains(&(rank + dir)) && position.piece_at(file, rank + dir).is_none() {
        push_if_safe(position, file, rank, file, rank + dir, side, moves);
    }
    // Double push from the starting rank.
    if rank == start_rank
        && position.piece_at(file, rank + dir).is_none()
        && position.piece_at(file, rank + 2 * dir).is_none()
    {
        push_if_safe(position, file, rank, file, rank + 2 * dir, side, moves);
    }
    // Captures, the lower file first.
    for df in [-1, 1] {
        let (nf, nr) = (file + df, rank + dir);
        if !(0..8).contains(&nf) || !(0..8).contains(&nr) {
            continue;
        }
        if position
            .piece_at(nf, nr)
            .is_some_and(|target| target.side != side)
        {
            push_if_safe(position, file, rank, nf, nr, side, moves);
        }
        // En passant: an enemy pawn beside us on our fifth rank, put there
        // by the immediately previous double push.
        if position
            .piece_at(nf, rank)
            .is_some_and(|neighbor| neighbor.kind == PieceKind::Pawn && neighbor.side != side)
            && en_passant_allowed(position, nf, rank, side)
        {
            push_if_safe(position, file, rank, nf, nr, side, moves);
        }
    }
}

/// The previous move must have been the neighbouring pawn's two-square
/// advance: from its starting rank straight onto the capturing pawn's rank.
fn en_passant_allowed(position: &Position, neighbor_file: i8, rank: i8, side: Player) -> bool {
    let Some(last) = position.last_move() else {
        return false;
    };
    if last.from.file() as i8 != neighbor_file || last.to.file() as i8 != neighbor_file {
        return false;
    }
    match side {
        Player::White => {
            rank == 4 && last.from.rank() == Rank::Seven && last.to.rank() == Rank::Five
        }
        Player::Black => {
            rank == 3 && last.from.rank() == Rank::Two && last.to.rank() == Rank::Four
        }
    }
}

fn offset_moves(
    position: &Position,
    file: i8,
    rank: i8,
    side: Player,
    offsets: &[(i8, i8)],
    moves: &mut MoveList,
) {
    for (df, dr) in offsets {
        let (nf, nr) = (file + df, rank + dr);
        if !(0..8).contains(&nf) || !(0..8).contains(&nr) {
            continue;
        }
        match position.piece_at(nf, nr) {
            Some(target) if target.side == side => {}
            _ => push_if_safe(position, file, rank, nf, nr, side, moves),
        }
    }
}

fn ray_moves(
    position: &Position,
    file: i8,
    rank: i8,
    side: Player,
    rays: &[(i8, i8)],
    moves: &mut MoveList,
) {
    for (df, dr) in rays {
        let (mut nf, mut nr) = (file + df, rank + dr);
        while (0..8).contains(&nf) && (0..8).contains(&nr) {
            match position.piece_at(nf, nr) {
                None => push_if_safe(position, file, rank, nf, nr, side, moves),
                Some(target) => {
                    if target.side != side {
                        push_if_safe(position, file, rank, nf, nr, side, moves);
                    }
                    break;
                }
            }
            nf += df;
            nr += dr;
        }
    }
}

/// Kingside castling first, then queenside. The king must stand unmoved on
/// its e-file starting square, the chosen rook unmoved in its corner, every
/// square between them empty, and the king may not be in check now, cross
/// an attacked square, or land on one.
fn castle_moves(position: &Position, file: i8, rank: i8, king: Piece, moves: &mut MoveList) {
    if king.has_moved || file != File::E as i8 || is_in_check(position, king.side) {
        return;
    }
    let unmoved_rook = |f: i8| {
        position.piece_at(f, rank).is_some_and(|piece| {
            piece.kind == PieceKind::Rook && piece.side == king.side && !piece.has_moved
        })
    };
    let empty = |f: i8| position.piece_at(f, rank).is_none();
    let king_safe_on = |f: i8| {
        let mut scratch = position.clone();
        let from = square_at(file, rank);
        scratch.clear(from);
        scratch.set(square_at(f, rank), king);
        !is_in_check(&scratch, king.side)
    };

    if unmoved_rook(7) && empty(5) && empty(6) && king_safe_on(5) && king_safe_on(6) {
        moves.push(Move::new(square_at(file, rank), square_at(6, rank)));
    }
    if unmoved_rook(0) && empty(1) && empty(2) && empty(3) && king_safe_on(3) && king_safe_on(2) {
        moves.push(Move::new(square_at(file, rank), square_at(2, rank)));
    }
}

/// Emits the move unless it would leave the mover's own king attacked. The
/// probe relocates only the moving piece on a scratch board; castling rook
/// travel and en passant victim removal are not simulated.
fn push_if_safe(
    position: &Position,
    from_file: i8,
    from_rank: i8,
    to_file: i8,
    to_rank: i8,
    side: Player,
    moves: &mut MoveList,
) {
    let from = square_at(from_file, from_rank);
    let to = square_at(to_file, to_rank);
    let mut scratch = position.clone();
    if let Some(piece) = scratch.at(from) {
        scratch.clear(from);
        scratch.set(to, piece);
    }
    if !is_in_check(&scratch, side) {
        moves.push(Move::new(from, to));
    }
}

fn square_at(file: i8, rank: i8) -> Square {
    Square::from_indices(file as u8, rank as u8).expect("coordinates checked by caller")
}

/// Whether `square` is attacked by any piece of `by`. Scans outward from
/// the square: pawn capture patterns, knight offsets, then blocker-aware
/// rays for sliders and the adjacent ring for the enemy king.
#[must_use]
pub fn is_square_attacked(position: &Position, square: Square, by: Player) -> bool {
    let (file, rank) = (square.file() as i8, square.rank() as i8);
    // A pawn of `by` attacks this square from one rank behind its own
    // advance direction.
    let pawn_rank = match by {
        Player::White => rank - 1,
        Player::Black => rank + 1,
    };
    for df in [-1, 1] {
        if position
            .piece_at(file + df, pawn_rank)
            .is_some_and(|piece| piece.kind == PieceKind::Pawn && piece.side == by)
        {
            return true;
        }
    }

    for (df, dr) in KNIGHT_OFFSETS {
        if position
            .piece_at(file + df, rank + dr)
            .is_some_and(|piece| piece.kind == PieceKind::Knight && piece.side == by)
        {
            return true;
        }
    }

    for (rays, kinds) in [
        (&BISHOP_RAYS, [PieceKind::Bishop, PieceKind::Queen]),
        (&ROOK_RAYS, [PieceKind::Rook, PieceKind::Queen]),
    ] {
        for (df, dr) in rays {
            let (mut nf, mut nr) = (file + df, rank + dr);
            while (0..8).contains(&nf) && (0..8).contains(&nr) {
                if let Some(piece) = position.piece_at(nf, nr) {
                    if piece.side == by && kinds.contains(&piece.kind) {
                        return true;
                    }
                    break;
                }
                nf += df;
                nr += dr;
            }
        }
    }

    for (df, dr) in KING_OFFSETS {
        if position
            .piece_at(file + df, rank + dr)
            .is_some_and(|piece| piece.kind == PieceKind::King && piece.side == by)
        {
            return true;
        }
    }

    false
}

/// Whether `side`'s king is attacked. A position without a king (tolerated
/// for hand-crafted puzzles) is never in check.
#[must_use]
pub fn is_in_check(position: &Position, side: Player) -> bool {
    match position.king_square(side) {
        Some(king) => is_square_attacked(position, king, !side),
        None => false,
    }
}

/// Checkmate: in check with no legal moves.
#[must_use]
pub fn is_checkmate(position: &Position, side: Player) -> bool {
    is_in_check(position, side) && legal_moves(position, side).is_empty()
}

/// Stalemate: not in check, yet no legal moves.
#[must_use]
pub fn is_stalemate(position: &Position, side: Player) -> bool {
    !is_in_check(position, side) && legal_moves(position, side).is_empty()
}

/// Whether the piece on `square` could be captured by the opponent's reply.
#[must_use]
pub fn can_be_captured(position: &Position, square: Square) -> bool {
    match position.at(square) {
        Some(piece) => is_square_attacked(position, square, !piece.side),
        None => false,
    }
}

/// Endgame classification: Black is down to at most two non-pawn pieces.
/// Checking only the black side mirrors the original engine's behaviour and
/// is kept deliberately; see DESIGN.md.
#[must_use]
pub fn is_endgame(position: &Position) -> bool {
    position.major_pieces(Player::Black) <= 2
}

/// Finds the first generated move that delivers immediate checkmate, if
/// any. The search runs this before pruning can hide a forced mate.
#[must_use]
pub fn mate_in_one(position: &Position, side: Player) -> Option<Move> {
    legal_moves(position, side).into_iter().find(|candidate| {
        let mut child = position.clone();
        child.make_move(candidate);
        is_checkmate(&child, !side)
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn position(fen: &str) -> Position {
        Position::from_fen(fen).expect("valid position").0
    }

    #[test]
    fn starting_position_moves_in_contract_order() {
        let moves: Vec<String> = legal_moves(&Position::starting(), Player::White)
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            moves,
            [
                "a2a3", "a2a4", "b1c3", "b1a3", "b2b3", "b2b4", "c2c3", "c2c4", "d2d3", "d2d4",
                "e2e3", "e2e4", "f2f3", "f2f4", "g1h3", "g1f3", "g2g3", "g2g4", "h2h3", "h2h4",
            ]
        );
    }

    #[test]
    fn generator_is_reproducible() {
        let position = position("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3");
        let first = legal_moves(&position, Player::White);
        let second = legal_moves(&position, Player::White);
        assert_eq!(first, second);
    }

    #[test]
    fn no_generated_move_leaves_own_king_in_check() {
        // White's knight on d2 is pinned against the king by the rook on d8.
        let position = position("3r2k1/8/8/8/8/8/3N4/3K4 w - - 0 1");
        for m in legal_moves(&position, Player::White) {
            let mut child = position.clone();
            child.make_move(&m);
            assert!(!is_in_check(&child, Player::White), "move {m} leaves check");
        }
        // The pinned knight specifically cannot move at all.
        assert!(legal_moves(&position, Player::White)
            .iter()
            .all(|m| m.from != Square::D2));
    }

    #[test]
    fn check_detection_by_piece_kind() {
        assert!(is_in_check(
            &position("4k3/8/8/8/8/8/3p4/4K3 w - - 0 1"),
            Player::White
        ));
        assert!(is_in_check(
            &position("4k3/8/8/8/8/3n4/8/4K3 w - - 0 1"),
            Player::White
        ));
        assert!(is_in_check(
            &position("4k3/8/8/8/7b/8/8/4K3 w - - 0 1"),
            Player::White
        ));
        assert!(is_in_check(
            &position("4k3/8/8/8/8/8/8/r3K3 w - - 0 1"),
            Player::White
        ));
        assert!(is_in_check(
            &position("4k3/4q3/8/8/8/8/8/4K3 b - - 0 1"),
            Player::Black
        ));
        // Blocked slider gives no check.
        assert!(!is_in_check(
            &position("4k3/8/8/8/8/8/8/r1B1K3 w - - 0 1"),
            Player::White
        ));
    }

    #[test]
    fn kingless_position_is_never_in_check() {
        let position = position("8/8/8/8/8/8/8/4K3 w - - 0 1");
        assert!(!is_in_check(&position, Player::Black));
        assert!(!is_checkmate(&position, Player::Black));
    }

    #[test]
    fn checkmate_and_stalemate_are_disjoint() {
        // Back-rank mate.
        let mate = position("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1");
        assert!(is_checkmate(&mate, Player::Black));
        assert!(!is_stalemate(&mate, Player::Black));
        // Classic king + queen stalemate.
        let stale = position("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        assert!(is_stalemate(&stale, Player::Black));
        assert!(!is_checkmate(&stale, Player::Black));
        assert!(legal_moves(&stale, Player::Black).is_empty());
    }

    #[test]
    fn en_passant_requires_immediate_double_push() {
        let mut board = position("4k3/3p4/8/4P3/8/8/8/4K3 b - - 0 1");
        board.make_move(&Move::from_uci("d7d5").unwrap());
        let moves = legal_moves(&board, Player::White);
        assert!(moves.contains(&Move::from_uci("e5d6").unwrap()));

        // After an unrelated reply the capture window is closed.
        let mut stale = board.clone();
        stale.make_move(&Move::from_uci("e1d1").unwrap());
        let moves = legal_moves(&stale, Player::White);
        assert!(!moves.contains(&Move::from_uci("e5d6").unwrap()));
    }

    #[test]
    fn castling_through_pieces_or_after_moving_is_illegal() {
        // Bishop still on f1 blocks kingside castling.
        let blocked = position("4k3/8/8/8/8/8/8/4KB1R w K - 0 1");
        assert!(!legal_moves(&blocked, Player::White).contains(&Move::from_uci("e1g1").unwrap()));

        // A rook that has already moved cannot castle.
        let mut shuffled = position("4k3/8/8/8/8/8/8/4K2R w K - 0 1");
        shuffled.make_move(&Move::from_uci("h1g1").unwrap());
        shuffled.make_move(&Move::from_uci("g1h1").unwrap());
        assert!(!legal_moves(&shuffled, Player::White).contains(&Move::from_uci("e1g1").unwrap()));
    }

    #[test]
    fn mate_in_one_finds_the_mating_move() {
        let position = position("6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1");
        assert_eq!(
            mate_in_one(&position, Player::White),
            Some(Move::from_uci("a1a8").unwrap())
        );
        assert_eq!(mate_in_one(&Position::starting(), Player::White), None);
    }

    #[test]
    fn capture_probe_sees_all_attackers() {
        let board = position("4k3/8/8/8/3p4/8/8/B3K3 w - - 0 1");
        // The d4 pawn sits on the a1 bishop's diagonal.
        assert!(can_be_captured(&board, Square::D4));
        assert!(!can_be_captured(&board, Square::E8));
    }

    #[test]
    fn endgame_tracks_black_material() {
        assert!(!is_endgame(&Position::starting()));
        assert!(is_endgame(&position("4k3/8/8/8/8/8/8/QQQQK3 w - - 0 1")));
        assert!(is_endgame(&position("r1b1k3/8/8/8/8/8/8/4K3 w - - 0 1")));
        assert!(!is_endgame(&position("r1b1k1nr/8/8/8/8/8/8/4K3 w - - 0 1")));
    }
}
