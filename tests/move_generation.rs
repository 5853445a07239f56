//! Rules-level boundary scenarios: castling under attack, promotion,
//! en passant, and the structural invariants every generated move obeys.

use pretty_assertions::assert_eq;
use sacrifice::chess::core::{Move, PieceKind, Player, Square};
use sacrifice::chess::movegen::{
    is_checkmate, is_in_check, is_stalemate, legal_moves, mate_in_one,
};
use sacrifice::chess::position::Position;

fn position(fen: &str) -> Position {
    Position::from_fen(fen).expect("valid position").0
}

#[test]
fn castling_is_blocked_by_an_attacked_crossing_square() {
    // The f8 rook eyes f1: the white king may not cross it, so kingside
    // castling disappears while queenside stays available.
    let board = position("2k2r2/8/8/8/8/8/8/R3K2R w KQ - 0 1");
    let moves = legal_moves(&board, Player::White);
    assert!(!moves.contains(&Move::from_uci("e1g1").unwrap()));
    assert!(moves.contains(&Move::from_uci("e1c1").unwrap()));
}

#[test]
fn castling_is_blocked_out_of_check() {
    let board = position("2k1r3/8/8/8/8/8/8/R3K2R w KQ - 0 1");
    assert!(is_in_check(&board, Player::White));
    let moves = legal_moves(&board, Player::White);
    assert!(!moves.contains(&Move::from_uci("e1g1").unwrap()));
    assert!(!moves.contains(&Move::from_uci("e1c1").unwrap()));
}

#[test]
fn castling_never_lands_on_an_attacked_square() {
    // The g8 rook guards g1 itself: crossing f1 is fine, landing is not.
    let board = position("2k3r1/8/8/8/8/8/8/R3K2R w KQ - 0 1");
    let moves = legal_moves(&board, Player::White);
    assert!(!moves.contains(&Move::from_uci("e1g1").unwrap()));
    assert!(moves.contains(&Move::from_uci("e1c1").unwrap()));
}

#[test]
fn promotion_is_generated_and_queens_by_default() {
    let board = position("8/4P3/8/8/2k5/8/8/4K3 w - - 0 1");
    let moves = legal_moves(&board, Player::White);
    let push = Move::from_uci("e7e8").unwrap();
    assert!(moves.contains(&push));

    let mut after = board.clone();
    after.make_move(&push);
    assert_eq!(after.at(Square::E8).unwrap().kind, PieceKind::Queen);
    assert_eq!(after.at(Square::E8).unwrap().side, Player::White);
}

#[test]
fn en_passant_appears_exactly_when_the_window_is_open() {
    let mut board = position("4k3/3p4/8/4P3/8/8/8/4K3 b - - 0 1");
    board.make_move(&Move::from_uci("d7d5").unwrap());
    let capture = Move::from_uci("e5d6").unwrap();
    assert!(legal_moves(&board, Player::White).contains(&capture));

    // One quiet move later the right has evaporated.
    let mut later = board.clone();
    later.make_move(&Move::from_uci("e1e2").unwrap());
    assert!(!legal_moves(&later, Player::White).contains(&capture));

    // A single-square advance never opens the window.
    let mut single = position("4k3/8/3p4/4P3/8/8/8/4K3 b - - 0 1");
    single.make_move(&Move::from_uci("d6d5").unwrap());
    assert!(!legal_moves(&single, Player::White).contains(&capture));
}

#[test]
fn generated_moves_never_leave_the_mover_in_check() {
    for fen in [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "r1bqk2r/pppp1ppp/2n2n2/2b1p3/2B1P3/2N2N2/PPPP1PPP/R1BQK2R w KQkq - 6 5",
        "2k2r2/8/8/8/8/8/8/R3K2R w KQ - 0 1",
        "3r2k1/8/8/8/8/8/3N4/3K4 w - - 0 1",
        "4k3/4q3/8/8/8/8/3P4/4K3 b - - 0 1",
    ] {
        let board = position(fen);
        for side in [Player::White, Player::Black] {
            for m in legal_moves(&board, side) {
                let mut child = board.clone();
                child.make_move(&m);
                assert!(
                    !is_in_check(&child, side),
                    "{fen}: move {m} leaves {side:?}'s king in check"
                );
            }
        }
    }
}

#[test]
fn no_legal_moves_means_checkmate_xor_stalemate() {
    for (fen, side, mated) in [
        ("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1", Player::Black, true),
        ("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1", Player::Black, false),
        ("8/8/8/8/8/5k2/6q1/6K1 w - - 0 1", Player::White, true),
        ("k7/2Q5/1K6/8/8/8/8/8 b - - 0 1", Player::Black, false),
    ] {
        let board = position(fen);
        assert!(legal_moves(&board, side).is_empty(), "{fen} is terminal");
        assert_eq!(is_checkmate(&board, side), mated, "{fen}");
        assert_eq!(is_stalemate(&board, side), !mated, "{fen}");
        assert_eq!(is_in_check(&board, side), mated, "{fen}");
    }
}

#[test]
fn fools_mate_is_reachable_and_detected() {
    let mut board = Position::starting();
    for notation in ["f2f3", "e7e5", "g2g4"] {
        board.make_move(&Move::from_uci(notation).unwrap());
    }
    let mate = Move::from_uci("d8h4").unwrap();
    assert!(legal_moves(&board, Player::Black).contains(&mate));
    assert_eq!(mate_in_one(&board, Player::Black), Some(mate));

    board.make_move(&mate);
    assert!(is_checkmate(&board, Player::White));
    assert!(legal_moves(&board, Player::White).is_empty());
}

#[test]
fn generator_output_is_stable_across_runs() {
    let board = position("r2qkb1r/1pp1pp1p/p1np1np1/8/3PP1b1/2N1BN2/PPP2PPP/R2QK2R w KQkq - 0 7");
    let reference = legal_moves(&board, Player::White);
    for _ in 0..10 {
        assert_eq!(legal_moves(&board, Player::White), reference);
    }
}
