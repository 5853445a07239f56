//! Provides the [Chess Position] implementation: an 8×8 square-centric
//! board plus the last played move, which is all the state en passant
//! legality needs.
//!
//! The square-centric ("mailbox") representation is a deliberate choice
//! over bitboards: the evaluator walks squares one piece at a time anyway,
//! positions are cloned into scratch copies on every search node, and a
//! 192-byte memcpy keeps that cheap.
//!
//! [Chess Position]: https://www.chessprogramming.org/Chess_Position

use std::fmt::{self, Write};

use anyhow::bail;
use strum::IntoEnumIterator;

use crate::chess::core::{File, Move, Piece, PieceKind, Player, Rank, Square, BOARD_WIDTH};

/// Piece-centric implementation of the chess position: all pieces with
/// their placement and `has_moved` flags, plus the previous move.
///
/// Castling rights are not tracked separately: they are fully derived from
/// the `has_moved` flags of the king and rooks. Positions loaded from FEN
/// consequently have every piece unmoved, which implicitly grants castling
/// rights regardless of the FEN castling field. That is a known limitation
/// kept for puzzle-corpus compatibility.
#[derive(Clone, PartialEq, Eq)]
pub struct Position {
    squares: [[Option<Piece>; BOARD_WIDTH as usize]; BOARD_WIDTH as usize],
    last_move: Option<Move>,
}

impl Position {
    /// Creates an empty board with no move history.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            squares: [[None; BOARD_WIDTH as usize]; BOARD_WIDTH as usize],
            last_move: None,
        }
    }

    /// Creates the starting position of standard chess.
    #[must_use]
    pub fn starting() -> Self {
        let mut position = Self::empty();
        let backrank = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (file, kind) in File::iter().zip(backrank) {
            position.set(Square::new(file, Rank::One), Piece::new(kind, Player::White));
            position.set(
                Square::new(file, Rank::Two),
                Piece::new(PieceKind::Pawn, Player::White),
            );
            position.set(
                Square::new(file, Rank::Seven),
                Piece::new(PieceKind::Pawn, Player::Black),
            );
            position.set(
                Square::new(file, Rank::Eight),
                Piece::new(kind, Player::Black),
            );
        }
        position
    }

    /// Parses the piece placement and side-to-move fields of a FEN string.
    ///
    /// Castling rights, en passant target, halfmove clock and fullmove
    /// counter are ignored; a missing side-to-move field defaults to White.
    ///
    /// # Errors
    ///
    /// Fails on malformed placement (wrong rank/file counts, unknown piece
    /// symbols) or an unknown side-to-move symbol.
    pub fn from_fen(input: &str) -> anyhow::Result<(Self, Player)> {
        let mut parts = input.trim().split(' ');
        let placement = match parts.next() {
            Some(placement) if !placement.is_empty() => placement,
            _ => bail!("missing piece placement"),
        };

        let mut position = Self::empty();
        let mut rank_id: i8 = 7;
        for rank_fen in placement.split('/') {
            if rank_id < 0 {
                bail!("expected 8 ranks, got {placement}");
            }
            let rank = Rank::try_from(rank_id as u8)?;
            let mut file: u8 = 0;
            for symbol in rank_fen.chars() {
                if let Some(skip) = symbol.to_digit(10) {
                    if skip == 0 || skip > 8 {
                        bail!("unknown empty-square count: {symbol}");
                    }
                    file += skip as u8;
                    continue;
                }
                if file >= BOARD_WIDTH {
                    bail!("rank {rank} exceeds {BOARD_WIDTH} files: {rank_fen}");
                }
                position.set(Square::new(file.try_into()?, rank), symbol.try_into()?);
                file += 1;
            }
            if file != BOARD_WIDTH {
                bail!("rank {rank} should have exactly {BOARD_WIDTH} files, got {rank_fen}");
            }
            rank_id -= 1;
        }
        if rank_id != -1 {
            bail!("expected 8 ranks, got {placement}");
        }

        let side_to_move = match parts.next() {
            Some(symbol) => symbol.try_into()?,
            None => Player::White,
        };
        Ok((position, side_to_move))
    }

    /// Returns the piece on the given square, if any.
    #[must_use]
    pub fn at(&self, square: Square) -> Option<Piece> {
        self.squares[square.file() as usize][square.rank() as usize]
    }

    /// Bounds-tolerant lookup used by offset and ray scans: coordinates
    /// outside the board read as empty.
    #[must_use]
    pub(crate) fn piece_at(&self, file: i8, rank: i8) -> Option<Piece> {
        if !(0..8).contains(&file) || !(0..8).contains(&rank) {
            return None;
        }
        self.squares[file as usize][rank as usize]
    }

    pub(crate) fn set(&mut self, square: Square, piece: Piece) {
        self.squares[square.file() as usize][square.rank() as usize] = Some(piece);
    }

    pub(crate) fn clear(&mut self, square: Square) {
        self.squares[square.file() as usize][square.rank() as usize] = None;
    }

    /// The previous move played on this board, used for en passant
    /// legality.
    #[must_use]
    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    /// Finds the king of the given side. Hand-crafted puzzle positions may
    /// lack a king entirely; callers treat that as "never in check".
    #[must_use]
    pub fn king_square(&self, side: Player) -> Option<Square> {
        Square::iter().find(|&square| {
            self.at(square)
                .is_some_and(|piece| piece.kind == PieceKind::King && piece.side == side)
        })
    }

    /// Counts the non-pawn, non-king pieces of one side. Drives endgame
    /// detection.
    #[must_use]
    pub fn major_pieces(&self, side: Player) -> usize {
        Square::iter()
            .filter(|&square| {
                self.at(square).is_some_and(|piece| {
                    piece.side == side
                        && piece.kind != PieceKind::Pawn
                        && piece.kind != PieceKind::King
                })
            })
            .count()
    }

    /// Applies a move: capture, en passant victim removal, castling rook
    /// relocation and promotion included. A pawn reaching the last rank
    /// becomes a queen unless the move names another kind.
    ///
    /// The move must come from the generator or be otherwise plausible; an
    /// empty origin square is a no-op.
    pub fn make_move(&mut self, next_move: &Move) {
        let Some(mut piece) = self.at(next_move.from) else {
            return;
        };

        // A pawn landing diagonally on an empty square is capturing en
        // passant: the victim sits beside the origin, not on the target.
        let en_passant = piece.kind == PieceKind::Pawn
            && next_move.from.file() != next_move.to.file()
            && self.at(next_move.to).is_none();
        if en_passant {
            self.clear(Square::new(next_move.to.file(), next_move.from.rank()));
        }

        self.clear(next_move.from);
        piece.has_moved = true;
        if piece.kind == PieceKind::Pawn && next_move.to.rank() == Rank::promotion(piece.side) {
            piece.kind = next_move.promotion.unwrap_or(PieceKind::Queen);
        }
        self.set(next_move.to, piece);

        // Castling: the king travels two files from its starting square and
        // drags the rook over the square it crossed.
        if piece.kind == PieceKind::King && next_move.from.file() == File::E {
            let rank = next_move.to.rank();
            if next_move.to.file() == File::G {
                self.relocate_rook(Square::new(File::H, rank), Square::new(File::F, rank));
            } else if next_move.to.file() == File::C {
                self.relocate_rook(Square::new(File::A, rank), Square::new(File::D, rank));
            }
        }

        self.last_move = Some(*next_move);
    }

    fn relocate_rook(&mut self, from: Square, to: Square) {
        if let Some(mut rook) = self.at(from) {
            rook.has_moved = true;
            self.clear(from);
            self.set(to, rook);
        }
    }

    /// True when both boards hold the same piece kind and side on every
    /// square. `has_moved` flags and the last move are deliberately ignored:
    /// this is the identity used for threefold-repetition counting.
    #[must_use]
    pub fn same_occupancy(&self, other: &Self) -> bool {
        Square::iter().all(|square| {
            match (self.at(square), other.at(square)) {
                (None, None) => true,
                (Some(a), Some(b)) => a.kind == b.kind && a.side == b.side,
                _ => false,
            }
        })
    }

    /// The colour-flipped, rank-mirrored rendition of this position:
    /// every piece changes side and moves to the vertically mirrored
    /// square, `has_moved` preserved. Used to verify evaluation and search
    /// symmetry.
    #[must_use]
    pub fn mirrored(&self) -> Self {
        let mirror_square =
            |square: Square| Square::new(square.file(), mirror_rank(square.rank()));
        let mut result = Self::empty();
        for square in Square::iter() {
            if let Some(piece) = self.at(square) {
                result.set(
                    mirror_square(square),
                    Piece {
                        kind: piece.kind,
                        side: !piece.side,
                        has_moved: piece.has_moved,
                    },
                );
            }
        }
        result.last_move = self.last_move.map(|m| Move {
            from: mirror_square(m.from),
            to: mirror_square(m.to),
            promotion: m.promotion,
        });
        result
    }
}

fn mirror_rank(rank: Rank) -> Rank {
    Rank::try_from(7 - rank as u8).expect("mirrored rank is always in range")
}

impl fmt::Display for Position {
    /// Renders the piece-placement field of FEN (the only part this model
    /// can reproduce: castling rights and counters live elsewhere).
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for rank_id in (0..BOARD_WIDTH).rev() {
            let rank = Rank::try_from(rank_id).expect("rank is always in range");
            let mut empty_squares = 0;
            for file in File::iter() {
                match self.at(Square::new(file, rank)) {
                    Some(piece) => {
                        if empty_squares != 0 {
                            write!(f, "{empty_squares}")?;
                            empty_squares = 0;
                        }
                        write!(f, "{piece}")?;
                    }
                    None => empty_squares += 1,
                }
            }
            if empty_squares != 0 {
                write!(f, "{empty_squares}")?;
            }
            if rank != Rank::One {
                write!(f, "/")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Position {
    /// Dumps the board in a human-readable format: '.' for an empty square,
    /// the FEN algebraic symbol for a piece. Useful for debugging.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank_id in (0..BOARD_WIDTH).rev() {
            let rank = Rank::try_from(rank_id).expect("rank is always in range");
            for file in File::iter() {
                match self.at(Square::new(file, rank)) {
                    Some(piece) => write!(f, "{piece}")?,
                    None => f.write_char('.')?,
                }
                if file != File::H {
                    write!(f, " ")?;
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "FEN: {self}")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const STARTING_PLACEMENT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

    #[test]
    fn starting_position_round_trip() {
        assert_eq!(Position::starting().to_string(), STARTING_PLACEMENT);
        let (parsed, side) =
            Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")
                .expect("valid position");
        assert_eq!(side, Player::White);
        assert_eq!(parsed.to_string(), STARTING_PLACEMENT);
    }

    #[test]
    fn fen_side_to_move() {
        let (_, side) = Position::from_fen("8/8/8/4k3/8/8/8/4K3 b - - 0 1").unwrap();
        assert_eq!(side, Player::Black);
        // A bare placement field is accepted and defaults to White.
        let (_, side) = Position::from_fen("8/8/8/4k3/8/8/8/4K3").unwrap();
        assert_eq!(side, Player::White);
    }

    #[test]
    fn fen_rejects_malformed_placement() {
        assert!(Position::from_fen("").is_err());
        assert!(Position::from_fen("8/8/8/8/8/8/8").is_err());
        assert!(Position::from_fen("9/8/8/8/8/8/8/8 w").is_err());
        assert!(Position::from_fen("xnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w").is_err());
        assert!(Position::from_fen("rnbqkbnrr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w").is_err());
    }

    #[test]
    fn fen_pieces_start_unmoved() {
        let (position, _) =
            Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("valid position");
        for square in [Square::E1, Square::A1, Square::H1, Square::E8] {
            assert!(!position.at(square).unwrap().has_moved);
        }
    }

    #[test]
    fn make_move_marks_pieces_moved() {
        let mut position = Position::starting();
        position.make_move(&Move::from_uci("e2e4").unwrap());
        let pawn = position.at(Square::E4).unwrap();
        assert_eq!(pawn.kind, PieceKind::Pawn);
        assert!(pawn.has_moved);
        assert!(position.at(Square::E2).is_none());
        assert_eq!(position.last_move(), Some(Move::from_uci("e2e4").unwrap()));
    }

    #[test]
    fn make_move_promotes_to_queen_by_default() {
        let (mut position, _) = Position::from_fen("8/4P3/8/8/2k5/8/8/4K3 w - - 0 1").unwrap();
        position.make_move(&Move::from_uci("e7e8").unwrap());
        assert_eq!(position.at(Square::E8).unwrap().kind, PieceKind::Queen);
    }

    #[test]
    fn make_move_honours_explicit_underpromotion() {
        let (mut position, _) = Position::from_fen("8/4P3/8/8/2k5/8/8/4K3 w - - 0 1").unwrap();
        position.make_move(&Move::from_uci("e7e8n").unwrap());
        assert_eq!(position.at(Square::E8).unwrap().kind, PieceKind::Knight);
    }

    #[test]
    fn make_move_castles_both_sides() {
        let (mut kingside, _) =
            Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w - - 0 1").unwrap();
        kingside.make_move(&Move::from_uci("e1g1").unwrap());
        assert_eq!(kingside.at(Square::G1).unwrap().kind, PieceKind::King);
        assert_eq!(kingside.at(Square::F1).unwrap().kind, PieceKind::Rook);
        assert!(kingside.at(Square::H1).is_none());

        let (mut queenside, _) =
            Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R b - - 0 1").unwrap();
        queenside.make_move(&Move::from_uci("e8c8").unwrap());
        assert_eq!(queenside.at(Square::C8).unwrap().kind, PieceKind::King);
        assert_eq!(queenside.at(Square::D8).unwrap().kind, PieceKind::Rook);
        assert!(queenside.at(Square::A8).is_none());
    }

    #[test]
    fn make_move_captures_en_passant() {
        let (mut position, _) =
            Position::from_fen("4k3/8/8/8/4p3/8/3P4/4K3 w - - 0 1").unwrap();
        position.make_move(&Move::from_uci("d2d4").unwrap());
        position.make_move(&Move::from_uci("e4d3").unwrap());
        assert_eq!(position.at(Square::D3).unwrap().kind, PieceKind::Pawn);
        assert_eq!(position.at(Square::D3).unwrap().side, Player::Black);
        // The doubly pushed white pawn is gone.
        assert!(position.at(Square::D4).is_none());
    }

    #[test]
    fn occupancy_identity_ignores_has_moved() {
        let mut a = Position::starting();
        let b = Position::starting();
        assert!(a.same_occupancy(&b));
        // Shuffle a knight out and back: same occupancy, different flags.
        a.make_move(&Move::from_uci("g1f3").unwrap());
        a.make_move(&Move::from_uci("f3g1").unwrap());
        assert!(a.same_occupancy(&b));
        a.make_move(&Move::from_uci("g1f3").unwrap());
        assert!(!a.same_occupancy(&b));
    }

    #[test]
    fn mirroring_is_an_involution() {
        let (position, _) = Position::from_fen(
            "r1bqk2r/pppp1ppp/2n2n2/2b1p3/2B1P3/2N2N2/PPPP1PPP/R1BQK2R w KQkq - 6 5",
        )
        .unwrap();
        assert_eq!(position.mirrored().mirrored(), position);
        // The mirror of the starting position is itself with colours
        // swapped, which renders to the identical placement string.
        assert_eq!(
            Position::starting().mirrored().to_string(),
            STARTING_PLACEMENT
        );
    }
}
