//! Board primitives commonly used within [`crate::chess`].

use std::{fmt, mem};

use anyhow::bail;
use arrayvec::ArrayVec;

#[allow(missing_docs)]
pub const BOARD_WIDTH: u8 = 8;
#[allow(missing_docs)]
pub const BOARD_SIZE: u8 = BOARD_WIDTH * BOARD_WIDTH;

/// The maximum number of legal moves in a reachable chess position is 218;
/// 224 leaves headroom for the hand-crafted (not necessarily reachable)
/// positions that tactics puzzles occasionally contain. The same capacity
/// bounds the principal variation reported by the search.
pub const MAX_MOVES: usize = 224;

/// A list of moves generated for one position.
pub type MoveList = ArrayVec<Move, MAX_MOVES>;

/// Represents a column (vertical row) of the chessboard. In chess notation,
/// it is normally represented with a lowercase letter.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, strum::EnumIter)]
#[allow(missing_docs)]
pub enum File {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", (b'a' + *self as u8) as char)
    }
}

impl TryFrom<char> for File {
    type Error = anyhow::Error;

    fn try_from(file: char) -> anyhow::Result<Self> {
        match file {
            'a'..='h' => Ok(unsafe { mem::transmute::<u8, Self>(file as u8 - b'a') }),
            _ => bail!("unknown file: expected within 'a'..='h', got '{file}'"),
        }
    }
}

impl TryFrom<u8> for File {
    type Error = anyhow::Error;

    fn try_from(column: u8) -> anyhow::Result<Self> {
        match column {
            0..=7 => Ok(unsafe { mem::transmute::<u8, Self>(column) }),
            _ => bail!("unknown file: expected within 0..BOARD_WIDTH, got {column}"),
        }
    }
}

/// Represents a horizontal row of the chessboard. In chess notation, it is
/// represented with a number. The implementation assumes zero-based values
/// (i.e. rank 1 would be 0). White's back rank is [`Rank::One`].
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, strum::EnumIter)]
#[allow(missing_docs)]
pub enum Rank {
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
}

impl Rank {
    /// The rank a player's pawns start on.
    #[must_use]
    pub fn pawns_starting(side: Player) -> Self {
        match side {
            Player::White => Self::Two,
            Player::Black => Self::Seven,
        }
    }

    /// The rank a player's pieces start on.
    #[must_use]
    pub fn backrank(side: Player) -> Self {
        match side {
            Player::White => Self::One,
            Player::Black => Self::Eight,
        }
    }

    /// The rank on which a player's pawns promote.
    #[must_use]
    pub fn promotion(side: Player) -> Self {
        match side {
            Player::White => Self::Eight,
            Player::Black => Self::One,
        }
    }
}

impl TryFrom<char> for Rank {
    type Error = anyhow::Error;

    fn try_from(rank: char) -> anyhow::Result<Self> {
        match rank {
            '1'..='8' => Ok(unsafe { mem::transmute::<u8, Self>(rank as u8 - b'1') }),
            _ => bail!("unknown rank: expected within '1'..='8', got '{rank}'"),
        }
    }
}

impl TryFrom<u8> for Rank {
    type Error = anyhow::Error;

    fn try_from(row: u8) -> anyhow::Result<Self> {
        match row {
            0..=7 => Ok(unsafe { mem::transmute::<u8, Self>(row) }),
            _ => bail!("unknown rank: expected within 0..BOARD_WIDTH, got {row}"),
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", *self as u8 + 1)
    }
}

/// Board squares: from left to right, from bottom to the top:
///
/// ```
/// use sacrifice::chess::core::Square;
///
/// assert_eq!(Square::A1 as u8, 0);
/// assert_eq!(Square::E1 as u8, 4);
/// assert_eq!(Square::H8 as u8, 63);
/// ```
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, strum::EnumIter)]
#[rustfmt::skip]
#[allow(missing_docs)]
pub enum Square {
    A1, B1, C1, D1, E1, F1, G1, H1,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A8, B8, C8, D8, E8, F8, G8, H8,
}

impl Square {
    /// Connects file (column) and rank (row) to form a full square.
    #[must_use]
    pub fn new(file: File, rank: Rank) -> Self {
        unsafe { mem::transmute(file as u8 + (rank as u8) * BOARD_WIDTH) }
    }

    /// Constructs a square from zero-based file and rank indices.
    ///
    /// # Errors
    ///
    /// Fails when either index is outside `0..8`.
    pub fn from_indices(file: u8, rank: u8) -> anyhow::Result<Self> {
        Ok(Self::new(File::try_from(file)?, Rank::try_from(rank)?))
    }

    /// Returns file (column) on which the square is located.
    #[must_use]
    pub fn file(self) -> File {
        unsafe { mem::transmute(self as u8 % BOARD_WIDTH) }
    }

    /// Returns rank (row) on which the square is located.
    #[must_use]
    pub fn rank(self) -> Rank {
        unsafe { mem::transmute(self as u8 / BOARD_WIDTH) }
    }

    /// [Chebyshev distance] to another square: the number of king moves
    /// needed to travel between them on an empty board.
    ///
    /// [Chebyshev distance]: https://www.chessprogramming.org/Distance
    #[must_use]
    pub fn distance(self, other: Self) -> u8 {
        let df = (self.file() as i8 - other.file() as i8).unsigned_abs();
        let dr = (self.rank() as i8 - other.rank() as i8).unsigned_abs();
        df.max(dr)
    }
}

impl TryFrom<&str> for Square {
    type Error = anyhow::Error;

    fn try_from(square: &str) -> anyhow::Result<Self> {
        let mut chars = square.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(file), Some(rank), None) => {
                Ok(Self::new(file.try_into()?, rank.try_into()?))
            }
            _ => bail!("unknown square: should be two chars, got '{square}'"),
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

/// A standard game of chess is played between two players: White (having the
/// advantage of the first turn) and Black.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Player {
    White,
    Black,
}

impl Player {
    /// Sign of this player's contribution to a White-positive score.
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            Self::White => 1.0,
            Self::Black => -1.0,
        }
    }
}

impl std::ops::Not for Player {
    type Output = Self;

    fn not(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }
}

impl TryFrom<&str> for Player {
    type Error = anyhow::Error;

    fn try_from(player: &str) -> anyhow::Result<Self> {
        match player {
            "w" => Ok(Self::White),
            "b" => Ok(Self::Black),
            _ => bail!("unknown player: expected 'w' or 'b', got '{player}'"),
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match &self {
                Self::White => 'w',
                Self::Black => 'b',
            }
        )
    }
}

/// Standard [chess pieces]. The discriminant order (pawn first) doubles as
/// the index into material and move-score tables and as the byte fed to the
/// position hash.
///
/// [chess pieces]: https://en.wikipedia.org/wiki/Chess_piece
#[repr(u8)]
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub(crate) fn promotion_from(symbol: char) -> anyhow::Result<Self> {
        match symbol.to_ascii_lowercase() {
            'q' => Ok(Self::Queen),
            'r' => Ok(Self::Rook),
            'b' => Ok(Self::Bishop),
            'n' => Ok(Self::Knight),
            _ => bail!("unknown promotion: expected one of \"qrbn\", got '{symbol}'"),
        }
    }
}

/// Represents a specific piece owned by a player. `has_moved` supports
/// castling legality and the "still on its starting square" development
/// penalty in the evaluator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Piece {
    #[allow(missing_docs)]
    pub kind: PieceKind,
    #[allow(missing_docs)]
    pub side: Player,
    #[allow(missing_docs)]
    pub has_moved: bool,
}

impl Piece {
    /// A piece fresh on the board that has not moved yet.
    #[must_use]
    pub fn new(kind: PieceKind, side: Player) -> Self {
        Self {
            kind,
            side,
            has_moved: false,
        }
    }

    /// Algebraic notation symbol used in FEN. Uppercase for white, lowercase
    /// for black.
    pub(crate) fn algebraic_symbol(&self) -> char {
        let result = match self.kind {
            PieceKind::King => 'k',
            PieceKind::Queen => 'q',
            PieceKind::Rook => 'r',
            PieceKind::Bishop => 'b',
            PieceKind::Knight => 'n',
            PieceKind::Pawn => 'p',
        };
        match self.side {
            Player::White => result.to_ascii_uppercase(),
            Player::Black => result,
        }
    }
}

impl TryFrom<char> for Piece {
    type Error = anyhow::Error;

    fn try_from(symbol: char) -> anyhow::Result<Self> {
        let side = if symbol.is_ascii_uppercase() {
            Player::White
        } else {
            Player::Black
        };
        let kind = match symbol.to_ascii_lowercase() {
            'k' => PieceKind::King,
            'q' => PieceKind::Queen,
            'r' => PieceKind::Rook,
            'b' => PieceKind::Bishop,
            'n' => PieceKind::Knight,
            'p' => PieceKind::Pawn,
            _ => bail!("unknown piece symbol: expected within \"KQRBNPkqrbnp\", got '{symbol}'"),
        };
        Ok(Self::new(kind, side))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.algebraic_symbol())
    }
}

/// A move between two squares, with an optional explicit promotion kind.
///
/// Moves produced by the generator always leave `promotion` empty: applying
/// such a move promotes to a queen whenever a pawn reaches the last rank.
/// Moves parsed from reference strings ([`Move::from_uci`]) may carry any of
/// the four promotion kinds for faithful puzzle playback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Move {
    #[allow(missing_docs)]
    pub from: Square,
    #[allow(missing_docs)]
    pub to: Square,
    #[allow(missing_docs)]
    pub promotion: Option<PieceKind>,
}

impl Move {
    #[allow(missing_docs)]
    #[must_use]
    pub fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    /// Parses a move in the reference form used by puzzle files and the UCI
    /// protocol: `<from file><from rank><to file><to rank>[promotion]`, e.g.
    /// `e2e4` or `e7e8q`. Case-insensitive; trailing symbols past the
    /// promotion are ignored.
    ///
    /// # Errors
    ///
    /// Fails when the string is shorter than four characters or any
    /// coordinate or promotion symbol is out of range.
    pub fn from_uci(uci: &str) -> anyhow::Result<Self> {
        let chars: Vec<char> = uci.trim().chars().collect();
        if chars.len() < 4 {
            bail!("unknown move: expected at least 4 chars, got '{uci}'");
        }
        let from = Square::new(
            chars[0].to_ascii_lowercase().try_into()?,
            chars[1].try_into()?,
        );
        let to = Square::new(
            chars[2].to_ascii_lowercase().try_into()?,
            chars[3].try_into()?,
        );
        let promotion = match chars.get(4) {
            Some(&symbol) => Some(PieceKind::promotion_from(symbol)?),
            None => None,
        };
        Ok(Self {
            from,
            to,
            promotion,
        })
    }

    /// The four-character reference form (`e2e4`), without the promotion
    /// suffix. Puzzle verification compares engine moves in this form.
    #[must_use]
    pub fn reference_notation(&self) -> String {
        format!("{}{}", self.from, self.to)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        match self.promotion {
            Some(PieceKind::Queen) => write!(f, "q"),
            Some(PieceKind::Rook) => write!(f, "r"),
            Some(PieceKind::Bishop) => write!(f, "b"),
            Some(PieceKind::Knight) => write!(f, "n"),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn file_and_rank_parsing() {
        assert_eq!(File::try_from('a').unwrap(), File::A);
        assert_eq!(File::try_from('h').unwrap(), File::H);
        assert!(File::try_from('i').is_err());
        assert_eq!(Rank::try_from('1').unwrap(), Rank::One);
        assert_eq!(Rank::try_from('8').unwrap(), Rank::Eight);
        assert!(Rank::try_from('9').is_err());
        assert!(Rank::try_from('0').is_err());
    }

    #[test]
    fn square_composition() {
        assert_eq!(Square::new(File::E, Rank::Four), Square::E4);
        assert_eq!(Square::E4.file(), File::E);
        assert_eq!(Square::E4.rank(), Rank::Four);
        assert_eq!(Square::try_from("h8").unwrap(), Square::H8);
        assert!(Square::try_from("h9").is_err());
        assert!(Square::try_from("e44").is_err());
    }

    #[test]
    fn chebyshev_distance() {
        assert_eq!(Square::A1.distance(Square::H8), 7);
        assert_eq!(Square::E4.distance(Square::E4), 0);
        assert_eq!(Square::E4.distance(Square::F6), 2);
        assert_eq!(Square::B2.distance(Square::G2), 5);
    }

    #[test]
    fn move_round_trip() {
        for notation in ["e2e4", "a7a8", "h1a8"] {
            assert_eq!(Move::from_uci(notation).unwrap().to_string(), notation);
        }
        // Promotion suffix survives parsing and display, but the reference
        // form stays four characters.
        let promotion = Move::from_uci("e7e8q").unwrap();
        assert_eq!(promotion.promotion, Some(PieceKind::Queen));
        assert_eq!(promotion.to_string(), "e7e8q");
        assert_eq!(promotion.reference_notation(), "e7e8");
    }

    #[test]
    fn move_parsing_is_case_insensitive() {
        assert_eq!(
            Move::from_uci("E2E4").unwrap(),
            Move::new(Square::E2, Square::E4)
        );
        assert_eq!(
            Move::from_uci("e7e8Q").unwrap().promotion,
            Some(PieceKind::Queen)
        );
    }

    #[test]
    fn move_parsing_rejects_garbage() {
        assert!(Move::from_uci("e2e").is_err());
        assert!(Move::from_uci("i2e4").is_err());
        assert!(Move::from_uci("e2e9").is_err());
        assert!(Move::from_uci("e7e8k").is_err());
    }

    #[test]
    fn player_opponent() {
        assert_eq!(!Player::White, Player::Black);
        assert_eq!(!Player::Black, Player::White);
        assert_eq!(Player::White.sign(), 1.0);
        assert_eq!(Player::Black.sign(), -1.0);
    }
}
