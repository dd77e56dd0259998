use crate::error::ChessError;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(&self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row delta of a pawn advance. White starts on rows 6/7 and moves towards row 0.
    pub fn forward(&self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    pub fn pawn_start_row(&self) -> i8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    pub fn promotion_row(&self) -> i8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    pub fn back_row(&self) -> i8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash)]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceType {
    /// Single-letter tag used for valuation and display.
    pub fn symbol(&self) -> char {
        match self {
            PieceType::Pawn => 'P',
            PieceType::Knight => 'N',
            PieceType::Bishop => 'B',
            PieceType::Rook => 'R',
            PieceType::Queen => 'Q',
            PieceType::King => 'K',
        }
    }

    pub fn value(&self) -> i32 {
        match self {
            PieceType::Pawn => 1,
            PieceType::Knight => 3,
            PieceType::Bishop => 3,
            PieceType::Rook => 5,
            PieceType::Queen => 9,
            PieceType::King => 1000,
        }
    }

    /// Pieces a pawn may turn into. Anything else falls back to a queen.
    pub fn as_promotion(self) -> PieceType {
        match self {
            PieceType::Queen | PieceType::Rook | PieceType::Bishop | PieceType::Knight => self,
            PieceType::Pawn | PieceType::King => PieceType::Queen,
        }
    }

    pub fn from_char(c: char) -> Option<PieceType> {
        match c.to_ascii_uppercase() {
            'P' => Some(PieceType::Pawn),
            'N' => Some(PieceType::Knight),
            'B' => Some(PieceType::Bishop),
            'R' => Some(PieceType::Rook),
            'Q' => Some(PieceType::Queen),
            'K' => Some(PieceType::King),
            _ => None,
        }
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A piece standing on the board. It holds no reference to the board it lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceType,
    /// Set once the piece has left its square; castling and FEN export read it.
    pub moved: bool,
}

impl Piece {
    pub fn new(color: Color, kind: PieceType) -> Self {
        Self { color, kind, moved: false }
    }

    pub fn symbol(&self) -> char {
        self.kind.symbol()
    }

    /// FEN style character: upper case for white, lower case for black.
    pub fn to_char(&self) -> char {
        match self.color {
            Color::White => self.kind.symbol(),
            Color::Black => self.kind.symbol().to_ascii_lowercase(),
        }
    }

    pub fn is_enemy_of(&self, other: &Piece) -> bool {
        self.color != other.color
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Square {
    Occupied(Piece),
    Empty,
}

/// A square on the board. Row 0 is rank 8, column 0 is file a.
///
/// A position may be constructed off the board; `is_valid` tells the two apart.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash)]
pub struct Position {
    pub row: i8,
    pub col: i8,
}

impl Position {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    pub fn is_valid(&self) -> bool {
        (0..8).contains(&self.row) && (0..8).contains(&self.col)
    }

    /// Steps by the given deltas, returning `None` when the result leaves the board.
    pub fn offset(&self, d_row: i8, d_col: i8) -> Option<Position> {
        let target = Position::new(self.row.checked_add(d_row)?, self.col.checked_add(d_col)?);
        if target.is_valid() {
            Some(target)
        } else {
            None
        }
    }

    pub fn from_algebraic(algebraic: &str) -> Result<Self, ChessError> {
        let bytes = algebraic.as_bytes();
        if bytes.len() != 2 {
            return Err(ChessError::InvalidSquare(algebraic.to_string()));
        }
        let (file, rank) = (bytes[0], bytes[1]);
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(ChessError::InvalidSquare(algebraic.to_string()));
        }
        Ok(Self {
            row: 8 - (rank - b'0') as i8,
            col: (file - b'a') as i8,
        })
    }

    pub fn as_algebraic(&self) -> String {
        to_algebraic_square(self.row, self.col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_algebraic())
    }
}

/// A move together with a snapshot of the mover and of the captured piece.
///
/// No special-move tag is stored: castling, en passant and promotion are
/// recognised from the board when the move is executed.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Move {
    pub from: Position,
    pub to: Position,
    pub piece: Piece,
    pub captured: Option<Piece>,
}

impl Move {
    pub fn new(from: Position, to: Position, piece: Piece, captured: Option<Piece>) -> Self {
        Self { from, to, piece, captured }
    }

    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    pub fn as_algebraic(&self) -> String {
        format!("{}{}", self.from.as_algebraic(), self.to.as_algebraic())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_algebraic())
    }
}

/// Splits a square-pair string such as "e2e4" into its two squares.
pub fn parse_square_pair(algebraic: &str) -> Result<(Position, Position), ChessError> {
    if algebraic.len() != 4 || !algebraic.is_ascii() {
        return Err(ChessError::InvalidSquare(algebraic.to_string()));
    }
    let from = Position::from_algebraic(&algebraic[0..2])?;
    let to = Position::from_algebraic(&algebraic[2..4])?;
    Ok((from, to))
}

/// Off-board coordinates render as "??".
pub fn to_algebraic_square(row: i8, col: i8) -> String {
    if !Position::new(row, col).is_valid() {
        return String::from("??");
    }
    let file = (b'a' + col as u8) as char; // Convert 0-7 column index to 'a'-'h'
    let rank = 8 - row; // Row 0 is rank 8
    format!("{}{}", file, rank)
}
