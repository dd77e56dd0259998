use super::Square::Occupied;
use super::{fen, Color, Piece, PieceType, Position, Square};
use crate::error::ChessError;
use lazy_static::lazy_static;

const BACK_RANK: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

lazy_static! {
    static ref STARTING_BOARD: ChessBoard = ChessBoard::build_starting_position();
}

/// An 8x8 grid of squares, each holding at most one piece.
///
/// `Clone` produces a fully independent board (64 copied squares), which is
/// what legality simulation works on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChessBoard {
    pub squares: [[Square; 8]; 8],
}

impl Default for ChessBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl ChessBoard {
    /// Creates an empty chess board
    pub fn new() -> Self {
        Self {
            squares: [[Square::Empty; 8]; 8],
        }
    }

    /// Standard initial setup, white on rows 6 and 7.
    pub fn starting_position() -> Self {
        STARTING_BOARD.clone()
    }

    fn build_starting_position() -> Self {
        let mut board = ChessBoard::new();
        for (col, kind) in BACK_RANK.iter().enumerate() {
            let col = col as i8;
            board.place(Piece::new(Color::Black, *kind), Position::new(0, col));
            board.place(Piece::new(Color::Black, PieceType::Pawn), Position::new(1, col));
            board.place(Piece::new(Color::White, PieceType::Pawn), Position::new(6, col));
            board.place(Piece::new(Color::White, *kind), Position::new(7, col));
        }
        board
    }

    /// Delegates FEN parsing to the `fen` module. Only the placement field is used.
    pub fn from_fen(fen: &str) -> Result<Self, ChessError> {
        fen::from_fen(fen).map(|setup| setup.board)
    }

    pub fn get(&self, pos: Position) -> Option<Piece> {
        if !pos.is_valid() {
            return None;
        }
        match self.squares[pos.row as usize][pos.col as usize] {
            Occupied(piece) => Some(piece),
            Square::Empty => None,
        }
    }

    /// Overwrites the square. The caller is responsible for clearing the source square.
    pub fn set(&mut self, pos: Position, piece: Option<Piece>) {
        if !pos.is_valid() {
            return;
        }
        self.squares[pos.row as usize][pos.col as usize] = match piece {
            Some(p) => Occupied(p),
            None => Square::Empty,
        };
    }

    /// Puts a piece on the board during setup.
    pub fn place(&mut self, piece: Piece, pos: Position) {
        self.set(pos, Some(piece));
    }

    pub fn is_empty(&self, pos: Position) -> bool {
        pos.is_valid() && self.get(pos).is_none()
    }

    /// Iterates over all occupied squares in scan order (row 0 first, then by column).
    pub fn all_pieces_with_coordinates(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        (0..8i8)
            .flat_map(|row| (0..8i8).map(move |col| Position::new(row, col)))
            .filter_map(move |pos| self.get(pos).map(|piece| (pos, piece)))
    }

    pub fn pieces_with_coordinates(&self, color: Color) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.all_pieces_with_coordinates()
            .filter(move |(_, piece)| piece.color == color)
    }

    pub fn find_king_position(&self, color: Color) -> Option<Position> {
        self.pieces_with_coordinates(color)
            .find(|(_, piece)| piece.kind == PieceType::King)
            .map(|(pos, _)| pos)
    }

    /// True if the king of `color` is attacked. A missing king counts as in check.
    pub fn is_in_check(&self, color: Color) -> bool {
        match self.find_king_position(color) {
            Some(king) => self.is_square_attacked(king, color),
            None => true,
        }
    }

    /// Plays `from -> to` without any legality checks.
    ///
    /// Castling (king moving two files) also relocates the rook and a pawn
    /// stepping diagonally onto an empty `en_passant` square removes the
    /// captured pawn. Pawns reaching the last rank are not promoted.
    pub fn force_move(&mut self, from: Position, to: Position, en_passant: Option<Position>) {
        let mut piece = match self.get(from) {
            Some(p) => p,
            None => return,
        };

        let is_en_passant = piece.kind == PieceType::Pawn
            && from.col != to.col
            && self.get(to).is_none()
            && en_passant == Some(to);
        let is_castle = piece.kind == PieceType::King && (to.col - from.col).abs() == 2;

        piece.moved = true;
        self.set(to, Some(piece));
        self.set(from, None);

        if is_en_passant {
            self.set(Position::new(to.row - piece.color.forward(), to.col), None);
        }

        if is_castle {
            self.castle_rook(to);
        }
    }

    /// Moves the rook belonging to a castling king that has landed on `king_to`.
    pub(crate) fn castle_rook(&mut self, king_to: Position) {
        let (rook_from, rook_to) = match king_to.col {
            6 => (Position::new(king_to.row, 7), Position::new(king_to.row, 5)),
            2 => (Position::new(king_to.row, 0), Position::new(king_to.row, 3)),
            _ => return,
        };
        let rook = self.get(rook_from).map(|mut rook| {
            rook.moved = true;
            rook
        });
        self.set(rook_to, rook);
        self.set(rook_from, None);
    }

    pub fn render_to_string(&self) -> String {
        let mut board_representation = String::new();
        board_representation.push_str("    a   b   c   d   e   f   g   h  \n");
        board_representation.push_str("  ┌───┬───┬───┬───┬───┬───┬───┬───┐\n");

        for row in 0..8 {
            // Row 0 is rank 8 and is drawn on top
            board_representation.push_str(&format!("{} │", 8 - row));
            for col in 0..8 {
                let square = match &self.squares[row][col] {
                    Square::Empty => ' ',
                    Occupied(piece) => piece.to_char(),
                };
                board_representation.push_str(&format!(" {} │", square));
            }
            board_representation.push_str(&format!(" {}\n", 8 - row));

            if row < 7 {
                board_representation.push_str("  ├───┼───┼───┼───┼───┼───┼───┼───┤\n");
            }
        }

        board_representation.push_str("  └───┴───┴───┴───┴───┴───┴───┴───┘\n");
        board_representation.push_str("    a   b   c   d   e   f   g   h  \n");

        board_representation
    }
}
