use crate::chess_boards::chess_board::fen::{self, FenSetup};
use crate::chess_boards::chess_board::{
    parse_square_pair, pseudo_legal_moves, ChessBoard, Color, Move, Piece, PieceType, Position,
};
use crate::chess_boards::promotion::{AlwaysQueen, PromotionProvider};
use crate::engines::{GreedyCaptureSelector, MoveSelector};
use crate::error::ChessError;
use rand::RngCore;
use std::sync::Arc;

/// Castling wings as (rook column, square the king crosses, square the king lands on).
const CASTLING_WINGS: [(i8, i8, i8); 2] = [(7, 5, 6), (0, 3, 2)];
const KING_HOME_COL: i8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Checkmate { winner: Color },
    Stalemate,
}

/// The rules engine: owns the board and all state needed to decide legality.
#[derive(Debug, Clone)]
pub struct Game {
    board: ChessBoard,
    active_color: Color,
    en_passant: Option<Position>,
    outcome: Option<Outcome>,
    halfmove_clock: u32,
    fullmove_number: u32,
    history: Vec<String>,
    moves: Vec<Move>,
    promotion: Arc<dyn PromotionProvider>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// A game in the standard starting position with white to move.
    pub fn new() -> Self {
        Self {
            board: ChessBoard::starting_position(),
            active_color: Color::White,
            en_passant: None,
            outcome: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            history: Vec::new(),
            moves: Vec::new(),
            promotion: Arc::new(AlwaysQueen),
        }
    }

    /// Loads an arbitrary position. Checkmate and stalemate are evaluated right away.
    pub fn from_fen(fen: &str) -> Result<Self, ChessError> {
        let setup = fen::from_fen(fen)?;
        let mut game = Self {
            board: setup.board,
            active_color: setup.active_color,
            en_passant: setup.en_passant,
            outcome: None,
            halfmove_clock: setup.halfmove_clock,
            fullmove_number: setup.fullmove_number,
            history: Vec::new(),
            moves: Vec::new(),
            promotion: Arc::new(AlwaysQueen),
        };
        game.update_outcome();
        Ok(game)
    }

    /// Replaces the collaborator asked for the piece a pawn promotes to.
    pub fn with_promotion<P: PromotionProvider + 'static>(mut self, provider: P) -> Self {
        self.promotion = Arc::new(provider);
        self
    }

    /// Resets board, side to move, en passant target, history and game over state.
    pub fn new_game(&mut self) {
        let promotion = Arc::clone(&self.promotion);
        *self = Self::new();
        self.promotion = promotion;
    }

    pub fn to_fen(&self) -> String {
        fen::to_fen(&FenSetup {
            board: self.board.clone(),
            active_color: self.active_color,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        })
    }

    pub fn board(&self) -> &ChessBoard {
        &self.board
    }

    pub fn active_color(&self) -> Color {
        self.active_color
    }

    pub fn is_white_to_move(&self) -> bool {
        self.active_color == Color::White
    }

    pub fn en_passant_target(&self) -> Option<Position> {
        self.en_passant
    }

    pub fn is_game_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Played moves as square pairs, e.g. "e2e4".
    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn move_history(&self) -> &[Move] {
        &self.moves
    }

    /// Legal destinations of the piece on `from`. Empty unless that piece belongs
    /// to the side to move.
    pub fn legal_moves_from(&self, from: Position) -> Vec<Position> {
        match self.board.get(from) {
            Some(piece) if piece.color == self.active_color => self.legal_moves_for(from, piece),
            _ => Vec::new(),
        }
    }

    /// All legal moves of the side to move, in board scan order.
    pub fn all_legal_moves(&self) -> Vec<Move> {
        let mut legal_moves = Vec::new();
        for (from, piece) in self.board.pieces_with_coordinates(self.active_color) {
            for to in self.legal_moves_for(from, piece) {
                legal_moves.push(Move::new(from, to, piece, self.captured_piece(from, to, piece)));
            }
        }
        legal_moves
    }

    /// Looks up the legal move written as a square pair like "e7e5".
    pub fn find_move(&self, algebraic: &str) -> Result<Move, ChessError> {
        let (from, to) = parse_square_pair(algebraic)?;
        let piece = self.validate_mover(from)?;
        if !self.legal_moves_for(from, piece).contains(&to) {
            return Err(illegal(from, to));
        }
        Ok(Move::new(from, to, piece, self.captured_piece(from, to, piece)))
    }

    /// Parses and plays a square pair move.
    pub fn play(&mut self, algebraic: &str) -> Result<(), ChessError> {
        if self.is_game_over() {
            return Err(ChessError::GameOver);
        }
        let mv = self.find_move(algebraic)?;
        self.make_move(mv)
    }

    /// Selects a move for the side to move with the capture-first heuristic.
    pub fn ai_move(&self, rng: &mut dyn RngCore) -> Option<Move> {
        GreedyCaptureSelector.select_move(self, rng)
    }

    pub fn in_check(&self, color: Color) -> bool {
        self.board.is_in_check(color)
    }

    pub fn is_checkmate(&self, color: Color) -> bool {
        self.in_check(color) && !self.has_legal_move(color)
    }

    pub fn is_stalemate(&self, color: Color) -> bool {
        !self.in_check(color) && !self.has_legal_move(color)
    }

    /// Executes a move after re-validating it against the current position.
    ///
    /// Only `from` and `to` of the given move are used; the piece and capture
    /// snapshots are re-derived from the board. On error nothing is changed.
    pub fn make_move(&mut self, mv: Move) -> Result<(), ChessError> {
        if self.is_game_over() {
            return Err(ChessError::GameOver);
        }
        let (from, to) = (mv.from, mv.to);
        for square in [from, to] {
            if !square.is_valid() {
                return Err(ChessError::InvalidSquare(format!("row {} col {}", square.row, square.col)));
            }
        }
        let mut piece = self.validate_mover(from)?;
        if !self.legal_moves_for(from, piece).contains(&to) {
            return Err(illegal(from, to));
        }

        let record = Move::new(from, to, piece, self.captured_piece(from, to, piece));
        let is_pawn = piece.kind == PieceType::Pawn;
        piece.moved = true;

        if piece.kind == PieceType::King && (to.col - from.col).abs() == 2 {
            self.board.set(to, Some(piece));
            self.board.set(from, None);
            self.board.castle_rook(to);
            self.en_passant = None;
        } else if is_pawn && from.col != to.col && self.board.get(to).is_none() && self.en_passant == Some(to) {
            self.board.set(to, Some(piece));
            self.board.set(from, None);
            self.board.set(Position::new(to.row - piece.color.forward(), to.col), None);
            self.en_passant = None;
        } else if is_pawn && to.row == piece.color.promotion_row() {
            self.board.set(from, None);
            let kind = self.promotion.choose(piece.color, &self.board).as_promotion();
            let mut promoted = Piece::new(piece.color, kind);
            promoted.moved = true;
            self.board.set(to, Some(promoted));
            self.en_passant = None;
        } else {
            self.board.set(to, Some(piece));
            self.board.set(from, None);
            self.en_passant = if is_pawn && (to.row - from.row).abs() == 2 {
                Some(Position::new((to.row + from.row) / 2, from.col))
            } else {
                None
            };
        }

        if is_pawn || record.is_capture() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        if self.active_color == Color::Black {
            self.fullmove_number += 1;
        }
        self.active_color = self.active_color.opposite();
        self.history.push(record.as_algebraic());
        self.moves.push(record);
        self.update_outcome();
        Ok(())
    }

    fn validate_mover(&self, from: Position) -> Result<Piece, ChessError> {
        let piece = self
            .board
            .get(from)
            .ok_or_else(|| ChessError::EmptySquare(from.as_algebraic()))?;
        if piece.color != self.active_color {
            return Err(ChessError::WrongColor(from.as_algebraic()));
        }
        Ok(piece)
    }

    fn update_outcome(&mut self) {
        let side = self.active_color;
        self.outcome = if self.has_legal_move(side) {
            None
        } else if self.in_check(side) {
            Some(Outcome::Checkmate { winner: side.opposite() })
        } else {
            Some(Outcome::Stalemate)
        };
    }

    fn has_legal_move(&self, color: Color) -> bool {
        self.board
            .pieces_with_coordinates(color)
            .any(|(from, piece)| !self.legal_moves_for(from, piece).is_empty())
    }

    /// Legal destinations for `piece` standing on `from`, whichever side it belongs to.
    fn legal_moves_for(&self, from: Position, piece: Piece) -> Vec<Position> {
        let mut moves = pseudo_legal_moves(&self.board, from);

        if piece.kind == PieceType::Pawn {
            if let Some(target) = self.en_passant_destination(from, piece) {
                moves.push(target);
            }
        }

        if piece.kind == PieceType::King {
            moves.extend(self.castling_destinations(from, piece));
        }

        // Never offer the capture of a king
        moves.retain(|&to| match self.board.get(to) {
            Some(target) => !(target.kind == PieceType::King && target.is_enemy_of(&piece)),
            None => true,
        });

        moves.retain(|&to| !self.leaves_king_in_check(from, to, piece.color));
        moves
    }

    fn en_passant_destination(&self, from: Position, pawn: Piece) -> Option<Position> {
        let target = self.en_passant?;
        let forward = pawn.color.forward();
        if from.row + forward != target.row || (from.col - target.col).abs() != 1 {
            return None;
        }
        let victim = self.board.get(Position::new(target.row - forward, target.col))?;
        if victim.kind == PieceType::Pawn && victim.is_enemy_of(&pawn) {
            Some(target)
        } else {
            None
        }
    }

    fn castling_destinations(&self, from: Position, king: Piece) -> Vec<Position> {
        if king.moved
            || from.row != king.color.back_row()
            || from.col != KING_HOME_COL
            || self.in_check(king.color)
        {
            return Vec::new();
        }
        CASTLING_WINGS
            .iter()
            .filter(|&&(rook_col, transit_col, landing_col)| {
                self.can_castle(from, king.color, rook_col, transit_col, landing_col)
            })
            .map(|&(_, _, landing_col)| Position::new(from.row, landing_col))
            .collect()
    }

    fn can_castle(&self, king_pos: Position, color: Color, rook_col: i8, transit_col: i8, landing_col: i8) -> bool {
        let row = king_pos.row;
        match self.board.get(Position::new(row, rook_col)) {
            Some(rook) if rook.kind == PieceType::Rook && rook.color == color && !rook.moved => {}
            _ => return false,
        }

        let step = if rook_col > king_pos.col { 1 } else { -1 };
        let mut col = king_pos.col + step;
        while col != rook_col {
            if self.board.get(Position::new(row, col)).is_some() {
                return false;
            }
            col += step;
        }

        !self.board.is_square_attacked(Position::new(row, transit_col), color)
            && !self.board.is_square_attacked(Position::new(row, landing_col), color)
    }

    /// Plays the move on a throwaway copy of the board and tests for check there.
    fn leaves_king_in_check(&self, from: Position, to: Position, color: Color) -> bool {
        let mut simulation = self.board.clone();
        simulation.force_move(from, to, self.en_passant);
        simulation.is_in_check(color)
    }

    fn captured_piece(&self, from: Position, to: Position, piece: Piece) -> Option<Piece> {
        if let Some(target) = self.board.get(to) {
            return Some(target);
        }
        if piece.kind == PieceType::Pawn && from.col != to.col && self.en_passant == Some(to) {
            return self.board.get(Position::new(to.row - piece.color.forward(), to.col));
        }
        None
    }
}

fn illegal(from: Position, to: Position) -> ChessError {
    ChessError::IllegalMove {
        from: from.as_algebraic(),
        to: to.as_algebraic(),
    }
}
