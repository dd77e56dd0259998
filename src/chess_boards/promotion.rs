use crate::chess_boards::chess_board::{ChessBoard, Color, PieceType};
use std::fmt;

/// Asked synchronously by the game when a pawn reaches the last rank.
///
/// Must always answer. Anything other than queen, rook, bishop or knight is
/// treated as a queen.
pub trait PromotionProvider: Send + Sync {
    fn choose(&self, color: Color, board: &ChessBoard) -> PieceType;
}

/// The default provider.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysQueen;

impl PromotionProvider for AlwaysQueen {
    fn choose(&self, _color: Color, _board: &ChessBoard) -> PieceType {
        PieceType::Queen
    }
}

/// Always promotes to the same piece, e.g. for scripted games.
#[derive(Debug, Clone, Copy)]
pub struct FixedPromotion(pub PieceType);

impl PromotionProvider for FixedPromotion {
    fn choose(&self, _color: Color, _board: &ChessBoard) -> PieceType {
        self.0
    }
}

impl<F> PromotionProvider for F
where
    F: Fn(Color, &ChessBoard) -> PieceType + Send + Sync,
{
    fn choose(&self, color: Color, board: &ChessBoard) -> PieceType {
        self(color, board)
    }
}

impl fmt::Debug for dyn PromotionProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PromotionProvider")
    }
}
