//! Chess rules engine: board model, legal move generation with castling,
//! en passant and promotion, check/checkmate/stalemate detection and a simple
//! capture-first move selector.

pub mod chess_boards;
pub mod engines;
pub mod error;

pub use chess_boards::chess_board::{ChessBoard, Color, Move, Piece, PieceType, Position};
pub use chess_boards::{AlwaysQueen, FixedPromotion, Game, Outcome, PromotionProvider};
pub use engines::{GreedyCaptureSelector, MoveSelector, RandomSelector};
pub use error::ChessError;
