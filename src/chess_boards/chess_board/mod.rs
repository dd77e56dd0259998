pub mod fen;
pub mod model;
pub use fen::{FenSetup, INITIAL_POSITION};
pub use model::{parse_square_pair, Color, Move, Piece, PieceType, Position, Square};

mod attacks;
mod chess_board;
mod move_generation;
#[cfg(test)]
pub mod test_utils;
pub use chess_board::ChessBoard;
pub use move_generation::pseudo_legal_moves;
