pub mod chess_board;
pub mod game;
pub mod perft;
pub mod promotion;

pub use game::{Game, Outcome};
pub use promotion::{AlwaysQueen, FixedPromotion, PromotionProvider};

#[cfg(test)]
mod game_scenarios;
