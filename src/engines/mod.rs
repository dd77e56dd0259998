use crate::chess_boards::chess_board::Move;
use crate::chess_boards::game::Game;
use rand::RngCore;

pub mod greedy;
pub use greedy::{GreedyCaptureSelector, RandomSelector};

/// Picks one of the legal moves of the side to move.
///
/// Selectors hold no game state; any randomness comes from the generator that
/// is passed in, so a seeded generator gives reproducible choices.
pub trait MoveSelector {
    fn name(&self) -> &str;
    fn select_move(&self, game: &Game, rng: &mut dyn RngCore) -> Option<Move>;
}
