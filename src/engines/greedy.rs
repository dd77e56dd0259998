use super::MoveSelector;
use crate::chess_boards::chess_board::Move;
use crate::chess_boards::game::Game;
use rand::prelude::SliceRandom;
use rand::RngCore;

/// Takes the most valuable piece it can capture, otherwise plays a random move.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyCaptureSelector;

/// Uniformly random legal move.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSelector;

impl GreedyCaptureSelector {
    /// Best capture by victim value. On equal value the first move in the list wins.
    pub fn best_capture(moves: &[Move]) -> Option<Move> {
        let mut best: Option<(i32, Move)> = None;
        for mv in moves {
            if let Some(captured) = mv.captured {
                let value = captured.kind.value();
                if best.map_or(true, |(best_value, _)| value > best_value) {
                    best = Some((value, *mv));
                }
            }
        }
        best.map(|(_, mv)| mv)
    }
}

impl MoveSelector for GreedyCaptureSelector {
    fn name(&self) -> &str {
        "Greedy Capture"
    }

    fn select_move(&self, game: &Game, rng: &mut dyn RngCore) -> Option<Move> {
        let moves = game.all_legal_moves();
        Self::best_capture(&moves).or_else(|| moves.choose(rng).copied())
    }
}

impl MoveSelector for RandomSelector {
    fn name(&self) -> &str {
        "Random"
    }

    fn select_move(&self, game: &Game, rng: &mut dyn RngCore) -> Option<Move> {
        game.all_legal_moves().choose(rng).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess_boards::chess_board::{Color, PieceType};
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    #[test]
    fn test_prefers_most_valuable_capture() {
        // The white queen on d4 can take a pawn on d7, a knight on a7 or the rook on g7
        let game = Game::from_fen("4k3/n2p2r1/8/8/3Q4/8/8/4K3 w - - 0 1").unwrap();
        let mut rng = Pcg64::seed_from_u64(7);
        let mv = game.ai_move(&mut rng).unwrap();
        assert_eq!(mv.as_algebraic(), "d4g7");
        assert_eq!(mv.captured.map(|p| p.kind), Some(PieceType::Rook));
    }

    #[test]
    fn test_ties_go_to_first_in_scan_order() {
        // Two knights can be captured; the rook on a1 reaches a8 and the rook on h1 reaches h8
        let game = Game::from_fen("n3k2n/8/8/8/8/8/8/R3K2R w - - 0 1").unwrap();
        let moves = game.all_legal_moves();
        let best = GreedyCaptureSelector::best_capture(&moves).unwrap();
        assert_eq!(best.as_algebraic(), "a1a8");
    }

    #[test]
    fn test_random_choice_is_reproducible() {
        let game = Game::new();
        let first = game.ai_move(&mut Pcg64::seed_from_u64(42));
        let second = game.ai_move(&mut Pcg64::seed_from_u64(42));
        assert!(first.is_some());
        assert_eq!(first, second);
        assert!(game.all_legal_moves().contains(&first.unwrap()));
        assert_eq!(first.unwrap().piece.color, Color::White);
    }

    #[test]
    fn test_selector_names() {
        assert_eq!(GreedyCaptureSelector.name(), "Greedy Capture");
        assert_eq!(RandomSelector.name(), "Random");
    }

    #[test]
    fn test_no_moves_no_selection() {
        let game = Game::from_fen("1k6/8/8/8/8/1r6/7r/K7 w - - 0 1").unwrap();
        let mut rng = Pcg64::seed_from_u64(1);
        assert_eq!(game.ai_move(&mut rng), None);
        assert_eq!(RandomSelector.select_move(&game, &mut rng), None);
    }

    #[test]
    fn test_random_selector_only_plays_legal_moves() {
        let mut game = Game::new();
        let mut rng = Pcg64::seed_from_u64(3);
        for _ in 0..20 {
            match RandomSelector.select_move(&game, &mut rng) {
                Some(mv) => game.make_move(mv).unwrap(),
                None => break,
            }
        }
        assert!(!game.history().is_empty());
    }
}
