use crate::chess_boards::chess_board::{Color, PieceType};
use crate::chess_boards::game::{Game, Outcome};
use crate::engines::{MoveSelector, RandomSelector};
use crate::error::ChessError;
use rand::SeedableRng;
use rand_pcg::Pcg64;

fn play_all(game: &mut Game, moves: &[&str]) {
    for m in moves {
        game.play(m).unwrap_or_else(|e| panic!("{} failed: {}", m, e));
    }
}

#[test]
fn test_fools_mate() {
    let mut game = Game::new();
    play_all(&mut game, &["f2f3", "e7e5", "g2g4", "d8h4"]);

    assert!(game.in_check(Color::White));
    assert!(game.is_checkmate(Color::White));
    assert!(!game.is_stalemate(Color::White));
    assert!(game.is_game_over());
    assert_eq!(game.outcome(), Some(Outcome::Checkmate { winner: Color::Black }));
    assert!(game.all_legal_moves().is_empty());
    assert_eq!(game.play("a2a3"), Err(ChessError::GameOver));
    assert_eq!(game.history(), ["f2f3", "e7e5", "g2g4", "d8h4"]);
}

#[test]
fn test_pawn_push_stalemates() {
    let mut game = Game::from_fen("k7/8/PK6/8/8/8/8/8 w - - 0 1").unwrap();
    assert!(!game.is_game_over());

    game.play("a6a7").unwrap();
    assert!(!game.in_check(Color::Black));
    assert!(game.is_stalemate(Color::Black));
    assert!(!game.is_checkmate(Color::Black));
    assert_eq!(game.outcome(), Some(Outcome::Stalemate));
}

#[test]
fn test_random_games_keep_board_consistent() {
    for seed in 0..8u64 {
        let mut rng = Pcg64::seed_from_u64(seed);
        let mut game = Game::new();

        for _ in 0..160 {
            let mv = match RandomSelector.select_move(&game, &mut rng) {
                Some(mv) => mv,
                None => break,
            };

            let promotes = mv.piece.kind == PieceType::Pawn && mv.to.row == mv.piece.color.promotion_row();
            let mut forced = game.board().clone();
            forced.force_move(mv.from, mv.to, game.en_passant_target());

            let mover = game.active_color();
            game.make_move(mv).unwrap();

            if !promotes {
                assert_eq!(&forced, game.board(), "seed {} move {}", seed, mv);
            }
            assert!(!game.in_check(mover), "seed {} move {} left the king in check", seed, mv);

            let pieces: Vec<_> = game.board().all_pieces_with_coordinates().collect();
            assert!(pieces.len() <= 32);
            for color in [Color::White, Color::Black] {
                let kings = pieces
                    .iter()
                    .filter(|(_, p)| p.kind == PieceType::King && p.color == color)
                    .count();
                assert_eq!(kings, 1);
                assert!(!(game.is_checkmate(color) && game.is_stalemate(color)));
            }

            if game.is_game_over() {
                break;
            }
        }
        assert_eq!(game.history().len(), game.move_history().len());
    }
}

#[test]
fn test_game_over_matches_side_to_move() {
    let mut rng = Pcg64::seed_from_u64(11);
    let mut game = Game::new();
    while let Some(mv) = game.ai_move(&mut rng) {
        game.make_move(mv).unwrap();
        if game.history().len() >= 300 {
            break;
        }
    }

    let side = game.active_color();
    match game.outcome() {
        Some(Outcome::Checkmate { winner }) => {
            assert_eq!(winner, side.opposite());
            assert!(game.is_checkmate(side));
        }
        Some(Outcome::Stalemate) => assert!(game.is_stalemate(side)),
        None => assert!(!game.all_legal_moves().is_empty()),
    }
}
