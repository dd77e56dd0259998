use crate::chess_boards::game::Game;

/// Counts the leaf nodes of the legal move tree down to `depth` plies.
///
/// Promotions count once since the promotion provider decides the piece.
pub fn perft(game: &Game, depth: u8) -> u64 {
    if depth == 0 {
        return 1u64;
    }

    let moves = game.all_legal_moves();
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut node_count = 0u64;
    for mv in moves {
        let mut new_game = game.clone();
        if new_game.make_move(mv).is_ok() {
            node_count += perft(&new_game, depth - 1);
        }
    }
    node_count
}
