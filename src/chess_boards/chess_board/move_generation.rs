use super::{ChessBoard, Piece, PieceType, Position};

pub(crate) const KNIGHT_MOVES: [(i8, i8); 8] =
    [(-2, -1), (-1, -2), (1, -2), (2, -1), (2, 1), (1, 2), (-1, 2), (-2, 1)];
pub(crate) const KING_MOVES: [(i8, i8); 8] = [(-1, -1), (-1, 0), (-1, 1), (0, -1), (0, 1), (1, -1), (1, 0), (1, 1)];
pub(crate) const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
pub(crate) const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];
const QUEEN_DIRECTIONS: [(i8, i8); 8] = [(-1, -1), (-1, 1), (1, -1), (1, 1), (0, -1), (0, 1), (-1, 0), (1, 0)];

/// Destinations of the piece on `from` following its movement pattern, ignoring
/// whether the move leaves its own king in check.
///
/// Castling and en passant are not produced here; the rules engine adds them.
pub fn pseudo_legal_moves(board: &ChessBoard, from: Position) -> Vec<Position> {
    let piece = match board.get(from) {
        Some(p) => p,
        None => return Vec::new(),
    };
    match piece.kind {
        PieceType::Pawn => generate_pawn_moves(board, from, piece),
        PieceType::Knight => generate_moves_from_directions(board, from, piece, &KNIGHT_MOVES),
        PieceType::Bishop => generate_sliding_moves(board, from, piece, &BISHOP_DIRECTIONS),
        PieceType::Rook => generate_sliding_moves(board, from, piece, &ROOK_DIRECTIONS),
        PieceType::Queen => generate_sliding_moves(board, from, piece, &QUEEN_DIRECTIONS),
        PieceType::King => generate_moves_from_directions(board, from, piece, &KING_MOVES),
    }
}

fn generate_pawn_moves(board: &ChessBoard, from: Position, pawn: Piece) -> Vec<Position> {
    let mut moves = Vec::new();
    let forward = pawn.color.forward();

    // Regular forward move
    if let Some(one_forward) = from.offset(forward, 0) {
        if board.is_empty(one_forward) {
            moves.push(one_forward);

            // Double move from start position
            if from.row == pawn.color.pawn_start_row() {
                if let Some(two_forward) = from.offset(2 * forward, 0) {
                    if board.is_empty(two_forward) {
                        moves.push(two_forward);
                    }
                }
            }
        }
    }

    // Capture diagonally
    for dx in [-1, 1] {
        if let Some(target) = from.offset(forward, dx) {
            if let Some(victim) = board.get(target) {
                if victim.is_enemy_of(&pawn) {
                    moves.push(target);
                }
            }
        }
    }

    moves
}

/// Ray walk for bishop, rook and queen. A ray ends on the first occupied square,
/// which is included only when it holds an enemy.
fn generate_sliding_moves(board: &ChessBoard, from: Position, piece: Piece, directions: &[(i8, i8)]) -> Vec<Position> {
    let mut moves = Vec::new();

    for &(dx, dy) in directions {
        let mut current = from;
        while let Some(next) = current.offset(dx, dy) {
            match board.get(next) {
                None => moves.push(next),
                Some(p) => {
                    if p.is_enemy_of(&piece) {
                        moves.push(next);
                    }
                    break; // Block sliding
                }
            }
            current = next;
        }
    }

    moves
}

fn generate_moves_from_directions(
    board: &ChessBoard,
    from: Position,
    piece: Piece,
    directions: &[(i8, i8)],
) -> Vec<Position> {
    directions
        .iter()
        .filter_map(|&(dx, dy)| from.offset(dx, dy))
        .filter(|&target| match board.get(target) {
            None => true,
            Some(p) => p.is_enemy_of(&piece),
        })
        .collect()
}
