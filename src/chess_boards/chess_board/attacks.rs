use super::move_generation::{BISHOP_DIRECTIONS, KING_MOVES, KNIGHT_MOVES, ROOK_DIRECTIONS};
use super::{ChessBoard, Color, PieceType, Position};

impl ChessBoard {
    /// True if any piece of the opponent of `side_to_protect` threatens `square`.
    ///
    /// Works backwards from the square: each probe looks where an attacker of a
    /// given type would have to stand. Used both for check detection and for
    /// the safety of castling squares.
    pub fn is_square_attacked(&self, square: Position, side_to_protect: Color) -> bool {
        let attacker = side_to_protect.opposite();

        // An attacking pawn sits one row behind the square along its own forward direction
        let pawn_attacks = [(-attacker.forward(), -1), (-attacker.forward(), 1)];
        if self.check_attack(square, attacker, &pawn_attacks, &[PieceType::Pawn]) {
            return true;
        }

        if self.check_attack(square, attacker, &KNIGHT_MOVES, &[PieceType::Knight]) {
            return true;
        }

        if self.check_attack(square, attacker, &KING_MOVES, &[PieceType::King]) {
            return true;
        }

        if self.check_ray_attack(square, attacker, &ROOK_DIRECTIONS, &[PieceType::Rook, PieceType::Queen]) {
            return true;
        }

        self.check_ray_attack(square, attacker, &BISHOP_DIRECTIONS, &[PieceType::Bishop, PieceType::Queen])
    }

    fn check_attack(&self, square: Position, attacker: Color, offsets: &[(i8, i8)], kinds: &[PieceType]) -> bool {
        offsets
            .iter()
            .filter_map(|&(dx, dy)| square.offset(dx, dy))
            .filter_map(|pos| self.get(pos))
            .any(|piece| piece.color == attacker && kinds.contains(&piece.kind))
    }

    fn check_ray_attack(&self, square: Position, attacker: Color, directions: &[(i8, i8)], kinds: &[PieceType]) -> bool {
        for &(dx, dy) in directions {
            let mut current = square;
            while let Some(next) = current.offset(dx, dy) {
                if let Some(piece) = self.get(next) {
                    if piece.color == attacker && kinds.contains(&piece.kind) {
                        return true;
                    }
                    break;
                }
                current = next;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attacked(board: &ChessBoard, square: &str, side_to_protect: Color) -> bool {
        board.is_square_attacked(Position::from_algebraic(square).unwrap(), side_to_protect)
    }

    #[test]
    fn test_pawn_attacks() {
        // White pawn on c7, black pawn on d2
        let board = ChessBoard::from_fen("8/2P5/8/8/8/8/3p4/8 w - - 0 1").unwrap();
        assert!(attacked(&board, "c1", Color::White));
        assert!(!attacked(&board, "d1", Color::White));
        assert!(attacked(&board, "e1", Color::White));
        // Squares behind the black pawn are not attacked
        assert!(!attacked(&board, "c3", Color::White));
        assert!(!attacked(&board, "e3", Color::White));

        assert!(attacked(&board, "b8", Color::Black));
        assert!(!attacked(&board, "c8", Color::Black));
        assert!(attacked(&board, "d8", Color::Black));
        assert!(!attacked(&board, "b6", Color::Black));
    }

    #[test]
    fn test_knight_and_king_attacks() {
        let board = ChessBoard::from_fen("8/8/8/8/3n4/8/8/K7 w - - 0 1").unwrap();
        assert!(attacked(&board, "c2", Color::White));
        assert!(attacked(&board, "f5", Color::White));
        assert!(!attacked(&board, "d5", Color::White));

        assert!(attacked(&board, "b2", Color::Black));
        assert!(attacked(&board, "a2", Color::Black));
        assert!(!attacked(&board, "a3", Color::Black));
    }

    #[test]
    fn test_sliding_attacks_stop_at_first_piece() {
        // Black rook on a4 with a white knight on c4 in between, black bishop on h8
        let board = ChessBoard::from_fen("7b/8/8/8/r1N4P/8/8/8 w - - 0 1").unwrap();
        assert!(attacked(&board, "b4", Color::White));
        assert!(attacked(&board, "c4", Color::White));
        assert!(!attacked(&board, "e4", Color::White));
        assert!(attacked(&board, "a1", Color::White));
        assert!(attacked(&board, "b2", Color::White));
        // Rook does not attack diagonally, bishop not orthogonally
        assert!(!attacked(&board, "b3", Color::White));
        assert!(!attacked(&board, "h1", Color::White));
        // Own pieces never attack
        assert!(!attacked(&board, "b4", Color::Black));
    }

    #[test]
    fn test_queen_attacks_both_ways() {
        let board = ChessBoard::from_fen("8/8/8/3q4/8/8/8/8 w - - 0 1").unwrap();
        assert!(attacked(&board, "d1", Color::White));
        assert!(attacked(&board, "a8", Color::White));
        assert!(attacked(&board, "h1", Color::White));
        assert!(!attacked(&board, "e3", Color::White));
    }
}
