use super::{ChessBoard, Color, Piece, PieceType, Position};
use crate::error::ChessError;

pub const INITIAL_POSITION: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Everything a FEN string describes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenSetup {
    pub board: ChessBoard,
    pub active_color: Color,
    pub en_passant: Option<Position>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

/// Castling flags in FEN order together with the rook corner they refer to.
const CASTLING_CORNERS: [(char, Color, i8); 4] =
    [('K', Color::White, 7), ('Q', Color::White, 0), ('k', Color::Black, 7), ('q', Color::Black, 0)];

const KING_HOME_COL: i8 = 4;

/// Parses a FEN string and sets up a board.
///
/// The has-moved flags are derived from the position: pawns are unmoved only on
/// their start rank, kings and rooks only if a matching castling right is
/// present. The flag is irrelevant for the other pieces and left unset.
pub fn from_fen(fen: &str) -> Result<FenSetup, ChessError> {
    let mut board = ChessBoard::new();
    let parts: Vec<&str> = fen.split_whitespace().collect();
    if parts.len() != 6 {
        return Err(ChessError::InvalidFen(String::from("must have 6 parts")));
    }

    // Parse board squares
    let rows: Vec<&str> = parts[0].split('/').collect();
    if rows.len() != 8 {
        return Err(ChessError::InvalidFen(String::from("expected 8 rows")));
    }

    for (row_index, row) in rows.iter().enumerate() {
        let mut col_index = 0usize;

        for c in row.chars() {
            if col_index > 7 {
                return Err(ChessError::InvalidFen(format!("too many squares in row {}", row_index)));
            }
            if let Some(skip) = c.to_digit(10) {
                col_index += skip as usize;
            } else {
                let kind = PieceType::from_char(c)
                    .ok_or_else(|| ChessError::InvalidFen(format!("invalid piece character: {}", c)))?;
                let color = if c.is_ascii_uppercase() { Color::White } else { Color::Black };
                let mut piece = Piece::new(color, kind);
                piece.moved = matches!(kind, PieceType::Pawn | PieceType::King | PieceType::Rook);
                board.place(piece, Position::new(row_index as i8, col_index as i8));
                col_index += 1;
            }
        }
        if col_index != 8 {
            return Err(ChessError::InvalidFen(format!("row {} does not have 8 squares", row_index)));
        }
    }

    // Parse active color
    let active_color = match parts[1] {
        "w" => Color::White,
        "b" => Color::Black,
        _ => return Err(ChessError::InvalidFen(String::from("invalid active color"))),
    };

    // Parse castling rights
    let castling = parts[2];
    if castling != "-" && !castling.chars().all(|c| "KQkq".contains(c)) {
        return Err(ChessError::InvalidFen(format!("invalid castling rights: {}", castling)));
    }
    mark_unmoved_pieces(&mut board, castling);

    // Parse en passant square
    let en_passant = if parts[3] == "-" {
        None
    } else {
        Some(Position::from_algebraic(parts[3]).map_err(|_| {
            ChessError::InvalidFen(format!("invalid en passant square: {}", parts[3]))
        })?)
    };

    // Parse halfmove clock
    let halfmove_clock = parts[4]
        .parse::<u32>()
        .map_err(|_| ChessError::InvalidFen(format!("halfmove clock is not a valid number: {}", parts[4])))?;

    // Parse fullmove number
    let fullmove_number = parts[5]
        .parse::<u32>()
        .map_err(|_| ChessError::InvalidFen(format!("fullmove number is not a valid number: {}", parts[5])))?;

    Ok(FenSetup {
        board,
        active_color,
        en_passant,
        halfmove_clock,
        fullmove_number,
    })
}

fn mark_unmoved_pieces(board: &mut ChessBoard, castling: &str) {
    for row in 0..8 {
        for col in 0..8 {
            let pos = Position::new(row, col);
            if let Some(mut piece) = board.get(pos) {
                if piece.kind == PieceType::Pawn && row == piece.color.pawn_start_row() {
                    piece.moved = false;
                    board.set(pos, Some(piece));
                }
            }
        }
    }

    for (flag, color, rook_col) in CASTLING_CORNERS {
        if !castling.contains(flag) {
            continue;
        }
        let row = color.back_row();
        let king_pos = Position::new(row, KING_HOME_COL);
        let rook_pos = Position::new(row, rook_col);
        let king = board.get(king_pos).filter(|p| p.kind == PieceType::King && p.color == color);
        let rook = board.get(rook_pos).filter(|p| p.kind == PieceType::Rook && p.color == color);
        if let (Some(mut king), Some(mut rook)) = (king, rook) {
            king.moved = false;
            rook.moved = false;
            board.set(king_pos, Some(king));
            board.set(rook_pos, Some(rook));
        }
    }
}

fn castling_rights(board: &ChessBoard) -> String {
    let rights: String = CASTLING_CORNERS
        .iter()
        .filter(|(_, color, rook_col)| {
            let row = color.back_row();
            let unmoved = |pos: Position, kind: PieceType| {
                board
                    .get(pos)
                    .map_or(false, |p| p.kind == kind && p.color == *color && !p.moved)
            };
            unmoved(Position::new(row, KING_HOME_COL), PieceType::King)
                && unmoved(Position::new(row, *rook_col), PieceType::Rook)
        })
        .map(|(flag, _, _)| *flag)
        .collect();
    if rights.is_empty() {
        String::from("-")
    } else {
        rights
    }
}

pub fn to_fen(setup: &FenSetup) -> String {
    let mut board_representation = String::new();

    for row in 0..8 {
        let mut empty_count = 0;

        for col in 0..8 {
            match setup.board.get(Position::new(row, col)) {
                Some(piece) => {
                    if empty_count > 0 {
                        board_representation.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    board_representation.push(piece.to_char());
                }
                None => empty_count += 1,
            }
        }

        if empty_count > 0 {
            board_representation.push_str(&empty_count.to_string());
        }

        if row < 7 {
            board_representation.push('/');
        }
    }

    let active_color = match setup.active_color {
        Color::White => "w",
        Color::Black => "b",
    };

    let en_passant = setup
        .en_passant
        .map_or(String::from("-"), |square| square.as_algebraic());

    format!(
        "{} {} {} {} {} {}",
        board_representation,
        active_color,
        castling_rights(&setup.board),
        en_passant,
        setup.halfmove_clock,
        setup.fullmove_number
    )
}
