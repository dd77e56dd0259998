/// Errors reported by the rules engine and its parsers.
///
/// Every error is local: the game the error came from is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChessError {
    #[error("invalid square notation: {0}")]
    InvalidSquare(String),

    #[error("invalid FEN string: {0}")]
    InvalidFen(String),

    #[error("game is already over")]
    GameOver,

    #[error("no piece on {0}")]
    EmptySquare(String),

    #[error("piece on {0} does not belong to the side to move")]
    WrongColor(String),

    #[error("illegal move: {from} -> {to}")]
    IllegalMove { from: String, to: String },
}
