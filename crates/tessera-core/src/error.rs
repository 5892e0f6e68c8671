//! Error types for position setup and move parsing.

/// Errors that occur when loading a FEN string.
#[derive(Debug, thiserror::Error)]
pub enum FenError {
    /// The move generator rejected the FEN.
    #[error("invalid FEN \"{fen}\": {source}")]
    Invalid {
        /// The FEN string that failed to parse.
        fen: String,
        /// The underlying parse failure.
        #[source]
        source: cozy_chess::FenParseError,
    },
}

/// Errors that occur when applying moves given as text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    /// The text is not a legal move in the current position.
    #[error("illegal or malformed move: {uci_move}")]
    Illegal {
        /// The move text as received.
        uci_move: String,
    },
}
