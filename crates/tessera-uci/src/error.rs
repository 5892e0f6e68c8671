//! UCI protocol errors.

/// Errors that can occur during UCI protocol handling.
#[derive(Debug, thiserror::Error)]
pub enum UciError {
    /// The `position` command is missing `startpos` or `fen` keyword.
    #[error("malformed position command: missing startpos or fen keyword")]
    MalformedPosition,

    /// Failed to parse a FEN string.
    #[error("invalid FEN: {fen}")]
    InvalidFen {
        /// The FEN string that failed to parse.
        fen: String,
    },

    /// A move in the `position` command is not legal in its position.
    #[error("invalid move: {uci_move}")]
    InvalidMove {
        /// The UCI move string that failed to parse.
        uci_move: String,
    },

    /// A parameter that takes a value was given none.
    #[error("missing value for {param}")]
    MissingValue {
        /// The parameter name.
        param: String,
    },

    /// A numeric parameter could not be parsed.
    #[error("invalid value for {param}: {value}")]
    InvalidValue {
        /// The parameter name.
        param: String,
        /// The offending token.
        value: String,
    },

    /// `setoption` without the `name` keyword.
    #[error("malformed setoption command: missing name keyword")]
    MalformedOption,

    /// `setoption` for an option the engine does not have.
    #[error("unknown option: {name}")]
    UnknownOption {
        /// The option name as given.
        name: String,
    },

    /// An I/O error occurred while reading from stdin.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}
