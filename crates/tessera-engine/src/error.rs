//! Engine errors.

/// Errors raised around, never inside, a search.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The background search thread could not be spawned.
    #[error("failed to spawn search thread: {source}")]
    Spawn {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}
