//! Error types for the round store and guess handling.

use axum::http::StatusCode;

/// Round store failure.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A previous holder of the store lock panicked.
    #[error("store lock poisoned")]
    Poisoned,

    #[error("could not create database directory: {0}")]
    Io(#[from] std::io::Error),

    /// The blocking task running a store operation panicked or was cancelled.
    #[error("store task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Errors surfaced to the HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// Guess could not be coerced to an integer.
    #[error("invalid guess: {0}")]
    InvalidInput(String),

    #[error("round store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),
}

impl GameError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GameError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            GameError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            GameError::InvalidInput("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            GameError::from(StoreError::Poisoned).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_messages() {
        let err = GameError::from(StoreError::Poisoned);
        assert_eq!(err.to_string(), "round store unavailable: store lock poisoned");
    }
}
