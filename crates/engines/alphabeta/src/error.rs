use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    #[error("malformed opening book: {0}")]
    BookFormat(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("no legal moves to choose from")]
    NoLegalMoves,

    #[error("move computation exceeded {0:?}")]
    Timeout(Duration),

    #[error("search task failed: {0}")]
    SearchFailed(String),

    #[error("engine lock poisoned")]
    Poisoned,
}

pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_converts() {
        let err: EngineError = std::io::Error::new(std::io::ErrorKind::NotFound, "book.json").into();
        assert!(matches!(err, EngineError::Io(_)));
        assert!(err.to_string().contains("book.json"));
    }

    #[test]
    fn test_timeout_is_distinct_from_failure() {
        let timeout = EngineError::Timeout(Duration::from_millis(150));
        let failed = EngineError::SearchFailed("panicked".to_string());
        assert_eq!(timeout.to_string(), "move computation exceeded 150ms");
        assert_eq!(failed.to_string(), "search task failed: panicked");
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<EngineError>();
    }
}
