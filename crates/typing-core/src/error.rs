use thiserror::Error;

#[derive(Debug, Error)]
pub enum TypingError {
    #[error("type checker not found: '{0}' is not on PATH")]
    CheckerNotFound(String),

    #[error("failed to run type checker: {0}")]
    CheckerSpawn(String),

    #[error("type checker timed out after {0}s")]
    CheckerTimeout(u64),

    #[error("type checker output is not a JSON report: {0}")]
    InvalidReport(String),

    #[error("empty checker command")]
    EmptyCommand,

    #[error("home directory not found: set HOME environment variable")]
    HomeNotFound,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl TypingError {
    /// True when no report could be obtained from the checker at all.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            TypingError::CheckerNotFound(_)
                | TypingError::CheckerSpawn(_)
                | TypingError::CheckerTimeout(_)
                | TypingError::InvalidReport(_)
                | TypingError::EmptyCommand
        )
    }
}

pub type Result<T> = std::result::Result<T, TypingError>;
