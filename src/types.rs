// Error type shared by the client components

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Upload(String),

    #[error("{0}")]
    Poll(String),

    #[error("Server returned {0}")]
    QuestionStatus(u16),

    #[error("{0}")]
    Question(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type AppResult<T> = std::result::Result<T, AppError>;
