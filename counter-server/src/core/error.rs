use thiserror::Error;

/// Process-level failures: startup, configuration, serving. Request-level
/// failures use [`shared::AppError`], which maps itself to HTTP responses.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    App(#[from] shared::AppError),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
