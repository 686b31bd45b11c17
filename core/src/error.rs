use thiserror::Error;

/// QR Panel error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Backend rejected request: {0}")]
    Backend(String),

    #[error("Failed to decode payload: {0}")]
    Decode(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Request cancelled")]
    Cancelled,

    #[error("Failed to serialize/deserialize: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Network(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
