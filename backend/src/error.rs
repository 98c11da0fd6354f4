use thiserror::Error;

/// Errors raised while reading, writing or publishing the lunch roster.
#[derive(Error, Debug)]
pub enum OrderError {
    #[error("Cannot find sheet {title}")]
    SheetNotFound { title: String },

    #[error("Cannot find the column for {date} in the period sheet")]
    DateNotFound { date: String },

    #[error("User {user} does not exist")]
    UserNotFound { user: String },

    #[error("Failed to publish page {page}: {reason}")]
    ImagePublishFailed { page: usize, reason: String },

    #[error("Cannot compute unpaid list: {0}")]
    DebtComputationFailed(String),

    #[error("No access token available in the token cache")]
    TokenUnavailable,

    #[error("Malformed spreadsheet response: {0}")]
    MalformedResponse(String),

    #[error("Font error: {0}")]
    Font(String),

    #[error("Invalid configuration for {key}: {reason}")]
    Config { key: String, reason: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("PNG encoding error: {0}")]
    Png(#[from] png::EncodingError),

    #[error("Token cache error: {0}")]
    Cache(#[from] redis::RedisError),

    #[error("User directory error: {0}")]
    Directory(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Task join error: {0}")]
    Join(#[from] tokio::task::JoinError),
}

pub type OrderResult<T> = Result<T, OrderError>;
