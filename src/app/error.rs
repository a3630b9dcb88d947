use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReaderError {
    #[error("Ghost API not configured. Set GHOST_URL and GHOST_CONTENT_API_KEY.")]
    NotConfigured,

    #[error("Missing article.")]
    MissingArticle,

    #[error("Article not found: {0}")]
    NotFound(String),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for ReaderError {
    fn from(e: reqwest::Error) -> Self {
        ReaderError::Backend(e.to_string())
    }
}

impl From<serde_json::Error> for ReaderError {
    fn from(e: serde_json::Error) -> Self {
        ReaderError::Backend(format!("Malformed response: {}", e))
    }
}

pub type Result<T> = std::result::Result<T, ReaderError>;
