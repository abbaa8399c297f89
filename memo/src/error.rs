use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MemoError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Memo API error ({status}): {message}")]
    Api { status: StatusCode, message: String },

    #[error("Current user has not been resolved yet")]
    UserUnresolved,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl MemoError {
    /// Map an HTTP status and response body onto the matching variant.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = if body.trim().is_empty() {
            status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string()
        } else {
            body.trim().to_string()
        };

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                MemoError::Auth(format!("{status}: {message}"))
            }
            _ => MemoError::Api { status, message },
        }
    }

    /// The service rejected the access token.
    pub fn is_auth(&self) -> bool {
        matches!(self, MemoError::Auth(_))
    }
}

pub type Result<T> = std::result::Result<T, MemoError>;
