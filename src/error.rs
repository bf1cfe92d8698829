use thiserror::Error;

#[derive(Error, Debug)]
pub enum CadenceError {
    #[error("API request failed: {0}")]
    Api(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Cannot resolve repository '{identifier}': {reason}")]
    Resolution { identifier: String, reason: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CadenceError>;
