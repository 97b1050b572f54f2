//! Error types for API testing

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("{method} {url} returned {status}: {body}")]
    UnexpectedStatus {
        method: String,
        url: String,
        status: u16,
        body: String,
    },

    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    #[error("Schema validation failed:\n{errors}\n\nData: {data}")]
    SchemaValidation { errors: String, data: String },
}

pub type ApiResult<T> = Result<T, ApiError>;
