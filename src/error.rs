//! Error types for the generative AI facade.

use thiserror::Error;

/// Errors that can occur when using the facade or the REST client behind it.
#[derive(Debug, Error)]
pub enum GoogleGenAIError {
    /// The API key is empty. Raised before any call reaches the client.
    #[error("API key must be set before calling the API")]
    MissingApiKey,

    /// The files interface returned no file for an upload.
    #[error("File upload failed")]
    UploadFailed,

    /// The files interface returned nothing for the given file name.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// An empty or malformed file identifier was supplied.
    #[error("Invalid file ID: {0}")]
    InvalidFileId(String),

    /// The API answered with a non-success status.
    #[error("Request failed with status {status}: {body}")]
    Api {
        /// HTTP status returned by the API
        status: reqwest::StatusCode,
        /// Raw response body
        body: String,
    },

    /// Base error for the facade.
    #[error("[GoogleGenAI Error]: {message}")]
    Base {
        /// Error message
        message: String,
    },

    /// Error occurred during an API request.
    #[error("API request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Error occurred when accessing environment variables.
    #[error("Environment variable not found: {0}")]
    EnvError(#[from] std::env::VarError),

    /// Error occurred when parsing JSON.
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A header value could not be encoded.
    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    /// Error occurred when reading a local file.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl GoogleGenAIError {
    /// Creates a new Base error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self::Base {
            message: message.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GoogleGenAIError>;
