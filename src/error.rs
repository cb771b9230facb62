//! Error handling and custom error types
//!
//! Provides unified error handling across the application using thiserror.
//! Generation errors are terminal: the client never retries them; the caller
//! may re-invoke `generate` from scratch.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No Fal AI API key configured. Set one with `set-key` or the FAL_KEY environment variable")]
    MissingCredential,

    #[error("Fal AI rejected the API key (HTTP 401)")]
    InvalidCredential,

    #[error("Fal AI account has insufficient balance (HTTP 402)")]
    InsufficientBalance,

    #[error("Failed to submit generation request (status {status}): {body}")]
    SubmissionFailed { status: u16, body: String },

    #[error("Failed to check job status (status {status})")]
    PollFailed { status: u16 },

    #[error("Virtual try-on generation failed on the server")]
    GenerationFailed,

    #[error("Generation request timed out after 5 minutes")]
    Timeout,

    #[error("Failed to fetch generation result (status {status})")]
    ResultFetchFailed { status: u16 },

    #[error("No image was generated")]
    NoImageProduced,

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Photo error: {0}")]
    Photo(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Generic error: {0}")]
    Generic(String),
}

pub type Result<T> = std::result::Result<T, Error>;
