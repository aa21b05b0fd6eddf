use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// One listing candidate or detail page lacked a node its layout requires.
    #[error("Extraction miss: {0}")]
    ExtractionMiss(String),

    #[error("Source unreachable: {target}: {reason}")]
    SourceUnreachable { target: String, reason: String },

    #[error("Backend rejected document (status {status}): {body}")]
    BackendRejected { status: u16, body: String },

    #[error("Backend query failed (status {status}): {body}")]
    BackendUnreachable { status: u16, body: String },

    #[error("Unexpected response shape: {0}")]
    UnexpectedResponseShape(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid selector: {0}")]
    Selector(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
