use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Invalid service account credentials: {0}")]
    Credentials(String),
    #[error("Authentication failed: {0}")]
    Auth(String),
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Drive API error {status}: {message}")]
    Api { status: u16, message: String },
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, PublishError>;
