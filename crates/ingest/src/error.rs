use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, IngestError>;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Not a valid text file: {}", .0.display())]
    InvalidFile(PathBuf),

    #[error("File already exists in list: {}", .0.display())]
    DuplicateFile(PathBuf),

    #[error("Failed to read {}: {source}", .path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: ReadError,
    },

    #[error("Failed to create {}: {source}", .path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Session state error: {0}")]
    PersistenceFailed(String),

    #[error("Clipboard unavailable: {0}")]
    ClipboardUnavailable(#[from] ClipboardError),
}

/// Failure of [`crate::EncodingFallbackReader::read`].
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no candidate encoding could decode the file (tried {tried})")]
    Undecodable { tried: String },
}

#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("clipboard access denied or unsupported: {0}")]
    Access(String),

    #[error("clipboard content could not be read: {0}")]
    Content(String),
}

impl IngestError {
    /// Short reason without the path prefix, suitable as a status argument.
    pub fn reason(&self) -> String {
        match self {
            IngestError::ReadFailed { source, .. } => source.to_string(),
            IngestError::WriteFailed { source, .. } => source.to_string(),
            other => other.to_string(),
        }
    }
}
