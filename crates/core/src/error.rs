//! Error types for cos-upload-core
//!
//! Every failure terminates the run. The CLI maps all variants to exit code 1,
//! so the variants exist to give the diagnostic a clear prefix.

use thiserror::Error;

/// Result type alias for cos-upload-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for cos-upload operations
#[derive(Error, Debug)]
pub enum Error {
    /// Insufficient or invalid command-line arguments
    #[error("Usage error: {0}")]
    Usage(String),

    /// Required environment missing or malformed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Local artifact missing or not a regular file
    #[error("Local file error: {0}")]
    LocalFile(String),

    /// Provider rejected or failed the file transfer
    #[error("Upload failed: {0}")]
    Upload(String),

    /// Provider failed to produce a presigned URL
    #[error("Signing failed: {0}")]
    Signing(String),

    /// CI output sink could not be written
    #[error("Output error: {0}")]
    Output(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// URL parsing error
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl Error {
    /// Whether the remote object exists even though the run failed
    ///
    /// True for failures after the upload: signing, or publishing the URL.
    pub const fn object_uploaded(&self) -> bool {
        matches!(self, Error::Signing(_) | Error::Output(_))
    }
}
