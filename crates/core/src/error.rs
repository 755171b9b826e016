//! Error types for the extraction pipeline.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while extracting text from an input file.
///
/// Every error is terminal for its own input file only: a failed file never
/// aborts sibling files in a batch, and a failed archive entry never aborts
/// its sibling entries (those are rendered inline as placeholder text rather
/// than propagated).
#[derive(Error, Debug)]
pub enum Error {
    /// The classifier found no matching strategy for the declared type.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The payload exceeds the remote service's size ceiling.
    /// Checked locally, before any network request.
    #[error("File too large: {size} bytes (limit {limit})")]
    SizeExceeded { size: usize, limit: usize },

    /// No access credential is configured for the remote service.
    /// Checked locally, before any network request.
    #[error("Missing API credential for the remote extraction service")]
    MissingCredential,

    /// The remote extraction service failed or returned nothing usable.
    #[error("Remote extraction error: {0}")]
    RemoteService(String),

    /// A local decoder could not parse its package.
    #[error("Decode error: {0}")]
    LocalDecode(String),

    /// The archive container itself could not be opened or walked.
    #[error("Archive error: {0}")]
    Archive(String),

    /// Failed to read the input file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),
}
