//! Domain types for the extraction pipeline.

use serde::{Deserialize, Serialize};

/// One unit of work submitted for extraction: a top-level upload or a
/// synthesized archive entry.
///
/// Immutable once constructed. Entries synthesized from inside an archive
/// carry a media type inferred from their extension, since ZIP directory
/// listings declare none.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputFile {
    /// File name (top-level) or path within the archive (entries).
    pub name: String,

    /// Declared media type; may be empty or generic for archive entries.
    pub media_type: String,

    /// Raw payload.
    pub bytes: Vec<u8>,
}

impl InputFile {
    /// Create a new input file.
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes,
        }
    }

    /// Payload length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Per-file status as reported to the caller.
///
/// The progression is always `Pending` → `Processing` → `Completed` or
/// `Error`; this four-state sequence is the entire surface the pipeline
/// exposes upward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FileStatus {
    /// Queued, not yet started.
    Pending,
    /// Extraction in progress.
    Processing,
    /// Extraction finished; carries the combined text.
    Completed(String),
    /// Extraction failed; carries a human-readable message.
    Error(String),
}

impl FileStatus {
    /// Whether this status is terminal (completed or failed).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed(_) | Self::Error(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_file_len() {
        let file = InputFile::new("a.txt", "text/plain", b"hello".to_vec());
        assert_eq!(file.len(), 5);
        assert!(!file.is_empty());
    }

    #[test]
    fn test_status_terminal() {
        assert!(!FileStatus::Pending.is_terminal());
        assert!(!FileStatus::Processing.is_terminal());
        assert!(FileStatus::Completed(String::new()).is_terminal());
        assert!(FileStatus::Error("x".into()).is_terminal());
    }
}
