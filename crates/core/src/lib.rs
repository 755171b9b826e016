//! Core domain types, type classification, and error taxonomy for the
//! omnitext extraction pipeline.

pub mod classify;
pub mod error;
pub mod traits;
pub mod types;

pub use classify::{classify, media_type_for_extension, Strategy, REMOTE_MEDIA_TYPES};
pub use error::{Error, Result};
pub use traits::RemoteExtractor;
pub use types::{FileStatus, InputFile};

/// Maximum payload size accepted by the remote extraction service, in bytes.
///
/// Files above this fail locally with [`Error::SizeExceeded`] before any
/// outbound request is made.
pub const MAX_REMOTE_BYTES: usize = 20 * 1024 * 1024;
