//! Trait seams for injectable collaborators.

use crate::error::Result;
use async_trait::async_trait;

/// The remote multimodal extraction service, behind a narrow contract:
/// given bytes and a supported media type, return extracted text or fail.
///
/// Defined as a trait so the dispatcher can be exercised with a test double
/// instead of a live service. Implementations perform no retries; a single
/// failed attempt fails the whole input file.
#[async_trait]
pub trait RemoteExtractor: Send + Sync {
    /// Extract text from the payload, which the caller has already verified
    /// to be within the service's size ceiling.
    async fn extract(&self, bytes: &[u8], media_type: &str) -> Result<String>;
}
