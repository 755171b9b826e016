//! Remote multimodal extraction adapter.
//!
//! Wraps the external extraction service behind the
//! [`omnitext_core::RemoteExtractor`] trait: one deterministic request per
//! input file, no retries, failures local to that file.

pub mod config;
pub mod gemini;

pub use config::RemoteConfig;
pub use gemini::GeminiExtractor;
