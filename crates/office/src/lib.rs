//! Local format decoders: Word packages, spreadsheets, and plain/HTML text.
//!
//! Each decoder takes raw bytes and produces a text representation; failures
//! surface as [`omnitext_core::Error::LocalDecode`].

pub mod sheet;
pub mod text;
pub mod word;

pub use sheet::extract_sheets;
pub use text::extract_text;
pub use word::extract_word;
