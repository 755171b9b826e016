//! Dispatch orchestration for the omnitext extraction pipeline.
//!
//! The [`Dispatcher`] is the single entry point per input file: it classifies
//! the file, invokes the matching extraction strategy, and is re-entered
//! recursively by the archive expander for every container entry. Batch
//! processing is strictly sequential, in submission order, to bound peak
//! memory.

mod archive;
mod batch;
mod dispatch;

pub use archive::{MAX_ARCHIVE_DEPTH, MAX_TOTAL_DECOMPRESSED};
pub use batch::process_batch;
pub use dispatch::Dispatcher;
