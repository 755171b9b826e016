//! Sequential batch processing with per-file status reporting.

use crate::dispatch::Dispatcher;
use omnitext_core::{FileStatus, InputFile};

/// Process a batch of input files strictly one at a time, in submission
/// order.
///
/// Sequential processing is a deliberate trade-off over throughput: it
/// bounds peak memory, and it makes submission-order result delivery a
/// guarantee rather than an accident of scheduling.
///
/// `on_status` observes every transition per file index: all files start as
/// [`FileStatus::Pending`], then each in turn moves to
/// [`FileStatus::Processing`] and a terminal state. The returned vector
/// holds the terminal status of every file, in submission order.
pub async fn process_batch<F>(
    dispatcher: &Dispatcher,
    files: &[InputFile],
    mut on_status: F,
) -> Vec<FileStatus>
where
    F: FnMut(usize, &FileStatus),
{
    for index in 0..files.len() {
        on_status(index, &FileStatus::Pending);
    }

    let mut outcomes = Vec::with_capacity(files.len());
    for (index, file) in files.iter().enumerate() {
        on_status(index, &FileStatus::Processing);

        let status = match dispatcher.dispatch(file).await {
            Ok(text) => FileStatus::Completed(text),
            Err(e) => FileStatus::Error(e.to_string()),
        };

        on_status(index, &status);
        outcomes.push(status);
    }

    outcomes
}
