//! Archive expansion with recursive re-dispatch.
//!
//! An archive is treated as a sequence of typed sub-inputs: every entry is
//! wrapped in a synthetic [`InputFile`] with a media type inferred from its
//! extension and fed back through the full dispatch. Entries are processed
//! strictly sequentially to bound peak memory, and one bad entry never loses
//! the rest of the archive's content.

use crate::dispatch::Dispatcher;
use omnitext_core::{media_type_for_extension, Error, InputFile, Result};
use std::io::{Cursor, Read};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use zip::ZipArchive;

/// Maximum archive nesting depth before expansion is refused.
pub const MAX_ARCHIVE_DEPTH: usize = 8;

/// Total decompressed-byte budget for one top-level expansion.
pub const MAX_TOTAL_DECOMPRESSED: u64 = 512 * 1024 * 1024;

/// Recursion state threaded through one top-level expansion.
///
/// The decompression budget is shared across all nesting levels of the same
/// top-level file, so a bomb cannot reset its allowance by nesting.
#[derive(Clone)]
pub(crate) struct ExpandContext {
    depth: usize,
    remaining: Arc<AtomicU64>,
}

impl ExpandContext {
    pub(crate) fn root() -> Self {
        Self {
            depth: 0,
            remaining: Arc::new(AtomicU64::new(MAX_TOTAL_DECOMPRESSED)),
        }
    }

    fn deeper(&self) -> Self {
        Self {
            depth: self.depth + 1,
            remaining: Arc::clone(&self.remaining),
        }
    }

    /// Reserve `size` bytes of the budget; false when exhausted.
    fn reserve(&self, size: u64) -> bool {
        self.remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |remaining| {
                remaining.checked_sub(size)
            })
            .is_ok()
    }
}

/// Expand a ZIP-structured container, re-dispatching every entry.
pub(crate) async fn expand_archive(
    dispatcher: &Dispatcher,
    file: &InputFile,
    ctx: ExpandContext,
) -> Result<String> {
    if ctx.depth >= MAX_ARCHIVE_DEPTH {
        return Err(Error::Archive(format!(
            "archive nesting exceeds {} levels",
            MAX_ARCHIVE_DEPTH
        )));
    }

    let mut archive = ZipArchive::new(Cursor::new(file.bytes.as_slice()))
        .map_err(|e| Error::Archive(format!("failed to open archive: {}", e)))?;

    let mut output = format!("--- ARCHIVE: {} ---\n", file.name);
    let entry_ctx = ctx.deeper();

    // Native listing order, one entry at a time.
    for index in 0..archive.len() {
        let entry = match read_entry(&mut archive, index, &entry_ctx) {
            Ok(Some(entry)) => entry,
            Ok(None) => continue, // directory marker
            Err(message) => {
                log::warn!("skipping unreadable archive entry {}: {}", index, message);
                output.push_str(&entry_failure_line(&message));
                continue;
            }
        };

        output.push_str(&format!("--- FILE: {} ---\n", entry.name));

        match dispatcher.dispatch_at(&entry, entry_ctx.clone()).await {
            Ok(text) => {
                output.push_str(&text);
                if !text.ends_with('\n') {
                    output.push('\n');
                }
            }
            Err(e) => {
                log::warn!("entry '{}' failed: {}", entry.name, e);
                output.push_str(&entry_failure_line(&e.to_string()));
            }
        }
    }

    Ok(output)
}

/// Placeholder line for a failed entry; siblings continue unaffected.
fn entry_failure_line(message: &str) -> String {
    format!("(Không thể trích xuất file này trong ZIP: {})\n", message)
}

/// Read one entry into a synthetic input file.
///
/// Returns `Ok(None)` for directory markers. Errors are reported as strings
/// because they are scoped to this entry only and rendered inline.
fn read_entry(
    archive: &mut ZipArchive<Cursor<&[u8]>>,
    index: usize,
    ctx: &ExpandContext,
) -> std::result::Result<Option<InputFile>, String> {
    let mut entry = archive
        .by_index(index)
        .map_err(|e| format!("unreadable entry: {}", e))?;

    if entry.is_dir() {
        return Ok(None);
    }

    let name = entry.name().to_string();
    let declared = entry.size();
    if !ctx.reserve(declared) {
        return Err(format!(
            "decompressed size budget exhausted at '{}'",
            name
        ));
    }

    let bytes = read_declared(&mut entry, declared, &name)?;

    // Entries carry no declared media type; infer one from the extension.
    let media_type = media_type_for_extension(&name);
    Ok(Some(InputFile::new(name, media_type, bytes)))
}

/// Inflate an entry, holding it to the size its header declared.
///
/// ZIP size fields are attacker-controlled and nothing in the container
/// format forces them to match the inflate output, so the reservation made
/// against the budget is only as honest as the header. Reading one byte past
/// the declared size detects the lie and stops inflation there.
fn read_declared<R: Read>(
    reader: R,
    declared: u64,
    name: &str,
) -> std::result::Result<Vec<u8>, String> {
    let mut bytes = Vec::with_capacity(declared.min(1 << 20) as usize);
    reader
        .take(declared.saturating_add(1))
        .read_to_end(&mut bytes)
        .map_err(|e| format!("failed to read '{}': {}", name, e))?;

    if bytes.len() as u64 > declared {
        return Err(format!(
            "entry '{}' inflates beyond its declared size of {} bytes",
            name, declared
        ));
    }

    Ok(bytes)
}
