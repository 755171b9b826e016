//! Strategy selection and recursive dispatch.

use crate::archive::{self, ExpandContext};
use omnitext_core::{
    classify, Error, InputFile, RemoteExtractor, Result, Strategy, MAX_REMOTE_BYTES,
};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

pub(crate) type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The single recursive entry point of the pipeline.
///
/// Holds the remote extraction service as an injected dependency so the
/// dispatch logic can be exercised against a test double. Local decoders
/// are plain functions and need no injection.
pub struct Dispatcher {
    remote: Arc<dyn RemoteExtractor>,
}

impl Dispatcher {
    /// Create a dispatcher around the given remote extraction service.
    pub fn new(remote: Arc<dyn RemoteExtractor>) -> Self {
        Self { remote }
    }

    /// Extract text from one input file.
    ///
    /// Exactly one strategy is selected before any content bytes are
    /// interpreted. A strategy's failure is the file's failure; there are
    /// no retries.
    pub async fn dispatch(&self, file: &InputFile) -> Result<String> {
        self.dispatch_at(file, ExpandContext::root()).await
    }

    /// Dispatch with an explicit expansion context.
    ///
    /// Boxed so the archive expander can re-enter it recursively for nested
    /// containers.
    pub(crate) fn dispatch_at<'a>(
        &'a self,
        file: &'a InputFile,
        ctx: ExpandContext,
    ) -> BoxFuture<'a, Result<String>> {
        Box::pin(async move {
            let strategy = classify(&file.media_type, &file.name);
            log::debug!(
                "dispatching '{}' ({}) via {:?}",
                file.name,
                file.media_type,
                strategy
            );

            match strategy {
                Strategy::Archive | Strategy::ArchiveLikeBook => {
                    archive::expand_archive(self, file, ctx).await
                }
                Strategy::RemoteMultimodal => {
                    if file.len() > MAX_REMOTE_BYTES {
                        return Err(Error::SizeExceeded {
                            size: file.len(),
                            limit: MAX_REMOTE_BYTES,
                        });
                    }
                    self.remote.extract(&file.bytes, &file.media_type).await
                }
                Strategy::WordDocument => omnitext_office::extract_word(&file.bytes),
                Strategy::Spreadsheet => omnitext_office::extract_sheets(&file.bytes),
                Strategy::PresentationPackage => omnitext_pptx::extract_slides(&file.bytes),
                Strategy::PlainOrHtmlText => {
                    omnitext_office::extract_text(&file.bytes, &file.media_type)
                }
                Strategy::Unsupported => Err(Error::UnsupportedFormat(file.media_type.clone())),
            }
        })
    }
}
