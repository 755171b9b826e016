//! File-type classification.
//!
//! Maps a file's declared media type and name to exactly one extraction
//! strategy. Classification is total and side-effect-free: no content bytes
//! are inspected, only the declared type and the file name.

/// Office Open XML word-processing package type.
pub const DOCX_MEDIA_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Office Open XML spreadsheet package type.
pub const XLSX_MEDIA_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Office Open XML presentation package type.
pub const PPTX_MEDIA_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation";

/// E-book package type.
pub const EPUB_MEDIA_TYPE: &str = "application/epub+zip";

/// Media types the remote multimodal service accepts, exactly.
pub const REMOTE_MEDIA_TYPES: &[&str] = &[
    "application/pdf",
    // Images
    "image/png",
    "image/jpeg",
    "image/webp",
    "image/heic",
    "image/heif",
    // Audio
    "audio/mpeg",
    "audio/mp3",
    "audio/wav",
    "audio/aac",
    "audio/flac",
    "audio/x-m4a",
    // Video
    "video/mp4",
    "video/mpeg",
    "video/mov",
    "video/avi",
    "video/x-flv",
    "video/mpg",
    "video/webm",
    "video/wmv",
    "video/3gpp",
];

/// The extraction strategy selected for an input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// ZIP-structured container; expand entries and re-dispatch each.
    Archive,
    /// Send to the remote multimodal extraction service.
    RemoteMultimodal,
    /// Word-processing OOXML package.
    WordDocument,
    /// Spreadsheet OOXML package.
    Spreadsheet,
    /// Presentation OOXML package (itself an archive of slide XML).
    PresentationPackage,
    /// Plain text, HTML, or rich text.
    PlainOrHtmlText,
    /// EPUB e-book; handled identically to [`Strategy::Archive`].
    ArchiveLikeBook,
    /// No matching strategy; dispatch fails with an unsupported-format error.
    Unsupported,
}

/// Classify a file by declared media type and name.
///
/// Rules are evaluated in a fixed precedence order; the first match wins.
/// Extension checks are deliberately reachable with an empty or generic
/// media type, because archive entries carry only a type inferred from
/// their extension.
pub fn classify(media_type: &str, file_name: &str) -> Strategy {
    let name = file_name.to_lowercase();

    if media_type == "application/zip" || name.ends_with(".zip") {
        return Strategy::Archive;
    }
    if REMOTE_MEDIA_TYPES.contains(&media_type) {
        return Strategy::RemoteMultimodal;
    }
    if media_type == DOCX_MEDIA_TYPE || name.ends_with(".docx") {
        return Strategy::WordDocument;
    }
    if media_type == XLSX_MEDIA_TYPE || name.ends_with(".xlsx") {
        return Strategy::Spreadsheet;
    }
    if media_type == PPTX_MEDIA_TYPE || name.ends_with(".pptx") {
        return Strategy::PresentationPackage;
    }
    if media_type == "text/plain"
        || media_type == "text/html"
        || media_type == "application/rtf"
        || media_type == "text/rtf"
        || name.ends_with(".txt")
        || name.ends_with(".md")
    {
        return Strategy::PlainOrHtmlText;
    }
    if media_type == EPUB_MEDIA_TYPE || name.ends_with(".epub") {
        return Strategy::ArchiveLikeBook;
    }

    Strategy::Unsupported
}

/// Infer a media type from a file name's extension.
///
/// Used for archive entries, which have no declared type of their own.
/// Covers the remote-supported set and the locally decoded formats
/// explicitly, then falls back to `mime_guess` and finally to
/// `application/octet-stream`.
pub fn media_type_for_extension(file_name: &str) -> String {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();

    let known = match ext.as_str() {
        "zip" => "application/zip",
        "epub" => EPUB_MEDIA_TYPE,
        "docx" => DOCX_MEDIA_TYPE,
        "xlsx" => XLSX_MEDIA_TYPE,
        "pptx" => PPTX_MEDIA_TYPE,
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "heic" => "image/heic",
        "heif" => "image/heif",
        "mp3" => "audio/mp3",
        "wav" => "audio/wav",
        "aac" => "audio/aac",
        "flac" => "audio/flac",
        "m4a" => "audio/x-m4a",
        "mp4" => "video/mp4",
        "mpeg" => "video/mpeg",
        "mpg" => "video/mpg",
        "mov" => "video/mov",
        "avi" => "video/avi",
        "flv" => "video/x-flv",
        "webm" => "video/webm",
        "wmv" => "video/wmv",
        "3gp" | "3gpp" => "video/3gpp",
        "txt" | "md" => "text/plain",
        "html" | "htm" => "text/html",
        "rtf" => "application/rtf",
        _ => "",
    };

    if !known.is_empty() {
        return known.to_string();
    }

    mime_guess::from_path(file_name)
        .first_raw()
        .unwrap_or("application/octet-stream")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_types_classify_regardless_of_extension() {
        for media_type in REMOTE_MEDIA_TYPES {
            assert_eq!(
                classify(media_type, "whatever.bin"),
                Strategy::RemoteMultimodal,
                "media type {} should route to the remote extractor",
                media_type
            );
            assert_eq!(classify(media_type, ""), Strategy::RemoteMultimodal);
        }
    }

    #[test]
    fn test_extension_rules_reachable_with_empty_media_type() {
        assert_eq!(classify("", "report.docx"), Strategy::WordDocument);
        assert_eq!(classify("", "book.xlsx"), Strategy::Spreadsheet);
        assert_eq!(classify("", "deck.pptx"), Strategy::PresentationPackage);
        assert_eq!(classify("", "notes.txt"), Strategy::PlainOrHtmlText);
        assert_eq!(classify("", "readme.md"), Strategy::PlainOrHtmlText);
        assert_eq!(classify("", "bundle.zip"), Strategy::Archive);
        assert_eq!(classify("", "novel.epub"), Strategy::ArchiveLikeBook);
    }

    #[test]
    fn test_extension_rules_case_insensitive() {
        assert_eq!(classify("", "REPORT.DOCX"), Strategy::WordDocument);
        assert_eq!(classify("", "Bundle.Zip"), Strategy::Archive);
    }

    #[test]
    fn test_zip_takes_precedence() {
        // A .zip name wins even when the declared type would match another rule.
        assert_eq!(classify("application/zip", "deck.pptx"), Strategy::Archive);
        assert_eq!(classify("text/plain", "notes.zip"), Strategy::Archive);
    }

    #[test]
    fn test_declared_package_types() {
        assert_eq!(classify(DOCX_MEDIA_TYPE, "blob"), Strategy::WordDocument);
        assert_eq!(classify(XLSX_MEDIA_TYPE, "blob"), Strategy::Spreadsheet);
        assert_eq!(
            classify(PPTX_MEDIA_TYPE, "blob"),
            Strategy::PresentationPackage
        );
        assert_eq!(classify(EPUB_MEDIA_TYPE, "blob"), Strategy::ArchiveLikeBook);
    }

    #[test]
    fn test_text_media_types() {
        assert_eq!(classify("text/plain", "x"), Strategy::PlainOrHtmlText);
        assert_eq!(classify("text/html", "x"), Strategy::PlainOrHtmlText);
        assert_eq!(classify("application/rtf", "x"), Strategy::PlainOrHtmlText);
    }

    #[test]
    fn test_unknown_is_unsupported() {
        assert_eq!(
            classify("application/octet-stream", "data.bin"),
            Strategy::Unsupported
        );
        assert_eq!(classify("", ""), Strategy::Unsupported);
    }

    #[test]
    fn test_media_type_for_extension_remote_set() {
        assert_eq!(media_type_for_extension("scan.pdf"), "application/pdf");
        assert_eq!(media_type_for_extension("photo.JPG"), "image/jpeg");
        assert_eq!(media_type_for_extension("clip.mov"), "video/mov");
        assert_eq!(media_type_for_extension("song.m4a"), "audio/x-m4a");
    }

    #[test]
    fn test_media_type_for_extension_office_and_text() {
        assert_eq!(media_type_for_extension("a/b/report.docx"), DOCX_MEDIA_TYPE);
        assert_eq!(media_type_for_extension("notes.txt"), "text/plain");
        assert_eq!(media_type_for_extension("inner.zip"), "application/zip");
    }

    #[test]
    fn test_media_type_for_extension_fallback() {
        assert_eq!(
            media_type_for_extension("mystery.xyzzy"),
            "application/octet-stream"
        );
        assert_eq!(
            media_type_for_extension("noextension"),
            "application/octet-stream"
        );
    }

    #[test]
    fn test_inferred_types_round_trip_through_classifier() {
        // An entry pulled from an archive must classify the same way the
        // original upload would have.
        let cases = [
            ("photo.png", Strategy::RemoteMultimodal),
            ("deck.pptx", Strategy::PresentationPackage),
            ("inner.zip", Strategy::Archive),
            ("notes.md", Strategy::PlainOrHtmlText),
        ];
        for (name, expected) in cases {
            let inferred = media_type_for_extension(name);
            assert_eq!(classify(&inferred, name), expected, "entry {}", name);
        }
    }
}
