//! PPTX slide enumeration and text-run extraction.

use omnitext_core::{Error, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;
use std::io::{Cursor, Read};
use std::sync::LazyLock;
use zip::ZipArchive;

/// Marker emitted for a slide with no non-whitespace text.
pub const BLANK_SLIDE_MARKER: &str = "(Trang trống)";

/// Marker returned when the package contains no slide entries at all.
pub const NO_SLIDES_MARKER: &str = "(no text content found in slides)";

/// Matches slide XML entries and captures the numeric slide index.
static SLIDE_PATH_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ppt/slides/slide(\d+)\.xml$").unwrap());

/// Extract combined slide text from a PPTX payload.
///
/// Slides are ordered by the numeric index embedded in their entry path.
/// A slide yielding no non-whitespace text contributes
/// [`BLANK_SLIDE_MARKER`] instead of an empty string.
pub fn extract_slides(bytes: &[u8]) -> Result<String> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| Error::LocalDecode(format!("PPTX read error: {}", e)))?;

    // Collect (index, path) pairs, then sort numerically.
    let mut slides: Vec<(usize, String)> = Vec::new();
    for name in archive.file_names() {
        if let Some(index) = slide_index(name) {
            slides.push((index, name.to_string()));
        }
    }
    slides.sort_by_key(|(index, _)| *index);

    if slides.is_empty() {
        return Ok(NO_SLIDES_MARKER.to_string());
    }

    let mut outputs = Vec::with_capacity(slides.len());
    for (index, path) in &slides {
        let content = read_entry(&mut archive, path)?;
        let text = extract_text_runs(&content)?;
        if text.trim().is_empty() {
            log::debug!("slide {} has no text, emitting blank marker", index);
            outputs.push(BLANK_SLIDE_MARKER.to_string());
        } else {
            outputs.push(text);
        }
    }

    Ok(outputs.join("\n"))
}

/// Extract the numeric slide index from an archive entry path.
fn slide_index(path: &str) -> Option<usize> {
    SLIDE_PATH_REGEX
        .captures(path)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Concatenate the text content of every text-run element, space-joined.
fn extract_text_runs(xml: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut runs: Vec<String> = Vec::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                if local_name(e.name().as_ref()) == b"t" {
                    in_text_run = true;
                }
            }
            Ok(Event::Text(ref e)) if in_text_run => {
                let text = e.unescape().unwrap_or_default();
                if !text.is_empty() {
                    runs.push(text.into_owned());
                }
            }
            Ok(Event::End(ref e)) => {
                if local_name(e.name().as_ref()) == b"t" {
                    in_text_run = false;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                log::warn!("XML parsing error in slide (continuing): {}", e);
            }
            _ => {}
        }
    }

    Ok(runs.join(" "))
}

/// Read a file from the ZIP archive.
fn read_entry<R: Read + std::io::Seek>(archive: &mut ZipArchive<R>, path: &str) -> Result<String> {
    let mut file = archive
        .by_name(path)
        .map_err(|e| Error::LocalDecode(format!("PPTX read error: '{}': {}", path, e)))?;

    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(|e| Error::LocalDecode(format!("PPTX read error: '{}': {}", path, e)))?;

    Ok(content)
}

/// Extract the local name from a potentially namespaced XML element name.
fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}
