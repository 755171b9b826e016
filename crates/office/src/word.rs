//! Word-processing package (DOCX) text extraction.
//!
//! A DOCX file is an OOXML ZIP container; the document body lives in
//! `word/document.xml`. Text is returned verbatim: runs are concatenated,
//! paragraphs become newlines, tabs and breaks are preserved.

use omnitext_core::{Error, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};
use zip::ZipArchive;

const DOCUMENT_PATH: &str = "word/document.xml";

/// Extract raw text from a DOCX payload.
pub fn extract_word(bytes: &[u8]) -> Result<String> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| Error::LocalDecode(format!("failed to open DOCX package: {}", e)))?;

    let mut document = String::new();
    archive
        .by_name(DOCUMENT_PATH)
        .map_err(|e| Error::LocalDecode(format!("missing {}: {}", DOCUMENT_PATH, e)))?
        .read_to_string(&mut document)
        .map_err(|e| Error::LocalDecode(format!("failed to read {}: {}", DOCUMENT_PATH, e)))?;

    extract_body_text(&document)
}

/// Walk the WordprocessingML body and collect text runs.
fn extract_body_text(xml: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(false);

    let mut output = String::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match local_name(e.name().as_ref()) {
                b"t" => in_text_run = true,
                b"tab" => output.push('\t'),
                b"br" => output.push('\n'),
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match local_name(e.name().as_ref()) {
                b"tab" => output.push('\t'),
                b"br" => output.push('\n'),
                _ => {}
            },
            Ok(Event::Text(ref e)) if in_text_run => {
                output.push_str(&e.unescape().unwrap_or_default());
            }
            Ok(Event::End(ref e)) => match local_name(e.name().as_ref()) {
                b"t" => in_text_run = false,
                b"p" => output.push('\n'),
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::LocalDecode(format!(
                    "error parsing {}: {}",
                    DOCUMENT_PATH, e
                )));
            }
            _ => {}
        }
    }

    Ok(output)
}

/// Extract the local name from a potentially namespaced XML element name.
fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}
