//! Plain, rich, and HTML text extraction.
//!
//! Raw text is returned unmodified. When the declared type is HTML the
//! markup is parsed and only the text content survives, with script and
//! style bodies suppressed.

use omnitext_core::Result;
use quick_xml::events::Event;
use quick_xml::Reader;

/// Extract text from a plain/HTML payload.
///
/// The declared media type decides the treatment; file contents are not
/// sniffed.
pub fn extract_text(bytes: &[u8], media_type: &str) -> Result<String> {
    let raw = String::from_utf8_lossy(bytes).into_owned();

    if media_type == "text/html" {
        Ok(strip_html(&raw))
    } else {
        Ok(raw)
    }
}

/// Strip markup from an HTML document, keeping only text content.
///
/// HTML in the wild is rarely well-formed XML, so parse errors are tolerated
/// and the walk continues past them.
fn strip_html(html: &str) -> String {
    let mut reader = Reader::from_str(html);
    reader.trim_text(true);
    reader.check_end_names(false);

    let mut output = String::new();
    let mut suppress_depth = 0usize;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                if is_suppressed_element(e.name().as_ref()) {
                    suppress_depth += 1;
                }
            }
            Ok(Event::End(ref e)) => {
                if is_suppressed_element(e.name().as_ref()) {
                    suppress_depth = suppress_depth.saturating_sub(1);
                }
            }
            Ok(Event::Text(ref e)) if suppress_depth == 0 => {
                let text = e.unescape().unwrap_or_else(|_| {
                    String::from_utf8_lossy(e.as_ref()).into_owned().into()
                });
                let text = text.trim();
                if !text.is_empty() {
                    if !output.is_empty() {
                        output.push('\n');
                    }
                    output.push_str(text);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                log::warn!("HTML parsing error (continuing): {}", e);
            }
            _ => {}
        }
    }

    output
}

fn is_suppressed_element(name: &[u8]) -> bool {
    name.eq_ignore_ascii_case(b"script") || name.eq_ignore_ascii_case(b"style")
}
