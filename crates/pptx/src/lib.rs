//! Presentation-package (PPTX) slide text extraction.
//!
//! A PPTX file is itself a ZIP container; slide content lives in
//! `ppt/slides/slideN.xml` entries. Slides are extracted in numeric order
//! (slide10 after slide2, not lexicographic).

mod parser;

pub use parser::{extract_slides, BLANK_SLIDE_MARKER, NO_SLIDES_MARKER};
