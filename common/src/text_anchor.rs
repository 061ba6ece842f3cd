//! Reassembly of element text from text anchors.
//!
//! Document AI never repeats text inside an element: forms fields, paragraphs
//! and lines only carry offsets into [`Document::text`]. Text that wraps across
//! lines in the source layout is split into several segments.
//!
//! Segments are expected in reading order and non-overlapping. That is not
//! checked: they are concatenated exactly as listed.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::document::{Document, Layout, TextSegment};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TextAnchorError {
    #[error("text segment [{start}, {end}) is out of range for a text of {text_len} characters")]
    OutOfRange { start: u64, end: u64, text_len: usize },
    #[error("text segment [{start}, {end}) ends before it starts")]
    Inverted { start: u64, end: u64 },
}

/// Text of a layout element, resolved against the document it came from.
pub fn get_text(layout: &Layout, document: &Document) -> Result<String, TextAnchorError> {
    text_for_segments(&layout.text_anchor.text_segments, &document.text)
}

/// Concatenates `text[start..end]` for each segment, in the order given.
/// Offsets count characters, not bytes.
pub fn text_for_segments(segments: &[TextSegment], text: &str) -> Result<String, TextAnchorError> {
    if segments.is_empty() {
        return Ok(String::new());
    }

    // byte offset of every char boundary, plus the end of the string
    let boundaries: Option<Vec<usize>> = if text.is_ascii() {
        None
    } else {
        Some(text.char_indices().map(|(i, _)| i).chain(std::iter::once(text.len())).collect())
    };
    let text_len = boundaries.as_ref().map(|b| b.len() - 1).unwrap_or(text.len());

    let mut response = String::new();
    for segment in segments {
        let (start, end) = (segment.start_index, segment.end_index);
        if end < start {
            return Err(TextAnchorError::Inverted { start, end });
        }
        if end > text_len as u64 {
            return Err(TextAnchorError::OutOfRange { start, end, text_len });
        }
        let (start, end) = (start as usize, end as usize);
        let slice = match &boundaries {
            Some(b) => &text[b[start]..b[end]],
            None => &text[start..end],
        };
        response.push_str(slice);
    }
    Ok(response)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormFieldText {
    pub page_number: u32,
    pub name: String,
    pub value: String,
    pub confidence: f32,
}

/// Every key/value pair of every page, in page order.
pub fn form_fields(document: &Document) -> Result<Vec<FormFieldText>, TextAnchorError> {
    let mut result = Vec::new();
    for page in &document.pages {
        for form_field in &page.form_fields {
            result.push(FormFieldText {
                page_number: page.page_number,
                name: get_text(&form_field.field_name, document)?,
                value: get_text(&form_field.field_value, document)?,
                confidence: form_field.field_value.confidence,
            });
        }
    }
    Ok(result)
}

/// Every paragraph text of every page, in page order.
pub fn paragraphs(document: &Document) -> Result<Vec<String>, TextAnchorError> {
    document
        .pages
        .iter()
        .flat_map(|page| page.paragraphs.iter())
        .map(|paragraph| get_text(&paragraph.layout, document))
        .collect()
}
