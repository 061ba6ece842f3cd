//! Document AI document model, as decoded from the service's JSON responses.
//!
//! The service speaks proto3 JSON: absent fields mean their default value and
//! 64-bit integers are usually sent as strings. Every struct here is
//! `#[serde(default)]` so a sparse response still decodes.

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Document {
    pub mime_type: String,
    pub text: String,
    pub pages: Vec<Page>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Page {
    pub page_number: u32,
    pub paragraphs: Vec<Paragraph>,
    pub form_fields: Vec<FormField>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Paragraph {
    pub layout: Layout,
}

/// A detected key/value pair. Both sides point into the document text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct FormField {
    pub field_name: Layout,
    pub field_value: Layout,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Layout {
    pub text_anchor: TextAnchor,
    pub confidence: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct TextAnchor {
    pub text_segments: Vec<TextSegment>,
}

/// Half-open `[start_index, end_index)` range of characters in [`Document::text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct TextSegment {
    #[serde(deserialize_with = "de_int64")]
    pub start_index: u64,
    #[serde(deserialize_with = "de_int64")]
    pub end_index: u64,
}

impl TextSegment {
    pub fn new(start_index: u64, end_index: u64) -> Self {
        Self { start_index, end_index }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Int64Repr {
    Number(u64),
    String(String),
}

fn de_int64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    match Int64Repr::deserialize(deserializer)? {
        Int64Repr::Number(n) => Ok(n),
        Int64Repr::String(s) => s.parse::<u64>().map_err(serde::de::Error::custom),
    }
}
