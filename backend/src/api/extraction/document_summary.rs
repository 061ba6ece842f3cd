//! Human-readable dump of an extraction result.

use common::document::Document;
use common::text_anchor::{TextAnchorError, form_fields, paragraphs};
use tracing::info;

/// Logs every extracted key/value pair, then every paragraph.
pub fn log_document_summary(document: &Document) -> Result<(), TextAnchorError> {
    for field in form_fields(document)? {
        info!("Extracted key value pair (page {}): {} {}", field.page_number, field.name.trim(), field.value.trim());
    }
    for paragraph_text in paragraphs(document)? {
        info!("Paragraph text:\n{}", paragraph_text);
    }
    Ok(())
}
