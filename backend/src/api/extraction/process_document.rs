//! Synchronous (online) processing of a single document.

use std::path::Path;

use anyhow::Context;
use base64::Engine;
use common::document::Document;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::extraction::ExtractionClient;
use crate::gcp_utils::http_utils::json_or_error;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProcessRequest<'a> {
    raw_document: RawDocument<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RawDocument<'a> {
    content: String,
    mime_type: &'a str,
}

#[derive(Debug, Deserialize)]
struct ProcessResponse {
    #[serde(default)]
    document: Document,
}

impl ExtractionClient {
    /// Sends the raw bytes to the processor and returns the extracted document.
    pub async fn process_document(&self, content: &[u8], mime_type: &str) -> anyhow::Result<Document> {
        info!("Processing document: {} bytes of {} with {}", content.len(), mime_type, self.processor_name);
        let request = ProcessRequest {
            raw_document: RawDocument {
                content: base64::engine::general_purpose::STANDARD.encode(content),
                mime_type,
            },
        };
        let token = self.token_source.token(&self.http).await?;
        let response = self
            .http
            .post(self.method_url("process"))
            .bearer_auth(token)
            .json(&request)
            .send()
            .await?;
        let response: ProcessResponse = json_or_error(response).await?;
        info!(
            "Document processed: {} characters, {} pages",
            response.document.text.chars().count(),
            response.document.pages.len()
        );
        Ok(response.document)
    }

    pub async fn process_file(&self, file_path: impl AsRef<Path>, mime_type: &str) -> anyhow::Result<Document> {
        let file_path = file_path.as_ref();
        let content = tokio::fs::read(file_path)
            .await
            .with_context(|| format!("Failed to read {}", file_path.display()))?;
        self.process_document(&content, mime_type).await
    }
}
