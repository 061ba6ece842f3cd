//! Document AI extraction client and module exports.

mod process_document;
mod batch_process_documents;
mod document_summary;

pub use batch_process_documents::batch_destination_uri;
pub use document_summary::log_document_summary;

use crate::{config::Settings, gcp_utils::auth::AccessTokenSource};

pub const DEFAULT_MIME_TYPE: &str = "application/pdf";

/// Talks to one processor, fixed when the client is built.
#[derive(Debug, Clone)]
pub struct ExtractionClient {
    http: reqwest::Client,
    token_source: AccessTokenSource,
    endpoint: String,
    processor_name: String,
}

impl ExtractionClient {
    pub fn new(settings: &Settings) -> Self {
        Self::with_token_source(settings, AccessTokenSource::from_settings(settings))
    }

    pub fn with_token_source(settings: &Settings, token_source: AccessTokenSource) -> Self {
        Self {
            http: reqwest::Client::new(),
            token_source,
            endpoint: settings.docai_endpoint.trim_end_matches('/').to_string(),
            processor_name: settings.processor_name(),
        }
    }

    pub fn processor_name(&self) -> &str {
        &self.processor_name
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/v1/{}:{}", self.endpoint, self.processor_name, method)
    }
}
