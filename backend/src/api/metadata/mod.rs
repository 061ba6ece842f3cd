//! Firestore metadata store client and module exports.
//!
//! Records are looked up by an equality filter on `blob_name` with `limit 1`.
//! Nothing keeps `blob_name` unique; with duplicates, whichever record the
//! store returns first is used.

mod create_document;
mod create_index;
mod get_all_documents;
mod get_document;
mod run_query;
mod update_document_field;

pub use create_index::DEFAULT_INDEX_FIELDS;

use serde::Deserialize;

use crate::{config::Settings, gcp_utils::auth::AccessTokenSource};

#[derive(Debug, Clone)]
pub struct MetadataStoreClient {
    http: reqwest::Client,
    token_source: AccessTokenSource,
    endpoint: String,
    database_name: String,
}

/// A document as the REST API returns it; `fields` holds typed values.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FirestoreDocument {
    name: String,
    #[serde(default = "empty_fields")]
    fields: serde_json::Value,
}

fn empty_fields() -> serde_json::Value {
    serde_json::Value::Object(Default::default())
}

impl FirestoreDocument {
    fn id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or("")
    }
}

impl MetadataStoreClient {
    pub fn new(settings: &Settings) -> Self {
        Self::with_token_source(settings, AccessTokenSource::from_settings(settings))
    }

    pub fn with_token_source(settings: &Settings, token_source: AccessTokenSource) -> Self {
        Self {
            http: reqwest::Client::new(),
            token_source,
            endpoint: settings.firestore_endpoint.trim_end_matches('/').to_string(),
            database_name: settings.firestore_database_name(),
        }
    }

    /// `{endpoint}/v1/projects/{project}/databases/{database}/documents`
    fn documents_url(&self) -> String {
        format!("{}/v1/{}/documents", self.endpoint, self.database_name)
    }
}
