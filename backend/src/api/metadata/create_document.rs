use common::metadata_record::{CREATION_TIME_FIELD, MetadataRecord, StoredRecord};
use serde_json::{Map, Value};
use tracing::info;

use crate::api::metadata::{FirestoreDocument, MetadataStoreClient};
use crate::gcp_utils::{
    firestore_values::{from_firestore_fields, timestamp_value, to_firestore_fields},
    http_utils::json_or_error,
};

/// Typed fields for a new record, stamped with `creation_time` unless the caller set one.
pub(super) fn new_document_fields(record: &MetadataRecord, now: chrono::DateTime<chrono::Utc>) -> Map<String, Value> {
    let mut fields = to_firestore_fields(record.iter());
    if !fields.contains_key(CREATION_TIME_FIELD) {
        fields.insert(CREATION_TIME_FIELD.to_string(), timestamp_value(now));
    }
    fields
}

impl MetadataStoreClient {
    /// Adds a record to `collection` under a generated identifier.
    pub async fn create_document(&self, collection: &str, record: &MetadataRecord) -> anyhow::Result<StoredRecord> {
        let fields = new_document_fields(record, chrono::Utc::now());
        let token = self.token_source.token(&self.http).await?;
        let response = self
            .http
            .post(format!("{}/{}", self.documents_url(), collection))
            .bearer_auth(token)
            .json(&serde_json::json!({ "fields": fields }))
            .send()
            .await?;
        let document: FirestoreDocument = json_or_error(response).await?;
        info!("Created document {} in {}", document.id(), collection);
        Ok(StoredRecord { id: document.id().to_string(), fields: from_firestore_fields(&document.fields)? })
    }
}
