use common::metadata_record::{BLOB_NAME_FIELD, MetadataRecord, StoredRecord};

use crate::api::metadata::MetadataStoreClient;
use crate::gcp_utils::firestore_values::from_firestore_fields;

impl MetadataStoreClient {
    /// The record for `blob_name`, with its identifier. `None` if there is none.
    pub async fn find_document(&self, collection: &str, blob_name: &str) -> anyhow::Result<Option<StoredRecord>> {
        let documents = self
            .run_equality_query(collection, BLOB_NAME_FIELD, &serde_json::Value::from(blob_name), None, 1)
            .await?;
        let Some(document) = documents.into_iter().next() else {
            tracing::debug!("No document with {} = {} in {}", BLOB_NAME_FIELD, blob_name, collection);
            return Ok(None);
        };
        Ok(Some(StoredRecord { id: document.id().to_string(), fields: from_firestore_fields(&document.fields)? }))
    }

    pub async fn get_document(&self, collection: &str, blob_name: &str) -> anyhow::Result<Option<MetadataRecord>> {
        Ok(self.find_document(collection, blob_name).await?.map(|record| record.fields))
    }

    /// One field of the record for `blob_name`. `None` if there is no record or it lacks the field.
    pub async fn get_field_from_document(
        &self,
        collection: &str,
        blob_name: &str,
        field_name: &str,
    ) -> anyhow::Result<Option<serde_json::Value>> {
        let record = self.get_document(collection, blob_name).await?;
        Ok(record.and_then(|mut fields| fields.remove(field_name)))
    }
}
