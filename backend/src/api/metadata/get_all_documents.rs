use common::metadata_record::{CREATION_TIME_FIELD, StoredRecord};

use crate::api::metadata::MetadataStoreClient;
use crate::gcp_utils::firestore_values::from_firestore_fields;

pub const DEFAULT_QUERY_LIMIT: u32 = 1;

impl MetadataStoreClient {
    /// Records whose `field_name` equals `filter_value`, oldest first, in the order the store returned them.
    ///
    /// Records without a `creation_time` never match: the store drops them from ordered queries.
    pub async fn get_all_documents(
        &self,
        collection: &str,
        field_name: &str,
        filter_value: &serde_json::Value,
        limit: Option<u32>,
    ) -> anyhow::Result<Vec<StoredRecord>> {
        let limit = limit.unwrap_or(DEFAULT_QUERY_LIMIT);
        let documents = self
            .run_equality_query(collection, field_name, filter_value, Some(CREATION_TIME_FIELD), limit)
            .await?;
        let mut records = Vec::with_capacity(documents.len());
        for document in documents {
            records.push(StoredRecord { id: document.id().to_string(), fields: from_firestore_fields(&document.fields)? });
        }
        Ok(records)
    }
}
