use common::metadata_record::{BLOB_NAME_FIELD, CREATION_TIME_FIELD};
use common::operation::OperationHandle;
use serde_json::json;
use tracing::info;

use crate::api::metadata::MetadataStoreClient;
use crate::gcp_utils::http_utils::json_or_error;

/// The composite index the ordered `blob_name` query needs.
pub const DEFAULT_INDEX_FIELDS: [&str; 2] = [BLOB_NAME_FIELD, CREATION_TIME_FIELD];

impl MetadataStoreClient {
    /// Requests an ascending composite index over `field_paths` on `collection`.
    pub async fn create_index(&self, collection: &str, field_paths: &[&str]) -> anyhow::Result<OperationHandle> {
        if field_paths.len() < 2 {
            anyhow::bail!("A composite index needs at least two fields, got {}", field_paths.len());
        }
        let fields = field_paths
            .iter()
            .map(|field_path| json!({ "fieldPath": field_path, "order": "ASCENDING" }))
            .collect::<Vec<_>>();
        let url = format!("{}/v1/{}/collectionGroups/{}/indexes", self.endpoint, self.database_name, collection);

        let token = self.token_source.token(&self.http).await?;
        let response = self
            .http
            .post(url)
            .bearer_auth(token)
            .json(&json!({ "queryScope": "COLLECTION", "fields": fields }))
            .send()
            .await?;
        let operation: OperationHandle = json_or_error(response).await?;
        info!("Index creation started on {}: {}", collection, operation.name);
        Ok(operation)
    }
}
