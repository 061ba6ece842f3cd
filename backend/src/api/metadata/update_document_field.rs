use serde_json::json;
use tracing::info;

use crate::api::metadata::MetadataStoreClient;
use crate::gcp_utils::{
    firestore_values::{quote_field_path, to_firestore_value},
    http_utils::json_or_error,
};

impl MetadataStoreClient {
    /// Overwrites one field of the record for `blob_name`.
    /// Returns `false`, without writing, when no record matches.
    pub async fn update_document_field(
        &self,
        collection: &str,
        blob_name: &str,
        field_name: &str,
        value: &serde_json::Value,
    ) -> anyhow::Result<bool> {
        let Some(record) = self.find_document(collection, blob_name).await? else {
            return Ok(false);
        };

        let token = self.token_source.token(&self.http).await?;
        let response = self
            .http
            .patch(format!("{}/{}/{}", self.documents_url(), collection, record.id))
            .query(&[
                ("updateMask.fieldPaths", quote_field_path(field_name).as_str()),
                ("currentDocument.exists", "true"),
            ])
            .bearer_auth(token)
            .json(&json!({ "fields": { field_name: to_firestore_value(value) } }))
            .send()
            .await?;
        let _: serde_json::Value = json_or_error(response).await?;
        info!("Updated {} of {} ({})", field_name, blob_name, record.id);
        Ok(true)
    }
}
