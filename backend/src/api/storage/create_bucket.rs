use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::api::storage::ObjectStoreClient;
use crate::gcp_utils::http_utils::json_or_error;

const STORAGE_CLASS: &str = "STANDARD";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketInfo {
    pub name: String,
    pub location: String,
    pub storage_class: String,
}

impl ObjectStoreClient {
    /// New bucket with the standard storage class in the configured location.
    pub async fn create_bucket(&self, bucket_name: &str) -> anyhow::Result<BucketInfo> {
        let token = self.token_source.token(&self.http).await?;
        let response = self
            .http
            .post(format!("{}/storage/v1/b", self.endpoint))
            .query(&[("project", self.project_id.as_str())])
            .bearer_auth(token)
            .json(&json!({
                "name": bucket_name,
                "location": self.bucket_location,
                "storageClass": STORAGE_CLASS,
            }))
            .send()
            .await?;
        let bucket: BucketInfo = json_or_error(response).await?;
        info!("Created bucket {} in {} with storage class {}", bucket.name, bucket.location, bucket.storage_class);
        Ok(bucket)
    }
}
