use std::path::Path;

use anyhow::Context;
use minio::s3::types::S3Api;
use tracing::info;

use crate::api::storage::ObjectStoreClient;

impl ObjectStoreClient {
    /// Writes `content` to `bucket_name/destination_blob_name`, replacing any existing object.
    pub async fn upload_bytes(
        &self,
        bucket_name: &str,
        content: impl Into<bytes::Bytes>,
        destination_blob_name: &str,
        content_type: &str,
    ) -> anyhow::Result<()> {
        let content: bytes::Bytes = content.into();
        let size = content.len();
        self.s3
            .put_object_content(bucket_name, destination_blob_name.to_string(), content)
            .content_type(content_type.to_string())
            .send()
            .await
            .context("Failed to put object")?;
        info!("Uploaded {} bytes to {}/{}", size, bucket_name, destination_blob_name);
        Ok(())
    }

    pub async fn upload_file(
        &self,
        bucket_name: &str,
        source_file_name: impl AsRef<Path>,
        destination_blob_name: &str,
        content_type: &str,
    ) -> anyhow::Result<()> {
        let source_file_name = source_file_name.as_ref();
        let content = tokio::fs::read(source_file_name)
            .await
            .with_context(|| format!("Failed to read {}", source_file_name.display()))?;
        self.upload_bytes(bucket_name, content, destination_blob_name, content_type).await?;
        info!("File {} uploaded to {}", source_file_name.display(), destination_blob_name);
        Ok(())
    }
}
