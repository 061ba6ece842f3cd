use anyhow::Context;
use futures::StreamExt;
use minio::s3::types::S3Api;
use tracing::info;

use crate::api::storage::ObjectStoreClient;

impl ObjectStoreClient {
    /// Full contents of `bucket_name/source_blob_name`. Fails if the object does not exist.
    pub async fn download_bytes(&self, bucket_name: &str, source_blob_name: &str) -> anyhow::Result<Vec<u8>> {
        info!("Downloading object: {}/{}", bucket_name, source_blob_name);
        let object = self
            .s3
            .get_object(bucket_name, source_blob_name.to_string())
            .send()
            .await
            .context("Failed to get object")?;
        let object_size = object.object_size as usize;
        let (mut stream, _size) = object.content.to_stream().await.context("Failed to get object stream")?;

        let mut data = Vec::with_capacity(object_size);
        while let Some(chunk) = stream.next().await {
            data.extend_from_slice(&chunk.context("Failed to read object stream")?);
        }
        if data.len() != object_size {
            anyhow::bail!("Object {}/{} is {} bytes, read {}", bucket_name, source_blob_name, object_size, data.len());
        }
        Ok(data)
    }
}
