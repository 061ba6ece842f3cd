use chrono::{DateTime, Duration, Utc};
use common::signed_url::{SIGNED_URL_EXPIRY_SECONDS, SignedUrl, SignedUrlMethod};

use crate::api::storage::ObjectStoreClient;
use crate::gcp_utils::sigv4::{PresignRequest, canonical_object_uri, presign_url};

impl ObjectStoreClient {
    /// GET URL for one object, valid for 15 minutes.
    pub fn create_signed_url_download(&self, blob_name: &str, bucket_name: &str) -> anyhow::Result<SignedUrl> {
        self.signed_url_at(SignedUrlMethod::Get, blob_name, bucket_name, None, Utc::now())
    }

    /// PUT URL for one object, valid for 15 minutes. The upload must send `content_type`.
    pub fn create_signed_url_upload(
        &self,
        blob_name: &str,
        bucket_name: &str,
        content_type: &str,
    ) -> anyhow::Result<SignedUrl> {
        self.signed_url_at(SignedUrlMethod::Put, blob_name, bucket_name, Some(content_type), Utc::now())
    }

    pub(crate) fn signed_url_at(
        &self,
        method: SignedUrlMethod,
        blob_name: &str,
        bucket_name: &str,
        content_type: Option<&str>,
        now: DateTime<Utc>,
    ) -> anyhow::Result<SignedUrl> {
        let canonical_uri = canonical_object_uri(bucket_name, blob_name);
        let request = PresignRequest {
            method: method.as_str(),
            scheme: &self.scheme,
            host: &self.host,
            canonical_uri: &canonical_uri,
            region: &self.signing_region,
            expires_in_seconds: SIGNED_URL_EXPIRY_SECONDS,
            content_type,
            timestamp: now,
        };
        let url = presign_url(&request, &self.credentials.access_id, &self.credentials.secret)?;
        tracing::debug!("Signed {} URL for {}/{}", method.as_str(), bucket_name, blob_name);
        Ok(SignedUrl {
            url,
            method,
            content_type: content_type.map(|s| s.to_string()),
            expires_at: now + Duration::seconds(SIGNED_URL_EXPIRY_SECONDS as i64),
        })
    }
}
