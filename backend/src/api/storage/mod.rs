//! Object storage client and module exports.
//!
//! Object bytes go through the S3-compatible XML API (`minio`), signed URLs are
//! presigned locally with the same HMAC key, and bucket provisioning uses the
//! Cloud Storage JSON API, the only one that sets a storage class.

mod create_bucket;
mod download;
mod signed_url;
mod upload;

pub use create_bucket::BucketInfo;

use anyhow::Context;
use minio::s3::{creds::StaticProvider, http::BaseUrl};

use crate::{
    config::{Settings, StorageCredentials},
    gcp_utils::auth::AccessTokenSource,
};

pub struct ObjectStoreClient {
    s3: minio::s3::Client,
    http: reqwest::Client,
    token_source: AccessTokenSource,
    credentials: StorageCredentials,
    endpoint: String,
    scheme: String,
    host: String,
    project_id: String,
    bucket_location: String,
    signing_region: String,
}

impl ObjectStoreClient {
    pub fn new(settings: &Settings) -> anyhow::Result<Self> {
        Self::with_token_source(settings, AccessTokenSource::from_settings(settings))
    }

    pub fn with_token_source(settings: &Settings, token_source: AccessTokenSource) -> anyhow::Result<Self> {
        let credentials = settings.storage_credentials()?.clone();
        let endpoint = settings.storage_endpoint.trim_end_matches('/').to_string();

        let url = reqwest::Url::parse(&endpoint).context("Failed to parse storage endpoint")?;
        let host = url.host_str().context("Storage endpoint has no host")?;
        let host = match url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };

        let base_url = endpoint.parse::<BaseUrl>().context("Failed to parse s3 endpoint")?;
        let static_provider = StaticProvider::new(&credentials.access_id, &credentials.secret, None);
        let s3 = minio::s3::Client::new(base_url, Some(Box::new(static_provider)), None, None)
            .context("Failed to create s3 client")?;

        Ok(Self {
            s3,
            http: reqwest::Client::new(),
            token_source,
            credentials,
            scheme: url.scheme().to_string(),
            host,
            endpoint,
            project_id: settings.project_id.clone(),
            bucket_location: settings.bucket_location.clone(),
            signing_region: settings.storage_signing_region.clone(),
        })
    }
}
