//! OAuth access tokens for the Google REST APIs.

use anyhow::Context;
use serde::Deserialize;

const METADATA_TOKEN_URL: &str =
    "http://metadata.google.internal/computeMetadata/v1/instance/service-accounts/default/token";

#[derive(Debug, Clone)]
pub enum AccessTokenSource {
    /// A token obtained out of band, e.g. `gcloud auth print-access-token`.
    Static(String),
    /// The default service account of the VM or notebook instance.
    MetadataServer { url: String },
}

#[derive(Debug, Deserialize)]
struct MetadataTokenResponse {
    access_token: String,
}

impl AccessTokenSource {
    pub fn from_settings(settings: &crate::config::Settings) -> Self {
        match &settings.access_token {
            Some(token) => AccessTokenSource::Static(token.clone()),
            None => AccessTokenSource::MetadataServer { url: METADATA_TOKEN_URL.to_string() },
        }
    }

    pub async fn token(&self, http: &reqwest::Client) -> anyhow::Result<String> {
        match self {
            AccessTokenSource::Static(token) => Ok(token.clone()),
            AccessTokenSource::MetadataServer { url } => {
                tracing::debug!("Fetching access token from metadata server");
                let response = http
                    .get(url)
                    .header("Metadata-Flavor", "Google")
                    .send()
                    .await
                    .context("Failed to reach metadata server")?;
                let response: MetadataTokenResponse = super::http_utils::json_or_error(response).await?;
                Ok(response.access_token)
            }
        }
    }
}
