//! Settings read from the environment.

use anyhow::Context;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub project_id: String,
    pub docai_location: String,
    pub docai_processor_id: String,
    pub docai_endpoint: String,
    pub firestore_endpoint: String,
    pub firestore_database: String,
    pub collection_id: String,
    pub storage_endpoint: String,
    pub storage_credentials: Option<StorageCredentials>,
    pub storage_signing_region: String,
    pub bucket_location: String,
    pub access_token: Option<String>,
}

/// HMAC key pair used both by the S3-compatible object API and for URL signing.
#[derive(Clone, PartialEq)]
pub struct StorageCredentials {
    pub access_id: String,
    pub secret: String,
}

impl std::fmt::Debug for StorageCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageCredentials").field("access_id", &self.access_id).field("secret", &"***").finish()
    }
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from any key → value source. `from_env` uses the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        // empty values count as unset
        let lookup = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let var = |key: &str, default: &str| lookup(key).unwrap_or(default.to_string());

        let project_id = lookup("GCP_PROJECT_ID").context("GCP_PROJECT_ID is not set")?;
        let docai_processor_id = lookup("DOCAI_PROCESSOR_ID").context("DOCAI_PROCESSOR_ID is not set")?;
        let docai_location = var("DOCAI_LOCATION", "us");
        let docai_endpoint = var("DOCAI_ENDPOINT", &format!("https://{}-documentai.googleapis.com", docai_location));

        let storage_credentials = match (lookup("STORAGE_HMAC_ACCESS_ID"), lookup("STORAGE_HMAC_SECRET")) {
            (Some(access_id), Some(secret)) => Some(StorageCredentials { access_id, secret }),
            (None, None) => None,
            _ => anyhow::bail!("STORAGE_HMAC_ACCESS_ID and STORAGE_HMAC_SECRET must be set together"),
        };

        Ok(Settings {
            project_id,
            docai_location,
            docai_processor_id,
            docai_endpoint,
            firestore_endpoint: var("FIRESTORE_ENDPOINT", "https://firestore.googleapis.com"),
            firestore_database: var("FIRESTORE_DATABASE", "(default)"),
            collection_id: var("FIRESTORE_COLLECTION", common::metadata_record::DEFAULT_COLLECTION),
            storage_endpoint: var("STORAGE_ENDPOINT", "https://storage.googleapis.com"),
            storage_credentials,
            storage_signing_region: var("STORAGE_SIGNING_REGION", "auto"),
            bucket_location: var("BUCKET_LOCATION", "us-east1"),
            access_token: lookup("GOOGLE_OAUTH_ACCESS_TOKEN"),
        })
    }

    /// `projects/{project}/locations/{location}/processors/{processor}`
    pub fn processor_name(&self) -> String {
        format!(
            "projects/{}/locations/{}/processors/{}",
            self.project_id, self.docai_location, self.docai_processor_id
        )
    }

    /// `projects/{project}/databases/{database}`
    pub fn firestore_database_name(&self) -> String {
        format!("projects/{}/databases/{}", self.project_id, self.firestore_database)
    }

    pub fn storage_credentials(&self) -> anyhow::Result<&StorageCredentials> {
        self.storage_credentials
            .as_ref()
            .context("STORAGE_HMAC_ACCESS_ID / STORAGE_HMAC_SECRET are not set")
    }

    pub fn original_bucket(&self) -> String {
        format!("{}-original", self.project_id)
    }

    pub fn docai_bucket(&self) -> String {
        format!("{}-docai", self.project_id)
    }

    pub fn test_bucket(&self) -> String {
        format!("{}-test", self.project_id)
    }
}
