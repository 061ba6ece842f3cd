//! Asynchronous (batch) processing of bucket-resident documents.

use common::operation::OperationHandle;
use serde::Serialize;
use tracing::info;

use crate::api::extraction::ExtractionClient;
use crate::gcp_utils::http_utils::json_or_error;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchProcessRequest {
    input_documents: BatchInputConfig,
    document_output_config: DocumentOutputConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchInputConfig {
    gcs_documents: GcsDocuments,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GcsDocuments {
    documents: Vec<GcsDocument>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GcsDocument {
    gcs_uri: String,
    mime_type: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DocumentOutputConfig {
    gcs_output_config: GcsOutputConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GcsOutputConfig {
    gcs_uri: String,
}

/// Results land under `{output_uri}/{output_prefix}/`.
pub fn batch_destination_uri(gcs_output_uri: &str, gcs_output_uri_prefix: &str) -> String {
    format!("{}/{}/", gcs_output_uri, gcs_output_uri_prefix)
}

impl ExtractionClient {
    /// Submits a batch job and returns as soon as the service accepts it.
    pub async fn batch_process_documents(
        &self,
        gcs_input_uri: &str,
        gcs_output_uri: &str,
        gcs_output_uri_prefix: &str,
        mime_type: &str,
    ) -> anyhow::Result<OperationHandle> {
        let destination_uri = batch_destination_uri(gcs_output_uri, gcs_output_uri_prefix);
        info!("Submitting batch processing: {} -> {}", gcs_input_uri, destination_uri);
        let request = BatchProcessRequest {
            input_documents: BatchInputConfig {
                gcs_documents: GcsDocuments {
                    documents: vec![GcsDocument { gcs_uri: gcs_input_uri.to_string(), mime_type: mime_type.to_string() }],
                },
            },
            document_output_config: DocumentOutputConfig {
                gcs_output_config: GcsOutputConfig { gcs_uri: destination_uri },
            },
        };
        let token = self.token_source.token(&self.http).await?;
        let response = self
            .http
            .post(self.method_url("batchProcess"))
            .bearer_auth(token)
            .json(&request)
            .send()
            .await?;
        let operation: OperationHandle = json_or_error(response).await?;
        info!("Batch operation started: {}", operation.name);
        Ok(operation)
    }
}
