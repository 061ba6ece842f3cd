//! Document AI client against a mock processor endpoint.

use std::collections::HashMap;

use backend::{AccessTokenSource, DEFAULT_MIME_TYPE, ExtractionClient, config::Settings};
use base64::Engine;
use common::{
    object_key::{gcs_uri, original_object_key},
    text_anchor::{form_fields, get_text},
};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{bearer_token, body_partial_json, method, path},
};

const PROCESS_PATH: &str = "/v1/projects/demo/locations/us/processors/proc-1:process";
const BATCH_PATH: &str = "/v1/projects/demo/locations/us/processors/proc-1:batchProcess";

fn client(server: &MockServer) -> ExtractionClient {
    let vars: HashMap<&str, String> = HashMap::from([
        ("GCP_PROJECT_ID", "demo".to_string()),
        ("DOCAI_PROCESSOR_ID", "proc-1".to_string()),
        ("DOCAI_ENDPOINT", server.uri()),
    ]);
    let settings = Settings::from_lookup(|key| vars.get(key).cloned()).unwrap();
    ExtractionClient::with_token_source(&settings, AccessTokenSource::Static("test-token".to_string()))
}

fn invoice_response() -> serde_json::Value {
    json!({
        "document": {
            "mimeType": "application/pdf",
            "text": "Invoice #1234 Total: $50",
            "pages": [{
                "pageNumber": 1,
                "formFields": [{
                    "fieldName": {"textAnchor": {"textSegments": [{"startIndex": "14", "endIndex": "20"}]}},
                    "fieldValue": {"textAnchor": {"textSegments": [{"startIndex": "21", "endIndex": "24"}]}, "confidence": 0.97}
                }],
                "paragraphs": [{"layout": {"textAnchor": {"textSegments": [{"endIndex": "13"}]}}}]
            }]
        },
        "humanReviewStatus": {"state": "SKIPPED"}
    })
}

#[tokio::test]
async fn process_document_sends_base64_content() {
    let server = MockServer::start().await;
    let content = b"%PDF-1.4 fake".to_vec();
    let encoded = base64::engine::general_purpose::STANDARD.encode(&content);

    Mock::given(method("POST"))
        .and(path(PROCESS_PATH))
        .and(bearer_token("test-token"))
        .and(body_partial_json(json!({"rawDocument": {"content": encoded, "mimeType": "application/pdf"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(invoice_response()))
        .expect(1)
        .mount(&server)
        .await;

    let document = client(&server).process_document(&content, DEFAULT_MIME_TYPE).await.unwrap();
    assert_eq!(document.text, "Invoice #1234 Total: $50");

    let fields = form_fields(&document).unwrap();
    assert_eq!(fields[0].name, "Total:");
    assert_eq!(fields[0].value, "$50");
    assert_eq!(get_text(&document.pages[0].paragraphs[0].layout, &document).unwrap(), "Invoice #1234");
    backend::log_document_summary(&document).unwrap();
}

#[tokio::test]
async fn process_file_reads_from_disk() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(PROCESS_PATH))
        .and(body_partial_json(json!({"rawDocument": {"mimeType": "image/tiff"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(invoice_response()))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file_path = dir.path().join("scan.tiff");
    std::fs::write(&file_path, b"II*\0").unwrap();

    let document = client(&server).process_file(&file_path, "image/tiff").await.unwrap();
    assert_eq!(document.pages.len(), 1);

    let missing = client(&server).process_file(dir.path().join("missing.pdf"), "application/pdf").await;
    assert!(missing.unwrap_err().to_string().contains("missing.pdf"));
}

#[tokio::test]
async fn service_errors_surface_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(PROCESS_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {"code": 400, "message": "Unsupported input file format.", "status": "INVALID_ARGUMENT"}
        })))
        .mount(&server)
        .await;

    let err = client(&server).process_document(b"hello", "text/plain").await.unwrap_err().to_string();
    assert!(err.contains("400"), "{err}");
    assert!(err.contains("Unsupported input file format."), "{err}");
}

#[tokio::test]
async fn batch_process_returns_operation_handle() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(BATCH_PATH))
        .and(body_partial_json(json!({
            "inputDocuments": {"gcsDocuments": {"documents": [
                {"gcsUri": "gs://demo-original/original/a.pdf", "mimeType": "application/pdf"}
            ]}},
            "documentOutputConfig": {"gcsOutputConfig": {"gcsUri": "gs://demo-docai/a.pdf/"}}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "projects/42/locations/us/operations/987"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let input_uri = gcs_uri("demo-original", &original_object_key("a.pdf"));
    let operation = client(&server)
        .batch_process_documents(&input_uri, "gs://demo-docai", "a.pdf", DEFAULT_MIME_TYPE)
        .await
        .unwrap();
    assert_eq!(operation.id(), "987");
    assert!(!operation.done);
}
