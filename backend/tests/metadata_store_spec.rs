//! Firestore metadata client against a mock REST endpoint.

use std::collections::HashMap;

use backend::{AccessTokenSource, MetadataStoreClient, api::metadata::DEFAULT_INDEX_FIELDS, config::Settings};
use common::metadata_record::MetadataRecord;
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, method, path, query_param},
};

const DOCUMENTS: &str = "/v1/projects/demo/databases/(default)/documents";

fn client(server: &MockServer) -> MetadataStoreClient {
    let vars: HashMap<&str, String> = HashMap::from([
        ("GCP_PROJECT_ID", "demo".to_string()),
        ("DOCAI_PROCESSOR_ID", "proc-1".to_string()),
        ("FIRESTORE_ENDPOINT", server.uri()),
    ]);
    let settings = Settings::from_lookup(|key| vars.get(key).cloned()).unwrap();
    MetadataStoreClient::with_token_source(&settings, AccessTokenSource::Static("test-token".to_string()))
}

fn stored(id: &str, status: &str) -> serde_json::Value {
    json!({
        "name": format!("projects/demo/databases/(default)/documents/documents/{id}"),
        "fields": {
            "blob_name": {"stringValue": "a.pdf"},
            "status": {"stringValue": status},
            "creation_time": {"timestampValue": "2024-03-01T00:00:00Z"}
        },
        "createTime": "2024-03-01T00:00:00Z",
        "updateTime": "2024-03-01T00:00:00Z"
    })
}

fn query_result(documents: &[serde_json::Value]) -> serde_json::Value {
    if documents.is_empty() {
        return json!([{"readTime": "2024-03-01T00:00:00Z"}]);
    }
    json!(documents.iter().map(|d| json!({"document": d, "readTime": "2024-03-01T00:00:00Z"})).collect::<Vec<_>>())
}

fn record(pairs: &[(&str, serde_json::Value)]) -> MetadataRecord {
    pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
}

#[tokio::test]
async fn create_then_update_then_read_back() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("{DOCUMENTS}/documents")))
        .and(body_partial_json(json!({"fields": {
            "blob_name": {"stringValue": "a.pdf"},
            "status": {"stringValue": "new"}
        }})))
        .respond_with(ResponseTemplate::new(200).set_body_json(stored("doc1", "new")))
        .expect(1)
        .mount(&server)
        .await;

    let blob_filter = json!({"structuredQuery": {
        "from": [{"collectionId": "documents"}],
        "where": {"fieldFilter": {"field": {"fieldPath": "blob_name"}, "op": "EQUAL", "value": {"stringValue": "a.pdf"}}},
        "limit": 1
    }});
    // first two lookups see the record before the write, the last one after
    Mock::given(method("POST"))
        .and(path(format!("{DOCUMENTS}:runQuery")))
        .and(body_partial_json(blob_filter.clone()))
        .respond_with(ResponseTemplate::new(200).set_body_json(query_result(&[stored("doc1", "new")])))
        .up_to_n_times(2)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("{DOCUMENTS}:runQuery")))
        .and(body_partial_json(blob_filter))
        .respond_with(ResponseTemplate::new(200).set_body_json(query_result(&[stored("doc1", "done")])))
        .with_priority(2)
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path(format!("{DOCUMENTS}/documents/doc1")))
        .and(query_param("updateMask.fieldPaths", "status"))
        .and(query_param("currentDocument.exists", "true"))
        .and(body_partial_json(json!({"fields": {"status": {"stringValue": "done"}}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(stored("doc1", "done")))
        .expect(1)
        .mount(&server)
        .await;

    let store = client(&server);
    let created = store
        .create_document("documents", &record(&[("blob_name", json!("a.pdf")), ("status", json!("new"))]))
        .await
        .unwrap();
    assert_eq!(created.id, "doc1");
    assert_eq!(created.blob_name(), Some("a.pdf"));

    let before = store.get_document("documents", "a.pdf").await.unwrap().unwrap();
    assert_eq!(before["status"], json!("new"));

    assert!(store.update_document_field("documents", "a.pdf", "status", &json!("done")).await.unwrap());

    let after = store.get_document("documents", "a.pdf").await.unwrap().unwrap();
    assert_eq!(after["status"], json!("done"));
}

#[tokio::test]
async fn missing_record_is_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("{DOCUMENTS}:runQuery")))
        .respond_with(ResponseTemplate::new(200).set_body_json(query_result(&[])))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let store = client(&server);
    assert_eq!(store.get_document("documents", "nope.pdf").await.unwrap(), None);
    assert_eq!(store.get_field_from_document("documents", "nope.pdf", "status").await.unwrap(), None);
    assert!(!store.update_document_field("documents", "nope.pdf", "status", &json!("done")).await.unwrap());
}

#[tokio::test]
async fn get_field_reads_one_value() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("{DOCUMENTS}:runQuery")))
        .respond_with(ResponseTemplate::new(200).set_body_json(query_result(&[stored("doc1", "new")])))
        .mount(&server)
        .await;

    let store = client(&server);
    assert_eq!(store.get_field_from_document("documents", "a.pdf", "status").await.unwrap(), Some(json!("new")));
    assert_eq!(store.get_field_from_document("documents", "a.pdf", "pages").await.unwrap(), None);
}

#[tokio::test]
async fn get_all_documents_orders_by_creation_time() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("{DOCUMENTS}:runQuery")))
        .and(body_partial_json(json!({"structuredQuery": {
            "where": {"fieldFilter": {"field": {"fieldPath": "bucket_name"}, "value": {"stringValue": "demo-original"}}},
            "orderBy": [{"field": {"fieldPath": "creation_time"}, "direction": "ASCENDING"}],
            "limit": 5
        }})))
        .respond_with(ResponseTemplate::new(200).set_body_json(query_result(&[stored("doc1", "new"), stored("doc2", "done")])))
        .expect(1)
        .mount(&server)
        .await;

    let all = client(&server)
        .get_all_documents("documents", "bucket_name", &json!("demo-original"), Some(5))
        .await
        .unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[1].id, "doc2");
    assert_eq!(all[1].fields["status"], json!("done"));
}

#[tokio::test]
async fn get_all_documents_keeps_query_order() {
    let server = MockServer::start().await;
    // the older record has the lexically larger identifier
    Mock::given(method("POST"))
        .and(path(format!("{DOCUMENTS}:runQuery")))
        .respond_with(ResponseTemplate::new(200).set_body_json(query_result(&[stored("zzz", "old"), stored("aaa", "new")])))
        .expect(1)
        .mount(&server)
        .await;

    let all = client(&server).get_all_documents("documents", "blob_name", &json!("a.pdf"), Some(10)).await.unwrap();
    let ids: Vec<&str> = all.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["zzz", "aaa"]);
    assert_eq!(all[0].fields["status"], json!("old"));
    assert_eq!(all[1].blob_name(), Some("a.pdf"));
}

#[tokio::test]
async fn query_limit_defaults_to_one() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("{DOCUMENTS}:runQuery")))
        .and(body_partial_json(json!({"structuredQuery": {"limit": 1}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(query_result(&[stored("doc1", "new")])))
        .expect(1)
        .mount(&server)
        .await;

    let all = client(&server).get_all_documents("documents", "status", &json!("new"), None).await.unwrap();
    assert_eq!(all.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(), vec!["doc1"]);
}

#[tokio::test]
async fn create_index_requests_composite_index() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/projects/demo/databases/(default)/collectionGroups/documents/indexes"))
        .and(body_partial_json(json!({
            "queryScope": "COLLECTION",
            "fields": [
                {"fieldPath": "blob_name", "order": "ASCENDING"},
                {"fieldPath": "creation_time", "order": "ASCENDING"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "projects/demo/databases/(default)/operations/S1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = client(&server);
    let operation = store.create_index("documents", &DEFAULT_INDEX_FIELDS).await.unwrap();
    assert_eq!(operation.id(), "S1");
    assert!(store.create_index("documents", &["blob_name"]).await.is_err());
}

#[tokio::test]
async fn permission_errors_fail_loudly() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403).set_body_string("PERMISSION_DENIED"))
        .mount(&server)
        .await;

    let err = client(&server).get_document("documents", "a.pdf").await.unwrap_err().to_string();
    assert!(err.contains("403") && err.contains("PERMISSION_DENIED"), "{err}");
}
