use serde::Deserialize;
use serde_json::json;

use crate::api::metadata::{FirestoreDocument, MetadataStoreClient};
use crate::gcp_utils::{firestore_values::{quote_field_path, to_firestore_value}, http_utils::json_or_error};

#[derive(Debug, Deserialize)]
struct RunQueryResponseItem {
    document: Option<FirestoreDocument>,
}

impl MetadataStoreClient {
    /// `field_name == value`, optionally ordered ascending by `order_by`, at most `limit` results.
    pub(super) async fn run_equality_query(
        &self,
        collection: &str,
        field_name: &str,
        value: &serde_json::Value,
        order_by: Option<&str>,
        limit: u32,
    ) -> anyhow::Result<Vec<FirestoreDocument>> {
        let mut structured_query = json!({
            "from": [{ "collectionId": collection }],
            "where": {
                "fieldFilter": {
                    "field": { "fieldPath": quote_field_path(field_name) },
                    "op": "EQUAL",
                    "value": to_firestore_value(value),
                }
            },
            "limit": limit,
        });
        if let Some(order_by) = order_by {
            structured_query["orderBy"] = json!([{
                "field": { "fieldPath": quote_field_path(order_by) },
                "direction": "ASCENDING",
            }]);
        }

        let token = self.token_source.token(&self.http).await?;
        let response = self
            .http
            .post(format!("{}:runQuery", self.documents_url()))
            .bearer_auth(token)
            .json(&json!({ "structuredQuery": structured_query }))
            .send()
            .await?;
        let items: Vec<RunQueryResponseItem> = json_or_error(response).await?;
        Ok(items.into_iter().filter_map(|item| item.document).collect())
    }
}
