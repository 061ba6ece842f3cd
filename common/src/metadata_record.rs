//! Metadata records kept in the document database, one per ingested file.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Field name → value. Flat by convention, although values may be JSON maps or arrays.
pub type MetadataRecord = BTreeMap<String, serde_json::Value>;

/// Field every record is looked up by.
pub const BLOB_NAME_FIELD: &str = "blob_name";
/// Field used to order multi-record queries.
pub const CREATION_TIME_FIELD: &str = "creation_time";
pub const DEFAULT_COLLECTION: &str = "documents";

/// A record together with the identifier the store generated for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub id: String,
    pub fields: MetadataRecord,
}

impl StoredRecord {
    pub fn blob_name(&self) -> Option<&str> {
        self.fields.get(BLOB_NAME_FIELD).and_then(|v| v.as_str())
    }
}
