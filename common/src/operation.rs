//! Handles to server-side long-running operations.

use serde::{Deserialize, Serialize};

/// As returned when a long-running job is submitted. Never polled here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OperationHandle {
    pub name: String,
    pub done: bool,
    pub metadata: Option<serde_json::Value>,
    pub error: Option<serde_json::Value>,
}

impl OperationHandle {
    /// Last path segment of the operation name.
    pub fn id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or("")
    }
}
