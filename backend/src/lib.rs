//! Clients for document extraction, metadata records and object storage.
//!
//! Build [`config::Settings`] once, then one client per service; clients are
//! meant to live for the whole process.

pub mod config;
pub mod telemetry;
pub mod api;
pub(crate) mod gcp_utils;

pub use api::extraction::{DEFAULT_MIME_TYPE, ExtractionClient, log_document_summary};
pub use api::metadata::MetadataStoreClient;
pub use api::storage::ObjectStoreClient;
pub use gcp_utils::auth::AccessTokenSource;
