//! Plumbing shared by the service clients.

pub mod auth;
pub mod http_utils;
pub mod firestore_values;
pub mod sigv4;
