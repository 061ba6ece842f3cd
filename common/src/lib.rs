//! Types shared by every caller of the extraction, metadata and storage clients.

extern crate serde;


pub mod document;
pub mod text_anchor;
pub mod metadata_record;
pub mod operation;
pub mod signed_url;
pub mod object_key;
