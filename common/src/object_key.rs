//! Object key layout inside the storage buckets.

pub const ORIGINAL_PREFIX: &str = "original/";
pub const IMAGES_PREFIX: &str = "images/";

/// Key of the file as first uploaded.
pub fn original_object_key(blob_name: &str) -> String {
    format!("{ORIGINAL_PREFIX}{blob_name}")
}

/// Key of an image derived from `blob_name`, e.g. a rendered page.
pub fn image_object_key(blob_name: &str, file_name: &str) -> String {
    format!("{IMAGES_PREFIX}{blob_name}/{file_name}")
}

/// `gs://bucket/key` form expected by batch extraction inputs.
pub fn gcs_uri(bucket_name: &str, key: &str) -> String {
    format!("gs://{}/{}", bucket_name, key.trim_start_matches('/'))
}
