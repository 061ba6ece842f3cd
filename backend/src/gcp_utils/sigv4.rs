//! V4 query-string presigning (`AWS4-HMAC-SHA256`) with HMAC credentials.
//!
//! Cloud Storage's XML API accepts these signatures, as does any S3-compatible
//! store, so the same URLs work against a local MinIO in development.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

const ALGORITHM: &str = "AWS4-HMAC-SHA256";
const SERVICE: &str = "s3";

pub struct PresignRequest<'a> {
    pub method: &'a str,
    pub scheme: &'a str,
    /// Host header value, including a non-default port.
    pub host: &'a str,
    /// Already URI-encoded absolute path.
    pub canonical_uri: &'a str,
    pub region: &'a str,
    pub expires_in_seconds: u32,
    /// Signed as a header, so the eventual request must send the same value.
    pub content_type: Option<&'a str>,
    pub timestamp: DateTime<Utc>,
}

/// Returns the full presigned URL.
pub fn presign_url(request: &PresignRequest<'_>, access_id: &str, secret: &str) -> anyhow::Result<String> {
    let amz_date = request.timestamp.format("%Y%m%dT%H%M%SZ").to_string();
    let date = request.timestamp.format("%Y%m%d").to_string();
    let scope = format!("{}/{}/{}/aws4_request", date, request.region, SERVICE);

    let (canonical_headers, signed_headers) = match request.content_type {
        Some(content_type) => (
            format!("content-type:{}\nhost:{}\n", content_type.trim(), request.host),
            "content-type;host",
        ),
        None => (format!("host:{}\n", request.host), "host"),
    };

    // already in sorted order
    let query = [
        ("X-Amz-Algorithm", ALGORITHM.to_string()),
        ("X-Amz-Credential", format!("{}/{}", access_id, scope)),
        ("X-Amz-Date", amz_date.clone()),
        ("X-Amz-Expires", request.expires_in_seconds.to_string()),
        ("X-Amz-SignedHeaders", signed_headers.to_string()),
    ]
    .iter()
    .map(|(k, v)| format!("{}={}", uri_encode(k), uri_encode(v)))
    .collect::<Vec<_>>()
    .join("&");

    let canonical_request = format!(
        "{}\n{}\n{}\n{}\n{}\nUNSIGNED-PAYLOAD",
        request.method, request.canonical_uri, query, canonical_headers, signed_headers
    );
    let string_to_sign = format!("{}\n{}\n{}\n{}", ALGORITHM, amz_date, scope, sha256::digest(canonical_request));

    let signing_key = [request.region, SERVICE, "aws4_request"]
        .iter()
        .try_fold(hmac_sha256(format!("AWS4{}", secret).as_bytes(), date.as_bytes())?, |key, part| {
            hmac_sha256(&key, part.as_bytes())
        })?;
    let signature = hex::encode(hmac_sha256(&signing_key, string_to_sign.as_bytes())?);

    Ok(format!(
        "{}://{}{}?{}&X-Amz-Signature={}",
        request.scheme, request.host, request.canonical_uri, query, signature
    ))
}

/// Path-style object path, `/{bucket}/{key}`, with each key segment encoded.
pub fn canonical_object_uri(bucket_name: &str, key: &str) -> String {
    let key = key.split('/').map(uri_encode).collect::<Vec<_>>().join("/");
    format!("/{}/{}", uri_encode(bucket_name), key)
}

fn uri_encode(s: &str) -> String {
    urlencoding::encode(s).into_owned()
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> anyhow::Result<Vec<u8>> {
    let mut mac = Hmac::<Sha256>::new_from_slice(key).map_err(|e| anyhow::anyhow!("Invalid HMAC key: {}", e))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}
