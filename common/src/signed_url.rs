//! Signed URL values handed to clients for direct object access.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifetime of every signed URL issued.
pub const SIGNED_URL_EXPIRY_SECONDS: u32 = 15 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignedUrlMethod {
    Get,
    Put,
}

impl SignedUrlMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignedUrlMethod::Get => "GET",
            SignedUrlMethod::Put => "PUT",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedUrl {
    pub url: String,
    pub method: SignedUrlMethod,
    /// Set on upload URLs: the request must carry exactly this `Content-Type`.
    pub content_type: Option<String>,
    pub expires_at: DateTime<Utc>,
}

impl SignedUrl {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

impl std::fmt::Display for SignedUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.url)
    }
}
