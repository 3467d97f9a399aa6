use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Organisation role granted to an API key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrgRole {
    Viewer,
    Editor,
    Admin,
    /// Any role this crate doesn't know about. Decode-only: the server
    /// rejects it, so key creation refuses it up front.
    #[serde(other)]
    Other,
}

impl fmt::Display for OrgRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Viewer => "Viewer",
            Self::Editor => "Editor",
            Self::Admin => "Admin",
            Self::Other => "Other",
        };
        f.write_str(name)
    }
}

/// An issued API key as listed by `GET /api/auth/keys`.
///
/// The secret itself is only returned once, by the create call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiKey {
    pub id: i64,
    pub name: String,
    pub role: OrgRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration: Option<DateTime<Utc>>,
}

/// Body of `POST /api/auth/keys`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateApiKeyRequest<'a> {
    pub name: &'a str,
    pub role: OrgRole,
    /// Lifetime in seconds; omitted means the key never expires.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seconds_to_live: Option<u64>,
}

/// Answer of `POST /api/auth/keys`.
#[derive(Deserialize)]
pub struct CreateApiKeyResponse {
    #[serde(default)]
    pub name: String,
    pub key: String,
}
