// API key endpoints

use std::time::Duration;

use secrecy::SecretString;
use tracing::debug;

use super::GrafanaClientV5;
use crate::error::Error;
use crate::models::{ApiKey, CreateApiKeyRequest, CreateApiKeyResponse, OrgRole};

impl GrafanaClientV5 {
    /// `POST /api/auth/keys`
    ///
    /// Returns the key secret. The server never hands it out again.
    /// [`OrgRole::Other`] is decode-only and is refused before any request.
    pub async fn create_api_key(
        &self,
        name: &str,
        role: OrgRole,
        ttl: Option<Duration>,
    ) -> Result<SecretString, Error> {
        if role == OrgRole::Other {
            return Err(Error::Validation {
                field: "role".into(),
                reason: "expected Viewer, Editor or Admin".into(),
            });
        }
        debug!(name, %role, ?ttl, "creating API key");
        let request = CreateApiKeyRequest {
            name,
            role,
            seconds_to_live: ttl.map(|t| t.as_secs()),
        };
        let resp: CreateApiKeyResponse = self.post("/api/auth/keys", &request).await?;
        Ok(SecretString::from(resp.key))
    }

    /// `GET /api/auth/keys`
    pub async fn list_api_keys(&self) -> Result<Vec<ApiKey>, Error> {
        self.get("/api/auth/keys", &[]).await
    }

    /// `DELETE /api/auth/keys/{id}`
    pub async fn delete_api_key(&self, id: i64) -> Result<bool, Error> {
        self.delete(&format!("/api/auth/keys/{id}")).await?;
        Ok(true)
    }
}
