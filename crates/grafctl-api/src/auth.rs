use reqwest::RequestBuilder;
use secrecy::{ExposeSecret, SecretString};

/// Which authentication strategy a set of credentials uses.
///
/// Marker enum (no data) -- the actual secrets live in [`Credentials`].
/// Useful for logging and branching without carrying secret material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStrategy {
    /// HTTP Basic (`user:password`).
    Basic,
    /// `Authorization: Bearer <api key>`.
    Bearer,
}

impl AuthStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Bearer => "bearer",
        }
    }
}

/// Credentials for authenticating against a Grafana server.
///
/// Each variant carries the secret material needed for its header. Applying
/// credentials never fails; bad credentials only show up as a 401 from the
/// server.
#[derive(Debug, Clone)]
pub enum Credentials {
    /// Username/password, sent as a standard HTTP Basic header.
    Basic {
        username: String,
        password: SecretString,
    },

    /// Pre-issued API key, sent as `Authorization: Bearer <key>`.
    Bearer { token: SecretString },
}

impl Credentials {
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }

    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: SecretString::from(token.into()),
        }
    }

    pub fn strategy(&self) -> AuthStrategy {
        match self {
            Self::Basic { .. } => AuthStrategy::Basic,
            Self::Bearer { .. } => AuthStrategy::Bearer,
        }
    }

    /// Attach the `Authorization` header to an outgoing request.
    ///
    /// Call once per request; the header is marked sensitive so it never
    /// shows up in reqwest's debug output.
    pub fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Self::Basic { username, password } => {
                request.basic_auth(username, Some(password.expose_secret()))
            }
            Self::Bearer { token } => request.bearer_auth(token.expose_secret()),
        }
    }
}

impl From<SecretString> for Credentials {
    /// An issued API key is a bearer credential.
    fn from(token: SecretString) -> Self {
        Self::Bearer { token }
    }
}
