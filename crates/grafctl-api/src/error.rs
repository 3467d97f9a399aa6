use thiserror::Error;

/// Top-level error type for the `grafctl-api` crate.
///
/// Transport failures, status rejections and decode failures are kept apart
/// so callers can tell "server unreachable or refused" from "server answered
/// with a shape we don't understand".
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, body read, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The configured base address could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The HTTP client could not be built (CA file, TLS backend).
    #[error("TLS error: {0}")]
    Tls(String),

    /// A caller-supplied argument was rejected before any request was sent.
    #[error("Invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    // ── Status ──────────────────────────────────────────────────────
    /// The server answered with a status outside the accepted set.
    #[error("{endpoint} returned HTTP {status}: {body}")]
    UnexpectedStatus {
        status: u16,
        endpoint: String,
        body: String,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error in {endpoint}: {message}")]
    Deserialization {
        endpoint: String,
        message: String,
        body: String,
    },

    // ── Domain ──────────────────────────────────────────────────────
    /// Dashboard save answered 200 but with a non-`success` status
    /// (`version-mismatch`, `name-exists`, `plugin-dashboard`, ...).
    #[error("Dashboard save rejected ({status}): {message}")]
    Dashboard { status: String, message: String },

    // ── Registry ────────────────────────────────────────────────────
    /// No client is registered for the requested API version.
    #[error("Unsupported API version: {version}")]
    UnsupportedVersion { version: String },
}

impl Error {
    /// HTTP status carried by this error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Raw response body, when one was received.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::UnexpectedStatus { body, .. } | Self::Deserialization { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Returns `true` if the server reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns `true` for 409/412 answers.
    ///
    /// Folder provisioning races and dashboard version clashes land here;
    /// idempotent callers may treat them as benign.
    pub fn is_conflict(&self) -> bool {
        matches!(self.status(), Some(409 | 412))
    }

    /// Returns `true` if the server rejected the credentials.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unexpected_status_exposes_code_and_body() {
        let err = Error::UnexpectedStatus {
            status: 404,
            endpoint: "DELETE /api/dashboards/uid/xyz".into(),
            body: r#"{"message":"Dashboard not found"}"#.into(),
        };
        assert_eq!(err.status(), Some(404));
        assert!(err.is_not_found());
        assert!(!err.is_conflict());
        assert_eq!(err.body(), Some(r#"{"message":"Dashboard not found"}"#));
        assert_eq!(
            err.to_string(),
            r#"DELETE /api/dashboards/uid/xyz returned HTTP 404: {"message":"Dashboard not found"}"#
        );
    }

    #[test]
    fn conflict_and_auth_classification() {
        let conflict = Error::UnexpectedStatus {
            status: 412,
            endpoint: "POST /api/folders".into(),
            body: String::new(),
        };
        assert!(conflict.is_conflict());

        let denied = Error::UnexpectedStatus {
            status: 403,
            endpoint: "GET /api/auth/keys".into(),
            body: String::new(),
        };
        assert!(denied.is_unauthorized());
        assert!(!denied.is_not_found());
    }

    #[test]
    fn dashboard_error_carries_server_fields() {
        let err = Error::Dashboard {
            status: "version-mismatch".into(),
            message: "dashboard has been changed".into(),
        };
        assert_eq!(err.status(), None);
        assert_eq!(
            err.to_string(),
            "Dashboard save rejected (version-mismatch): dashboard has been changed"
        );
    }

    #[test]
    fn validation_has_no_status() {
        let err = Error::Validation {
            field: "uid".into(),
            reason: "must not be empty".into(),
        };
        assert_eq!(err.status(), None);
        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), "Invalid uid: must not be empty");
    }

    #[test]
    fn deserialization_keeps_body() {
        let err = Error::Deserialization {
            endpoint: "GET /api/folders".into(),
            message: "expected a sequence".into(),
            body: "{}".into(),
        };
        assert_eq!(err.body(), Some("{}"));
        assert_eq!(err.status(), None);
    }
}
