//! CLI error types with miette diagnostics.
//!
//! Maps client and config errors into user-facing errors with actionable
//! help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use grafctl_api::ClientRegistry;
use grafctl_config::ConfigError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to Grafana at {url}")]
    #[diagnostic(
        code(grafctl::connection_failed),
        help(
            "Check that the server is running and reachable.\n\
             URL: {url}"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("TLS setup failed: {reason}")]
    #[diagnostic(
        code(grafctl::tls_error),
        help(
            "Check the ca_cert path in your profile, or use --insecure (-k) \
             for servers with self-signed certificates."
        )
    )]
    TlsError { reason: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(grafctl::timeout),
        help("Increase the timeout with --timeout or check server responsiveness.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed (HTTP {status})")]
    #[diagnostic(
        code(grafctl::auth_failed),
        help(
            "Verify your API key or username/password, and that the key's role \
             allows this operation.\n\
             Run: grafctl config set-secret"
        )
    )]
    AuthFailed { status: u16 },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(grafctl::no_credentials),
        help(
            "Pass --api-key, or --user and --password.\n\
             Or set GRAFCTL_API_KEY, or store one with: grafctl config set-secret"
        )
    )]
    NoCredentials { profile: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(grafctl::not_found),
        help("Run: grafctl {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("Dashboard save rejected ({status}): {message}")]
    #[diagnostic(
        code(grafctl::dashboard_rejected),
        help("Use --overwrite to replace the existing dashboard.")
    )]
    DashboardRejected { status: String, message: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("{endpoint} returned HTTP {status}: {body}")]
    #[diagnostic(code(grafctl::api_error))]
    ApiError {
        status: u16,
        endpoint: String,
        body: String,
    },

    #[error("Unexpected response from {endpoint}: {message}")]
    #[diagnostic(
        code(grafctl::decode),
        help("The server answered with a shape this client does not understand. Check --api-version.")
    )]
    Decode { endpoint: String, message: String },

    #[error("Unsupported API version '{version}'")]
    #[diagnostic(
        code(grafctl::unsupported_version),
        help("Supported versions: {supported}")
    )]
    UnsupportedVersion { version: String, supported: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(grafctl::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(grafctl::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Add one with: grafctl config set url <URL> --profile {name}"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No Grafana server configured")]
    #[diagnostic(
        code(grafctl::no_config),
        help(
            "Pass --url, or add a profile to the config file.\n\
             Expected at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(grafctl::config))]
    Config(Box<ConfigError>),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Prompt failed: {0}")]
    #[diagnostic(
        code(grafctl::prompt),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    Prompt(#[from] dialoguer::Error),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    #[diagnostic(code(grafctl::json), help("Check the JSON file contents and try again."))]
    Json(#[from] serde_json::Error),

    #[error("YAML rendering failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML rendering failed: {0}")]
    Toml(#[from] toml::ser::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::TlsError { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } | Self::ApiError { status: 404, .. } => exit_code::NOT_FOUND,
            Self::DashboardRejected { .. } | Self::ApiError { status: 409 | 412, .. } => {
                exit_code::CONFLICT
            }
            Self::Validation { .. }
            | Self::UnsupportedVersion { .. }
            | Self::ProfileNotFound { .. }
            | Self::Prompt(_) => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── Client error mapping ─────────────────────────────────────────────

impl From<grafctl_api::Error> for CliError {
    fn from(err: grafctl_api::Error) -> Self {
        use grafctl_api::Error as ApiErr;

        match err {
            ApiErr::Transport(e) if e.is_timeout() => Self::Timeout,
            ApiErr::Transport(e) => Self::ConnectionFailed {
                url: e
                    .url()
                    .map_or_else(|| "(unknown)".to_owned(), ToString::to_string),
                source: Box::new(e),
            },
            ApiErr::InvalidUrl(e) => Self::Validation {
                field: "url".into(),
                reason: e.to_string(),
            },
            ApiErr::Tls(reason) => Self::TlsError { reason },
            ApiErr::Validation { field, reason } => Self::Validation { field, reason },
            ApiErr::UnexpectedStatus {
                status: status @ (401 | 403),
                ..
            } => Self::AuthFailed { status },
            ApiErr::UnexpectedStatus {
                status,
                endpoint,
                body,
            } => Self::ApiError {
                status,
                endpoint,
                body,
            },
            ApiErr::Deserialization {
                endpoint, message, ..
            } => Self::Decode { endpoint, message },
            ApiErr::Dashboard { status, message } => Self::DashboardRejected { status, message },
            ApiErr::UnsupportedVersion { version } => Self::UnsupportedVersion {
                version,
                supported: ClientRegistry::with_defaults().versions().join(", "),
            },
        }
    }
}

// ── Config error mapping ─────────────────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::NoCredentials { profile } => Self::NoCredentials { profile },
            ConfigError::UnknownProfile { name } => Self::ProfileNotFound {
                name,
                available: String::new(),
            },
            other => Self::Config(Box::new(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_errors_map_to_exit_codes() {
        let not_found: CliError = grafctl_api::Error::UnexpectedStatus {
            status: 404,
            endpoint: "DELETE /api/dashboards/uid/xyz".into(),
            body: String::new(),
        }
        .into();
        assert_eq!(not_found.exit_code(), exit_code::NOT_FOUND);

        let conflict: CliError = grafctl_api::Error::UnexpectedStatus {
            status: 412,
            endpoint: "POST /api/dashboards/db".into(),
            body: String::new(),
        }
        .into();
        assert_eq!(conflict.exit_code(), exit_code::CONFLICT);

        let auth: CliError = grafctl_api::Error::UnexpectedStatus {
            status: 401,
            endpoint: "GET /api/search".into(),
            body: String::new(),
        }
        .into();
        assert!(matches!(auth, CliError::AuthFailed { status: 401 }));
        assert_eq!(auth.exit_code(), exit_code::AUTH);
    }

    #[test]
    fn unsupported_version_lists_supported() {
        let err: CliError = grafctl_api::Error::UnsupportedVersion {
            version: "9.x".into(),
        }
        .into();
        match &err {
            CliError::UnsupportedVersion { supported, .. } => assert!(supported.contains("5.x")),
            other => panic!("expected UnsupportedVersion, got {other:?}"),
        }
        assert_eq!(err.exit_code(), exit_code::USAGE);
    }

    #[test]
    fn dashboard_rejection_is_conflict() {
        let err: CliError = grafctl_api::Error::Dashboard {
            status: "version-mismatch".into(),
            message: "changed by someone else".into(),
        }
        .into();
        assert_eq!(err.exit_code(), exit_code::CONFLICT);
    }

    #[test]
    fn client_side_validation_is_usage() {
        let err: CliError = grafctl_api::Error::Validation {
            field: "uid".into(),
            reason: "\"\" is not a usable path segment".into(),
        }
        .into();
        assert!(matches!(&err, CliError::Validation { field, .. } if field == "uid"));
        assert_eq!(err.exit_code(), exit_code::USAGE);
    }
}
