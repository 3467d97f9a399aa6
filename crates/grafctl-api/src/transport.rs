// Shared transport configuration for building reqwest::Client instances.
//
// Every versioned client builds its HTTP client once, at construction,
// through this module. There is no lazy initialisation afterwards.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::Error;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const USER_AGENT: &str = concat!("grafctl/", env!("CARGO_PKG_VERSION"));

/// TLS verification mode.
#[derive(Debug, Clone, Default)]
pub enum TlsMode {
    /// Use the system certificate store.
    #[default]
    System,
    /// Trust an additional CA certificate from the given PEM file.
    CustomCa(PathBuf),
    /// Accept any certificate (self-signed lab servers).
    DangerAcceptInvalid,
}

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub tls: TlsMode,
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            tls: TlsMode::System,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl TransportConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_tls(mut self, tls: TlsMode) -> Self {
        self.tls = tls;
        self
    }

    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT);

        match &self.tls {
            TlsMode::System => {}
            TlsMode::CustomCa(path) => {
                let cert_pem = std::fs::read(path)
                    .map_err(|e| Error::Tls(format!("failed to read CA cert: {e}")))?;
                let cert = reqwest::Certificate::from_pem(&cert_pem)
                    .map_err(|e| Error::Tls(format!("invalid CA cert: {e}")))?;
                builder = builder.add_root_certificate(cert);
            }
            TlsMode::DangerAcceptInvalid => {
                builder = builder.danger_accept_invalid_certs(true);
            }
        }

        builder
            .build()
            .map_err(|e| Error::Tls(format!("failed to build HTTP client: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_system_tls_with_thirty_seconds() {
        let config = TransportConfig::default();
        assert!(matches!(config.tls, TlsMode::System));
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.build_client().is_ok());
    }

    #[test]
    fn missing_ca_file_is_a_tls_error() {
        let config = TransportConfig::default()
            .with_tls(TlsMode::CustomCa(PathBuf::from("/nonexistent/grafctl-ca.pem")));
        let err = config.build_client().err();
        assert!(matches!(err, Some(Error::Tls(msg)) if msg.contains("failed to read CA cert")));
    }

    #[test]
    fn builders_override_fields() {
        let config = TransportConfig::default()
            .with_timeout(Duration::from_secs(5))
            .with_tls(TlsMode::DangerAcceptInvalid);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(matches!(config.tls, TlsMode::DangerAcceptInvalid));
    }
}
