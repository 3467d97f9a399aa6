// Version-keyed client factory
//
// Maps server API version strings ("5.x") to constructors. Lookup is an
// exact string match; there is no range or fallback resolution.

use std::collections::HashMap;
use std::sync::LazyLock;

use tracing::debug;

use crate::auth::Credentials;
use crate::client::GrafanaApi;
use crate::error::Error;
use crate::transport::TransportConfig;
use crate::v5;

/// Builds a client for one API version.
pub type Constructor =
    fn(&str, Credentials, &TransportConfig) -> Result<Box<dyn GrafanaApi>, Error>;

/// Table of supported API versions.
///
/// Populated up front and read-only afterwards, so a shared instance can be
/// used from any thread.
#[derive(Clone)]
pub struct ClientRegistry {
    constructors: HashMap<String, Constructor>,
}

impl ClientRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// A registry holding every client this crate ships.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(v5::VERSION, build_v5);
        registry
    }

    /// Register (or replace) the constructor for `version`.
    pub fn register(&mut self, version: impl Into<String>, constructor: Constructor) {
        self.constructors.insert(version.into(), constructor);
    }

    /// Registered version keys, sorted.
    pub fn versions(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn supports(&self, version: &str) -> bool {
        self.constructors.contains_key(version)
    }

    /// Build a client for `version` with the default transport settings.
    pub fn resolve(
        &self,
        version: &str,
        base_url: &str,
        credentials: Credentials,
    ) -> Result<Box<dyn GrafanaApi>, Error> {
        self.resolve_with(version, base_url, credentials, &TransportConfig::default())
    }

    /// Build a client for `version`.
    ///
    /// Unknown versions fail with [`Error::UnsupportedVersion`] before any
    /// network activity.
    pub fn resolve_with(
        &self,
        version: &str,
        base_url: &str,
        credentials: Credentials,
        transport: &TransportConfig,
    ) -> Result<Box<dyn GrafanaApi>, Error> {
        let constructor =
            self.constructors
                .get(version)
                .ok_or_else(|| Error::UnsupportedVersion {
                    version: version.to_owned(),
                })?;
        debug!(
            version,
            base_url,
            auth = credentials.strategy().as_str(),
            "building client"
        );
        constructor(base_url, credentials, transport)
    }
}

impl Default for ClientRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for ClientRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientRegistry")
            .field("versions", &self.versions())
            .finish()
    }
}

fn build_v5(
    base_url: &str,
    credentials: Credentials,
    transport: &TransportConfig,
) -> Result<Box<dyn GrafanaApi>, Error> {
    Ok(Box::new(v5::GrafanaClientV5::new(
        base_url,
        credentials,
        transport,
    )?))
}

static DEFAULT_REGISTRY: LazyLock<ClientRegistry> = LazyLock::new(ClientRegistry::with_defaults);

/// Build a client for `version` from the built-in registry.
pub fn client_for_version(
    version: &str,
    base_url: &str,
    credentials: Credentials,
) -> Result<Box<dyn GrafanaApi>, Error> {
    DEFAULT_REGISTRY.resolve(version, base_url, credentials)
}
