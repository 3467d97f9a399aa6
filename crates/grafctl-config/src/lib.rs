//! Configuration for the grafctl CLI.
//!
//! TOML profiles, credential resolution (env + keyring + plaintext),
//! and translation to a [`ConnectionConfig`] that can build a versioned
//! Grafana client.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use grafctl_api::{ClientRegistry, Credentials, GrafanaApi, TlsMode, TransportConfig};

/// API version assumed when neither profile nor defaults name one.
pub const DEFAULT_API_VERSION: &str = "5.x";

/// Service name under which secrets are stored in the system keyring.
pub const KEYRING_SERVICE: &str = "grafctl";

const ENV_PREFIX: &str = "GRAFCTL_";
const ENV_USERNAME: &str = "GRAFCTL_USERNAME";
const ENV_PASSWORD: &str = "GRAFCTL_PASSWORD";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{name}' not found in config")]
    UnknownProfile { name: String },

    #[error("no credentials configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when `--profile` is not given.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named server profiles.
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Name of the profile to use when none is requested explicitly.
    pub fn default_profile_name(&self) -> &str {
        self.default_profile.as_deref().unwrap_or("default")
    }

    pub fn profile(&self, name: &str) -> Result<&Profile, ConfigError> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::UnknownProfile { name: name.into() })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_api_version")]
    pub api_version: String,

    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            api_version: default_api_version(),
            insecure: false,
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_api_version() -> String {
    DEFAULT_API_VERSION.into()
}
fn default_timeout() -> u64 {
    30
}
fn default_auth() -> String {
    "token".into()
}

/// A named Grafana server profile.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Profile {
    /// Server base URL (e.g., "https://grafana.example.com").
    pub url: String,

    /// API version key; falls back to `defaults.api_version`.
    pub api_version: Option<String>,

    /// Auth strategy: "token" (API key, Bearer) or "basic".
    #[serde(default = "default_auth")]
    pub auth: String,

    /// API key (plaintext; prefer keyring or env var).
    pub api_key: Option<String>,

    /// Environment variable name containing the API key.
    pub api_key_env: Option<String>,

    /// Username for basic auth.
    pub username: Option<String>,

    /// Password for basic auth (plaintext; prefer keyring).
    pub password: Option<String>,

    /// Path to a custom CA certificate (PEM).
    pub ca_cert: Option<PathBuf>,

    /// Override the insecure TLS default.
    pub insecure: Option<bool>,

    /// Override the request timeout, in seconds.
    pub timeout: Option<u64>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            url: String::new(),
            api_version: None,
            auth: default_auth(),
            api_key: None,
            api_key_env: None,
            username: None,
            password: None,
            ca_cert: None,
            insecure: None,
            timeout: None,
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "grafctl", "grafctl").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("grafctl");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load config from `path`, layered over defaults and under `GRAFCTL_*`
/// environment variables (`__` separates nested keys, e.g.
/// `GRAFCTL_DEFAULTS__TIMEOUT`). A missing file is not an error.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading config");
    let figment = file_figment(path).merge(Env::prefixed(ENV_PREFIX).split("__"));
    Ok(figment.extract::<Config>()?)
}

/// Load only what is on disk, for commands that write the file back.
///
/// Environment overrides are left out so they never get persisted, and a
/// malformed file is an error rather than an empty config.
pub fn load_file_config() -> Result<Config, ConfigError> {
    load_file_config_from(&config_path())
}

pub fn load_file_config_from(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading config file for editing");
    Ok(file_figment(path).extract::<Config>()?)
}

fn file_figment(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
}

/// Load config, returning a default if the file doesn't exist or is broken.
/// Read-only callers only; see [`load_file_config`].
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Where secrets are looked up, in order of precedence after CLI flags.
struct SecretSources<E, K> {
    env: E,
    keyring: K,
}

fn system_sources()
-> SecretSources<impl Fn(&str) -> Option<String>, impl Fn(&str) -> Option<String>> {
    SecretSources {
        env: |name: &str| std::env::var(name).ok(),
        keyring: |account: &str| {
            keyring::Entry::new(KEYRING_SERVICE, account)
                .and_then(|entry| entry.get_password())
                .ok()
        },
    }
}

impl<E, K> SecretSources<E, K>
where
    E: Fn(&str) -> Option<String>,
    K: Fn(&str) -> Option<String>,
{
    fn api_key(&self, profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
        // 1. Profile's api_key_env → env var lookup
        if let Some(val) = profile.api_key_env.as_deref().and_then(&self.env) {
            return Ok(SecretString::from(val));
        }

        // 2. System keyring
        if let Some(secret) = (self.keyring)(&format!("{profile_name}/api-key")) {
            return Ok(SecretString::from(secret));
        }

        // 3. Plaintext in config
        if let Some(ref key) = profile.api_key {
            return Ok(SecretString::from(key.clone()));
        }

        Err(ConfigError::NoCredentials {
            profile: profile_name.into(),
        })
    }

    fn basic(
        &self,
        profile: &Profile,
        profile_name: &str,
    ) -> Result<(String, SecretString), ConfigError> {
        let username = profile
            .username
            .clone()
            .or_else(|| (self.env)(ENV_USERNAME))
            .ok_or_else(|| ConfigError::NoCredentials {
                profile: profile_name.into(),
            })?;

        if let Some(pw) = (self.env)(ENV_PASSWORD) {
            return Ok((username, SecretString::from(pw)));
        }

        if let Some(pw) = (self.keyring)(&format!("{profile_name}/password")) {
            return Ok((username, SecretString::from(pw)));
        }

        if let Some(ref pw) = profile.password {
            return Ok((username, SecretString::from(pw.clone())));
        }

        Err(ConfigError::NoCredentials {
            profile: profile_name.into(),
        })
    }

    fn credentials(&self, profile: &Profile, profile_name: &str) -> Result<Credentials, ConfigError> {
        match profile.auth.as_str() {
            "token" => Ok(Credentials::from(self.api_key(profile, profile_name)?)),
            "basic" => {
                let (username, password) = self.basic(profile, profile_name)?;
                Ok(Credentials::Basic { username, password })
            }
            other => Err(ConfigError::Validation {
                field: "auth".into(),
                reason: format!("expected 'token' or 'basic', got '{other}'"),
            }),
        }
    }
}

/// Resolve [`Credentials`] according to the profile's `auth` field.
///
/// Token auth: `api_key_env` variable, then keyring, then plaintext.
/// Basic auth: `GRAFCTL_PASSWORD`, then keyring, then plaintext; the
/// username comes from the profile or `GRAFCTL_USERNAME`.
pub fn resolve_credentials(
    profile: &Profile,
    profile_name: &str,
) -> Result<Credentials, ConfigError> {
    system_sources().credentials(profile, profile_name)
}

/// Store a secret for `profile_name` in the system keyring.
///
/// `kind` is `"api-key"` or `"password"`, matching the lookups above.
pub fn store_secret(profile_name: &str, kind: &str, secret: &str) -> Result<(), ConfigError> {
    keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/{kind}"))
        .and_then(|entry| entry.set_password(secret))
        .map_err(|e| ConfigError::Validation {
            field: "keyring".into(),
            reason: e.to_string(),
        })
}

// ── Connection ──────────────────────────────────────────────────────

/// Everything needed to build a client for one server.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    pub url: url::Url,
    pub api_version: String,
    pub credentials: Credentials,
    pub transport: TransportConfig,
}

impl ConnectionConfig {
    /// Combine already-resolved parts with the profile's transport settings.
    pub fn assemble(
        url: url::Url,
        credentials: Credentials,
        profile: &Profile,
        defaults: &Defaults,
    ) -> Self {
        let tls = if profile.insecure.unwrap_or(defaults.insecure) {
            TlsMode::DangerAcceptInvalid
        } else if let Some(ref ca_path) = profile.ca_cert {
            TlsMode::CustomCa(ca_path.clone())
        } else {
            TlsMode::System
        };

        let timeout = Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout));

        Self {
            url,
            api_version: profile
                .api_version
                .clone()
                .unwrap_or_else(|| defaults.api_version.clone()),
            credentials,
            transport: TransportConfig { tls, timeout },
        }
    }

    /// Build a client from the built-in registry.
    pub fn connect(&self) -> Result<Box<dyn GrafanaApi>, grafctl_api::Error> {
        self.connect_with(&ClientRegistry::with_defaults())
    }

    pub fn connect_with(
        &self,
        registry: &ClientRegistry,
    ) -> Result<Box<dyn GrafanaApi>, grafctl_api::Error> {
        registry.resolve_with(
            &self.api_version,
            self.url.as_str(),
            self.credentials.clone(),
            &self.transport,
        )
    }
}

/// Parse and validate a server URL.
pub fn parse_url(raw: &str) -> Result<url::Url, ConfigError> {
    let url: url::Url = raw.parse().map_err(|_| ConfigError::Validation {
        field: "url".into(),
        reason: format!("invalid URL: {raw}"),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::Validation {
            field: "url".into(),
            reason: format!("unsupported scheme '{other}' in {raw}"),
        }),
    }
}
