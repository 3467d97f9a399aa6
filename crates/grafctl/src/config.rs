//! CLI configuration: thin wrapper around `grafctl_config`.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--url, --api-key, --user, ...) on top of the profile.

use std::time::Duration;

use grafctl_api::{Credentials, TlsMode};
use grafctl_config::{Config, ConnectionConfig, Profile};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .unwrap_or_else(|| config.default_profile_name().to_owned())
}

pub fn profile_not_found(name: &str, config: &Config) -> CliError {
    let available: Vec<&str> = config.profiles.keys().map(String::as_str).collect();
    CliError::ProfileNotFound {
        name: name.to_owned(),
        available: if available.is_empty() {
            "(none)".into()
        } else {
            available.join(", ")
        },
    }
}

/// Translate the active profile + global flags into a `ConnectionConfig`.
///
/// CLI flags take priority over profile values. Without a profile, the
/// connection can still be built from flags / env vars alone.
pub fn resolve_connection(global: &GlobalOpts, config: &Config) -> Result<ConnectionConfig, CliError> {
    let profile_name = active_profile_name(global, config);

    let profile = match config.profiles.get(&profile_name) {
        Some(profile) => profile.clone(),
        // An explicitly requested profile must exist
        None if global.profile.is_some() => return Err(profile_not_found(&profile_name, config)),
        None => Profile::default(),
    };

    // 1. URL (flag > env > profile)
    let url_str = global.url.as_deref().unwrap_or(&profile.url);
    if url_str.is_empty() {
        return Err(CliError::NoConfig {
            path: grafctl_config::config_path().display().to_string(),
        });
    }
    let url = grafctl_config::parse_url(url_str)?;

    // 2. Credentials
    let credentials = resolve_credentials(global, &profile, &profile_name)?;

    let mut conn = ConnectionConfig::assemble(url, credentials, &profile, &config.defaults);

    // 3. Remaining overrides
    if let Some(ref version) = global.api_version {
        conn.api_version.clone_from(version);
    }
    if global.insecure {
        conn.transport.tls = TlsMode::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        conn.transport.timeout = Duration::from_secs(secs);
    }

    Ok(conn)
}

/// Flags first, then the profile's credential chain.
fn resolve_credentials(
    global: &GlobalOpts,
    profile: &Profile,
    profile_name: &str,
) -> Result<Credentials, CliError> {
    if let Some(ref key) = global.api_key {
        return Ok(Credentials::bearer(key.clone()));
    }

    let username = global.user.as_ref().or(profile.username.as_ref());
    if let (Some(user), Some(password)) = (username, global.password.as_ref()) {
        return Ok(Credentials::basic(user.clone(), password.clone()));
    }

    // `--user` alone switches the profile to basic auth; the password then
    // comes from the usual chain.
    let mut profile = profile.clone();
    if let Some(ref user) = global.user {
        profile.auth = "basic".into();
        profile.username = Some(user.clone());
    }

    Ok(grafctl_config::resolve_credentials(&profile, profile_name)?)
}
