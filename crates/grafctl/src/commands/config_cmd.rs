//! Config subcommand handlers.

use dialoguer::Password;

use grafctl_api::ClientRegistry;
use grafctl_config::{self as shared, Config, DEFAULT_API_VERSION, Profile};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

const MASK: &str = "****";

// ── Helpers ─────────────────────────────────────────────────────────

/// Copy of the config with plaintext secrets masked.
fn redacted(cfg: &Config) -> Config {
    let mut cfg = cfg.clone();
    for profile in cfg.profiles.values_mut() {
        if profile.api_key.is_some() {
            profile.api_key = Some(MASK.into());
        }
        if profile.password.is_some() {
            profile.password = Some(MASK.into());
        }
    }
    cfg
}

fn save_config(cfg: &Config) -> Result<(), CliError> {
    shared::save_config(cfg)?;
    Ok(())
}

fn parse_flag<T: std::str::FromStr>(field: &str, value: &str, expected: &str) -> Result<T, CliError> {
    value.parse().map_err(|_| CliError::Validation {
        field: field.into(),
        reason: format!("must be {expected}"),
    })
}

/// Apply `key = value` to a profile.
fn set_profile_value(profile: &mut Profile, key: &str, value: String) -> Result<(), CliError> {
    match key {
        "url" => {
            shared::parse_url(&value)?;
            profile.url = value;
        }
        "api_version" | "api-version" => profile.api_version = Some(value),
        "auth" => {
            if !matches!(value.as_str(), "token" | "basic") {
                return Err(CliError::Validation {
                    field: "auth".into(),
                    reason: "must be 'token' or 'basic'".into(),
                });
            }
            profile.auth = value;
        }
        "api_key_env" | "api-key-env" => profile.api_key_env = Some(value),
        "username" => profile.username = Some(value),
        "insecure" => profile.insecure = Some(parse_flag("insecure", &value, "'true' or 'false'")?),
        "timeout" => profile.timeout = Some(parse_flag("timeout", &value, "a number (seconds)")?),
        "ca_cert" | "ca-cert" => profile.ca_cert = Some(value.into()),
        other => {
            return Err(CliError::Validation {
                field: other.into(),
                reason: format!(
                    "unknown config key '{other}'. Valid keys: url, api_version, auth, \
                     api_key_env, username, insecure, timeout, ca_cert"
                ),
            });
        }
    }
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            output::print_output(&shared::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = redacted(&shared::load_config_or_default());
            let toml = toml::to_string_pretty(&cfg)?;
            let out = output::render_single(
                &global.output,
                &cfg,
                |_| toml.trim_end().to_owned(),
                |c| c.default_profile_name().to_owned(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Versions => {
            let registry = ClientRegistry::with_defaults();
            let versions = registry.versions();
            let out = output::render_single(
                &global.output,
                &versions,
                |vs| {
                    vs.iter()
                        .map(|v| {
                            if *v == DEFAULT_API_VERSION {
                                format!("{v} (default)")
                            } else {
                                (*v).to_owned()
                            }
                        })
                        .collect::<Vec<_>>()
                        .join("\n")
                },
                |vs| vs.join("\n"),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Profiles => {
            let cfg = shared::load_config_or_default();
            let default = cfg.default_profile_name();
            if cfg.profiles.is_empty() {
                output::print_status(
                    "No profiles configured. Run: grafctl config set url <URL>",
                    global.quiet,
                );
            } else {
                for name in cfg.profiles.keys() {
                    let marker = if name == default { " *" } else { "" };
                    output::print_output(&format!("{name}{marker}"), global.quiet);
                }
            }
            Ok(())
        }

        ConfigCommand::Use { name } => {
            let mut cfg = shared::load_file_config()?;
            if !cfg.profiles.contains_key(&name) {
                return Err(config::profile_not_found(&name, &cfg));
            }
            cfg.default_profile = Some(name.clone());
            save_config(&cfg)?;
            output::print_status(&format!("Default profile set to '{name}'"), global.quiet);
            Ok(())
        }

        ConfigCommand::Set { key, value } => {
            let mut cfg = shared::load_file_config()?;
            let profile_name = config::active_profile_name(global, &cfg);
            let profile = cfg.profiles.entry(profile_name.clone()).or_default();
            set_profile_value(profile, &key, value)?;
            save_config(&cfg)?;
            output::print_status(&format!("Set {key} on profile '{profile_name}'"), global.quiet);
            Ok(())
        }

        ConfigCommand::SetSecret => {
            let cfg = shared::load_config()?;
            let profile_name = config::active_profile_name(global, &cfg);
            let profile = cfg
                .profiles
                .get(&profile_name)
                .ok_or_else(|| config::profile_not_found(&profile_name, &cfg))?;

            let (kind, label) = if profile.auth == "basic" {
                ("password", "Password")
            } else {
                ("api-key", "API key")
            };
            let secret = Password::new().with_prompt(label).interact()?;
            if secret.is_empty() {
                return Err(CliError::Validation {
                    field: kind.into(),
                    reason: "value cannot be empty".into(),
                });
            }
            shared::store_secret(&profile_name, kind, &secret)?;
            output::print_status(
                &format!("{label} stored in system keyring for profile '{profile_name}'"),
                global.quiet,
            );
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn redacted_masks_plaintext_secrets() {
        let mut cfg = Config::default();
        cfg.profiles.insert(
            "prod".into(),
            Profile {
                url: "https://grafana.example.com".into(),
                api_key: Some("glsa_secret".into()),
                password: Some("hunter2".into()),
                ..Profile::default()
            },
        );
        let masked = redacted(&cfg);
        let prod = &masked.profiles["prod"];
        assert_eq!(prod.api_key.as_deref(), Some(MASK));
        assert_eq!(prod.password.as_deref(), Some(MASK));
        assert_eq!(prod.url, "https://grafana.example.com");
    }

    #[test]
    fn set_profile_value_validates() {
        let mut profile = Profile::default();
        set_profile_value(&mut profile, "url", "http://localhost:3000".into()).unwrap();
        set_profile_value(&mut profile, "timeout", "5".into()).unwrap();
        set_profile_value(&mut profile, "api-version", "5.x".into()).unwrap();
        assert_eq!(profile.url, "http://localhost:3000");
        assert_eq!(profile.timeout, Some(5));
        assert_eq!(profile.api_version.as_deref(), Some("5.x"));

        assert!(set_profile_value(&mut profile, "auth", "oauth".into()).is_err());
        assert!(set_profile_value(&mut profile, "timeout", "soon".into()).is_err());
        assert!(set_profile_value(&mut profile, "url", "not a url".into()).is_err());
        assert!(set_profile_value(&mut profile, "colour", "red".into()).is_err());
    }
}
