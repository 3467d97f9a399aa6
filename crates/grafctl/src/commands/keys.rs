//! API key command handlers.

use std::time::Duration;

use secrecy::ExposeSecret;
use serde::Serialize;
use tabled::Tabled;

use grafctl_api::GrafanaApi;
use grafctl_api::models::{ApiKey, OrgRole};

use crate::cli::{GlobalOpts, KeysArgs, KeysCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct KeyRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Expires")]
    expires: String,
}

impl From<&ApiKey> for KeyRow {
    fn from(k: &ApiKey) -> Self {
        Self {
            id: k.id,
            name: k.name.clone(),
            role: k.role.to_string(),
            expires: k
                .expiration
                .map_or_else(|| "never".into(), |t| t.to_rfc3339()),
        }
    }
}

/// A freshly issued key. Only ever printed, never stored.
#[derive(Serialize)]
struct IssuedKey<'a> {
    name: &'a str,
    role: OrgRole,
    key: &'a str,
}

pub async fn handle(
    client: &dyn GrafanaApi,
    args: KeysArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        KeysCommand::List => {
            let keys = client.list_api_keys().await?;
            let out = output::render_list(
                &global.output,
                &keys,
                |k| KeyRow::from(k),
                |k| k.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        KeysCommand::Create { name, role, ttl } => {
            let role = OrgRole::from(role);
            let secret = client
                .create_api_key(&name, role, ttl.map(Duration::from_secs))
                .await?;
            output::print_status(
                &format!("API key '{name}' created; it will not be shown again"),
                global.quiet,
            );
            let issued = IssuedKey {
                name: &name,
                role,
                key: secret.expose_secret(),
            };
            let out = output::render_single(
                &global.output,
                &issued,
                |k| k.key.to_owned(),
                |k| k.key.to_owned(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        KeysCommand::Delete { id } => {
            if !util::confirm(&format!("Delete API key {id}?"), global.yes)? {
                return Ok(());
            }
            client
                .delete_api_key(id)
                .await
                .map_err(|e| util::not_found_as(e, "API key", id, "keys list"))?;
            output::print_status(&format!("API key {id} deleted"), global.quiet);
            Ok(())
        }
    }
}
