//! Command dispatch: bridges CLI args -> client calls -> output formatting.

pub mod channels;
pub mod config_cmd;
pub mod dashboards;
pub mod datasources;
pub mod folders;
pub mod keys;
pub mod util;

use grafctl_api::GrafanaApi;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a server-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    client: &dyn GrafanaApi,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Dashboards(args) => dashboards::handle(client, args, global).await,
        Command::Folders(args) => folders::handle(client, args, global).await,
        Command::Datasources(args) => datasources::handle(client, args, global).await,
        Command::Channels(args) => channels::handle(client, args, global).await,
        Command::Keys(args) => keys::handle(client, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
