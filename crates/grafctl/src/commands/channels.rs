//! Notification channel command handlers.

use tabled::Tabled;

use grafctl_api::GrafanaApi;
use grafctl_api::models::NotificationChannel;

use crate::cli::{ChannelsArgs, ChannelsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct ChannelRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Default")]
    default: String,
    #[tabled(rename = "Reminder")]
    reminder: String,
}

impl From<&NotificationChannel> for ChannelRow {
    fn from(c: &NotificationChannel) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
            kind: c.kind.clone(),
            default: if c.is_default { "*".into() } else { String::new() },
            reminder: if c.send_reminder {
                c.frequency.clone().unwrap_or_else(|| "on".into())
            } else {
                String::new()
            },
        }
    }
}

pub async fn handle(
    client: &dyn GrafanaApi,
    args: ChannelsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ChannelsCommand::List => {
            let channels = client.list_notification_channels().await?;
            let out = output::render_list(
                &global.output,
                &channels,
                |c| ChannelRow::from(c),
                |c| c.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ChannelsCommand::Create { from_file } => {
            let mut channel: NotificationChannel = util::read_model(&from_file)?;
            client.create_notification_channel(&mut channel).await?;
            output::print_status(
                &format!("Channel '{}' created (id {})", channel.name, channel.id),
                global.quiet,
            );
            let out = output::render_single(
                &global.output,
                &channel,
                |c| format!("{} ({}) id {}", c.name, c.kind, c.id),
                |c| c.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
