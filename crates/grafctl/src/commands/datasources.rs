//! Data source command handlers.

use tabled::Tabled;

use grafctl_api::GrafanaApi;
use grafctl_api::models::DataSource;

use crate::cli::{DatasourcesArgs, DatasourcesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct DataSourceRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "URL")]
    url: String,
    #[tabled(rename = "Default")]
    default: String,
}

impl From<&DataSource> for DataSourceRow {
    fn from(d: &DataSource) -> Self {
        Self {
            id: d.id,
            name: d.name.clone(),
            kind: d.kind.clone(),
            url: d.url.clone(),
            default: if d.is_default { "*".into() } else { String::new() },
        }
    }
}

fn detail(d: &DataSource) -> String {
    let mut lines = vec![
        format!("ID:       {}", d.id),
        format!("Name:     {}", d.name),
        format!("Type:     {}", d.kind),
        format!("URL:      {}", d.url),
        format!("Access:   {}", d.access),
        format!("Default:  {}", d.is_default),
    ];
    if !d.database.is_empty() {
        lines.push(format!("Database: {}", d.database));
    }
    if !d.user.is_empty() {
        lines.push(format!("User:     {}", d.user));
    }
    lines.join("\n")
}

pub async fn handle(
    client: &dyn GrafanaApi,
    args: DatasourcesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        DatasourcesCommand::List => {
            let all = client.list_data_sources().await?;
            let out = output::render_list(
                &global.output,
                &all,
                |d| DataSourceRow::from(d),
                |d| d.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DatasourcesCommand::Get { id } => {
            let ds = client
                .get_data_source(id)
                .await
                .map_err(|e| util::not_found_as(e, "data source", id, "datasources list"))?;
            let out = output::render_single(&global.output, &ds, detail, |d| d.id.to_string())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DatasourcesCommand::Create { from_file } => {
            let mut ds: DataSource = util::read_model(&from_file)?;
            client.create_data_source(&mut ds).await?;
            output::print_status(
                &format!("Data source '{}' created (id {})", ds.name, ds.id),
                global.quiet,
            );
            let out = output::render_single(&global.output, &ds, detail, |d| d.id.to_string())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DatasourcesCommand::Delete { id } => {
            if !util::confirm(&format!("Delete data source {id}?"), global.yes)? {
                return Ok(());
            }
            client
                .delete_data_source(id)
                .await
                .map_err(|e| util::not_found_as(e, "data source", id, "datasources list"))?;
            output::print_status(&format!("Data source {id} deleted"), global.quiet);
            Ok(())
        }
    }
}
