//! Dashboard command handlers.

use std::fmt::Write as _;

use tabled::Tabled;

use grafctl_api::GrafanaApi;
use grafctl_api::models::{Board, DashboardWithMeta};

use crate::cli::{DashboardsArgs, DashboardsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DashboardRow {
    #[tabled(rename = "UID")]
    uid: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Folder")]
    folder: String,
    #[tabled(rename = "Tags")]
    tags: String,
    #[tabled(rename = "URL")]
    url: String,
}

impl From<&Board> for DashboardRow {
    fn from(b: &Board) -> Self {
        Self {
            uid: b.uid.clone(),
            title: b.title.clone(),
            folder: if b.folder_title.is_empty() {
                "General".into()
            } else {
                b.folder_title.clone()
            },
            tags: output::join_tags(&b.tags),
            url: b.url.clone().unwrap_or_default(),
        }
    }
}

fn detail(b: &Board) -> String {
    let panels: usize = b.rows.iter().map(|r| r.panels.len()).sum();
    let mut out = String::new();
    let _ = writeln!(out, "Title:    {}", b.title);
    let _ = writeln!(out, "UID:      {}", b.uid);
    let _ = writeln!(out, "ID:       {}", util::opt_cell(b.id));
    let _ = writeln!(out, "Version:  {}", b.version);
    let _ = writeln!(out, "Timezone: {}", b.timezone);
    let _ = writeln!(out, "Tags:     {}", output::join_tags(&b.tags));
    let _ = writeln!(out, "Editable: {}", b.editable);
    if let Some(ref url) = b.url {
        let _ = writeln!(out, "URL:      {url}");
    }
    let _ = write!(out, "Rows:     {} ({panels} panels)", b.rows.len());
    out
}

fn detail_with_meta(d: &DashboardWithMeta) -> String {
    let mut out = detail(&d.dashboard);
    let meta = &d.meta;
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Folder:   {} (id {})",
        if meta.folder_title.is_empty() {
            "General"
        } else {
            meta.folder_title.as_str()
        },
        meta.folder_id
    );
    let _ = writeln!(out, "Slug:     {}", meta.slug);
    let _ = writeln!(out, "Can save: {}", meta.can_save);
    let _ = write!(
        out,
        "Updated:  {} by {}",
        util::opt_cell(meta.updated.map(|t| t.to_rfc3339())),
        meta.updated_by
    );
    out
}

/// Accept either a bare dashboard model or the `{"dashboard": ...}`
/// envelope that `GET /api/dashboards/uid/...` returns.
fn parse_board(mut value: serde_json::Value) -> Result<Board, CliError> {
    if let Some(inner) = value.get_mut("dashboard").map(serde_json::Value::take) {
        value = inner;
    }
    Ok(serde_json::from_value(value)?)
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    client: &dyn GrafanaApi,
    args: DashboardsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        DashboardsCommand::List { folder } => {
            let boards = match folder {
                Some(id) => client.list_dashboards_in_folder(id).await?,
                None => client.list_dashboards().await?,
            };
            let out = output::render_list(
                &global.output,
                &boards,
                |b| DashboardRow::from(b),
                |b| b.uid.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DashboardsCommand::Search { title, folder } => {
            let boards = client.search_dashboards(&title, folder).await?;
            let out = output::render_list(
                &global.output,
                &boards,
                |b| DashboardRow::from(b),
                |b| b.uid.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DashboardsCommand::Get { uid, meta } => {
            let out = if meta {
                let full = client
                    .get_dashboard_with_meta(&uid)
                    .await
                    .map_err(|e| util::not_found_as(e, "dashboard", &uid, "dashboards list"))?;
                output::render_single(&global.output, &full, detail_with_meta, |d| {
                    d.dashboard.uid.clone()
                })?
            } else {
                let board = client
                    .get_dashboard(&uid)
                    .await
                    .map_err(|e| util::not_found_as(e, "dashboard", &uid, "dashboards list"))?;
                output::render_single(&global.output, &board, detail, |b| b.uid.clone())?
            };
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DashboardsCommand::Exists { title } => {
            let board = client
                .find_dashboard_by_title(&title)
                .await?
                .ok_or_else(|| CliError::NotFound {
                    resource_type: "dashboard".into(),
                    identifier: title.clone(),
                    list_command: "dashboards list".into(),
                })?;
            let out = output::render_single(
                &global.output,
                &board,
                |b| format!("{} ({})", b.title, b.uid),
                |b| b.uid.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DashboardsCommand::Create {
            from_file,
            folder,
            overwrite,
            title,
        } => {
            let mut board = parse_board(util::read_json_file(&from_file)?)?;
            if let Some(title) = title {
                board.title = title;
            }
            if board.title.is_empty() {
                return Err(CliError::Validation {
                    field: "title".into(),
                    reason: "dashboard has no title; set one in the file or pass --title".into(),
                });
            }

            let saved = client.create_dashboard(&board, folder, overwrite).await?;
            output::print_status(
                &format!(
                    "Dashboard '{}' saved (uid {}, version {})",
                    saved.title, saved.uid, saved.version
                ),
                global.quiet,
            );
            let out = output::render_single(
                &global.output,
                &saved,
                |b| b.url.clone().unwrap_or_default(),
                |b| b.uid.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DashboardsCommand::Delete { uid } => {
            if !util::confirm(&format!("Delete dashboard '{uid}'?"), global.yes)? {
                return Ok(());
            }
            client
                .delete_dashboard(&uid)
                .await
                .map_err(|e| util::not_found_as(e, "dashboard", &uid, "dashboards list"))?;
            output::print_status(&format!("Dashboard '{uid}' deleted"), global.quiet);
            Ok(())
        }
    }
}
