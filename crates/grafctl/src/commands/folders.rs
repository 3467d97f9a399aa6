//! Folder command handlers.

use serde::Serialize;
use tabled::Tabled;

use grafctl_api::GrafanaApi;
use grafctl_api::models::{Folder, FolderStatus};

use crate::cli::{FoldersArgs, FoldersCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct FolderRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "UID")]
    uid: String,
    #[tabled(rename = "Title")]
    title: String,
}

impl From<&Folder> for FolderRow {
    fn from(f: &Folder) -> Self {
        Self {
            id: f.id,
            uid: f.uid.clone(),
            title: f.title.clone(),
        }
    }
}

fn detail(f: &Folder) -> String {
    let mut lines = vec![
        format!("ID:       {}", f.id),
        format!("UID:      {}", f.uid),
        format!("Title:    {}", f.title),
        format!("Version:  {}", f.version),
        format!("Can edit: {}", f.can_edit),
    ];
    if !f.url.is_empty() {
        lines.push(format!("URL:      {}", f.url));
    }
    if let Some(created) = f.created {
        lines.push(format!("Created:  {} by {}", created.to_rfc3339(), f.created_by));
    }
    lines.join("\n")
}

/// Serializable result of `folders ensure`.
#[derive(Serialize)]
struct EnsureOutcome {
    created: bool,
    id: i64,
}

impl EnsureOutcome {
    fn new(status: FolderStatus, requested_id: i64) -> Self {
        Self {
            created: status.created(),
            id: status.id().unwrap_or(requested_id),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    client: &dyn GrafanaApi,
    args: FoldersArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        FoldersCommand::List => {
            let folders = client.list_folders().await?;
            let out = output::render_list(
                &global.output,
                &folders,
                |f| FolderRow::from(f),
                |f| f.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        FoldersCommand::Get { id } => {
            let folder = client
                .get_folder(id)
                .await?
                .ok_or_else(|| CliError::NotFound {
                    resource_type: "folder".into(),
                    identifier: id.to_string(),
                    list_command: "folders list".into(),
                })?;
            let out = output::render_single(&global.output, &folder, detail, |f| f.uid.clone())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        FoldersCommand::Create { uid, title } => {
            let folder = client.create_folder(&uid, &title).await?;
            output::print_status(
                &format!("Folder '{}' created (id {})", folder.title, folder.id),
                global.quiet,
            );
            let out = output::render_single(&global.output, &folder, detail, |f| f.id.to_string())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        FoldersCommand::Ensure { id, uid, title } => {
            let status = client.ensure_folder_exists(id, &uid, &title).await?;
            let outcome = EnsureOutcome::new(status, id);
            let out = output::render_single(
                &global.output,
                &outcome,
                |o| {
                    if o.created {
                        format!("Folder '{title}' created (id {})", o.id)
                    } else {
                        format!("Folder {} already exists", o.id)
                    }
                },
                |o| o.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_outcome_reports_new_id() {
        let outcome = EnsureOutcome::new(FolderStatus::Created { id: 42 }, 12);
        assert!(outcome.created);
        assert_eq!(outcome.id, 42);

        let outcome = EnsureOutcome::new(FolderStatus::Existing, 12);
        assert!(!outcome.created);
        assert_eq!(outcome.id, 12);
    }

    #[test]
    fn detail_skips_empty_url() {
        let folder = Folder {
            id: 1,
            uid: "infra".into(),
            title: "Infra".into(),
            ..Folder::default()
        };
        let text = detail(&folder);
        assert!(text.contains("Infra"));
        assert!(!text.contains("URL"));
    }
}
