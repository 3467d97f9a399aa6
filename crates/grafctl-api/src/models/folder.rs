use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A dashboard folder.
///
/// `GET /api/folders` returns only `id`, `uid` and `title`; the single-folder
/// and create endpoints fill in permissions and audit fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: i64,
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub has_acl: bool,
    #[serde(default)]
    pub can_save: bool,
    #[serde(default)]
    pub can_edit: bool,
    #[serde(default)]
    pub can_admin: bool,
    #[serde(default)]
    pub created_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub version: i64,
}

/// Body of `POST /api/folders`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateFolderRequest<'a> {
    pub uid: &'a str,
    pub title: &'a str,
}

/// Outcome of `ensure_folder_exists`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolderStatus {
    /// The folder was already there; nothing was written.
    Existing,
    /// The folder was missing and has been created with this id.
    Created { id: i64 },
}

impl FolderStatus {
    pub fn created(self) -> bool {
        matches!(self, Self::Created { .. })
    }

    /// Id of the newly created folder. `None` when it already existed.
    pub fn id(self) -> Option<i64> {
        match self {
            Self::Created { id } => Some(id),
            Self::Existing => None,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use serde_json::json;

    use super::*;

    #[test]
    fn listing_entry_decodes_without_audit_fields() {
        let folder: Folder =
            serde_json::from_value(json!({ "id": 1, "uid": "nErXDvCkzz", "title": "Department ABC" }))
                .unwrap();
        assert_eq!(folder.id, 1);
        assert_eq!(folder.uid, "nErXDvCkzz");
        assert!(folder.created.is_none());
    }

    #[test]
    fn full_folder_decodes_timestamps() {
        let folder: Folder = serde_json::from_value(json!({
            "id": 1,
            "uid": "nErXDvCkzz",
            "title": "Department ABC",
            "url": "/dashboards/f/nErXDvCkzz/department-abc",
            "hasAcl": false,
            "canSave": true,
            "canEdit": true,
            "canAdmin": true,
            "createdBy": "admin",
            "created": "2018-01-31T17:43:12+01:00",
            "updatedBy": "admin",
            "updated": "2018-01-31T17:43:12+01:00",
            "version": 1
        }))
        .unwrap();
        assert!(folder.can_admin);
        assert_eq!(folder.version, 1);
        assert_eq!(
            folder.created.unwrap().to_rfc3339(),
            "2018-01-31T16:43:12+00:00"
        );
    }

    #[test]
    fn folder_status_helpers() {
        assert!(!FolderStatus::Existing.created());
        assert_eq!(FolderStatus::Existing.id(), None);
        assert!(FolderStatus::Created { id: 12 }.created());
        assert_eq!(FolderStatus::Created { id: 12 }.id(), Some(12));
    }
}
