use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::null_as_default;

/// Server status string for an accepted dashboard save.
pub const SAVE_SUCCESS: &str = "success";

/// Timezone applied to new dashboards that don't set one.
pub const DEFAULT_TIMEZONE: &str = "browser";

// ── Board ────────────────────────────────────────────────────────────

/// A Grafana dashboard.
///
/// Search endpoints return summaries (no rows); `GET /api/dashboards/uid/…`
/// returns the full document. Anything not modelled here lands in `extra`
/// so a fetched dashboard can be posted back without loss.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub editable: bool,
    #[serde(default)]
    pub hide_controls: bool,
    #[serde(default)]
    pub style: String,
    #[serde(default)]
    pub timezone: String,
    #[serde(default)]
    pub version: u64,
    #[serde(default)]
    pub is_starred: bool,
    #[serde(default)]
    pub folder_id: i64,
    #[serde(default)]
    pub folder_uid: String,
    #[serde(default)]
    pub folder_title: String,
    #[serde(default)]
    pub folder_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rows: Vec<Row>,
    /// Catch-all for fields this crate doesn't model (`time`, `templating`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Board {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Copy of this board prepared for a save request.
    pub(crate) fn for_save(&self) -> Self {
        let mut board = self.clone();
        if board.timezone.is_empty() {
            board.timezone = DEFAULT_TIMEZONE.to_owned();
        }
        board
    }
}

/// A dashboard row. Owns its panels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub show_title: bool,
    #[serde(default)]
    pub collapse: bool,
    #[serde(default)]
    pub editable: bool,
    /// `"250px"` in most dashboards, a bare number in some.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub height: Value,
    #[serde(default, deserialize_with = "null_as_default")]
    pub panels: Vec<Panel>,
}

/// A visualization. Opaque to this crate: only the identifying fields are
/// typed, the rest (targets, axes, thresholds, ...) passes through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Panel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub panel_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_pos: Option<GridPos>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridPos {
    pub h: i64,
    pub w: i64,
    pub x: i64,
    pub y: i64,
}

// ── Save envelope ────────────────────────────────────────────────────

/// Body of `POST /api/dashboards/db`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDashboardRequest<'a> {
    pub dashboard: &'a Board,
    /// Folder to save the dashboard in (`0` is the General folder).
    pub folder_id: i64,
    /// Overwrite an existing dashboard with the same title/uid.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub overwrite: bool,
    /// Commit message for the version history.
    pub message: String,
}

/// Answer of `POST /api/dashboards/db`.
///
/// `status` is `"success"` on save; otherwise one of `version-mismatch`,
/// `name-exists` or `plugin-dashboard` with a human `message`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDashboardResponse {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub version: u64,
    #[serde(default)]
    pub message: Option<String>,
}

impl CreateDashboardResponse {
    pub fn is_success(&self) -> bool {
        self.status == SAVE_SUCCESS
    }
}

// ── Fetch envelope ───────────────────────────────────────────────────

/// Answer of `GET /api/dashboards/uid/{uid}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardWithMeta {
    #[serde(default)]
    pub meta: DashboardMeta,
    pub dashboard: Board,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMeta {
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub can_save: bool,
    #[serde(default)]
    pub can_edit: bool,
    #[serde(default)]
    pub can_admin: bool,
    #[serde(default)]
    pub can_star: bool,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub expires: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_by: String,
    #[serde(default)]
    pub created_by: String,
    #[serde(default)]
    pub version: u64,
    #[serde(default)]
    pub has_acl: bool,
    #[serde(default)]
    pub is_folder: bool,
    #[serde(default)]
    pub folder_id: i64,
    #[serde(default)]
    pub folder_title: String,
    #[serde(default)]
    pub folder_url: String,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn sample_board() -> Board {
        let panel: Panel = serde_json::from_value(json!({
            "id": 2,
            "title": "CPU",
            "type": "graph",
            "gridPos": { "h": 8, "w": 12, "x": 0, "y": 0 },
            "targets": [{ "expr": "rate(cpu_seconds_total[5m])", "refId": "A" }],
            "yaxes": [{ "format": "percent", "show": true }]
        }))
        .unwrap();

        Board {
            id: Some(7),
            uid: "abc".into(),
            title: "CPU Usage".into(),
            tags: vec!["infra".into(), "cpu".into(), "prod".into()],
            timezone: "utc".into(),
            version: 3,
            folder_id: 3,
            folder_uid: "ops".into(),
            folder_title: "Ops".into(),
            rows: vec![
                Row {
                    title: "Overview".into(),
                    height: json!("250px"),
                    panels: vec![panel.clone()],
                    ..Row::default()
                },
                Row {
                    title: "Details".into(),
                    collapse: true,
                    panels: vec![panel.clone(), panel],
                    ..Row::default()
                },
            ],
            ..Board::default()
        }
    }

    #[test]
    fn board_round_trips() {
        let board = sample_board();
        let encoded = serde_json::to_string(&board).unwrap();
        let decoded: Board = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, board);
        assert_eq!(decoded.tags, vec!["infra", "cpu", "prod"]);
        assert_eq!(decoded.rows[1].panels.len(), 2);
        assert_eq!(
            decoded.rows[0].panels[0].extra["targets"][0]["refId"],
            json!("A")
        );
    }

    #[test]
    fn unknown_fields_survive_round_trip() {
        let raw = json!({
            "uid": "abc",
            "title": "T",
            "schemaVersion": 16,
            "time": { "from": "now-6h", "to": "now" }
        });
        let board: Board = serde_json::from_value(raw).unwrap();
        assert_eq!(board.extra["schemaVersion"], json!(16));
        let back = serde_json::to_value(&board).unwrap();
        assert_eq!(back["time"]["from"], json!("now-6h"));
    }

    #[test]
    fn unset_id_and_url_are_omitted() {
        let value = serde_json::to_value(Board::new("New")).unwrap();
        assert!(value.get("id").is_none());
        assert!(value.get("url").is_none());
        assert_eq!(value["title"], json!("New"));
        assert_eq!(value["rows"], json!([]));
    }

    #[test]
    fn null_lists_decode_as_empty() {
        let board: Board =
            serde_json::from_value(json!({ "title": "x", "tags": null, "rows": null })).unwrap();
        assert!(board.tags.is_empty());
        assert!(board.rows.is_empty());
    }

    #[test]
    fn for_save_defaults_timezone_only_when_empty() {
        let board = Board::new("a").for_save();
        assert_eq!(board.timezone, DEFAULT_TIMEZONE);

        let mut utc = Board::new("b");
        utc.timezone = "utc".into();
        assert_eq!(utc.for_save().timezone, "utc");
    }

    #[test]
    fn save_request_omits_false_overwrite() {
        let board = Board::new("CPU Usage");
        let request = CreateDashboardRequest {
            dashboard: &board,
            folder_id: 3,
            overwrite: false,
            message: String::new(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("overwrite").is_none());
        assert_eq!(value["folderId"], json!(3));
        assert_eq!(value["dashboard"]["title"], json!("CPU Usage"));

        let request = CreateDashboardRequest {
            overwrite: true,
            ..request
        };
        assert_eq!(serde_json::to_value(&request).unwrap()["overwrite"], json!(true));
    }

    #[test]
    fn fetch_envelope_unwraps() {
        let raw = json!({
            "meta": {
                "type": "db",
                "canSave": true,
                "slug": "cpu-usage",
                "created": "2018-05-01T10:00:00Z",
                "expires": "0001-01-01T00:00:00Z",
                "folderId": 3
            },
            "dashboard": { "id": 1, "uid": "abc", "title": "CPU Usage", "rows": [] }
        });
        let envelope: DashboardWithMeta = serde_json::from_value(raw).unwrap();
        assert_eq!(envelope.meta.kind, "db");
        assert_eq!(envelope.meta.folder_id, 3);
        assert!(envelope.meta.created.is_some());
        assert_eq!(envelope.dashboard.uid, "abc");
    }
}
