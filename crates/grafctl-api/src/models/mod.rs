// Grafana management API models
//
// Plain serde structures mirroring the server's camelCase JSON. Fields use
// `#[serde(default)]` liberally because payloads differ between search
// summaries, full dashboard documents and server versions.

pub mod api_key;
pub mod dashboard;
pub mod datasource;
pub mod folder;
pub mod notification;

use serde::{Deserialize, Deserializer};

pub use api_key::{ApiKey, CreateApiKeyRequest, CreateApiKeyResponse, OrgRole};
pub use dashboard::{
    Board, CreateDashboardRequest, CreateDashboardResponse, DashboardMeta, DashboardWithMeta,
    GridPos, Panel, Row,
};
pub use datasource::{CreateDataSourceResponse, DataSource};
pub use folder::{CreateFolderRequest, Folder, FolderStatus};
pub use notification::NotificationChannel;

/// Treat an explicit JSON `null` the same as a missing field.
///
/// Older dashboards serialize empty lists as `null` (`"rows": null`).
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
