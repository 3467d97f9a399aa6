// Version-independent client interface
//
// Every supported server API revision implements `GrafanaApi`; callers get a
// `Box<dyn GrafanaApi>` from the registry and never name the concrete type.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::SecretString;

use crate::error::Error;
use crate::models::{
    ApiKey, Board, DashboardWithMeta, DataSource, Folder, FolderStatus, NotificationChannel,
    OrgRole,
};

/// Operations offered by every Grafana API version.
///
/// Each call is a single stateless round trip (`ensure_folder_exists` is a
/// read followed by a conditional write, not atomic). No retries.
#[async_trait]
pub trait GrafanaApi: Send + Sync {
    /// Version key this client was registered under (e.g. `"5.x"`).
    fn api_version(&self) -> &'static str;

    // ── Dashboards ───────────────────────────────────────────────────

    /// Summaries of every dashboard, in server order.
    async fn list_dashboards(&self) -> Result<Vec<Board>, Error>;

    async fn search_dashboards(&self, title: &str, folder_id: i64) -> Result<Vec<Board>, Error>;

    async fn list_dashboards_in_folder(&self, folder_id: i64) -> Result<Vec<Board>, Error>;

    /// First dashboard whose title equals `title` exactly (case-sensitive).
    async fn find_dashboard_by_title(&self, title: &str) -> Result<Option<Board>, Error>;

    /// Save `board` into `folder_id` and return it with the server-assigned
    /// id, uid, url and version. The caller's board is left untouched.
    async fn create_dashboard(
        &self,
        board: &Board,
        folder_id: i64,
        overwrite: bool,
    ) -> Result<Board, Error>;

    async fn delete_dashboard(&self, uid: &str) -> Result<bool, Error>;

    /// Full dashboard document (rows and panels).
    async fn get_dashboard(&self, uid: &str) -> Result<Board, Error>;

    async fn get_dashboard_with_meta(&self, uid: &str) -> Result<DashboardWithMeta, Error>;

    // ── Folders ──────────────────────────────────────────────────────

    async fn list_folders(&self) -> Result<Vec<Folder>, Error>;

    /// `None` when the server answers 404.
    async fn get_folder(&self, id: i64) -> Result<Option<Folder>, Error>;

    async fn create_folder(&self, uid: &str, title: &str) -> Result<Folder, Error>;

    async fn ensure_folder_exists(
        &self,
        id: i64,
        uid: &str,
        title: &str,
    ) -> Result<FolderStatus, Error>;

    // ── API keys ─────────────────────────────────────────────────────

    /// Issue a key. The returned secret cannot be fetched again.
    async fn create_api_key(
        &self,
        name: &str,
        role: OrgRole,
        ttl: Option<Duration>,
    ) -> Result<SecretString, Error>;

    async fn list_api_keys(&self) -> Result<Vec<ApiKey>, Error>;

    async fn delete_api_key(&self, id: i64) -> Result<bool, Error>;

    // ── Data sources ─────────────────────────────────────────────────

    async fn list_data_sources(&self) -> Result<Vec<DataSource>, Error>;

    async fn get_data_source(&self, id: i64) -> Result<DataSource, Error>;

    /// Create `data_source` and write the assigned id back into it.
    async fn create_data_source(&self, data_source: &mut DataSource) -> Result<(), Error>;

    async fn delete_data_source(&self, id: i64) -> Result<(), Error>;

    // ── Notification channels ────────────────────────────────────────

    async fn list_notification_channels(&self) -> Result<Vec<NotificationChannel>, Error>;

    /// Create `channel` and write the assigned id back into it.
    async fn create_notification_channel(
        &self,
        channel: &mut NotificationChannel,
    ) -> Result<(), Error>;
}
