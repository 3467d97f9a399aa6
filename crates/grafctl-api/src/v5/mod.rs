// Grafana 5.x client
//
// Transport mechanics live in `client`; each sibling module adds one
// endpoint group as inherent methods. The `GrafanaApi` impl below forwards
// to those methods so the client can be handed out as a trait object.

mod api_keys;
pub mod client;
mod dashboards;
mod datasources;
mod folders;
mod notifications;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::SecretString;

pub use client::GrafanaClientV5;

use crate::client::GrafanaApi;
use crate::error::Error;
use crate::models::{
    ApiKey, Board, DashboardWithMeta, DataSource, Folder, FolderStatus, NotificationChannel,
    OrgRole,
};

/// Registry key for this client.
pub const VERSION: &str = "5.x";

#[async_trait]
impl GrafanaApi for GrafanaClientV5 {
    fn api_version(&self) -> &'static str {
        VERSION
    }

    async fn list_dashboards(&self) -> Result<Vec<Board>, Error> {
        GrafanaClientV5::list_dashboards(self).await
    }

    async fn search_dashboards(&self, title: &str, folder_id: i64) -> Result<Vec<Board>, Error> {
        GrafanaClientV5::search_dashboards(self, title, folder_id).await
    }

    async fn list_dashboards_in_folder(&self, folder_id: i64) -> Result<Vec<Board>, Error> {
        GrafanaClientV5::list_dashboards_in_folder(self, folder_id).await
    }

    async fn find_dashboard_by_title(&self, title: &str) -> Result<Option<Board>, Error> {
        GrafanaClientV5::find_dashboard_by_title(self, title).await
    }

    async fn create_dashboard(
        &self,
        board: &Board,
        folder_id: i64,
        overwrite: bool,
    ) -> Result<Board, Error> {
        GrafanaClientV5::create_dashboard(self, board, folder_id, overwrite).await
    }

    async fn delete_dashboard(&self, uid: &str) -> Result<bool, Error> {
        GrafanaClientV5::delete_dashboard(self, uid).await
    }

    async fn get_dashboard(&self, uid: &str) -> Result<Board, Error> {
        GrafanaClientV5::get_dashboard(self, uid).await
    }

    async fn get_dashboard_with_meta(&self, uid: &str) -> Result<DashboardWithMeta, Error> {
        GrafanaClientV5::get_dashboard_with_meta(self, uid).await
    }

    async fn list_folders(&self) -> Result<Vec<Folder>, Error> {
        GrafanaClientV5::list_folders(self).await
    }

    async fn get_folder(&self, id: i64) -> Result<Option<Folder>, Error> {
        GrafanaClientV5::get_folder(self, id).await
    }

    async fn create_folder(&self, uid: &str, title: &str) -> Result<Folder, Error> {
        GrafanaClientV5::create_folder(self, uid, title).await
    }

    async fn ensure_folder_exists(
        &self,
        id: i64,
        uid: &str,
        title: &str,
    ) -> Result<FolderStatus, Error> {
        GrafanaClientV5::ensure_folder_exists(self, id, uid, title).await
    }

    async fn create_api_key(
        &self,
        name: &str,
        role: OrgRole,
        ttl: Option<Duration>,
    ) -> Result<SecretString, Error> {
        GrafanaClientV5::create_api_key(self, name, role, ttl).await
    }

    async fn list_api_keys(&self) -> Result<Vec<ApiKey>, Error> {
        GrafanaClientV5::list_api_keys(self).await
    }

    async fn delete_api_key(&self, id: i64) -> Result<bool, Error> {
        GrafanaClientV5::delete_api_key(self, id).await
    }

    async fn list_data_sources(&self) -> Result<Vec<DataSource>, Error> {
        GrafanaClientV5::list_data_sources(self).await
    }

    async fn get_data_source(&self, id: i64) -> Result<DataSource, Error> {
        GrafanaClientV5::get_data_source(self, id).await
    }

    async fn create_data_source(&self, data_source: &mut DataSource) -> Result<(), Error> {
        GrafanaClientV5::create_data_source(self, data_source).await
    }

    async fn delete_data_source(&self, id: i64) -> Result<(), Error> {
        GrafanaClientV5::delete_data_source(self, id).await
    }

    async fn list_notification_channels(&self) -> Result<Vec<NotificationChannel>, Error> {
        GrafanaClientV5::list_notification_channels(self).await
    }

    async fn create_notification_channel(
        &self,
        channel: &mut NotificationChannel,
    ) -> Result<(), Error> {
        GrafanaClientV5::create_notification_channel(self, channel).await
    }
}
