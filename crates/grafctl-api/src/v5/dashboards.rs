// Dashboard endpoints
//
// Search (`/api/search`) returns summaries without rows; the uid endpoint
// returns the full document wrapped in a `{meta, dashboard}` envelope.

use tracing::debug;

use super::GrafanaClientV5;
use super::client::path_segment;
use crate::error::Error;
use crate::models::{
    Board, CreateDashboardRequest, CreateDashboardResponse, DashboardWithMeta,
};

impl GrafanaClientV5 {
    /// `GET /api/search?type=dash-db`
    pub async fn list_dashboards(&self) -> Result<Vec<Board>, Error> {
        self.get("/api/search", &[("type", "dash-db".to_owned())])
            .await
    }

    /// `GET /api/search?query={title}&folderIds={folder_id}`
    pub async fn search_dashboards(&self, title: &str, folder_id: i64) -> Result<Vec<Board>, Error> {
        self.get(
            "/api/search",
            &[
                ("query", title.to_owned()),
                ("folderIds", folder_id.to_string()),
            ],
        )
        .await
    }

    /// `GET /api/search?folderIds={folder_id}`
    pub async fn list_dashboards_in_folder(&self, folder_id: i64) -> Result<Vec<Board>, Error> {
        self.get("/api/search", &[("folderIds", folder_id.to_string())])
            .await
    }

    /// Linear scan of [`list_dashboards`](Self::list_dashboards); first exact
    /// title match wins.
    pub async fn find_dashboard_by_title(&self, title: &str) -> Result<Option<Board>, Error> {
        let boards = self.list_dashboards().await?;
        Ok(boards.into_iter().find(|b| b.title == title))
    }

    /// `POST /api/dashboards/db`
    ///
    /// An empty timezone is sent as `"browser"`. A 200 answer whose `status`
    /// isn't `"success"` becomes [`Error::Dashboard`].
    pub async fn create_dashboard(
        &self,
        board: &Board,
        folder_id: i64,
        overwrite: bool,
    ) -> Result<Board, Error> {
        let mut saved = board.for_save();
        debug!(title = %saved.title, folder_id, overwrite, "saving dashboard");

        let request = CreateDashboardRequest {
            dashboard: &saved,
            folder_id,
            overwrite,
            message: String::new(),
        };
        let resp: CreateDashboardResponse = self.post("/api/dashboards/db", &request).await?;

        if !resp.is_success() {
            return Err(Error::Dashboard {
                status: resp.status,
                message: resp.message.unwrap_or_default(),
            });
        }

        saved.id = resp.id;
        saved.uid = resp.uid;
        saved.url = Some(resp.url);
        saved.version = resp.version;
        Ok(saved)
    }

    /// `DELETE /api/dashboards/uid/{uid}`
    pub async fn delete_dashboard(&self, uid: &str) -> Result<bool, Error> {
        let uid = path_segment("uid", uid)?;
        self.delete(&format!("/api/dashboards/uid/{uid}")).await?;
        Ok(true)
    }

    /// `GET /api/dashboards/uid/{uid}`, envelope included.
    pub async fn get_dashboard_with_meta(&self, uid: &str) -> Result<DashboardWithMeta, Error> {
        let uid = path_segment("uid", uid)?;
        self.get(&format!("/api/dashboards/uid/{uid}"), &[]).await
    }

    /// `GET /api/dashboards/uid/{uid}`, envelope stripped.
    pub async fn get_dashboard(&self, uid: &str) -> Result<Board, Error> {
        Ok(self.get_dashboard_with_meta(uid).await?.dashboard)
    }
}
