// Folder endpoints

use tracing::debug;

use super::GrafanaClientV5;
use crate::error::Error;
use crate::models::{CreateFolderRequest, Folder, FolderStatus};

/// Page size for the folder listing. The endpoint is not paginated further.
const FOLDER_LIST_LIMIT: u32 = 10_000;

impl GrafanaClientV5 {
    /// `GET /api/folders?limit=10000`
    pub async fn list_folders(&self) -> Result<Vec<Folder>, Error> {
        self.get("/api/folders", &[("limit", FOLDER_LIST_LIMIT.to_string())])
            .await
    }

    /// `GET /api/folders/id/{id}`; 404 is `Ok(None)`.
    pub async fn get_folder(&self, id: i64) -> Result<Option<Folder>, Error> {
        self.get_optional(&format!("/api/folders/id/{id}")).await
    }

    /// `POST /api/folders`
    pub async fn create_folder(&self, uid: &str, title: &str) -> Result<Folder, Error> {
        debug!(uid, title, "creating folder");
        self.post("/api/folders", &CreateFolderRequest { uid, title })
            .await
    }

    /// Look the folder up by id and create it from `uid`/`title` if the
    /// server reports it missing. Any 200 counts as present; its body is
    /// not read.
    ///
    /// Not atomic: a concurrent creator makes the POST fail with a 409/412
    /// [`Error::UnexpectedStatus`] (see [`Error::is_conflict`]).
    pub async fn ensure_folder_exists(
        &self,
        id: i64,
        uid: &str,
        title: &str,
    ) -> Result<FolderStatus, Error> {
        if self.exists(&format!("/api/folders/id/{id}")).await? {
            debug!(id, "folder exists");
            return Ok(FolderStatus::Existing);
        }
        let folder = self.create_folder(uid, title).await?;
        Ok(FolderStatus::Created { id: folder.id })
    }
}
