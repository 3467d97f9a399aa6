// Data source endpoints

use tracing::debug;

use super::GrafanaClientV5;
use crate::error::Error;
use crate::models::{CreateDataSourceResponse, DataSource};

impl GrafanaClientV5 {
    /// `GET /api/datasources`
    pub async fn list_data_sources(&self) -> Result<Vec<DataSource>, Error> {
        self.get("/api/datasources", &[]).await
    }

    /// `GET /api/datasources/{id}`
    pub async fn get_data_source(&self, id: i64) -> Result<DataSource, Error> {
        self.get(&format!("/api/datasources/{id}"), &[]).await
    }

    /// `POST /api/datasources`; the assigned id is written into `data_source`.
    pub async fn create_data_source(&self, data_source: &mut DataSource) -> Result<(), Error> {
        debug!(name = %data_source.name, kind = %data_source.kind, "creating data source");
        let resp: CreateDataSourceResponse = self.post("/api/datasources", &*data_source).await?;
        data_source.id = resp.id;
        Ok(())
    }

    /// `DELETE /api/datasources/{id}`
    pub async fn delete_data_source(&self, id: i64) -> Result<(), Error> {
        self.delete(&format!("/api/datasources/{id}")).await
    }
}
