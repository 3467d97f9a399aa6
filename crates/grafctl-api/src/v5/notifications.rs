// Alert notification channel endpoints

use serde::Deserialize;
use tracing::debug;

use super::GrafanaClientV5;
use crate::error::Error;
use crate::models::NotificationChannel;

/// The create call echoes the whole channel; only the id matters here.
#[derive(Deserialize)]
struct CreatedChannel {
    id: i64,
}

impl GrafanaClientV5 {
    /// `GET /api/alert-notifications`
    pub async fn list_notification_channels(&self) -> Result<Vec<NotificationChannel>, Error> {
        self.get("/api/alert-notifications", &[]).await
    }

    /// `POST /api/alert-notifications`; the assigned id is written into `channel`.
    pub async fn create_notification_channel(
        &self,
        channel: &mut NotificationChannel,
    ) -> Result<(), Error> {
        debug!(name = %channel.name, kind = %channel.kind, "creating notification channel");
        let created: CreatedChannel = self.post("/api/alert-notifications", &*channel).await?;
        channel.id = created.id;
        Ok(())
    }
}
