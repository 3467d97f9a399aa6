use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A configured connection to a metrics/logs backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSource {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub org_id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub type_logo_url: String,
    #[serde(default)]
    pub access: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub database: String,
    #[serde(default)]
    pub basic_auth: bool,
    #[serde(default)]
    pub is_default: bool,
    /// Plugin-specific settings, passed through as-is.
    #[serde(default)]
    pub json_data: Map<String, Value>,
    #[serde(default)]
    pub read_only: bool,
}

/// Answer of `POST /api/datasources`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDataSourceResponse {
    #[serde(default)]
    pub datasource: Option<DataSource>,
    pub id: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub name: String,
}
