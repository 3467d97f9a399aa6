// grafctl-api: Async, version-aware client for the Grafana HTTP management API

pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod registry;
pub mod transport;
pub mod v5;

pub use auth::{AuthStrategy, Credentials};
pub use client::GrafanaApi;
pub use error::Error;
pub use registry::{ClientRegistry, client_for_version};
pub use transport::{TlsMode, TransportConfig};
pub use v5::GrafanaClientV5;
