// Grafana 5.x HTTP client
//
// Wraps `reqwest::Client` with base-address URL construction, credential
// injection and the two status policies the 5.x endpoints need. Endpoint
// groups (dashboards, folders, ...) are inherent methods in sibling files so
// this module stays focused on transport mechanics.

use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::auth::Credentials;
use crate::error::Error;
use crate::transport::TransportConfig;

/// Client for servers speaking the Grafana 5.x management API.
///
/// The HTTP client is built once, in the constructor, and shared by every
/// call. Safe to use from concurrent tasks.
pub struct GrafanaClientV5 {
    http: reqwest::Client,
    base_url: String,
    credentials: Credentials,
}

impl GrafanaClientV5 {
    /// Create a client bound to `base_url` (e.g. `https://grafana.example.com`
    /// or `http://host:3000/grafana`).
    pub fn new(
        base_url: &str,
        credentials: Credentials,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::with_client(http, base_url, credentials)
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(
        http: reqwest::Client,
        base_url: &str,
        credentials: Credentials,
    ) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self {
            http,
            base_url,
            credentials,
        })
    }

    /// Validate the address and strip any trailing slash, so paths starting
    /// with `/api/...` can be appended verbatim.
    fn normalize_base_url(raw: &str) -> Result<String, Error> {
        let url = Url::parse(raw)?;
        Ok(url.as_str().trim_end_matches('/').to_owned())
    }

    /// The normalized base address.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Start a request for `path`, authenticated and tagged as JSON.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{path}", self.base_url);
        debug!("{method} {url}");
        let builder = self
            .http
            .request(method, url)
            .header(CONTENT_TYPE, "application/json");
        self.credentials.apply(builder)
    }

    /// Send the request and read the whole body.
    async fn execute(
        &self,
        request: RequestBuilder,
        endpoint: &str,
    ) -> Result<(StatusCode, String), Error> {
        let resp = request.send().await?;
        let status = resp.status();
        trace!(endpoint, status = status.as_u16(), "response received");
        let body = resp.text().await?;
        Ok((status, body))
    }

    /// Strict policy: anything but 200 is an error.
    pub(crate) async fn fetch(
        &self,
        request: RequestBuilder,
        endpoint: &str,
    ) -> Result<String, Error> {
        let (status, body) = self.execute(request, endpoint).await?;
        if status == StatusCode::OK {
            Ok(body)
        } else {
            Err(unexpected_status(status, endpoint, body))
        }
    }

    /// Tolerant policy: 200 yields the body, 404 yields `None`.
    pub(crate) async fn fetch_optional(
        &self,
        request: RequestBuilder,
        endpoint: &str,
    ) -> Result<Option<String>, Error> {
        let (status, body) = self.execute(request, endpoint).await?;
        match status {
            StatusCode::OK => Ok(Some(body)),
            StatusCode::NOT_FOUND => Ok(None),
            _ => Err(unexpected_status(status, endpoint, body)),
        }
    }

    /// `GET path?query` and decode the strict response.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, Error> {
        let endpoint = format!("GET {path}");
        let mut request = self.request(Method::GET, path);
        if !query.is_empty() {
            request = request.query(query);
        }
        let body = self.fetch(request, &endpoint).await?;
        decode(&body, &endpoint)
    }

    /// `POST path` with a JSON body and decode the strict response.
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let endpoint = format!("POST {path}");
        let request = self.request(Method::POST, path).json(body);
        let body = self.fetch(request, &endpoint).await?;
        decode(&body, &endpoint)
    }

    /// `DELETE path`; the response body is discarded.
    pub(crate) async fn delete(&self, path: &str) -> Result<(), Error> {
        let endpoint = format!("DELETE {path}");
        let request = self.request(Method::DELETE, path);
        self.fetch(request, &endpoint).await?;
        Ok(())
    }

    /// `GET path` under the tolerant policy, without decoding the body.
    pub(crate) async fn exists(&self, path: &str) -> Result<bool, Error> {
        let endpoint = format!("GET {path}");
        let request = self.request(Method::GET, path);
        Ok(self.fetch_optional(request, &endpoint).await?.is_some())
    }

    /// `GET path` under the tolerant policy.
    pub(crate) async fn get_optional<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Option<T>, Error> {
        let endpoint = format!("GET {path}");
        let request = self.request(Method::GET, path);
        match self.fetch_optional(request, &endpoint).await? {
            Some(body) => decode(&body, &endpoint).map(Some),
            None => Ok(None),
        }
    }
}

/// Encode `value` as exactly one path segment.
///
/// Empty values and dot segments are rejected; everything outside
/// `[A-Za-z0-9*._-]` is percent-encoded, so `/`, `?`, `#` and `%` can't
/// escape the segment.
pub(crate) fn path_segment(field: &str, value: &str) -> Result<String, Error> {
    if value.is_empty() || value == "." || value == ".." {
        return Err(Error::Validation {
            field: field.to_owned(),
            reason: format!("{value:?} is not a usable path segment"),
        });
    }
    // byte_serialize writes spaces as `+`; a literal `+` comes out as `%2B`.
    let encoded: String = url::form_urlencoded::byte_serialize(value.as_bytes()).collect();
    Ok(encoded.replace('+', "%20"))
}

fn unexpected_status(status: StatusCode, endpoint: &str, body: String) -> Error {
    Error::UnexpectedStatus {
        status: status.as_u16(),
        endpoint: endpoint.to_owned(),
        body,
    }
}

fn decode<T: DeserializeOwned>(body: &str, endpoint: &str) -> Result<T, Error> {
    serde_json::from_str(body).map_err(|e| {
        let preview: String = body.chars().take(200).collect();
        Error::Deserialization {
            endpoint: endpoint.to_owned(),
            message: format!("{e} (body preview: {preview:?})"),
            body: body.to_owned(),
        }
    })
}
