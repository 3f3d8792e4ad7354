//! Cloud DNS service connection
//!
//! A `Service` is one connection: a project, the credentials it was built
//! with, and the transport settings. Nothing here is shared between
//! connections.

use crate::gcp::auth::Credentials;
use crate::gcp::http::GcpHttpClient;
use anyhow::{Context, Result};
use serde_json::Value;
use std::time::Duration;
use url::Url;
use uuid::Uuid;

/// Retries configured when the caller gives none
pub const DEFAULT_RETRIES: u32 = 3;

/// Cloud DNS v1 REST endpoint
pub const DEFAULT_ENDPOINT: &str = "https://dns.googleapis.com/dns/v1/";

/// Transport bound to one project and one set of credentials
pub struct Service {
    connection_id: Uuid,
    project: String,
    credentials: Credentials,
    http: GcpHttpClient,
    retries: u32,
    timeout: Option<Duration>,
    endpoint: Url,
}

impl std::fmt::Debug for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Service")
            .field("connection_id", &self.connection_id)
            .field("project", &self.project)
            .field("credentials", &self.credentials)
            .field("retries", &self.retries)
            .field("timeout", &self.timeout)
            .field("endpoint", &self.endpoint.as_str())
            .finish()
    }
}

impl Service {
    /// Create a new connection. `retries` defaults to [`DEFAULT_RETRIES`];
    /// a `None` timeout leaves the HTTP client's default in place.
    pub fn new(
        project: impl Into<String>,
        credentials: Credentials,
        retries: Option<u32>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let http = GcpHttpClient::new(timeout)?;
        let endpoint = Url::parse(DEFAULT_ENDPOINT).context("Invalid default endpoint")?;

        let service = Self {
            connection_id: Uuid::new_v4(),
            project: project.into(),
            credentials,
            http,
            retries: retries.unwrap_or(DEFAULT_RETRIES),
            timeout,
            endpoint,
        };

        tracing::debug!(
            "Created DNS service {} for project {} (retries: {}, timeout: {:?})",
            service.connection_id,
            service.project,
            service.retries,
            service.timeout
        );

        Ok(service)
    }

    /// Point the connection at a different API root (emulators, tests)
    pub fn with_endpoint(mut self, endpoint: &str) -> Result<Self> {
        let endpoint = if endpoint.ends_with('/') {
            endpoint.to_string()
        } else {
            format!("{}/", endpoint)
        };
        self.endpoint =
            Url::parse(&endpoint).with_context(|| format!("Invalid endpoint: {}", endpoint))?;
        Ok(self)
    }

    /// Unique id of this connection
    pub fn connection_id(&self) -> Uuid {
        self.connection_id
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn retries(&self) -> u32 {
        self.retries
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Build a URL under `projects/{project}/`
    pub fn project_url(&self, path: &str) -> Result<Url> {
        let relative = format!(
            "projects/{}/{}",
            urlencoding::encode(&self.project),
            path.trim_start_matches('/')
        );
        self.endpoint
            .join(&relative)
            .with_context(|| format!("Invalid API path: {}", relative))
    }

    /// Authenticated GET against a project-relative path
    pub async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Value> {
        let url = self.project_url(path)?;
        let token = self.credentials.get_token().await?;
        self.http.get(url.as_str(), &token, query).await
    }

    /// One page of `managedZones.list`
    pub async fn list_zones(&self, page_token: Option<&str>) -> Result<Value> {
        let mut query = Vec::new();
        if let Some(token) = page_token {
            query.push(("pageToken", token));
        }
        self.get("managedZones", &query).await
    }

    /// `managedZones.get`
    pub async fn get_zone(&self, zone: &str) -> Result<Value> {
        self.get(&format!("managedZones/{}", urlencoding::encode(zone)), &[])
            .await
    }
}
