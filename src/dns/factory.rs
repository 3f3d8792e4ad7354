//! DNS client factory
//!
//! Resolves the project and credentials for a connection and wires them
//! into a [`Service`] wrapped by a [`Project`]. Each call builds a brand new
//! connection.
//!
//! ```ignore
//! use gcp_dns::{dns, DnsOptions};
//!
//! let project = dns(Some("my-dns-project"), Some("/path/to/keyfile.json".into()), DnsOptions::default()).await?;
//! let zone = project.zone("example-com").await?;
//! ```

use super::keyfile::Keyfile;
use super::project::Project;
use super::scope::Scope;
use super::service::{Service, DEFAULT_RETRIES};
use crate::error::{Error, Result};
use crate::gcp::auth::{CredentialsProvider, GcpAuthProvider};
use crate::gcp::project_id::{GcloudProjectResolver, ProjectResolver};
use std::sync::Arc;
use std::time::Duration;

/// Per-call connection options
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DnsOptions {
    /// OAuth scopes; defaults to Cloud DNS read/write
    pub scope: Option<Scope>,
    /// Retry count handed to the service; defaults to 3
    pub retries: Option<u32>,
    /// Request timeout; unset keeps the transport default
    pub timeout: Option<Duration>,
}

impl DnsOptions {
    pub fn scope(mut self, scope: impl Into<Scope>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    pub fn retries(mut self, retries: u32) -> Self {
        self.retries = Some(retries);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Everything a caller may supply for one connection
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    pub project: Option<String>,
    pub keyfile: Option<Keyfile>,
    pub options: DnsOptions,
}

/// Connection settings with every default applied
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub project: String,
    pub keyfile: Option<Keyfile>,
    pub scope: Scope,
    pub retries: u32,
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Apply defaults. The project falls back to `resolver` only when none
    /// was given; an empty result is rejected.
    pub fn resolve(self, resolver: &dyn ProjectResolver) -> Result<ResolvedConfig> {
        let project = match self.project {
            Some(project) => project,
            None => resolver.resolve().unwrap_or_default(),
        };

        if project.is_empty() {
            return Err(Error::invalid_argument("project is missing"));
        }

        Ok(ResolvedConfig {
            project,
            keyfile: self.keyfile,
            scope: self.options.scope.unwrap_or_default(),
            retries: self.options.retries.unwrap_or(DEFAULT_RETRIES),
            timeout: self.options.timeout,
        })
    }
}

/// Builds [`Project`] handles from injected collaborators
#[derive(Clone)]
pub struct DnsClientFactory {
    resolver: Arc<dyn ProjectResolver>,
    credentials: Arc<dyn CredentialsProvider>,
}

impl DnsClientFactory {
    /// Factory using the ambient environment and gcloud configuration
    pub fn new() -> Self {
        Self::with_collaborators(
            Arc::new(GcloudProjectResolver::new()),
            Arc::new(GcpAuthProvider::new()),
        )
    }

    pub fn with_collaborators(
        resolver: Arc<dyn ProjectResolver>,
        credentials: Arc<dyn CredentialsProvider>,
    ) -> Self {
        Self {
            resolver,
            credentials,
        }
    }

    /// Create a new connection to Cloud DNS
    pub async fn dns(
        &self,
        project: Option<&str>,
        keyfile: Option<Keyfile>,
        options: DnsOptions,
    ) -> Result<Project> {
        self.connect(ClientConfig {
            project: project.map(str::to_string),
            keyfile,
            options,
        })
        .await
    }

    /// Create a new connection from a full [`ClientConfig`]
    pub async fn connect(&self, config: ClientConfig) -> Result<Project> {
        let resolved = config.resolve(self.resolver.as_ref())?;

        let credentials = match &resolved.keyfile {
            None => self.credentials.default_credentials(&resolved.scope).await?,
            Some(keyfile) => {
                self.credentials
                    .from_keyfile(keyfile, &resolved.scope)
                    .await?
            }
        };

        let service = Service::new(
            resolved.project,
            credentials,
            Some(resolved.retries),
            resolved.timeout,
        )?;

        tracing::info!(
            "Connected to Cloud DNS [project: {}, connection: {}]",
            service.project(),
            service.connection_id()
        );

        Ok(Project::new(service))
    }
}

impl Default for DnsClientFactory {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a new connection to Cloud DNS using ambient defaults for anything
/// not given
pub async fn dns(
    project: Option<&str>,
    keyfile: Option<Keyfile>,
    options: DnsOptions,
) -> Result<Project> {
    DnsClientFactory::new().dns(project, keyfile, options).await
}
