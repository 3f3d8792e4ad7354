//! GCP Authentication
//!
//! Credentials come from one of two places: an explicit service account
//! keyfile (path or inline JSON), or the ambient default source. The ambient
//! source honours `DNS_KEYFILE` / `DNS_KEYFILE_JSON` and otherwise falls back
//! to Application Default Credentials. A `DNS_KEYFILE` that does not name an
//! existing file is skipped.

use super::EnvLookup;
use crate::dns::keyfile::Keyfile;
use crate::dns::scope::Scope;
use anyhow::{Context, Result};
use async_trait::async_trait;
use gcp_auth::{CustomServiceAccount, TokenProvider};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Environment variable holding a keyfile path for the default source
pub const KEYFILE_ENV: &str = "DNS_KEYFILE";

/// Environment variable holding inline keyfile JSON for the default source
pub const KEYFILE_JSON_ENV: &str = "DNS_KEYFILE_JSON";

/// Token expiry buffer - refresh tokens this much before they actually expire
const TOKEN_EXPIRY_BUFFER: Duration = Duration::from_secs(60);

/// Default token TTL if we can't determine expiry (conservative: 30 minutes)
const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(30 * 60);

/// Something that can mint OAuth access tokens for a set of scopes
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn token(&self, scopes: &[&str]) -> Result<String>;
}

/// Adapter over a `gcp_auth` provider
struct GcpAuthSource(Arc<dyn TokenProvider>);

#[async_trait]
impl TokenSource for GcpAuthSource {
    async fn token(&self, scopes: &[&str]) -> Result<String> {
        let token = self
            .0
            .token(scopes)
            .await
            .context("Failed to get access token")?;
        Ok(token.as_str().to_string())
    }
}

/// Fixed bearer token, for emulators and tests
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

#[async_trait]
impl TokenSource for StaticToken {
    async fn token(&self, _scopes: &[&str]) -> Result<String> {
        Ok(self.0.clone())
    }
}

/// Where a set of credentials was obtained from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsOrigin {
    /// Ambient default source (env keyfile or ADC)
    Default,
    /// Explicit keyfile passed by the caller
    Keyfile,
    /// Caller-supplied token source
    Custom,
}

#[derive(Clone)]
struct CachedToken {
    token: String,
    /// When this token expires (with buffer applied)
    expires_at: Instant,
}

impl CachedToken {
    fn is_valid(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

/// Scoped credentials with token caching
pub struct Credentials {
    source: Arc<dyn TokenSource>,
    scope: Scope,
    origin: CredentialsOrigin,
    token_cache: RwLock<Option<CachedToken>>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("scope", &self.scope)
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

impl Credentials {
    /// Wrap an arbitrary token source
    pub fn new(source: Arc<dyn TokenSource>, scope: Scope, origin: CredentialsOrigin) -> Self {
        Self {
            source,
            scope,
            origin,
            token_cache: RwLock::new(None),
        }
    }

    /// Credentials that always hand out the same bearer token
    pub fn from_static_token(token: impl Into<String>, scope: Scope) -> Self {
        Self::new(
            Arc::new(StaticToken::new(token)),
            scope,
            CredentialsOrigin::Custom,
        )
    }

    /// Load service account credentials from a keyfile
    pub fn from_keyfile(keyfile: &Keyfile, scope: Scope) -> Result<Self> {
        let account = match keyfile {
            Keyfile::Path(path) => CustomServiceAccount::from_file(path)
                .with_context(|| format!("Failed to load keyfile {}", path.display()))?,
            Keyfile::Json(json) => CustomServiceAccount::from_json(&json.to_string())
                .context("Failed to parse inline keyfile JSON")?,
        };

        tracing::debug!("Loaded service account credentials from {}", keyfile);

        Ok(Self::new(
            Arc::new(GcpAuthSource(Arc::new(account))),
            scope,
            CredentialsOrigin::Keyfile,
        ))
    }

    /// Application Default Credentials
    pub async fn application_default(scope: Scope) -> Result<Self> {
        let provider = gcp_auth::provider().await.context(
            "Failed to initialize GCP authentication. Run 'gcloud auth application-default login'",
        )?;

        Ok(Self::new(
            Arc::new(GcpAuthSource(provider)),
            scope,
            CredentialsOrigin::Default,
        ))
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn origin(&self) -> &CredentialsOrigin {
        &self.origin
    }

    /// Get an access token for API calls, reusing the cached one while valid
    pub async fn get_token(&self) -> Result<String> {
        {
            let cache = self.token_cache.read().await;
            if let Some(cached) = cache.as_ref() {
                if cached.is_valid() {
                    return Ok(cached.token.clone());
                }
                tracing::debug!("Cached token expired, fetching new token");
            }
        }

        let scopes = self.scope.as_strs();
        let token = self.source.token(&scopes).await?;

        let expires_at = Instant::now() + DEFAULT_TOKEN_TTL - TOKEN_EXPIRY_BUFFER;
        {
            let mut cache = self.token_cache.write().await;
            *cache = Some(CachedToken {
                token: token.clone(),
                expires_at,
            });
        }

        tracing::debug!(
            "New token cached, expires in ~{} minutes",
            (DEFAULT_TOKEN_TTL - TOKEN_EXPIRY_BUFFER).as_secs() / 60
        );

        Ok(token)
    }
}

/// Produces credentials for the factory
#[async_trait]
pub trait CredentialsProvider: Send + Sync {
    /// Credentials from the ambient environment
    async fn default_credentials(&self, scope: &Scope) -> Result<Credentials>;

    /// Credentials from an explicit keyfile
    async fn from_keyfile(&self, keyfile: &Keyfile, scope: &Scope) -> Result<Credentials>;
}

/// Default provider backed by `gcp_auth`
pub struct GcpAuthProvider {
    env: EnvLookup,
}

impl GcpAuthProvider {
    pub fn new() -> Self {
        Self {
            env: super::process_env(),
        }
    }

    /// Use a custom environment lookup instead of the process environment
    pub fn with_env(env: EnvLookup) -> Self {
        Self { env }
    }

    /// Keyfile named by `DNS_KEYFILE` or `DNS_KEYFILE_JSON`, if any
    pub fn env_keyfile(&self) -> Result<Option<Keyfile>> {
        if let Some(path) = (self.env)(KEYFILE_ENV).filter(|p| !p.is_empty()) {
            if Path::new(&path).is_file() {
                return Ok(Some(Keyfile::from(path.as_str())));
            }
            tracing::warn!("Ignoring {}: {} is not a file", KEYFILE_ENV, path);
        }
        if let Some(json) = (self.env)(KEYFILE_JSON_ENV).filter(|j| !j.is_empty()) {
            let value = serde_json::from_str(&json)
                .with_context(|| format!("{} is not valid JSON", KEYFILE_JSON_ENV))?;
            return Ok(Some(Keyfile::Json(value)));
        }
        Ok(None)
    }
}

impl Default for GcpAuthProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialsProvider for GcpAuthProvider {
    async fn default_credentials(&self, scope: &Scope) -> Result<Credentials> {
        if let Some(keyfile) = self.env_keyfile()? {
            tracing::debug!("Using keyfile from environment: {}", keyfile);
            let mut credentials = Credentials::from_keyfile(&keyfile, scope.clone())?;
            credentials.origin = CredentialsOrigin::Default;
            return Ok(credentials);
        }

        tracing::debug!("Using Application Default Credentials");
        Credentials::application_default(scope.clone()).await
    }

    async fn from_keyfile(&self, keyfile: &Keyfile, scope: &Scope) -> Result<Credentials> {
        Credentials::from_keyfile(keyfile, scope.clone())
    }
}
