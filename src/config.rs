//! Configuration Management
//!
//! Persistent defaults for the `gcp-dns` command line. Values given on the
//! command line win over the file; anything left unset falls through to the
//! ambient environment when the connection is built.

use crate::dns::factory::{ClientConfig, DnsOptions};
use crate::dns::keyfile::Keyfile;
use crate::dns::scope::Scope;
use crate::gcp::project_id::validate_project_id;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Default project ID
    #[serde(default)]
    pub project_id: Option<String>,
    /// Path to a service account keyfile
    #[serde(default)]
    pub keyfile: Option<PathBuf>,
    /// OAuth scopes to request
    #[serde(default)]
    pub scopes: Vec<String>,
    /// Retry count
    #[serde(default)]
    pub retries: Option<u32>,
    /// Request timeout in milliseconds
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub project_id: Option<String>,
    pub keyfile: Option<PathBuf>,
    pub scopes: Vec<String>,
    pub retries: Option<u32>,
    pub timeout_ms: Option<u64>,
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("gcp-dns").join("config.json"))
    }

    /// Load configuration from the default location
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load configuration from `path`; missing or unreadable files give defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring malformed config {}: {}", path.display(), e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Set project and save
    pub fn set_project(&mut self, project_id: &str) -> Result<()> {
        self.set_project_id(project_id)?;
        self.save()
    }

    /// Set project without saving; rejects malformed project ids
    pub fn set_project_id(&mut self, project_id: &str) -> Result<()> {
        if !validate_project_id(project_id) {
            anyhow::bail!("Invalid project ID: {:?}", project_id);
        }
        self.project_id = Some(project_id.to_string());
        Ok(())
    }

    /// Layer command line values over this file (CLI > config)
    pub fn client_config(&self, overrides: Overrides) -> ClientConfig {
        let scopes = if overrides.scopes.is_empty() {
            self.scopes.clone()
        } else {
            overrides.scopes
        };

        ClientConfig {
            project: overrides.project_id.or_else(|| self.project_id.clone()),
            keyfile: overrides
                .keyfile
                .or_else(|| self.keyfile.clone())
                .map(Keyfile::from),
            options: DnsOptions {
                scope: (!scopes.is_empty()).then(|| Scope::new(scopes)),
                retries: overrides.retries.or(self.retries),
                timeout: overrides
                    .timeout_ms
                    .or(self.timeout_ms)
                    .map(Duration::from_millis),
            },
        }
    }
}
