//! GCP plumbing
//!
//! Ambient credential and project discovery plus the HTTP transport used by
//! the DNS service.
//!
//! # Module Structure
//!
//! - [`auth`] - credentials, token sources and the default credentials provider
//! - [`http`] - HTTP utilities for REST API calls
//! - [`project_id`] - default project resolution from env and gcloud config

pub mod auth;
pub mod http;
pub mod project_id;

use std::sync::Arc;

/// Environment variable lookup, injectable for tests
pub type EnvLookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Lookup backed by the process environment
pub fn process_env() -> EnvLookup {
    Arc::new(|key: &str| std::env::var(key).ok())
}
