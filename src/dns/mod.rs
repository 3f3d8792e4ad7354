//! Cloud DNS client
//!
//! # Module Structure
//!
//! - [`factory`] - builds a connected [`Project`] from project, keyfile and options
//! - [`cloud`] - reusable connection context
//! - [`service`] - per-connection transport settings and raw API calls
//! - [`project`] - user-facing project handle and zone model
//! - [`scope`] - OAuth scopes
//! - [`keyfile`] - service account keyfile reference

pub mod cloud;
pub mod factory;
pub mod keyfile;
pub mod project;
pub mod scope;
pub mod service;

pub use cloud::Cloud;
pub use factory::{dns, ClientConfig, DnsClientFactory, DnsOptions, ResolvedConfig};
pub use keyfile::Keyfile;
pub use project::{Project, Zone};
pub use scope::Scope;
pub use service::Service;
