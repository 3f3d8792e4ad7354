//! Google Cloud DNS client bootstrap
//!
//! Resolves the project and credentials for a Cloud DNS connection and hands
//! back a [`Project`] handle.
//!
//! ```ignore
//! use gcp_dns::{dns, DnsOptions};
//!
//! let project = dns(None, None, DnsOptions::default()).await?;
//! for zone in project.zones().await? {
//!     println!("{}", zone.dns_name);
//! }
//! ```

pub mod config;
pub mod dns;
pub mod error;
pub mod gcp;

pub use dns::{dns, Cloud, DnsClientFactory, DnsOptions, Keyfile, Project, Scope, Service, Zone};
pub use error::{Error, Result};
pub use gcp::auth::{Credentials, CredentialsProvider, GcpAuthProvider};
pub use gcp::project_id::{GcloudProjectResolver, ProjectResolver};
