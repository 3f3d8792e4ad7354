//! Shared connection context
//!
//! A `Cloud` remembers a project, keyfile and transport settings so that
//! several services can be opened with the same defaults.

use super::factory::{ClientConfig, DnsClientFactory, DnsOptions};
use super::keyfile::Keyfile;
use super::project::Project;
use crate::error::Result;
use std::time::Duration;

#[derive(Clone, Default)]
pub struct Cloud {
    project: Option<String>,
    keyfile: Option<Keyfile>,
    retries: Option<u32>,
    timeout: Option<Duration>,
    factory: Option<DnsClientFactory>,
}

impl Cloud {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    pub fn keyfile(mut self, keyfile: impl Into<Keyfile>) -> Self {
        self.keyfile = Some(keyfile.into());
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

    /// Use a specific factory instead of the ambient one
    pub fn factory(mut self, factory: DnsClientFactory) -> Self {
        self.factory = Some(factory);
        self
    }

    /// Config for a DNS connection: per-call retries and timeout win over
    /// the context's, scope only comes from the call
    pub fn client_config(&self, options: DnsOptions) -> ClientConfig {
        ClientConfig {
            project: self.project.clone(),
            keyfile: self.keyfile.clone(),
            options: DnsOptions {
                scope: options.scope,
                retries: options.retries.or(self.retries),
                timeout: options.timeout.or(self.timeout),
            },
        }
    }

    /// Open a new Cloud DNS connection
    pub async fn dns(&self, options: DnsOptions) -> Result<Project> {
        let config = self.client_config(options);
        match &self.factory {
            Some(factory) => factory.connect(config).await,
            None => DnsClientFactory::new().connect(config).await,
        }
    }
}
