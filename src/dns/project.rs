//! Project facade
//!
//! Entry point handed back by the factory. Owns its `Service` and exposes
//! the managed zones of the project.

use super::service::Service;
use crate::gcp::http::ApiError;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Upper bound on `managedZones.list` pages fetched by [`Project::zones`]
pub const MAX_ZONE_PAGES: usize = 1000;

/// A Cloud DNS managed zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub dns_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub name_servers: Vec<String>,
    #[serde(default)]
    pub creation_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub visibility: Option<String>,
}

/// Handle to Cloud DNS for one project
#[derive(Debug)]
pub struct Project {
    service: Service,
}

impl Project {
    pub fn new(service: Service) -> Self {
        Self { service }
    }

    /// The project this handle operates on
    pub fn project_id(&self) -> &str {
        self.service.project()
    }

    pub fn service(&self) -> &Service {
        &self.service
    }

    /// All managed zones in the project (auto-paginate)
    pub async fn zones(&self) -> Result<Vec<Zone>> {
        let mut all_zones = Vec::new();
        let mut page_token: Option<String> = None;

        for _ in 0..MAX_ZONE_PAGES {
            let page = self.service.list_zones(page_token.as_deref()).await?;
            all_zones.extend(parse_zones(&page)?);

            let next = page
                .get("nextPageToken")
                .and_then(|v| v.as_str())
                .filter(|t| !t.is_empty())
                .map(String::from);

            match next {
                None => {
                    tracing::debug!("Loaded {} zones for {}", all_zones.len(), self.project_id());
                    return Ok(all_zones);
                }
                Some(token) if page_token.as_deref() == Some(token.as_str()) => {
                    anyhow::bail!("managedZones.list returned page token {} twice", token);
                }
                Some(token) => page_token = Some(token),
            }
        }

        anyhow::bail!(
            "managedZones.list did not finish within {} pages",
            MAX_ZONE_PAGES
        )
    }

    /// A single managed zone, or `None` if it does not exist
    pub async fn zone(&self, name: &str) -> Result<Option<Zone>> {
        match self.service.get_zone(name).await {
            Ok(value) => {
                let zone = serde_json::from_value(value)
                    .with_context(|| format!("Failed to parse managed zone {}", name))?;
                Ok(Some(zone))
            }
            Err(err) if err.downcast_ref::<ApiError>().is_some_and(ApiError::is_not_found) => {
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }
}

fn parse_zones(page: &Value) -> Result<Vec<Zone>> {
    match page.get("managedZones") {
        Some(zones) => {
            serde_json::from_value(zones.clone()).context("Failed to parse managed zones")
        }
        None => Ok(Vec::new()),
    }
}
