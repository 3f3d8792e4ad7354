//! Default project resolution
//!
//! Looks at `DNS_PROJECT`, the gcloud/ADC environment variables, then the
//! gcloud configuration directory.

use super::EnvLookup;
use std::path::{Path, PathBuf};

/// Environment variables checked for a project id, in order
pub const PROJECT_ENV_VARS: &[&str] = &[
    "DNS_PROJECT",
    "CLOUDSDK_CORE_PROJECT",
    "GOOGLE_CLOUD_PROJECT",
    "GCLOUD_PROJECT",
];

/// Resolves the project to use when the caller gives none
pub trait ProjectResolver: Send + Sync {
    fn resolve(&self) -> Option<String>;
}

/// Resolver that reads the environment and gcloud configuration files
pub struct GcloudProjectResolver {
    env: EnvLookup,
    config_dir: Option<PathBuf>,
}

impl GcloudProjectResolver {
    pub fn new() -> Self {
        let env = super::process_env();
        let config_dir = gcloud_config_dir(&env);
        Self { env, config_dir }
    }

    /// Resolver with an explicit environment and gcloud config directory
    pub fn with_env(env: EnvLookup, config_dir: Option<PathBuf>) -> Self {
        Self { env, config_dir }
    }

    fn from_env(&self) -> Option<String> {
        for &var in PROJECT_ENV_VARS {
            if let Some(project) = (self.env)(var) {
                if validate_project_id(&project) {
                    return Some(project);
                }
                tracing::warn!("Invalid project ID format in {}", var);
            }
        }
        None
    }
}

impl Default for GcloudProjectResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectResolver for GcloudProjectResolver {
    fn resolve(&self) -> Option<String> {
        if let Some(project) = self.from_env() {
            tracing::debug!("Resolved project {} from environment", project);
            return Some(project);
        }

        let config_dir = self.config_dir.as_deref()?;
        let project = project_from_properties(config_dir)
            .or_else(|| project_from_active_config(config_dir));
        if let Some(project) = &project {
            tracing::debug!("Resolved project {} from gcloud config", project);
        }
        project
    }
}

/// Get the gcloud configuration directory
pub fn gcloud_config_dir(env: &EnvLookup) -> Option<PathBuf> {
    if let Some(path) = env("CLOUDSDK_CONFIG") {
        return Some(PathBuf::from(path));
    }

    // Default to ~/.config/gcloud on Linux/macOS
    dirs::config_dir().map(|p| p.join("gcloud"))
}

/// Validate a GCP project ID format
/// Project IDs must be 6-30 characters, lowercase letters, digits, and hyphens
/// Must start with a letter and cannot end with a hyphen
pub fn validate_project_id(project: &str) -> bool {
    if project.len() < 6 || project.len() > 30 {
        return false;
    }

    match project.chars().next() {
        Some(c) if c.is_ascii_lowercase() => {}
        _ => return false,
    }

    if project.ends_with('-') {
        return false;
    }

    project
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Value of `project = ...` on a config line, if valid
fn project_value(line: &str) -> Option<String> {
    let (key, value) = line.split_once('=')?;
    if key.trim() != "project" {
        return None;
    }
    let project = value.trim();
    validate_project_id(project).then(|| project.to_string())
}

fn is_comment(line: &str) -> bool {
    line.is_empty() || line.starts_with('#') || line.starts_with(';')
}

fn project_from_properties(config_dir: &Path) -> Option<String> {
    let content = std::fs::read_to_string(config_dir.join("properties")).ok()?;
    content
        .lines()
        .map(str::trim)
        .filter(|line| !is_comment(line))
        .find_map(project_value)
}

fn project_from_active_config(config_dir: &Path) -> Option<String> {
    let active_config = std::fs::read_to_string(config_dir.join("active_config")).ok()?;
    let config_name = active_config.trim();

    // Reject anything that could escape the configurations directory
    if config_name.is_empty()
        || !config_name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        tracing::warn!("Invalid characters in active_config name");
        return None;
    }

    let config_path = config_dir
        .join("configurations")
        .join(format!("config_{}", config_name));
    let content = std::fs::read_to_string(config_path).ok()?;

    let mut in_core_section = false;
    for line in content.lines().map(str::trim) {
        if is_comment(line) {
            continue;
        }
        if line == "[core]" {
            in_core_section = true;
        } else if line.starts_with('[') {
            in_core_section = false;
        } else if in_core_section {
            if let Some(project) = project_value(line) {
                return Some(project);
            }
        }
    }
    None
}
