//! Service account keyfile reference

use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};

/// A keyfile given either as a path on disk or as the parsed JSON itself
#[derive(Debug, Clone, PartialEq)]
pub enum Keyfile {
    Path(PathBuf),
    Json(Value),
}

impl From<&str> for Keyfile {
    fn from(path: &str) -> Self {
        Keyfile::Path(PathBuf::from(path))
    }
}

impl From<&Path> for Keyfile {
    fn from(path: &Path) -> Self {
        Keyfile::Path(path.to_path_buf())
    }
}

impl From<PathBuf> for Keyfile {
    fn from(path: PathBuf) -> Self {
        Keyfile::Path(path)
    }
}

impl From<Value> for Keyfile {
    fn from(json: Value) -> Self {
        Keyfile::Json(json)
    }
}

impl fmt::Display for Keyfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Keyfile::Path(path) => write!(f, "{}", path.display()),
            // Never print key material
            Keyfile::Json(json) => match json.get("client_email").and_then(|v| v.as_str()) {
                Some(email) => write!(f, "<inline keyfile for {}>", email),
                None => write!(f, "<inline keyfile>"),
            },
        }
    }
}
