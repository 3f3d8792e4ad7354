//! OAuth scopes for Cloud DNS

use std::fmt;

/// Read/write access to Cloud DNS
pub const READWRITE: &str = "https://www.googleapis.com/auth/ndev.clouddns.readwrite";

/// Read-only access to Cloud DNS
pub const READONLY: &str = "https://www.googleapis.com/auth/ndev.clouddns.readonly";

/// Ordered set of OAuth scopes requested for a connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope(Vec<String>);

impl Scope {
    /// Build from any sequence of scope strings. Blank entries are dropped;
    /// nothing left yields the default scope
    pub fn new<I, S>(scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let scopes: Vec<String> = scopes
            .into_iter()
            .map(Into::into)
            .filter(|s| !s.trim().is_empty())
            .collect();
        if scopes.is_empty() {
            Self::default()
        } else {
            Self(scopes)
        }
    }

    pub fn scopes(&self) -> &[String] {
        &self.0
    }

    /// Borrowed form expected by token providers
    pub fn as_strs(&self) -> Vec<&str> {
        self.0.iter().map(String::as_str).collect()
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self(vec![READWRITE.to_string()])
    }
}

impl From<&str> for Scope {
    fn from(scope: &str) -> Self {
        Self::new([scope])
    }
}

impl From<String> for Scope {
    fn from(scope: String) -> Self {
        Self::new([scope])
    }
}

impl From<Vec<String>> for Scope {
    fn from(scopes: Vec<String>) -> Self {
        Self::new(scopes)
    }
}

impl From<&[&str]> for Scope {
    fn from(scopes: &[&str]) -> Self {
        Self::new(scopes.iter().copied())
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_readwrite_only() {
        assert_eq!(Scope::default().scopes(), &[READWRITE.to_string()]);
    }

    #[test]
    fn test_single_string() {
        let scope = Scope::from(READONLY);
        assert_eq!(scope.as_strs(), vec![READONLY]);
    }

    #[test]
    fn test_sequence_keeps_order() {
        let scope = Scope::from(&["b", "a"][..]);
        assert_eq!(scope.as_strs(), vec!["b", "a"]);
        assert_eq!(scope.to_string(), "b a");
    }

    #[test]
    fn test_empty_sequence_is_default() {
        assert_eq!(Scope::from(Vec::<String>::new()), Scope::default());
    }

    #[test]
    fn test_empty_string_is_default() {
        assert_eq!(Scope::from(""), Scope::default());
        assert_eq!(Scope::from(String::from("  ")), Scope::default());
        assert_eq!(Scope::new(["", READONLY]).scopes(), &[READONLY.to_string()]);
    }
}
