//! Error types
//!
//! The factory only originates one error of its own (a missing project).
//! Everything raised by credential discovery or transport setup is carried
//! through untouched.

use thiserror::Error;

/// Result alias for client construction
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned when building a DNS client
#[derive(Debug, Error)]
pub enum Error {
    /// A required argument was missing or empty
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Failure raised by a credential, project or transport collaborator
    #[error(transparent)]
    Collaborator(#[from] anyhow::Error),
}

impl Error {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    /// True for the locally raised `InvalidArgument` variant
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument(_))
    }
}
