//! Error types for the authorization crate.
//!
//! Evaluation itself is infallible (a missing permission is a normal
//! negative result, not an error); these errors only cover parsing role
//! and permission tags received from the outside.

use thiserror::Error;

/// Errors raised while interpreting authorization data.
#[derive(Debug, Error)]
pub enum AuthzError {
    /// A role tag that is not part of the closed role set.
    #[error("unknown role: {0}")]
    UnknownRole(String),

    /// A permission tag that is not part of the closed permission set.
    #[error("unknown permission: {0}")]
    UnknownPermission(String),
}

/// A specialized Result type for authorization operations.
pub type Result<T> = std::result::Result<T, AuthzError>;
