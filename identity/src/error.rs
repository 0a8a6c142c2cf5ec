use thiserror::Error;

#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account already exists: {0}")]
    AccountExists(String),

    #[error("Provider error: {0}")]
    Provider(String),
}

pub type Result<T> = std::result::Result<T, IdentityError>;
