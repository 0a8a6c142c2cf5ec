use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContactError {
    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ContactError>;
