use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
