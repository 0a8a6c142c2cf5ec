//! Environment-based storage configuration

use std::env;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Filesystem layout for everything the workspace persists
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    /// Load from environment variables with defaults
    pub fn from_env() -> Result<Self> {
        Self::from_env_with_base(None)
    }

    /// Load with an optional base directory, primarily for tests
    pub fn from_env_with_base(base_dir: Option<PathBuf>) -> Result<Self> {
        let base = match base_dir {
            Some(base) => base,
            None => {
                // Load .env from the working directory when present
                if let Ok(cwd) = env::current_dir() {
                    let env_file = cwd.join(".env");
                    if env_file.exists() {
                        dotenvy::from_path(&env_file).ok();
                    }
                }
                env::current_dir()?
            }
        };

        Ok(Self {
            data_dir: Self::path_from_env("FOLIO_DATA_PATH", "./data", &base),
        })
    }

    /// Get a path from an environment variable or use the default
    fn path_from_env(var_name: &str, default: &str, base_dir: &Path) -> PathBuf {
        let path_str = env::var(var_name).unwrap_or_else(|_| default.to_string());
        let path = PathBuf::from(path_str);

        // Relative paths resolve against the base directory
        if path.is_relative() {
            base_dir.join(path)
        } else {
            path
        }
    }

    /// Path of the fallback JSON message file
    pub fn messages_path(&self) -> PathBuf {
        self.data_dir.join("contact").join("messages.json")
    }

    /// Path of the durable client slot database
    pub fn client_slot_path(&self) -> PathBuf {
        self.data_dir.join("client").join("folio_client.redb")
    }
}
