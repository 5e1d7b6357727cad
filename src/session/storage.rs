use async_trait::async_trait;
use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::constants::{APP_NAME, TOKEN_FILE_NAME};
use crate::models::{AuthToken, TokenStorage};
use crate::utils::{StorageError, StorageResult};

/// On-disk shape of the persisted session
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredSession {
    token: AuthToken,
    stored_at: DateTime<Utc>,
}

/// Token storage backed by a TOML file in the config directory
#[derive(Debug, Clone)]
pub struct FileTokenStorage {
    path: PathBuf,
}

impl FileTokenStorage {
    /// Store the token at an explicit path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store the token in the platform config directory
    pub fn in_config_dir() -> StorageResult<Self> {
        let dirs = ProjectDirs::from("", "", APP_NAME).ok_or_else(|| {
            StorageError::Unavailable("Could not determine config directory".to_string())
        })?;
        Ok(Self::new(dirs.config_dir().join(TOKEN_FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TokenStorage for FileTokenStorage {
    async fn get_token(&self) -> StorageResult<Option<AuthToken>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let stored: StoredSession =
            toml::from_str(&content).map_err(|e| StorageError::Corrupt(e.to_string()))?;
        debug!("Loaded session token stored at {}", stored.stored_at);
        Ok(Some(stored.token))
    }

    async fn set_token(&self, token: &AuthToken) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let stored = StoredSession {
            token: token.clone(),
            stored_at: Utc::now(),
        };
        let content =
            toml::to_string_pretty(&stored).map_err(|e| StorageError::Corrupt(e.to_string()))?;

        // Write then rename so a crash never leaves a half-written token
        let tmp = self.path.with_extension("toml.tmp");
        tokio::fs::write(&tmp, content).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    async fn clear_token(&self) -> StorageResult<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
