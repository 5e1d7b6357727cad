use anyhow::{Context, Result};
use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::{
    APP_NAME, DEFAULT_API_URL, ENV_PREFIX, HTTP_REQUEST_TIMEOUT_SECS, MAX_AVATAR_BYTES,
};
use crate::models::AvatarRef;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Remote API configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Token storage configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// Avatar upload configuration
    #[serde(default)]
    pub avatar: AvatarConfig,
}

/// Remote API configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the Ignite Gym API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_secs: HTTP_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl ApiConfig {
    /// Where the API serves an uploaded avatar.
    ///
    /// `None` when the profile has no avatar; callers show the default photo.
    pub fn avatar_url(&self, avatar_ref: Option<&AvatarRef>) -> Option<String> {
        avatar_ref.map(|avatar| {
            format!(
                "{}/avatar/{}",
                self.base_url.trim_end_matches('/'),
                avatar.as_str()
            )
        })
    }
}

/// Token storage configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Where the session token is kept (defaults to the config directory)
    pub token_file: Option<PathBuf>,
}

/// Avatar upload configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvatarConfig {
    /// Largest image accepted for upload, in bytes
    pub max_bytes: u64,
}

impl Default for AvatarConfig {
    fn default() -> Self {
        Self {
            max_bytes: MAX_AVATAR_BYTES,
        }
    }
}

/// Layer defaults, global file, local file and environment
fn figment(global_config: Option<&Path>, local_config: &Path) -> Figment {
    let mut figment = Figment::from(Serialized::defaults(Config::default()));

    if let Some(global_config) = global_config {
        if global_config.exists() {
            figment = figment.merge(Toml::file(global_config));
        }
    }

    if local_config.exists() {
        figment = figment.merge(Toml::file(local_config));
    }

    // IGNITE_GYM_API__BASE_URL -> api.base_url
    figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
}

/// Load configuration from multiple sources
pub fn load_config() -> Result<Config> {
    let global_config = get_config_dir().ok().map(|dir| dir.join("config.toml"));
    let local_config = PathBuf::from(".ignite-gym/config.toml");

    figment(global_config.as_deref(), &local_config)
        .extract()
        .context("Failed to load configuration")
}

/// Load configuration from an explicit file, still honoring the environment
pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        anyhow::bail!("Config file {} does not exist", path.display());
    }
    figment(None, path)
        .extract()
        .with_context(|| format!("Failed to load configuration from {}", path.display()))
}

/// Get the configuration directory
pub fn get_config_dir() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", APP_NAME) {
        let config_dir = proj_dirs.config_dir();
        std::fs::create_dir_all(config_dir)?;
        Ok(config_dir.to_path_buf())
    } else {
        // Fallback to home directory
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .context("Could not determine home directory")?;
        let config_dir = PathBuf::from(home).join(".config").join(APP_NAME);
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }
}

/// Save configuration to file
pub fn save_config(config: &Config, path: Option<PathBuf>) -> Result<()> {
    let path = if let Some(p) = path {
        p
    } else {
        get_config_dir()?.join("config.toml")
    };

    let toml_string = toml::to_string_pretty(config)?;
    std::fs::write(&path, toml_string)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;

    Ok(())
}

/// Create a default configuration file if it doesn't exist.
///
/// Returns the path and whether it was created.
pub fn init_config() -> Result<(PathBuf, bool)> {
    let config_file = get_config_dir()?.join("config.toml");

    if config_file.exists() {
        return Ok((config_file, false));
    }
    save_config(&Config::default(), Some(config_file.clone()))?;
    Ok((config_file, true))
}
