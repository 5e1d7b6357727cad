use anyhow::Result;
use std::sync::Arc;

use crate::app::Config;
use crate::avatar::AvatarUploadPipeline;
use crate::gateway::HttpCredentialGateway;
use crate::models::{CredentialGateway, ImagePicker, TokenStorage};
use crate::session::{FileTokenStorage, SessionStore};

/// Global application state
pub struct AppState {
    /// Configuration
    pub config: Config,
    /// The one session store for this process
    pub session: Arc<SessionStore>,
    gateway: Arc<dyn CredentialGateway>,
}

impl AppState {
    /// Create new app state from explicit collaborators
    pub fn new(
        config: Config,
        gateway: Arc<dyn CredentialGateway>,
        storage: Arc<dyn TokenStorage>,
    ) -> Self {
        let session = Arc::new(SessionStore::new(gateway.clone(), storage));
        Self {
            config,
            session,
            gateway,
        }
    }

    /// Wire the HTTP gateway and file token storage described by the config
    pub fn from_config(config: Config) -> Result<Self> {
        let gateway = Arc::new(HttpCredentialGateway::new(&config.api)?);
        let storage = match &config.storage.token_file {
            Some(path) => FileTokenStorage::new(path),
            None => FileTokenStorage::in_config_dir()?,
        };
        Ok(Self::new(config, gateway, Arc::new(storage)))
    }

    /// Avatar pipeline bound to this session and the given picker
    pub fn avatar_pipeline(&self, picker: Arc<dyn ImagePicker>) -> AvatarUploadPipeline {
        AvatarUploadPipeline::new(self.session.clone(), self.gateway.clone(), picker)
            .with_max_bytes(self.config.avatar.max_bytes)
    }
}
