use std::sync::Arc;
use tracing::{debug, info, warn};

use super::package::package;
use crate::constants::MAX_AVATAR_BYTES;
use crate::models::{
    AuthToken, AvatarAsset, AvatarRef, CredentialGateway, ImagePicker, MultipartPayload,
    UserProfile,
};
use crate::session::SessionStore;
use crate::utils::{PipelineError, PipelineResult};

/// How a pipeline run ended when it did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// Uploaded and merged; carries the updated session profile
    Uploaded(UserProfile),
    /// The user backed out of image selection
    Cancelled,
}

impl PipelineOutcome {
    pub fn avatar_ref(&self) -> Option<&AvatarRef> {
        match self {
            PipelineOutcome::Uploaded(profile) => profile.avatar_ref(),
            PipelineOutcome::Cancelled => None,
        }
    }
}

/// select -> validate -> package -> upload -> merge.
///
/// Every stage short-circuits; nothing after a failing stage runs, and the
/// session is only touched by the final merge.
pub struct AvatarUploadPipeline {
    session: Arc<SessionStore>,
    gateway: Arc<dyn CredentialGateway>,
    picker: Arc<dyn ImagePicker>,
    max_bytes: u64,
}

impl AvatarUploadPipeline {
    pub fn new(
        session: Arc<SessionStore>,
        gateway: Arc<dyn CredentialGateway>,
        picker: Arc<dyn ImagePicker>,
    ) -> Self {
        Self {
            session,
            gateway,
            picker,
            max_bytes: MAX_AVATAR_BYTES,
        }
    }

    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Run the whole pipeline once
    pub async fn run(&self) -> PipelineResult<PipelineOutcome> {
        let (profile, token, generation) = self.session.authenticated("upload an avatar")?;

        let Some(asset) = self.select().await? else {
            info!("Avatar selection cancelled");
            return Ok(PipelineOutcome::Cancelled);
        };
        self.validate(&asset)?;

        let payload = self.package(&asset, &profile).await?;
        let avatar_ref = self.upload(&token, payload).await?;

        let updated = self
            .session
            .merge_avatar(profile.id(), generation, avatar_ref)
            .await?;
        info!("Avatar updated");
        Ok(PipelineOutcome::Uploaded(updated))
    }

    pub async fn select(&self) -> PipelineResult<Option<AvatarAsset>> {
        self.picker.pick_image().await
    }

    /// Size gate; runs before any byte is read or sent
    pub fn validate(&self, asset: &AvatarAsset) -> PipelineResult<()> {
        self.check_size(asset.size_bytes)
    }

    fn check_size(&self, size_bytes: u64) -> PipelineResult<()> {
        if size_bytes > self.max_bytes {
            warn!(
                "Rejected avatar of {} bytes (limit {})",
                size_bytes, self.max_bytes
            );
            return Err(PipelineError::SizeExceeded {
                size_bytes,
                limit: self.max_bytes,
            });
        }
        Ok(())
    }

    pub async fn package(
        &self,
        asset: &AvatarAsset,
        profile: &UserProfile,
    ) -> PipelineResult<MultipartPayload> {
        let bytes = self.picker.read_image(asset).await?;
        // The file may have changed since it was picked
        self.check_size(bytes.len() as u64)?;
        let payload = package(asset, profile, bytes)?;
        debug!(
            "Packaged {} as {} ({})",
            asset.local_uri, payload.file_name, payload.content_type
        );
        Ok(payload)
    }

    pub async fn upload(
        &self,
        token: &AuthToken,
        payload: MultipartPayload,
    ) -> PipelineResult<AvatarRef> {
        self.gateway
            .upload_avatar(token, payload)
            .await
            .map_err(|err| {
                warn!("Avatar upload failed: {}", err);
                PipelineError::UploadFailed(err)
            })
    }
}
