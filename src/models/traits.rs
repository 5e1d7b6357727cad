use async_trait::async_trait;
use bytes::Bytes;

use super::types::{
    AuthToken, AvatarAsset, AvatarRef, MultipartPayload, ProfileChanges, ProfileEcho,
    SignInResponse, UserProfile,
};
use crate::utils::{GatewayResult, PipelineResult, StorageResult};

/// Network-facing collaborator for every credentialed call.
///
/// Implementations attach the bearer header themselves; callers only hand
/// over the token value.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialGateway: Send + Sync {
    /// Exchange credentials for a profile and a bearer token
    async fn sign_in(&self, email: &str, password: &str) -> GatewayResult<SignInResponse>;

    /// Fetch the profile a stored token belongs to
    async fn current_profile(&self, token: &AuthToken) -> GatewayResult<UserProfile>;

    /// Submit changed profile fields, returning the fields the server confirmed
    async fn update_profile(
        &self,
        token: &AuthToken,
        changes: &ProfileChanges,
    ) -> GatewayResult<ProfileEcho>;

    /// Upload a new avatar image
    async fn upload_avatar(
        &self,
        token: &AuthToken,
        payload: MultipartPayload,
    ) -> GatewayResult<AvatarRef>;
}

/// Single-key persistence for the bearer token
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenStorage: Send + Sync {
    async fn get_token(&self) -> StorageResult<Option<AuthToken>>;

    async fn set_token(&self, token: &AuthToken) -> StorageResult<()>;

    async fn clear_token(&self) -> StorageResult<()>;
}

/// Source of local images for the avatar pipeline
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImagePicker: Send + Sync {
    /// `None` means the user cancelled; that is not an error
    async fn pick_image(&self) -> PipelineResult<Option<AvatarAsset>>;

    /// Load the bytes behind a previously picked asset
    async fn read_image(&self, asset: &AvatarAsset) -> PipelineResult<Bytes>;
}
