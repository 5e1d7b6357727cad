// Gateway module for models - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod traits;
mod types;

// Public re-exports - the ONLY way to access model functionality
pub use traits::{CredentialGateway, ImagePicker, TokenStorage};
pub use types::{
    AuthToken, AvatarAsset, AvatarRef, MultipartPayload, ProfileChanges, ProfileEcho,
    SignInResponse, UserId, UserProfile,
};

#[cfg(test)]
pub use traits::{MockCredentialGateway, MockImagePicker, MockTokenStorage};
