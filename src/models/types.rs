use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque user identifier assigned by the server
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reference to an avatar image stored by the server
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AvatarRef(String);

impl AvatarRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AvatarRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Bearer token for authenticated gateway calls.
///
/// `Debug` is redacted so the value never ends up in logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

/// The signed-in user's profile.
///
/// Only the session store mutates a live profile; everything else works on clones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    id: UserId,
    name: String,
    email: String,
    #[serde(default, rename = "avatar", skip_serializing_if = "Option::is_none")]
    avatar_ref: Option<AvatarRef>,
}

impl UserProfile {
    pub fn new(id: UserId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            avatar_ref: None,
        }
    }

    pub fn with_avatar(mut self, avatar_ref: AvatarRef) -> Self {
        self.avatar_ref = Some(avatar_ref);
        self
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn avatar_ref(&self) -> Option<&AvatarRef> {
        self.avatar_ref.as_ref()
    }

    /// Apply the fields the server echoed back; id and email never change
    pub(crate) fn apply_echo(&mut self, echo: ProfileEcho) {
        if let Some(name) = echo.name {
            self.name = name;
        }
        if let Some(avatar_ref) = echo.avatar_ref {
            self.avatar_ref = Some(avatar_ref);
        }
    }

    pub(crate) fn set_avatar(&mut self, avatar_ref: AvatarRef) {
        self.avatar_ref = Some(avatar_ref);
    }
}

/// Successful sign-in result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInResponse {
    pub profile: UserProfile,
    pub token: AuthToken,
}

/// The narrow set of fields submitted on a profile update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub old_password: Option<String>,
    pub new_password: Option<String>,
}

impl ProfileChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.new_password.is_none()
    }

    /// Field names for logging, never values
    pub fn field_names(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.name.is_some() {
            fields.push("name");
        }
        if self.old_password.is_some() {
            fields.push("old_password");
        }
        if self.new_password.is_some() {
            fields.push("new_password");
        }
        fields
    }
}

/// Profile fields confirmed by the server after an update
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProfileEcho {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "avatar")]
    pub avatar_ref: Option<AvatarRef>,
}

/// An image chosen for upload. Lives for a single pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarAsset {
    pub local_uri: String,
    pub size_bytes: u64,
    pub mime_type: String,
}

/// Single-field multipart envelope carrying the avatar image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartPayload {
    pub field: String,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}
