//! In-memory collaborators for unit tests.
//!
//! The mockall mocks on the collaborator traits cover call-count expectations;
//! these fakes keep state and can pause a call mid-flight through a [`Gate`].

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Semaphore;

use crate::models::{
    AuthToken, AvatarAsset, AvatarRef, CredentialGateway, ImagePicker, MultipartPayload,
    ProfileChanges, ProfileEcho, SignInResponse, TokenStorage, UserId, UserProfile,
};
use crate::utils::{
    GatewayError, GatewayResult, PipelineResult, StorageError, StorageResult,
};

/// The profile the fake server hands out
pub fn profile() -> UserProfile {
    UserProfile::new(UserId::new("1"), "Rodrigo", "rodrigo@email.com")
}

/// Pauses a fake call until the test opens it
pub struct Gate {
    entered: Semaphore,
    release: Semaphore,
}

impl Gate {
    pub fn new() -> Self {
        Self {
            entered: Semaphore::new(0),
            release: Semaphore::new(0),
        }
    }

    /// Called by the fake: signal arrival, then wait to be released
    pub async fn pass(&self) {
        self.entered.add_permits(1);
        self.release
            .acquire()
            .await
            .expect("gate semaphore closed")
            .forget();
    }

    /// Wait until a call is parked at the gate
    pub async fn wait_entered(&self) {
        self.entered
            .acquire()
            .await
            .expect("gate semaphore closed")
            .forget();
    }

    pub fn open(&self) {
        self.release.add_permits(1);
    }
}

#[derive(Default)]
struct Failures {
    sign_in: Option<GatewayError>,
    profile: Option<GatewayError>,
    update: Option<GatewayError>,
    upload: Option<GatewayError>,
}

#[derive(Default)]
struct Gates {
    sign_in: Option<Arc<Gate>>,
    profile: Option<Arc<Gate>>,
    update: Option<Arc<Gate>>,
    upload: Option<Arc<Gate>>,
}

/// Stateful fake server
pub struct FakeGateway {
    server_profile: Mutex<UserProfile>,
    failures: Mutex<Failures>,
    gates: Mutex<Gates>,
    calls: Mutex<HashMap<&'static str, usize>>,
    uploads: Mutex<Vec<MultipartPayload>>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self {
            server_profile: Mutex::new(profile()),
            failures: Mutex::new(Failures::default()),
            gates: Mutex::new(Gates::default()),
            calls: Mutex::new(HashMap::new()),
            uploads: Mutex::new(Vec::new()),
        }
    }

    pub fn token() -> AuthToken {
        AuthToken::new("token-1")
    }

    pub fn fail_sign_in(&self, err: GatewayError) {
        self.failures.lock().sign_in = Some(err);
    }

    pub fn fail_profile(&self, err: GatewayError) {
        self.failures.lock().profile = Some(err);
    }

    pub fn fail_update(&self, err: GatewayError) {
        self.failures.lock().update = Some(err);
    }

    pub fn fail_upload(&self, err: GatewayError) {
        self.failures.lock().upload = Some(err);
    }

    pub fn gate_sign_in(&self, gate: Arc<Gate>) {
        self.gates.lock().sign_in = Some(gate);
    }

    pub fn gate_profile(&self, gate: Arc<Gate>) {
        self.gates.lock().profile = Some(gate);
    }

    pub fn gate_updates(&self, gate: Arc<Gate>) {
        self.gates.lock().update = Some(gate);
    }

    pub fn gate_uploads(&self, gate: Arc<Gate>) {
        self.gates.lock().upload = Some(gate);
    }

    pub fn calls(&self, operation: &str) -> usize {
        self.calls.lock().get(operation).copied().unwrap_or(0)
    }

    pub fn uploads(&self) -> Vec<MultipartPayload> {
        self.uploads.lock().clone()
    }

    fn record(&self, operation: &'static str) {
        *self.calls.lock().entry(operation).or_insert(0) += 1;
    }
}

#[async_trait]
impl CredentialGateway for FakeGateway {
    async fn sign_in(&self, _email: &str, _password: &str) -> GatewayResult<SignInResponse> {
        self.record("sign_in");
        let gate = self.gates.lock().sign_in.clone();
        if let Some(gate) = gate {
            gate.pass().await;
        }
        if let Some(err) = self.failures.lock().sign_in.clone() {
            return Err(err);
        }
        Ok(SignInResponse {
            profile: self.server_profile.lock().clone(),
            token: Self::token(),
        })
    }

    async fn current_profile(&self, token: &AuthToken) -> GatewayResult<UserProfile> {
        self.record("current_profile");
        let gate = self.gates.lock().profile.clone();
        if let Some(gate) = gate {
            gate.pass().await;
        }
        if let Some(err) = self.failures.lock().profile.clone() {
            return Err(err);
        }
        if *token != Self::token() {
            return Err(GatewayError::Unauthorized);
        }
        Ok(self.server_profile.lock().clone())
    }

    async fn update_profile(
        &self,
        _token: &AuthToken,
        changes: &ProfileChanges,
    ) -> GatewayResult<ProfileEcho> {
        self.record("update_profile");
        let gate = self.gates.lock().update.clone();
        if let Some(gate) = gate {
            gate.pass().await;
        }
        if let Some(err) = self.failures.lock().update.clone() {
            return Err(err);
        }
        if let Some(name) = &changes.name {
            *self.server_profile.lock() =
                UserProfile::new(UserId::new("1"), name.clone(), "rodrigo@email.com");
        }
        Ok(ProfileEcho {
            name: changes.name.clone(),
            avatar_ref: None,
        })
    }

    async fn upload_avatar(
        &self,
        _token: &AuthToken,
        payload: MultipartPayload,
    ) -> GatewayResult<AvatarRef> {
        self.record("upload_avatar");
        let gate = self.gates.lock().upload.clone();
        if let Some(gate) = gate {
            gate.pass().await;
        }
        if let Some(err) = self.failures.lock().upload.clone() {
            return Err(err);
        }
        let reference = AvatarRef::new(payload.file_name.clone());
        self.uploads.lock().push(payload);
        Ok(reference)
    }
}

/// Token storage kept in memory
pub struct MemoryTokenStorage {
    token: Mutex<Option<AuthToken>>,
    fail_clear: Mutex<bool>,
}

impl MemoryTokenStorage {
    pub fn new() -> Self {
        Self {
            token: Mutex::new(None),
            fail_clear: Mutex::new(false),
        }
    }

    pub fn with_token(token: AuthToken) -> Self {
        let storage = Self::new();
        *storage.token.lock() = Some(token);
        storage
    }

    pub fn token(&self) -> Option<AuthToken> {
        self.token.lock().clone()
    }

    pub fn fail_clear(&self) {
        *self.fail_clear.lock() = true;
    }
}

#[async_trait]
impl TokenStorage for MemoryTokenStorage {
    async fn get_token(&self) -> StorageResult<Option<AuthToken>> {
        Ok(self.token.lock().clone())
    }

    async fn set_token(&self, token: &AuthToken) -> StorageResult<()> {
        *self.token.lock() = Some(token.clone());
        Ok(())
    }

    async fn clear_token(&self) -> StorageResult<()> {
        if *self.fail_clear.lock() {
            return Err(StorageError::Unavailable("keychain locked".into()));
        }
        *self.token.lock() = None;
        Ok(())
    }
}

/// Picker that hands out one fixed asset, or cancels
pub struct StaticPicker {
    asset: Option<AvatarAsset>,
}

impl StaticPicker {
    pub fn image(local_uri: &str, size_bytes: u64) -> Self {
        Self {
            asset: Some(AvatarAsset {
                local_uri: local_uri.to_string(),
                size_bytes,
                mime_type: "image".to_string(),
            }),
        }
    }

    pub fn cancelled() -> Self {
        Self { asset: None }
    }
}

#[async_trait]
impl ImagePicker for StaticPicker {
    async fn pick_image(&self) -> PipelineResult<Option<AvatarAsset>> {
        Ok(self.asset.clone())
    }

    async fn read_image(&self, _asset: &AvatarAsset) -> PipelineResult<Bytes> {
        Ok(Bytes::from_static(b"\x89PNG fake image"))
    }
}
