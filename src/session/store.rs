use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::{watch, Mutex as OperationLock, MutexGuard};
use tracing::{debug, info, warn};

use super::state::SessionState;
use crate::models::{
    AuthToken, AvatarRef, CredentialGateway, ProfileChanges, TokenStorage, UserId, UserProfile,
};
use crate::utils::{GatewayError, SessionError, SessionResult};

/// Current state plus the generation it belongs to.
///
/// The generation is bumped on every identity change (sign-in, restore,
/// sign-out). A gateway result is only committed if the generation it started
/// under is still current.
struct Slot {
    state: SessionState,
    generation: u64,
}

/// Single authoritative holder of the process session.
///
/// Construct one per process and share it (`Arc<SessionStore>`) with every
/// consumer. `init`, `sign_in` and `update_profile` fail fast with
/// [`SessionError::OperationInProgress`] while another operation is in flight;
/// `merge_avatar` queues behind it; `sign_out` never waits and pre-empts
/// whatever is in flight.
pub struct SessionStore {
    gateway: Arc<dyn CredentialGateway>,
    storage: Arc<dyn TokenStorage>,
    slot: Mutex<Slot>,
    changes: watch::Sender<SessionState>,
    operation: OperationLock<()>,
}

impl SessionStore {
    pub fn new(gateway: Arc<dyn CredentialGateway>, storage: Arc<dyn TokenStorage>) -> Self {
        let (changes, _) = watch::channel(SessionState::Unauthenticated);
        Self {
            gateway,
            storage,
            slot: Mutex::new(Slot {
                state: SessionState::Unauthenticated,
                generation: 0,
            }),
            changes,
            operation: OperationLock::new(()),
        }
    }

    /// Get a snapshot of the current state
    pub fn state(&self) -> SessionState {
        self.slot.lock().state.clone()
    }

    /// Get the current profile if authenticated
    pub fn profile(&self) -> Option<UserProfile> {
        self.slot.lock().state.profile().cloned()
    }

    pub fn is_authenticated(&self) -> bool {
        self.slot.lock().state.is_authenticated()
    }

    /// Subscribe to committed state transitions
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.changes.subscribe()
    }

    /// Restore a persisted session at startup
    pub async fn init(&self) -> SessionResult<SessionState> {
        const OPERATION: &str = "restore the session";
        let _guard = self.try_begin()?;

        let generation = {
            let slot = self.slot.lock();
            if !matches!(slot.state, SessionState::Unauthenticated) {
                return Err(SessionError::InvalidState {
                    operation: OPERATION,
                    state: slot.state.label(),
                });
            }
            slot.generation
        };

        let Some(token) = self.storage.get_token().await? else {
            debug!("No persisted token; session stays unauthenticated");
            return Ok(SessionState::Unauthenticated);
        };

        let attempt = self.begin_attempt(generation, OPERATION)?;
        match self.gateway.current_profile(&token).await {
            Ok(profile) => {
                let state = SessionState::Authenticated { profile, token };
                if !self.commit_identity(generation, state.clone()) {
                    return Err(SessionError::Preempted {
                        operation: OPERATION,
                    });
                }
                attempt.disarm();
                info!("Restored persisted session");
                Ok(state)
            }
            Err(err @ (GatewayError::Unauthorized | GatewayError::InvalidCredentials)) => {
                info!("Persisted token rejected ({}); clearing it", err);
                drop(attempt);
                self.storage.clear_token().await?;
                Ok(SessionState::Unauthenticated)
            }
            Err(err) => {
                // Transient failure: keep the token so a later init can retry
                warn!("Could not restore session: {}", err);
                Err(err.into())
            }
        }
    }

    /// Sign in, replacing any current session on success
    pub async fn sign_in(&self, email: &str, password: &str) -> SessionResult<UserProfile> {
        const OPERATION: &str = "sign in";
        let _guard = self.try_begin()?;

        let generation = self.generation();
        let attempt = self.begin_attempt(generation, OPERATION)?;

        let response = match self.gateway.sign_in(email, password).await {
            Ok(response) => response,
            Err(err) => {
                info!("Sign-in failed: {}", err);
                return Err(err.into());
            }
        };

        if self.generation() != generation {
            debug!("Discarding sign-in result after sign-out");
            return Err(SessionError::Preempted {
                operation: OPERATION,
            });
        }

        // Persist first: a crash from here on is recovered by init()
        self.storage.set_token(&response.token).await?;

        let profile = response.profile.clone();
        let state = SessionState::Authenticated {
            profile: response.profile,
            token: response.token,
        };
        if !self.commit_identity(generation, state) {
            warn!("Signed out while persisting the token; clearing it again");
            if let Err(err) = self.storage.clear_token().await {
                warn!("Failed to clear pre-empted token: {}", err);
            }
            return Err(SessionError::Preempted {
                operation: OPERATION,
            });
        }
        attempt.disarm();

        info!("Signed in as user {}", profile.id());
        Ok(profile)
    }

    /// End the session. The in-memory transition is immediate and final even
    /// if clearing the persisted token fails.
    pub async fn sign_out(&self) -> SessionResult<()> {
        {
            let mut slot = self.slot.lock();
            slot.generation += 1;
            self.set(&mut slot, SessionState::Unauthenticated);
        }
        info!("Signed out");

        self.storage.clear_token().await.map_err(|err| {
            warn!("Failed to clear persisted token: {}", err);
            SessionError::Storage(err)
        })
    }

    /// Submit changed profile fields. The session profile changes only after
    /// the gateway confirms, and only in the fields it echoes back.
    pub async fn update_profile(&self, changes: ProfileChanges) -> SessionResult<UserProfile> {
        const OPERATION: &str = "update the profile";
        let _guard = self.try_begin()?;
        let (current, token, generation) = self.authenticated(OPERATION)?;

        if changes.is_empty() {
            debug!("Profile update has no changes; skipping gateway call");
            return Ok(current);
        }

        debug!(fields = ?changes.field_names(), "Submitting profile update");
        let echo = self.gateway.update_profile(&token, &changes).await?;

        let mut slot = self.slot.lock();
        if slot.generation != generation {
            return Err(SessionError::Preempted {
                operation: OPERATION,
            });
        }
        let updated = match &mut slot.state {
            SessionState::Authenticated { profile, .. } => {
                profile.apply_echo(echo);
                profile.clone()
            }
            _ => {
                return Err(SessionError::Preempted {
                    operation: OPERATION,
                })
            }
        };
        self.notify(&slot.state);
        Ok(updated)
    }

    /// Replace only the avatar reference of `owner`'s profile.
    ///
    /// `generation` is the value of [`SessionStore::generation`] when the upload
    /// started; if the identity changed since (sign-out, even followed by a
    /// sign-in as the same user) the result is discarded as pre-empted.
    ///
    /// Waits for any in-flight operation, then applies to the profile as it is
    /// at that moment, so confirmed concurrent edits are kept.
    pub async fn merge_avatar(
        &self,
        owner: &UserId,
        generation: u64,
        avatar_ref: AvatarRef,
    ) -> SessionResult<UserProfile> {
        const OPERATION: &str = "merge the avatar";
        let _guard = self.operation.lock().await;

        let mut slot = self.slot.lock();
        if slot.generation != generation {
            debug!("Discarding avatar from an earlier session");
            return Err(SessionError::Preempted {
                operation: OPERATION,
            });
        }
        let updated = match &mut slot.state {
            SessionState::Authenticated { profile, .. } if profile.id() == owner => {
                profile.set_avatar(avatar_ref);
                profile.clone()
            }
            SessionState::Authenticated { .. } => {
                return Err(SessionError::NotOwner {
                    operation: OPERATION,
                })
            }
            other => {
                return Err(SessionError::InvalidState {
                    operation: OPERATION,
                    state: other.label(),
                })
            }
        };
        self.notify(&slot.state);
        debug!("Merged new avatar into session profile");
        Ok(updated)
    }

    /// Profile and token for an operation that needs an authenticated session
    pub(crate) fn authenticated(
        &self,
        operation: &'static str,
    ) -> SessionResult<(UserProfile, AuthToken, u64)> {
        let slot = self.slot.lock();
        match &slot.state {
            SessionState::Authenticated { profile, token } => {
                Ok((profile.clone(), token.clone(), slot.generation))
            }
            other => Err(SessionError::InvalidState {
                operation,
                state: other.label(),
            }),
        }
    }

    fn try_begin(&self) -> SessionResult<MutexGuard<'_, ()>> {
        self.operation
            .try_lock()
            .map_err(|_| SessionError::OperationInProgress)
    }

    /// Identity generation; bumped by every sign-in, restore and sign-out
    pub fn generation(&self) -> u64 {
        self.slot.lock().generation
    }

    fn begin_attempt(&self, generation: u64, operation: &'static str) -> SessionResult<Attempt<'_>> {
        let mut slot = self.slot.lock();
        if slot.generation != generation {
            return Err(SessionError::Preempted { operation });
        }
        if matches!(slot.state, SessionState::Authenticating) {
            return Err(SessionError::InvalidState {
                operation,
                state: slot.state.label(),
            });
        }
        let previous = std::mem::replace(&mut slot.state, SessionState::Authenticating);
        self.notify(&slot.state);
        Ok(Attempt {
            store: self,
            generation,
            previous: Some(previous),
        })
    }

    /// Commit a new identity if nothing pre-empted the attempt
    fn commit_identity(&self, generation: u64, state: SessionState) -> bool {
        let mut slot = self.slot.lock();
        if slot.generation != generation {
            return false;
        }
        slot.generation += 1;
        self.set(&mut slot, state);
        true
    }

    fn restore(&self, generation: u64, previous: SessionState) {
        let mut slot = self.slot.lock();
        if slot.generation == generation {
            self.set(&mut slot, previous);
        } else {
            debug!("Session changed during attempt; not restoring previous state");
        }
    }

    fn set(&self, slot: &mut Slot, state: SessionState) {
        slot.state = state;
        self.notify(&slot.state);
    }

    fn notify(&self, state: &SessionState) {
        self.changes.send_replace(state.clone());
    }
}

/// An authentication attempt in progress.
///
/// Dropping it without `disarm` (error return, cancelled future) puts the
/// pre-attempt state back, unless a sign-out already replaced it.
struct Attempt<'a> {
    store: &'a SessionStore,
    generation: u64,
    previous: Option<SessionState>,
}

impl Attempt<'_> {
    fn disarm(mut self) {
        self.previous = None;
    }
}

impl Drop for Attempt<'_> {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            self.store.restore(self.generation, previous);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MockCredentialGateway, MockTokenStorage};
    use crate::testing::{profile, FakeGateway, Gate, MemoryTokenStorage};
    use crate::utils::{ErrorKind, StorageError};
    use pretty_assertions::assert_eq;

    fn store_with(gateway: Arc<FakeGateway>, storage: Arc<MemoryTokenStorage>) -> SessionStore {
        SessionStore::new(gateway, storage)
    }

    async fn signed_in(gateway: Arc<FakeGateway>, storage: Arc<MemoryTokenStorage>) -> SessionStore {
        let store = store_with(gateway, storage);
        store.sign_in("rodrigo@email.com", "123456").await.unwrap();
        store
    }

    #[tokio::test]
    async fn test_sign_in_persists_then_authenticates() {
        let gateway = Arc::new(FakeGateway::new());
        let storage = Arc::new(MemoryTokenStorage::new());
        let store = store_with(gateway.clone(), storage.clone());
        let mut changes = store.subscribe();

        let signed_in = store.sign_in("rodrigo@email.com", "123456").await.unwrap();

        assert_eq!(signed_in, profile());
        assert_eq!(storage.token(), Some(FakeGateway::token()));
        assert_eq!(store.state().token(), Some(&FakeGateway::token()));
        assert!(changes.has_changed().unwrap());
        assert!(changes.borrow_and_update().is_authenticated());
    }

    #[tokio::test]
    async fn test_failed_sign_in_restores_prior_session() {
        let gateway = Arc::new(FakeGateway::new());
        let storage = Arc::new(MemoryTokenStorage::new());
        let store = signed_in(gateway.clone(), storage.clone()).await;

        gateway.fail_sign_in(GatewayError::InvalidCredentials);
        let err = store.sign_in("rodrigo@email.com", "wrong").await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidCredentials);
        assert_eq!(store.profile(), Some(profile()));
        assert_eq!(storage.token(), Some(FakeGateway::token()));
    }

    #[tokio::test]
    async fn test_failed_sign_in_from_unauthenticated_stays_unauthenticated() {
        let gateway = Arc::new(FakeGateway::new());
        gateway.fail_sign_in(GatewayError::Network("offline".into()));
        let storage = Arc::new(MemoryTokenStorage::new());
        let store = store_with(gateway, storage.clone());

        let err = store.sign_in("rodrigo@email.com", "123456").await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Network);
        assert_eq!(store.state(), SessionState::Unauthenticated);
        assert_eq!(storage.token(), None);
    }

    #[tokio::test]
    async fn test_storage_failure_does_not_expose_session() {
        let gateway = Arc::new(FakeGateway::new());
        let mut storage = MockTokenStorage::new();
        storage
            .expect_set_token()
            .times(1)
            .returning(|_| Err(StorageError::Unavailable("disk full".into())));
        let store = SessionStore::new(gateway, Arc::new(storage));

        let err = store.sign_in("rodrigo@email.com", "123456").await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Storage);
        assert_eq!(store.state(), SessionState::Unauthenticated);
    }

    #[tokio::test]
    async fn test_sign_out_clears_token_and_init_stays_unauthenticated() {
        let gateway = Arc::new(FakeGateway::new());
        let storage = Arc::new(MemoryTokenStorage::new());
        let store = signed_in(gateway.clone(), storage.clone()).await;

        store.sign_out().await.unwrap();
        assert_eq!(store.state(), SessionState::Unauthenticated);
        assert_eq!(storage.token(), None);

        let restored = store_with(gateway, storage);
        assert_eq!(restored.init().await.unwrap(), SessionState::Unauthenticated);
    }

    #[tokio::test]
    async fn test_sign_out_is_authoritative_when_clear_fails() {
        let gateway = Arc::new(FakeGateway::new());
        let storage = Arc::new(MemoryTokenStorage::new());
        let store = signed_in(gateway, storage.clone()).await;

        storage.fail_clear();
        let err = store.sign_out().await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Storage);
        assert_eq!(store.state(), SessionState::Unauthenticated);
    }

    #[tokio::test]
    async fn test_init_restores_persisted_session() {
        let gateway = Arc::new(FakeGateway::new());
        let storage = Arc::new(MemoryTokenStorage::with_token(FakeGateway::token()));
        let store = store_with(gateway, storage);

        let state = store.init().await.unwrap();

        assert_eq!(state.profile(), Some(&profile()));
        assert!(store.is_authenticated());
    }

    #[tokio::test]
    async fn test_init_clears_rejected_token() {
        let gateway = Arc::new(FakeGateway::new());
        gateway.fail_profile(GatewayError::Unauthorized);
        let storage = Arc::new(MemoryTokenStorage::with_token(AuthToken::new("expired")));
        let store = store_with(gateway, storage.clone());

        assert_eq!(store.init().await.unwrap(), SessionState::Unauthenticated);
        assert_eq!(storage.token(), None);
    }

    #[tokio::test]
    async fn test_init_keeps_token_on_network_error() {
        let gateway = Arc::new(FakeGateway::new());
        gateway.fail_profile(GatewayError::Network("timeout".into()));
        let storage = Arc::new(MemoryTokenStorage::with_token(FakeGateway::token()));
        let store = store_with(gateway, storage.clone());

        let err = store.init().await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Network);
        assert_eq!(store.state(), SessionState::Unauthenticated);
        assert_eq!(storage.token(), Some(FakeGateway::token()));
    }

    #[tokio::test]
    async fn test_operations_require_authentication() {
        let mut gateway = MockCredentialGateway::new();
        gateway.expect_update_profile().never();
        let store = SessionStore::new(Arc::new(gateway), Arc::new(MemoryTokenStorage::new()));

        let err = store
            .update_profile(ProfileChanges {
                name: Some("New".into()),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SessionError::InvalidState {
                state: "unauthenticated",
                ..
            }
        ));

        let err = store
            .merge_avatar(&UserId::new("1"), store.generation(), AvatarRef::new("a.png"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);
    }

    #[tokio::test]
    async fn test_update_profile_applies_only_after_confirmation() {
        let gateway = Arc::new(FakeGateway::new());
        let gate = Arc::new(Gate::new());
        gateway.gate_updates(gate.clone());
        let store = signed_in(gateway.clone(), Arc::new(MemoryTokenStorage::new())).await;

        let update = store.update_profile(ProfileChanges {
            name: Some("Rodrigo Gonçalves".into()),
            ..Default::default()
        });
        let observe = async {
            gate.wait_entered().await;
            // Request is in flight: nothing applied yet
            let during = store.profile().unwrap();
            gate.open();
            during
        };
        let (updated, during) = tokio::join!(update, observe);

        assert_eq!(during.name(), "Rodrigo");
        assert_eq!(updated.unwrap().name(), "Rodrigo Gonçalves");
        assert_eq!(store.profile().unwrap().name(), "Rodrigo Gonçalves");
    }

    #[tokio::test]
    async fn test_failed_update_keeps_profile() {
        let gateway = Arc::new(FakeGateway::new());
        let store = signed_in(gateway.clone(), Arc::new(MemoryTokenStorage::new())).await;
        gateway.fail_update(GatewayError::ValidationRejected("old password is wrong".into()));

        let err = store
            .update_profile(ProfileChanges {
                name: Some("Other".into()),
                old_password: Some("bad".into()),
                new_password: Some("abcdef".into()),
            })
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ValidationRejected);
        assert_eq!(store.profile(), Some(profile()));
    }

    #[tokio::test]
    async fn test_empty_update_skips_gateway() {
        let gateway = Arc::new(FakeGateway::new());
        let store = signed_in(gateway.clone(), Arc::new(MemoryTokenStorage::new())).await;

        let unchanged = store.update_profile(ProfileChanges::default()).await.unwrap();

        assert_eq!(unchanged, profile());
        assert_eq!(gateway.calls("update_profile"), 0);
    }

    #[tokio::test]
    async fn test_concurrent_updates_never_both_commit() {
        let gateway = Arc::new(FakeGateway::new());
        let gate = Arc::new(Gate::new());
        gateway.gate_updates(gate.clone());
        let store = signed_in(gateway.clone(), Arc::new(MemoryTokenStorage::new())).await;

        let first = store.update_profile(ProfileChanges {
            name: Some("First".into()),
            ..Default::default()
        });
        let second = async {
            gate.wait_entered().await;
            let result = store
                .update_profile(ProfileChanges {
                    name: Some("Second".into()),
                    ..Default::default()
                })
                .await;
            gate.open();
            result
        };
        let (first, second) = tokio::join!(first, second);

        assert_eq!(first.unwrap().name(), "First");
        assert!(matches!(second, Err(SessionError::OperationInProgress)));
        assert_eq!(store.profile().unwrap().name(), "First");
        assert_eq!(gateway.calls("update_profile"), 1);
    }

    #[tokio::test]
    async fn test_second_sign_in_is_rejected_while_in_flight() {
        let gateway = Arc::new(FakeGateway::new());
        let gate = Arc::new(Gate::new());
        gateway.gate_sign_in(gate.clone());
        let store = store_with(gateway, Arc::new(MemoryTokenStorage::new()));

        let first = store.sign_in("rodrigo@email.com", "123456");
        let second = async {
            gate.wait_entered().await;
            assert_eq!(store.state(), SessionState::Authenticating);
            let result = store.sign_in("rodrigo@email.com", "123456").await;
            gate.open();
            result
        };
        let (first, second) = tokio::join!(first, second);

        assert!(first.is_ok());
        assert_eq!(second.unwrap_err().kind(), ErrorKind::OperationInProgress);
    }

    #[tokio::test]
    async fn test_sign_out_preempts_in_flight_sign_in() {
        let gateway = Arc::new(FakeGateway::new());
        let gate = Arc::new(Gate::new());
        gateway.gate_sign_in(gate.clone());
        let storage = Arc::new(MemoryTokenStorage::new());
        let store = store_with(gateway, storage.clone());

        let sign_in = store.sign_in("rodrigo@email.com", "123456");
        let sign_out = async {
            gate.wait_entered().await;
            store.sign_out().await.unwrap();
            gate.open();
        };
        let (result, ()) = tokio::join!(sign_in, sign_out);

        assert!(matches!(result, Err(SessionError::Preempted { .. })));
        assert_eq!(store.state(), SessionState::Unauthenticated);
        assert_eq!(storage.token(), None);
    }

    #[tokio::test]
    async fn test_sign_out_preempts_in_flight_init() {
        let gateway = Arc::new(FakeGateway::new());
        let gate = Arc::new(Gate::new());
        gateway.gate_profile(gate.clone());
        let storage = Arc::new(MemoryTokenStorage::with_token(FakeGateway::token()));
        let store = store_with(gateway, storage.clone());
        let mut changes = store.subscribe();

        let init = store.init();
        let sign_out = async {
            gate.wait_entered().await;
            store.sign_out().await.unwrap();
            gate.open();
        };
        let (result, ()) = tokio::join!(init, sign_out);

        assert!(matches!(result, Err(SessionError::Preempted { .. })));
        assert_eq!(store.state(), SessionState::Unauthenticated);
        assert!(!changes.borrow_and_update().is_authenticated());
        assert_eq!(storage.token(), None);
    }

    #[tokio::test]
    async fn test_merge_avatar_from_earlier_session_is_discarded() {
        let gateway = Arc::new(FakeGateway::new());
        let store = signed_in(gateway, Arc::new(MemoryTokenStorage::new())).await;
        let started = store.generation();

        store.sign_out().await.unwrap();
        store.sign_in("rodrigo@email.com", "123456").await.unwrap();

        let err = store
            .merge_avatar(profile().id(), started, AvatarRef::new("stale.png"))
            .await
            .unwrap_err();

        assert!(matches!(err, SessionError::Preempted { .. }));
        assert_eq!(err.kind(), ErrorKind::InvalidState);
        assert_eq!(store.profile().unwrap().avatar_ref(), None);
    }

    #[tokio::test]
    async fn test_sign_out_discards_late_update() {
        let gateway = Arc::new(FakeGateway::new());
        let gate = Arc::new(Gate::new());
        gateway.gate_updates(gate.clone());
        let store = signed_in(gateway, Arc::new(MemoryTokenStorage::new())).await;

        let update = store.update_profile(ProfileChanges {
            name: Some("Late".into()),
            ..Default::default()
        });
        let sign_out = async {
            gate.wait_entered().await;
            store.sign_out().await.unwrap();
            gate.open();
        };
        let (result, ()) = tokio::join!(update, sign_out);

        assert_eq!(result.unwrap_err().kind(), ErrorKind::InvalidState);
        assert_eq!(store.state(), SessionState::Unauthenticated);
    }

    #[tokio::test]
    async fn test_merge_avatar_touches_only_avatar() {
        let gateway = Arc::new(FakeGateway::new());
        let store = signed_in(gateway, Arc::new(MemoryTokenStorage::new())).await;
        store
            .update_profile(ProfileChanges {
                name: Some("Renamed".into()),
                ..Default::default()
            })
            .await
            .unwrap();

        let merged = store
            .merge_avatar(profile().id(), store.generation(), AvatarRef::new("renamed.png"))
            .await
            .unwrap();

        assert_eq!(merged.name(), "Renamed");
        assert_eq!(merged.email(), profile().email());
        assert_eq!(merged.avatar_ref(), Some(&AvatarRef::new("renamed.png")));
    }

    #[tokio::test]
    async fn test_merge_avatar_rejects_other_user() {
        let gateway = Arc::new(FakeGateway::new());
        let store = signed_in(gateway, Arc::new(MemoryTokenStorage::new())).await;

        let err = store
            .merge_avatar(
                &UserId::new("someone-else"),
                store.generation(),
                AvatarRef::new("x.png"),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, SessionError::NotOwner { .. }));
        assert_eq!(store.profile().unwrap().avatar_ref(), None);
    }
}
