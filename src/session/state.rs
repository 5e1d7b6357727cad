use crate::models::{AuthToken, UserProfile};

/// Session state machine.
///
/// The token only exists inside `Authenticated`, so "token present iff
/// authenticated" holds by construction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Unauthenticated,

    /// A sign-in or token restore is in flight
    Authenticating,

    Authenticated {
        profile: UserProfile,
        token: AuthToken,
    },
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated { .. })
    }

    /// Get the current profile if authenticated
    pub fn profile(&self) -> Option<&UserProfile> {
        match self {
            SessionState::Authenticated { profile, .. } => Some(profile),
            _ => None,
        }
    }

    /// Get the current token if authenticated
    pub fn token(&self) -> Option<&AuthToken> {
        match self {
            SessionState::Authenticated { token, .. } => Some(token),
            _ => None,
        }
    }

    /// Short label for logs and error messages
    pub fn label(&self) -> &'static str {
        match self {
            SessionState::Unauthenticated => "unauthenticated",
            SessionState::Authenticating => "authenticating",
            SessionState::Authenticated { .. } => "authenticated",
        }
    }
}
