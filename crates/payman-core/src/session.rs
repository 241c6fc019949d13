//! Session Management
//!
//! A session holds the one piece of mutable state the gateway owns: the API
//! credential used to authenticate outbound calls. It is created empty,
//! owned by whoever drives the tools, and handed to every tool invocation.
//!
//! ```text
//!                  set-api-key
//!  Unauthenticated ────────────▶ Authenticated ──┐
//!         │                            ▲         │ set-api-key / any tool
//!         └── any other tool: rejected └─────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique session identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque API secret. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Raw secret, for placing in the outbound header only
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Authentication state of a session
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthState {
    Unauthenticated,
    Authenticated,
}

/// A gateway session
#[derive(Clone, Debug)]
pub struct Session {
    /// Unique identifier (used in logs)
    pub id: SessionId,

    credential: Option<Credential>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last time the credential was replaced
    pub credential_set_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Create a new, unauthenticated session
    pub fn new() -> Self {
        Self {
            id: SessionId::new(),
            credential: None,
            created_at: Utc::now(),
            credential_set_at: None,
        }
    }

    /// Store `secret`, replacing any previous credential.
    ///
    /// The secret's format is not checked. An empty secret leaves the
    /// session unauthenticated.
    pub fn set_credential(&mut self, secret: impl Into<String>) {
        self.credential = Some(Credential::new(secret));
        self.credential_set_at = Some(Utc::now());
        tracing::info!(session = %self.id, state = ?self.state(), "API credential updated");
    }

    /// Current credential, if one is set and non-empty
    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref().filter(|c| !c.is_empty())
    }

    pub fn state(&self) -> AuthState {
        if self.credential().is_some() {
            AuthState::Authenticated
        } else {
            AuthState::Unauthenticated
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.state() == AuthState::Authenticated
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_starts_unauthenticated() {
        let session = Session::new();
        assert_eq!(session.state(), AuthState::Unauthenticated);
        assert!(session.credential().is_none());
        assert!(session.credential_set_at.is_none());
    }

    #[test]
    fn test_set_credential_overwrites() {
        let mut session = Session::new();
        session.set_credential("first");
        assert_eq!(session.credential().map(Credential::expose), Some("first"));

        session.set_credential("second");
        assert_eq!(session.credential().map(Credential::expose), Some("second"));
        assert!(session.is_authenticated());
    }

    #[test]
    fn test_empty_secret_is_unauthenticated() {
        let mut session = Session::new();
        session.set_credential("key");
        session.set_credential("");
        assert_eq!(session.state(), AuthState::Unauthenticated);
        assert!(session.credential().is_none());
    }

    #[test]
    fn test_credential_debug_is_redacted() {
        let credential = Credential::new("sk_live_very_secret");
        let debug = format!("{credential:?}");
        assert!(!debug.contains("very_secret"));

        let mut session = Session::new();
        session.set_credential("sk_live_very_secret");
        assert!(!format!("{session:?}").contains("very_secret"));
    }
}
