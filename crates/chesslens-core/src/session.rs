//! Credential state and the access gate.
//!
//! A single [`SessionContext`] is created per process and handed to every
//! component that talks to authenticated endpoints. Components never look the
//! token up from ambient storage; persistence across runs belongs to the
//! infrastructure layer.

use crate::error::{LensError, Result};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

/// Opaque bearer token issued by the remote service on login.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token, for the `Authorization` header only.
    pub fn bearer_token(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

impl From<&str> for Credential {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

impl From<String> for Credential {
    fn from(token: String) -> Self {
        Self::new(token)
    }
}

/// Process-wide holder of the current credential.
///
/// Cloning is cheap and every clone observes the same state.
#[derive(Clone, Default)]
pub struct SessionContext {
    credential: Arc<RwLock<Option<Credential>>>,
}

impl SessionContext {
    /// Creates a signed-out session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session that is already signed in.
    pub fn with_credential(credential: Credential) -> Self {
        Self {
            credential: Arc::new(RwLock::new(Some(credential))),
        }
    }

    /// Stores `credential`, replacing any previous one.
    pub fn login(&self, credential: impl Into<Credential>) {
        let mut guard = self
            .credential
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = Some(credential.into());
        debug!("Session credential stored");
    }

    /// Drops the credential. Returns whether one was present.
    pub fn logout(&self) -> bool {
        let mut guard = self
            .credential
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let had_credential = guard.take().is_some();
        debug!(had_credential, "Session credential cleared");
        had_credential
    }

    /// Returns a copy of the current credential, if any.
    pub fn credential(&self) -> Option<Credential> {
        self.credential
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.credential
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

/// Outcome of a gate check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allowed,
    /// No credential. The only prescribed reaction is a redirect to login.
    Denied,
}

impl Access {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Access::Allowed)
    }
}

/// Access control based on credential presence.
///
/// The gate only checks that a token exists. Signature, expiry and server-side
/// acceptance are the remote service's business and surface later as errors
/// from the authenticated calls themselves.
#[derive(Debug, Clone)]
pub struct SessionGate {
    session: SessionContext,
}

impl SessionGate {
    pub fn new(session: SessionContext) -> Self {
        Self { session }
    }

    pub fn check(&self) -> Access {
        if self.session.is_authenticated() {
            Access::Allowed
        } else {
            debug!("Session gate denied access: no credential");
            Access::Denied
        }
    }

    /// Like [`check`](Self::check), but as a `Result` for `?` at entry points.
    pub fn require(&self) -> Result<()> {
        match self.check() {
            Access::Allowed => Ok(()),
            Access::Denied => Err(LensError::Unauthenticated),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_denies_without_credential() {
        let gate = SessionGate::new(SessionContext::new());
        assert_eq!(gate.check(), Access::Denied);
        assert_eq!(gate.require(), Err(LensError::Unauthenticated));
    }

    #[test]
    fn test_gate_follows_login_and_logout() {
        let session = SessionContext::new();
        let gate = SessionGate::new(session.clone());

        session.login("token-abc");
        assert_eq!(gate.check(), Access::Allowed);
        assert!(gate.require().is_ok());

        assert!(session.logout());
        assert_eq!(gate.check(), Access::Denied);
        assert!(!session.logout());
    }

    #[test]
    fn test_clones_share_state() {
        let session = SessionContext::new();
        let other = session.clone();
        other.login(Credential::new("t"));
        assert_eq!(
            session.credential().map(|c| c.bearer_token().to_string()),
            Some("t".to_string())
        );
    }

    #[test]
    fn test_debug_hides_token() {
        let session = SessionContext::with_credential(Credential::new("secret-token"));
        let credential = session.credential().unwrap();
        assert_eq!(format!("{credential:?}"), "Credential(***)");
        assert!(!format!("{session:?}").contains("secret-token"));
    }
}
