//! Signed-in sessions.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Duration, Utc};

use pantry_core::UserId;

use crate::error::AuthError;

/// Lifetime of a session whose provider did not say when its token expires.
/// Matches the one-hour ID tokens of the hosted provider.
pub const DEFAULT_SESSION_SECS: i64 = 3600;

/// Identity reference handed out by the provider after sign-up/sign-in.
///
/// `token` is the provider-issued ID token. It authorizes document-store
/// calls and doubles as the key under which the session is registered.
/// Once `expires_at` has passed the backend rejects the token, so the
/// session counts as signed out.
#[derive(Clone, PartialEq, Eq)]
pub struct UserSession {
    pub uid: UserId,
    pub email: String,
    pub token: String,
    pub signed_in_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl UserSession {
    pub fn new(uid: UserId, email: impl Into<String>, token: impl Into<String>) -> Self {
        let signed_in_at = Utc::now();
        Self {
            uid,
            email: email.into(),
            token: token.into(),
            signed_in_at,
            expires_at: signed_in_at + Duration::seconds(DEFAULT_SESSION_SECS),
        }
    }

    /// Expire `lifetime` after sign-in instead of the default hour.
    pub fn with_lifetime(mut self, lifetime: Duration) -> Self {
        self.expires_at = self.signed_in_at + lifetime;
        self
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

impl core::fmt::Debug for UserSession {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("UserSession")
            .field("uid", &self.uid)
            .field("email", &self.email)
            .field("signed_in_at", &self.signed_in_at)
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}

/// Sessions currently signed in, keyed by token.
///
/// A token is authenticated while it is registered and unexpired. Expired
/// entries are dropped when looked up and on every insert, so the map only
/// holds live sessions plus those that expired since the last sign-in.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    inner: RwLock<HashMap<String, UserSession>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned() -> AuthError {
        AuthError::SessionStore("session registry lock poisoned".to_string())
    }

    pub fn insert(&self, session: UserSession) -> Result<(), AuthError> {
        let now = Utc::now();
        let mut map = self.inner.write().map_err(|_| Self::poisoned())?;
        let before = map.len();
        map.retain(|_, s| !s.is_expired_at(now));
        if map.len() < before {
            tracing::debug!(evicted = before - map.len(), "expired sessions evicted");
        }
        map.insert(session.token.clone(), session);
        Ok(())
    }

    /// The live session for `token`. An expired one is evicted and reported
    /// as absent.
    pub fn get(&self, token: &str) -> Result<Option<UserSession>, AuthError> {
        let now = Utc::now();
        {
            let map = self.inner.read().map_err(|_| Self::poisoned())?;
            match map.get(token) {
                None => return Ok(None),
                Some(session) if !session.is_expired_at(now) => return Ok(Some(session.clone())),
                Some(_) => {}
            }
        }

        let mut map = self.inner.write().map_err(|_| Self::poisoned())?;
        if let Some(session) = map.remove(token) {
            tracing::debug!(uid = %session.uid, "session expired");
        }
        Ok(None)
    }

    pub fn remove(&self, token: &str) -> Result<Option<UserSession>, AuthError> {
        let mut map = self.inner.write().map_err(|_| Self::poisoned())?;
        Ok(map.remove(token))
    }

    pub fn is_authenticated(&self, token: &str) -> bool {
        matches!(self.get(token), Ok(Some(_)))
    }

    /// Registered entries, expired ones not yet evicted included.
    pub fn len(&self) -> usize {
        self.inner.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
