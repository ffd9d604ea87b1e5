//! Sign-up / sign-in / sign-out flows on top of an [`IdentityProvider`].

use crate::error::AuthError;
use crate::forms::{Credentials, SignUp};
use crate::provider::IdentityProvider;
use crate::session::{SessionRegistry, UserSession};

/// Drives the provider and records which sessions are signed in.
#[derive(Debug)]
pub struct Authenticator<P> {
    provider: P,
    sessions: SessionRegistry,
}

impl<P> Authenticator<P>
where
    P: IdentityProvider,
{
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            sessions: SessionRegistry::new(),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    /// Create an account and sign it in.
    ///
    /// A password mismatch is rejected before the provider is contacted.
    pub async fn sign_up(&self, form: &SignUp) -> Result<UserSession, AuthError> {
        if !form.passwords_match() {
            tracing::debug!(email = %form.email, "sign-up rejected: passwords do not match");
            return Err(AuthError::PasswordMismatch);
        }

        let session = self
            .provider
            .create_account(&form.email, &form.password)
            .await
            .inspect_err(|e| tracing::warn!(email = %form.email, error = %e, "account creation failed"))?;

        tracing::info!(uid = %session.uid, "account created");
        self.sessions.insert(session.clone())?;
        Ok(session)
    }

    pub async fn sign_in(&self, credentials: &Credentials) -> Result<UserSession, AuthError> {
        let session = self
            .provider
            .sign_in(&credentials.email, &credentials.password)
            .await
            .inspect_err(|e| tracing::warn!(email = %credentials.email, error = %e, "sign-in failed"))?;

        tracing::info!(uid = %session.uid, "signed in");
        self.sessions.insert(session.clone())?;
        Ok(session)
    }

    /// Sign the session out; it stays registered if the provider fails.
    pub async fn sign_out(&self, token: &str) -> Result<(), AuthError> {
        let session = self.sessions.get(token)?.ok_or(AuthError::SessionNotFound)?;

        self.provider
            .sign_out(&session)
            .await
            .inspect_err(|e| tracing::warn!(uid = %session.uid, error = %e, "sign-out failed"))?;

        self.sessions.remove(token)?;
        tracing::info!(uid = %session.uid, "signed out");
        Ok(())
    }

    /// The live session for `token`; expired sessions count as signed out.
    pub fn current_user(&self, token: &str) -> Result<Option<UserSession>, AuthError> {
        self.sessions.get(token)
    }
}
