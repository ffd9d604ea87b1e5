use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::session::UserSession;

/// Hosted identity service boundary.
///
/// Implementations hold credentials; callers never see password hashes or
/// policies, only a session or the provider's error message.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Register a new account and return its first session.
    async fn create_account(&self, email: &str, password: &str) -> Result<UserSession, ProviderError>;

    /// Exchange credentials for a session.
    async fn sign_in(&self, email: &str, password: &str) -> Result<UserSession, ProviderError>;

    /// End a session on the provider side (if the provider tracks any).
    async fn sign_out(&self, session: &UserSession) -> Result<(), ProviderError>;
}

#[async_trait]
impl<P> IdentityProvider for Arc<P>
where
    P: IdentityProvider + ?Sized,
{
    async fn create_account(&self, email: &str, password: &str) -> Result<UserSession, ProviderError> {
        (**self).create_account(email, password).await
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<UserSession, ProviderError> {
        (**self).sign_in(email, password).await
    }

    async fn sign_out(&self, session: &UserSession) -> Result<(), ProviderError> {
        (**self).sign_out(session).await
    }
}
