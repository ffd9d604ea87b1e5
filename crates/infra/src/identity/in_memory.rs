use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use pantry_auth::{IdentityProvider, ProviderError, UserSession};
use pantry_core::UserId;

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone)]
struct Account {
    uid: UserId,
    password: String,
}

/// In-memory identity provider for tests/dev.
///
/// Answers with the same error codes the hosted provider uses so callers see
/// identical messages in both setups. Passwords are held in plain text.
#[derive(Debug, Default)]
pub struct InMemoryIdentityProvider {
    accounts: RwLock<HashMap<String, Account>>,
}

impl InMemoryIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    fn issue(uid: &UserId, email: &str) -> UserSession {
        UserSession::new(uid.clone(), email, Uuid::now_v7().to_string())
    }
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn create_account(&self, email: &str, password: &str) -> Result<UserSession, ProviderError> {
        let email = email.trim().to_lowercase();
        if !email.contains('@') {
            return Err(ProviderError::new("INVALID_EMAIL"));
        }
        if password.len() < MIN_PASSWORD_LEN {
            return Err(ProviderError::new(
                "WEAK_PASSWORD : Password should be at least 6 characters",
            ));
        }

        let mut accounts = self
            .accounts
            .write()
            .map_err(|_| ProviderError::new("INTERNAL_ERROR"))?;
        if accounts.contains_key(&email) {
            return Err(ProviderError::new("EMAIL_EXISTS"));
        }

        let uid = UserId::new(Uuid::now_v7().to_string());
        accounts.insert(
            email.clone(),
            Account {
                uid: uid.clone(),
                password: password.to_string(),
            },
        );
        Ok(Self::issue(&uid, &email))
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<UserSession, ProviderError> {
        let email = email.trim().to_lowercase();
        let accounts = self
            .accounts
            .read()
            .map_err(|_| ProviderError::new("INTERNAL_ERROR"))?;
        match accounts.get(&email) {
            Some(account) if account.password == password => Ok(Self::issue(&account.uid, &email)),
            _ => Err(ProviderError::new("INVALID_LOGIN_CREDENTIALS")),
        }
    }

    async fn sign_out(&self, _session: &UserSession) -> Result<(), ProviderError> {
        Ok(())
    }
}
