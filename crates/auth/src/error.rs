use thiserror::Error;

/// Failure reported by an identity provider.
///
/// The message is kept exactly as the provider returned it so it can be shown
/// to the user unchanged (e.g. `EMAIL_EXISTS`, `INVALID_PASSWORD`).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ProviderError {
    message: String,
}

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Sign-up form had differing password fields; the provider was not called.
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// The identity provider rejected the request.
    #[error("{0}")]
    Provider(#[from] ProviderError),

    /// No signed-in session for the presented token.
    #[error("not signed in")]
    SessionNotFound,

    /// The session registry could not be read or written.
    #[error("session store unavailable: {0}")]
    SessionStore(String),
}
