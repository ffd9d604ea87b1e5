use pantry_auth::UserSession;

/// Signed-in session for a request.
///
/// Inserted by the session middleware; present on every protected route.
#[derive(Debug, Clone)]
pub struct SessionContext {
    session: UserSession,
}

impl SessionContext {
    pub fn new(session: UserSession) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &UserSession {
        &self.session
    }

    pub fn token(&self) -> &str {
        &self.session.token
    }
}
