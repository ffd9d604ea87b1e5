//! Firebase Authentication adapter (Identity Toolkit REST API).

use async_trait::async_trait;
use chrono::Duration;
use reqwest::Url;
use serde::{Deserialize, Serialize};

use pantry_auth::{IdentityProvider, ProviderError, UserSession};
use pantry_core::UserId;

use crate::document_store::StoreError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenResponse {
    local_id: String,
    #[serde(default)]
    email: String,
    id_token: String,
    /// Token lifetime in seconds, sent as a decimal string.
    expires_in: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Email/password accounts hosted by Firebase Authentication.
///
/// Sign-out is local only: ID tokens cannot be revoked with the API key, so
/// the session is simply forgotten by the caller.
#[derive(Debug, Clone)]
pub struct FirebaseIdentityProvider {
    client: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl FirebaseIdentityProvider {
    pub fn new(
        client: reqwest::Client,
        base_url: &str,
        api_key: impl Into<String>,
    ) -> Result<Self, StoreError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| StoreError::InvalidConfig(format!("auth url '{base_url}': {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(StoreError::InvalidConfig(format!(
                "auth url '{base_url}' cannot be a base"
            )));
        }
        Ok(Self {
            client,
            base_url,
            api_key: api_key.into(),
        })
    }

    fn endpoint(&self, method: &str) -> Result<Url, ProviderError> {
        let action = format!("accounts:{method}");
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ProviderError::new("auth url cannot be a base"))?
            .pop_if_empty()
            .extend(["v1", action.as_str()]);
        Ok(url)
    }

    async fn exchange(&self, method: &str, email: &str, password: &str) -> Result<UserSession, ProviderError> {
        let url = self.endpoint(method)?;
        let body = PasswordRequest {
            email,
            password,
            return_secure_token: true,
        };

        let response = self
            .client
            .post(url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::new(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            tracing::debug!(method, status = status.as_u16(), %message, "identity toolkit rejected request");
            return Err(ProviderError::new(message));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::new(e.to_string()))?;

        let email = if token.email.is_empty() {
            email.to_string()
        } else {
            token.email
        };
        let session = UserSession::new(UserId::new(token.local_id), email, token.id_token);
        Ok(match token.expires_in.as_deref().and_then(|s| s.parse::<i64>().ok()) {
            Some(secs) => session.with_lifetime(Duration::seconds(secs)),
            None => session,
        })
    }
}

#[async_trait]
impl IdentityProvider for FirebaseIdentityProvider {
    async fn create_account(&self, email: &str, password: &str) -> Result<UserSession, ProviderError> {
        self.exchange("signUp", email, password).await
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<UserSession, ProviderError> {
        self.exchange("signInWithPassword", email, password).await
    }

    async fn sign_out(&self, _session: &UserSession) -> Result<(), ProviderError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(server: &MockServer) -> FirebaseIdentityProvider {
        FirebaseIdentityProvider::new(reqwest::Client::new(), &server.uri(), "api-key").unwrap()
    }

    #[tokio::test]
    async fn sign_up_returns_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/accounts:signUp"))
            .and(query_param("key", "api-key"))
            .and(body_json(json!({
                "email": "cook@example.com",
                "password": "secret-1",
                "returnSecureToken": true
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "kind": "identitytoolkit#SignupNewUserResponse",
                "localId": "uid-42",
                "email": "cook@example.com",
                "idToken": "id-token",
                "refreshToken": "refresh-token",
                "expiresIn": "1800"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let session = provider(&server)
            .create_account("cook@example.com", "secret-1")
            .await
            .unwrap();

        assert_eq!(session.uid, UserId::new("uid-42"));
        assert_eq!(session.token, "id-token");
        assert_eq!(session.expires_at - session.signed_in_at, Duration::seconds(1800));
    }

    #[tokio::test]
    async fn sign_in_uses_password_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/accounts:signInWithPassword"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "localId": "uid-42",
                "email": "cook@example.com",
                "idToken": "id-token-2",
                "registered": true
            })))
            .mount(&server)
            .await;

        let session = provider(&server)
            .sign_in("cook@example.com", "secret-1")
            .await
            .unwrap();

        assert_eq!(session.token, "id-token-2");
        assert_eq!(
            session.expires_at - session.signed_in_at,
            Duration::seconds(pantry_auth::DEFAULT_SESSION_SECS)
        );
    }

    #[tokio::test]
    async fn provider_message_is_passed_through() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/accounts:signUp"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": {
                    "code": 400,
                    "message": "EMAIL_EXISTS",
                    "errors": [{ "message": "EMAIL_EXISTS", "domain": "global", "reason": "invalid" }]
                }
            })))
            .mount(&server)
            .await;

        let err = provider(&server)
            .create_account("cook@example.com", "secret-1")
            .await
            .unwrap_err();

        assert_eq!(err.message(), "EMAIL_EXISTS");
    }
}
