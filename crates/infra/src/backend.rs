//! Backend wiring: identity provider + document store, selected by config.
//!
//! The process holds at most one backend, created by an explicit [`init`]
//! and never torn down.

use std::sync::{Arc, OnceLock};

use pantry_auth::{Authenticator, IdentityProvider, UserSession};

use crate::config::{BackendKind, PantryConfig};
use crate::document_store::{DocumentStore, FirestoreDocumentStore, InMemoryDocumentStore, StoreError};
use crate::identity::{FirebaseIdentityProvider, InMemoryIdentityProvider};
use crate::inventory_service::{InventoryService, DEFAULT_COLLECTION};

static BACKEND: OnceLock<Arc<Backend>> = OnceLock::new();

/// Initialize the process-wide backend from config.
///
/// Later calls return the backend created by the first successful call and
/// ignore their `config`.
pub fn init(config: &PantryConfig) -> Result<Arc<Backend>, StoreError> {
    if let Some(existing) = BACKEND.get() {
        return Ok(existing.clone());
    }
    let backend = Arc::new(Backend::from_config(config)?);
    Ok(BACKEND.get_or_init(|| backend).clone())
}

/// The process-wide backend, if [`init`] has run.
pub fn get() -> Option<Arc<Backend>> {
    BACKEND.get().cloned()
}

enum Documents {
    InMemory(Arc<InMemoryDocumentStore>),
    Firestore(FirestoreDocumentStore),
}

/// Authentication plus per-session inventory access.
pub struct Backend {
    kind: BackendKind,
    auth: Authenticator<Arc<dyn IdentityProvider>>,
    documents: Documents,
    collection: String,
}

impl Backend {
    /// Fresh in-memory backend (dev/test).
    pub fn in_memory() -> Self {
        Self::in_memory_with_collection(DEFAULT_COLLECTION)
    }

    pub fn in_memory_with_collection(collection: impl Into<String>) -> Self {
        let provider: Arc<dyn IdentityProvider> = Arc::new(InMemoryIdentityProvider::new());
        Self {
            kind: BackendKind::InMemory,
            auth: Authenticator::new(provider),
            documents: Documents::InMemory(Arc::new(InMemoryDocumentStore::new())),
            collection: collection.into(),
        }
    }

    pub fn from_config(config: &PantryConfig) -> Result<Self, StoreError> {
        let firebase = match (config.backend, &config.firebase) {
            (BackendKind::InMemory, _) => {
                return Ok(Self::in_memory_with_collection(config.collection.clone()));
            }
            (BackendKind::Firebase, Some(firebase)) => firebase,
            (BackendKind::Firebase, None) => {
                return Err(StoreError::InvalidConfig("firebase settings missing".to_string()));
            }
        };

        let client = reqwest::Client::new();
        let provider: Arc<dyn IdentityProvider> = Arc::new(FirebaseIdentityProvider::new(
            client.clone(),
            &firebase.auth_url,
            firebase.api_key.clone(),
        )?);
        let store = FirestoreDocumentStore::new(
            client,
            &firebase.firestore_url,
            firebase.project_id.clone(),
            firebase.api_key.clone(),
        )?;

        tracing::info!(project = %firebase.project_id, collection = %config.collection, "firebase backend configured");
        Ok(Self {
            kind: BackendKind::Firebase,
            auth: Authenticator::new(provider),
            documents: Documents::Firestore(store),
            collection: config.collection.clone(),
        })
    }

    pub fn kind(&self) -> BackendKind {
        self.kind
    }

    pub fn auth(&self) -> &Authenticator<Arc<dyn IdentityProvider>> {
        &self.auth
    }

    /// Inventory access on behalf of a signed-in user.
    pub fn inventory(&self, session: &UserSession) -> InventoryService<Arc<dyn DocumentStore>> {
        let store: Arc<dyn DocumentStore> = match &self.documents {
            Documents::InMemory(store) => store.clone(),
            Documents::Firestore(store) => Arc::new(store.with_id_token(session.token.clone())),
        };
        InventoryService::new(store, self.collection.clone())
    }
}

#[cfg(test)]
mod tests {
    use pantry_auth::{Credentials, SignUp};

    use super::*;
    use crate::config::FirebaseConfig;

    #[tokio::test]
    async fn in_memory_backend_shares_inventory_between_sessions() {
        let backend = Backend::in_memory();
        let alice = backend
            .auth()
            .sign_up(&SignUp::new("alice@example.com", "secret-1", "secret-1"))
            .await
            .unwrap();
        backend.inventory(&alice).add_item("Milk", 2).await.unwrap();

        let again = backend
            .auth()
            .sign_in(&Credentials::new("alice@example.com", "secret-1"))
            .await
            .unwrap();
        let items = backend.inventory(&again).list_items().await.unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name(), "milk");
    }

    #[test]
    fn firebase_backend_is_built_from_config() {
        let config = PantryConfig {
            backend: BackendKind::Firebase,
            firebase: Some(FirebaseConfig {
                api_key: "k".to_string(),
                project_id: "pantry-test".to_string(),
                auth_url: "http://127.0.0.1:9099".to_string(),
                firestore_url: "http://127.0.0.1:8081".to_string(),
            }),
            ..PantryConfig::default()
        };

        let backend = Backend::from_config(&config).unwrap();
        assert_eq!(backend.kind(), BackendKind::Firebase);
    }

    #[test]
    fn firebase_without_settings_is_rejected() {
        let config = PantryConfig {
            backend: BackendKind::Firebase,
            ..PantryConfig::default()
        };
        assert!(matches!(Backend::from_config(&config), Err(StoreError::InvalidConfig(_))));
    }

    #[test]
    fn init_is_idempotent() {
        let first = init(&PantryConfig::default()).unwrap();
        let second = init(&PantryConfig {
            collection: "ignored".to_string(),
            ..PantryConfig::default()
        })
        .unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert!(get().is_some());
    }
}
