//! Configuration loading and representation.

use std::net::SocketAddr;

use thiserror::Error;

use crate::inventory_service::DEFAULT_COLLECTION;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_AUTH_URL: &str = "https://identitytoolkit.googleapis.com";
pub const DEFAULT_FIRESTORE_URL: &str = "https://firestore.googleapis.com";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid value for {key}: '{value}' ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Which implementation backs the document store and identity provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendKind {
    /// Process-local stores (dev/test). Data is lost on exit.
    #[default]
    InMemory,
    /// Cloud Firestore + Firebase Authentication.
    Firebase,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::InMemory => "memory",
            BackendKind::Firebase => "firebase",
        }
    }
}

/// Settings for the hosted backend.
#[derive(Clone, PartialEq, Eq)]
pub struct FirebaseConfig {
    pub api_key: String,
    pub project_id: String,
    pub auth_url: String,
    pub firestore_url: String,
}

impl core::fmt::Debug for FirebaseConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FirebaseConfig")
            .field("api_key", &"<redacted>")
            .field("project_id", &self.project_id)
            .field("auth_url", &self.auth_url)
            .field("firestore_url", &self.firestore_url)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PantryConfig {
    pub backend: BackendKind,
    pub bind_addr: SocketAddr,
    pub collection: String,
    /// Present iff `backend` is [`BackendKind::Firebase`].
    pub firebase: Option<FirebaseConfig>,
}

impl Default for PantryConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::InMemory,
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            collection: DEFAULT_COLLECTION.to_string(),
            firebase: None,
        }
    }
}

impl PantryConfig {
    /// Load from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup (tests pass a map here).
    ///
    /// | variable              | default                                  |
    /// |-----------------------|------------------------------------------|
    /// | `PANTRY_BACKEND`      | `memory` (`firebase` for the hosted one) |
    /// | `PANTRY_BIND_ADDR`    | `0.0.0.0:8080`                           |
    /// | `PANTRY_COLLECTION`   | `inventory`                              |
    /// | `FIREBASE_API_KEY`    | required for `firebase`                  |
    /// | `FIREBASE_PROJECT_ID` | required for `firebase`                  |
    /// | `FIREBASE_AUTH_URL`   | `https://identitytoolkit.googleapis.com` |
    /// | `FIRESTORE_URL`       | `https://firestore.googleapis.com`       |
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let backend = match get("PANTRY_BACKEND").as_deref() {
            None | Some("memory") | Some("in-memory") => BackendKind::InMemory,
            Some("firebase") => BackendKind::Firebase,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "PANTRY_BACKEND",
                    value: other.to_string(),
                    reason: "expected 'memory' or 'firebase'".to_string(),
                });
            }
        };

        let bind_raw = get("PANTRY_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw.parse::<SocketAddr>().map_err(|e| ConfigError::Invalid {
            key: "PANTRY_BIND_ADDR",
            value: bind_raw.clone(),
            reason: e.to_string(),
        })?;

        let collection = get("PANTRY_COLLECTION").unwrap_or_else(|| DEFAULT_COLLECTION.to_string());
        if collection.contains('/') {
            return Err(ConfigError::Invalid {
                key: "PANTRY_COLLECTION",
                value: collection,
                reason: "collection name cannot contain '/'".to_string(),
            });
        }

        let firebase = match backend {
            BackendKind::InMemory => None,
            BackendKind::Firebase => Some(FirebaseConfig {
                api_key: get("FIREBASE_API_KEY").ok_or(ConfigError::Missing("FIREBASE_API_KEY"))?,
                project_id: get("FIREBASE_PROJECT_ID").ok_or(ConfigError::Missing("FIREBASE_PROJECT_ID"))?,
                auth_url: get("FIREBASE_AUTH_URL").unwrap_or_else(|| DEFAULT_AUTH_URL.to_string()),
                firestore_url: get("FIRESTORE_URL").unwrap_or_else(|| DEFAULT_FIRESTORE_URL.to_string()),
            }),
        };

        Ok(Self {
            backend,
            bind_addr,
            collection,
            firebase,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<PantryConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        PantryConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_to_in_memory() {
        let cfg = load(&[]).unwrap();
        assert_eq!(cfg, PantryConfig::default());
        assert_eq!(cfg.bind_addr.to_string(), DEFAULT_BIND_ADDR);
    }

    #[test]
    fn firebase_requires_credentials() {
        assert_eq!(
            load(&[("PANTRY_BACKEND", "firebase")]).unwrap_err(),
            ConfigError::Missing("FIREBASE_API_KEY")
        );
        assert_eq!(
            load(&[("PANTRY_BACKEND", "firebase"), ("FIREBASE_API_KEY", "k")]).unwrap_err(),
            ConfigError::Missing("FIREBASE_PROJECT_ID")
        );
    }

    #[test]
    fn firebase_settings_are_read() {
        let cfg = load(&[
            ("PANTRY_BACKEND", "firebase"),
            ("FIREBASE_API_KEY", "k"),
            ("FIREBASE_PROJECT_ID", "pantry-tracker"),
            ("FIRESTORE_URL", "http://localhost:8081"),
            ("PANTRY_COLLECTION", "pantry"),
        ])
        .unwrap();

        assert_eq!(cfg.backend, BackendKind::Firebase);
        assert_eq!(cfg.collection, "pantry");
        let fb = cfg.firebase.unwrap();
        assert_eq!(fb.project_id, "pantry-tracker");
        assert_eq!(fb.firestore_url, "http://localhost:8081");
        assert_eq!(fb.auth_url, DEFAULT_AUTH_URL);
        assert!(!format!("{fb:?}").contains("\"k\""));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            load(&[("PANTRY_BACKEND", "postgres")]),
            Err(ConfigError::Invalid { key: "PANTRY_BACKEND", .. })
        ));
        assert!(matches!(
            load(&[("PANTRY_BIND_ADDR", "localhost")]),
            Err(ConfigError::Invalid { key: "PANTRY_BIND_ADDR", .. })
        ));
        assert!(matches!(
            load(&[("PANTRY_COLLECTION", "a/b")]),
            Err(ConfigError::Invalid { key: "PANTRY_COLLECTION", .. })
        ));
    }
}
