//! Infrastructure layer: hosted backend adapters, configuration, services.

pub mod backend;
pub mod config;
pub mod document_store;
pub mod identity;
pub mod inventory_service;

pub use backend::Backend;
pub use config::{BackendKind, ConfigError, FirebaseConfig, PantryConfig};
pub use document_store::{Document, DocumentStore, FieldValue, Fields, StoreError};
pub use inventory_service::{Ignored, InventoryService, MutationOutcome};
