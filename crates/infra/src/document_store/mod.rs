//! Document store boundary.
//!
//! A schemaless, per-collection key/value store. Writes are full overwrites
//! of a document; there are no transactions, update masks or server-side
//! increments.

pub mod firestore;
pub mod in_memory;

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

pub use firestore::FirestoreDocumentStore;
pub use in_memory::InMemoryDocumentStore;

/// A single field value of a document.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Double(f64),
    String(String),
}

impl FieldValue {
    /// Integer view of the value. Whole doubles count as integers.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(v) => Some(*v),
            FieldValue::Double(v) if v.fract() == 0.0 && v.is_finite() => Some(*v as i64),
            _ => None,
        }
    }
}

/// Field map of a document.
pub type Fields = BTreeMap<String, FieldValue>;

/// A document read back from a collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Fields,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: Fields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }
}

/// Document store operation error.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The request never got a response (DNS, TLS, connection, body read).
    #[error("transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("backend returned {status}: {message}")]
    Backend { status: u16, message: String },

    /// A document could not be interpreted.
    #[error("failed to decode document '{id}': {reason}")]
    Decode { id: String, reason: String },

    /// The store was configured with unusable settings.
    #[error("invalid store configuration: {0}")]
    InvalidConfig(String),
}

impl StoreError {
    pub fn decode(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Decode {
            id: id.into(),
            reason: reason.into(),
        }
    }
}

/// Hosted document database, addressed by collection name and document id.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Every document in the collection, in backend order.
    async fn list_collection(&self, collection: &str) -> Result<Vec<Document>, StoreError>;

    /// A single document, or `None` if it does not exist.
    async fn get_document(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    /// Create or fully overwrite a document.
    async fn set_document(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError>;

    /// Delete a document; deleting a missing document succeeds.
    async fn delete_document(&self, collection: &str, id: &str) -> Result<(), StoreError>;
}

#[async_trait]
impl<S> DocumentStore for Arc<S>
where
    S: DocumentStore + ?Sized,
{
    async fn list_collection(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        (**self).list_collection(collection).await
    }

    async fn get_document(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        (**self).get_document(collection, id).await
    }

    async fn set_document(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        (**self).set_document(collection, id, fields).await
    }

    async fn delete_document(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        (**self).delete_document(collection, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_doubles_read_as_integers() {
        assert_eq!(FieldValue::Integer(4).as_integer(), Some(4));
        assert_eq!(FieldValue::Double(4.0).as_integer(), Some(4));
        assert_eq!(FieldValue::Double(4.5).as_integer(), None);
        assert_eq!(FieldValue::String("4".into()).as_integer(), None);
    }
}
