//! Inventory reads and read-then-write updates against a document store.
//!
//! Known limitation: add/remove read the current quantity and then write the
//! new one in a separate request. Two sessions updating the same item at the
//! same time can lose one of the updates.

use pantry_core::{DomainError, ItemKey};
use pantry_inventory::{plan_add, plan_remove, InventoryItem, ItemRequest, Mutation};

use crate::document_store::{Document, DocumentStore, FieldValue, Fields, StoreError};

/// Collection used when none is configured.
pub const DEFAULT_COLLECTION: &str = "inventory";

const QUANTITY_FIELD: &str = "quantity";

/// Why a mutation left the store untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ignored {
    /// Empty name or non-positive quantity.
    Invalid(DomainError),
    /// Removal of an item that is not stored.
    Missing(ItemKey),
}

/// Result of an add/remove call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The store was written; carries the refreshed item list.
    Applied(Vec<InventoryItem>),
    /// Nothing was written and the list was not refreshed.
    Ignored(Ignored),
}

impl MutationOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, MutationOutcome::Applied(_))
    }
}

/// Inventory operations over one collection.
#[derive(Debug, Clone)]
pub struct InventoryService<S> {
    store: S,
    collection: String,
}

impl<S> InventoryService<S>
where
    S: DocumentStore,
{
    pub fn new(store: S, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Every stored item, in backend order.
    ///
    /// Documents without a positive integer quantity are skipped.
    pub async fn list_items(&self) -> Result<Vec<InventoryItem>, StoreError> {
        let documents = self.store.list_collection(&self.collection).await?;
        let items = documents
            .iter()
            .filter_map(|doc| match to_item(doc) {
                Ok(item) => Some(item),
                Err(e) => {
                    tracing::warn!(collection = %self.collection, id = %doc.id, error = %e, "skipping unreadable inventory document");
                    None
                }
            })
            .collect();
        Ok(items)
    }

    /// Add `quantity` of `name`, creating the item if needed.
    pub async fn add_item(&self, name: &str, quantity: i64) -> Result<MutationOutcome, StoreError> {
        let request = match ItemRequest::parse(name, quantity) {
            Ok(r) => r,
            Err(e) => return Ok(self.ignore_invalid(name, quantity, e)),
        };

        let (request, existing) = self.locate(name, request).await?;
        let mutation = plan_add(&request, existing);
        self.apply(mutation).await
    }

    /// Remove `quantity` of `name`, deleting the item once it is used up.
    pub async fn remove_item(&self, name: &str, quantity: i64) -> Result<MutationOutcome, StoreError> {
        let request = match ItemRequest::parse(name, quantity) {
            Ok(r) => r,
            Err(e) => return Ok(self.ignore_invalid(name, quantity, e)),
        };

        let (request, existing) = self.locate(name, request).await?;
        match plan_remove(&request, existing) {
            Mutation::Noop => {
                tracing::debug!(key = %request.key(), "remove ignored: item not stored");
                Ok(MutationOutcome::Ignored(Ignored::Missing(request.key().clone())))
            }
            mutation => self.apply(mutation).await,
        }
    }

    fn ignore_invalid(&self, name: &str, quantity: i64, error: DomainError) -> MutationOutcome {
        tracing::debug!(name, quantity, error = %error, "inventory request ignored");
        MutationOutcome::Ignored(Ignored::Invalid(error))
    }

    /// Find the record a request refers to.
    ///
    /// The case-folded key wins. A name exactly matching a stored id that is
    /// not case-folded (as listed by [`Self::list_items`]) addresses that
    /// document instead. With neither stored, the case-folded key is used.
    async fn locate(&self, name: &str, request: ItemRequest) -> Result<(ItemRequest, Option<i64>), StoreError> {
        if let Some(quantity) = self.stored_quantity(request.key()).await? {
            return Ok((request, Some(quantity)));
        }
        if let Ok(exact) = ItemKey::from_stored(name) {
            if &exact != request.key() {
                if let Some(quantity) = self.stored_quantity(&exact).await? {
                    return Ok((request.at_key(exact), Some(quantity)));
                }
            }
        }
        Ok((request, None))
    }

    async fn stored_quantity(&self, key: &ItemKey) -> Result<Option<i64>, StoreError> {
        let Some(doc) = self.store.get_document(&self.collection, key.as_str()).await? else {
            return Ok(None);
        };
        quantity_of(&doc).map(Some)
    }

    async fn apply(&self, mutation: Mutation) -> Result<MutationOutcome, StoreError> {
        match mutation {
            Mutation::Set { key, quantity } => {
                let fields = Fields::from([(QUANTITY_FIELD.to_string(), FieldValue::Integer(quantity))]);
                self.store
                    .set_document(&self.collection, key.as_str(), fields)
                    .await?;
                tracing::info!(%key, quantity, "inventory item stored");
            }
            Mutation::Delete { key } => {
                self.store
                    .delete_document(&self.collection, key.as_str())
                    .await?;
                tracing::info!(%key, "inventory item deleted");
            }
            Mutation::Noop => {}
        }

        Ok(MutationOutcome::Applied(self.list_items().await?))
    }
}

fn quantity_of(doc: &Document) -> Result<i64, StoreError> {
    doc.field(QUANTITY_FIELD)
        .and_then(FieldValue::as_integer)
        .ok_or_else(|| StoreError::decode(&doc.id, "missing integer 'quantity' field"))
}

fn to_item(doc: &Document) -> Result<InventoryItem, StoreError> {
    let quantity = quantity_of(doc)?;
    let key = ItemKey::from_stored(&doc.id).map_err(|e| StoreError::decode(&doc.id, e.to_string()))?;
    InventoryItem::new(key, quantity).map_err(|e| StoreError::decode(&doc.id, e.to_string()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::document_store::InMemoryDocumentStore;

    fn service() -> (Arc<InMemoryDocumentStore>, InventoryService<Arc<InMemoryDocumentStore>>) {
        let store = Arc::new(InMemoryDocumentStore::new());
        (store.clone(), InventoryService::new(store, DEFAULT_COLLECTION))
    }

    fn snapshot(items: &[InventoryItem]) -> Vec<(&str, i64)> {
        items.iter().map(|i| (i.name(), i.quantity())).collect()
    }

    fn applied(outcome: MutationOutcome) -> Vec<InventoryItem> {
        match outcome {
            MutationOutcome::Applied(items) => items,
            other => panic!("expected applied mutation, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn add_is_case_folded_and_merged() {
        let (_, svc) = service();

        svc.add_item("Milk", 2).await.unwrap();
        let items = applied(svc.add_item("milk", 3).await.unwrap());

        assert_eq!(snapshot(&items), vec![("milk", 5)]);
    }

    #[tokio::test]
    async fn removing_more_than_stored_deletes() {
        let (_, svc) = service();
        svc.add_item("milk", 5).await.unwrap();

        let items = applied(svc.remove_item("milk", 10).await.unwrap());

        assert!(items.is_empty());
        assert!(svc.list_items().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn removing_less_than_stored_decrements() {
        let (_, svc) = service();
        svc.add_item("milk", 5).await.unwrap();

        let items = applied(svc.remove_item("milk", 2).await.unwrap());

        assert_eq!(snapshot(&items), vec![("milk", 3)]);
    }

    #[tokio::test]
    async fn invalid_requests_are_ignored() {
        let (store, svc) = service();

        let empty = svc.add_item("", 5).await.unwrap();
        let zero = svc.add_item("eggs", 0).await.unwrap();
        let negative = svc.remove_item("eggs", -1).await.unwrap();

        for outcome in [empty, zero, negative] {
            assert!(matches!(outcome, MutationOutcome::Ignored(Ignored::Invalid(_))));
        }
        assert!(store.list_collection(DEFAULT_COLLECTION).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn removing_missing_item_is_silent() {
        let (store, svc) = service();
        svc.add_item("bread", 1).await.unwrap();

        let outcome = svc.remove_item("butter", 1).await.unwrap();

        assert_eq!(
            outcome,
            MutationOutcome::Ignored(Ignored::Missing(ItemKey::from_name("butter").unwrap()))
        );
        assert_eq!(store.list_collection(DEFAULT_COLLECTION).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unreadable_documents_are_skipped_when_listing() {
        let (store, svc) = service();
        svc.add_item("eggs", 12).await.unwrap();
        store
            .set_document(
                DEFAULT_COLLECTION,
                "mystery",
                Fields::from([("quantity".to_string(), FieldValue::String("lots".into()))]),
            )
            .await
            .unwrap();

        let items = svc.list_items().await.unwrap();

        assert_eq!(snapshot(&items), vec![("eggs", 12)]);
    }

    #[tokio::test]
    async fn listed_names_address_their_documents() {
        let (store, svc) = service();
        for id in ["Milk ", "eggs "] {
            store
                .set_document(
                    DEFAULT_COLLECTION,
                    id,
                    Fields::from([(QUANTITY_FIELD.to_string(), FieldValue::Integer(3))]),
                )
                .await
                .unwrap();
        }

        let listed = svc.list_items().await.unwrap();
        assert_eq!(snapshot(&listed), vec![("Milk ", 3), ("eggs ", 3)]);

        let items = applied(svc.remove_item(listed[0].name(), 3).await.unwrap());
        assert_eq!(snapshot(&items), vec![("eggs ", 3)]);

        let items = applied(svc.add_item(listed[1].name(), 1).await.unwrap());
        assert_eq!(snapshot(&items), vec![("eggs ", 4)]);
    }

    #[tokio::test]
    async fn case_folded_document_wins_over_exact_match() {
        let (store, svc) = service();
        let qty = |n| Fields::from([(QUANTITY_FIELD.to_string(), FieldValue::Integer(n))]);
        store.set_document(DEFAULT_COLLECTION, "milk", qty(1)).await.unwrap();
        store.set_document(DEFAULT_COLLECTION, "Milk", qty(5)).await.unwrap();

        let items = applied(svc.add_item("Milk", 1).await.unwrap());

        assert_eq!(snapshot(&items), vec![("Milk", 5), ("milk", 2)]);
    }

    #[tokio::test]
    async fn unaddressable_names_are_ignored() {
        let (store, svc) = service();

        for name in [".", "..", "__meta__"] {
            let outcome = svc.add_item(name, 1).await.unwrap();
            assert!(matches!(outcome, MutationOutcome::Ignored(Ignored::Invalid(_))), "{name}");
        }
        assert!(store.list_collection(DEFAULT_COLLECTION).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn updating_a_corrupt_document_fails() {
        let (store, svc) = service();
        store
            .set_document(DEFAULT_COLLECTION, "flour", Fields::new())
            .await
            .unwrap();

        let err = svc.add_item("flour", 1).await.unwrap_err();

        assert!(matches!(err, StoreError::Decode { .. }));
    }
}
