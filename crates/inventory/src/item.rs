use serde::Serialize;

use pantry_core::{DomainError, DomainResult, Entity, ItemKey};

/// A pantry item as stored: its document id plus a positive quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryItem {
    #[serde(rename = "name")]
    key: ItemKey,
    quantity: i64,
}

impl InventoryItem {
    /// Build an item, enforcing the positive-quantity invariant.
    pub fn new(key: ItemKey, quantity: i64) -> DomainResult<Self> {
        if quantity <= 0 {
            return Err(DomainError::invariant(format!(
                "stored quantity must be positive (got {quantity} for '{key}')"
            )));
        }
        Ok(Self { key, quantity })
    }

    pub fn key(&self) -> &ItemKey {
        &self.key
    }

    pub fn name(&self) -> &str {
        self.key.as_str()
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }
}

impl Entity for InventoryItem {
    type Id = ItemKey;

    fn id(&self) -> &Self::Id {
        &self.key
    }
}

/// A validated add/remove request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRequest {
    key: ItemKey,
    quantity: i64,
}

impl ItemRequest {
    /// Validate raw user input: a non-blank name and a quantity of at least 1.
    pub fn parse(name: &str, quantity: i64) -> DomainResult<Self> {
        let key = ItemKey::from_name(name)?;
        if quantity <= 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }
        Ok(Self { key, quantity })
    }

    /// Same amount, aimed at an already stored record.
    pub fn at_key(self, key: ItemKey) -> Self {
        Self { key, ..self }
    }

    pub fn key(&self) -> &ItemKey {
        &self.key
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }
}

/// Write to perform against the document store after reading the current record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// Overwrite (or create) the record with this quantity.
    Set { key: ItemKey, quantity: i64 },
    /// Delete the record.
    Delete { key: ItemKey },
    /// Leave the store untouched.
    Noop,
}

/// Decide the write for an add, given the currently stored quantity (if any).
pub fn plan_add(request: &ItemRequest, existing: Option<i64>) -> Mutation {
    let quantity = match existing {
        Some(current) => current.saturating_add(request.quantity),
        None => request.quantity,
    };

    // Only reachable when the stored record already broke the invariant.
    if quantity <= 0 {
        return Mutation::Delete {
            key: request.key.clone(),
        };
    }

    Mutation::Set {
        key: request.key.clone(),
        quantity,
    }
}

/// Decide the write for a removal, given the currently stored quantity (if any).
///
/// Missing items are left alone; removing at least the stored amount deletes
/// the record instead of storing a non-positive quantity.
pub fn plan_remove(request: &ItemRequest, existing: Option<i64>) -> Mutation {
    match existing {
        None => Mutation::Noop,
        Some(current) if current <= request.quantity => Mutation::Delete {
            key: request.key.clone(),
        },
        Some(current) => Mutation::Set {
            key: request.key.clone(),
            quantity: current - request.quantity,
        },
    }
}
