//! Strongly-typed identifiers used across the domain.
//!
//! Both identifiers are string-backed: item keys are derived from user input
//! and user ids are issued by the identity provider.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Storage key of an inventory item: the case-folded item name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemKey(String);

/// Identifier of a user as issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

macro_rules! impl_string_newtype {
    ($t:ty) => {
        impl $t {
            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.0
            }
        }
    };
}

impl_string_newtype!(ItemKey);
impl_string_newtype!(UserId);

/// Longest document id the hosted store accepts, in bytes.
const MAX_ID_BYTES: usize = 1500;

impl ItemKey {
    /// Derive the storage key for a user-entered item name.
    ///
    /// The name is lowercased as entered, surrounding whitespace included.
    /// Blank names are a validation error; names the document store cannot
    /// address are an invalid id.
    pub fn from_name(name: &str) -> Result<Self, DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::validation("item name cannot be empty"));
        }
        let key = name.to_lowercase();
        check_document_id(&key)?;
        Ok(Self(key))
    }

    /// Wrap the id of a document read back from the store, unchanged.
    ///
    /// Other clients may have written ids that are not case-folded; keeping
    /// them verbatim lets later writes address the same document.
    pub fn from_stored(id: &str) -> Result<Self, DomainError> {
        check_document_id(id)?;
        Ok(Self(id.to_string()))
    }
}

/// Document id rules of the hosted store: no `/`, not `.` or `..`, not
/// `__...__`, at most 1500 bytes.
fn check_document_id(id: &str) -> Result<(), DomainError> {
    let reason = if id.is_empty() {
        "item name cannot be empty"
    } else if id.contains('/') {
        "item name cannot contain '/'"
    } else if id == "." || id == ".." {
        "item name cannot be '.' or '..'"
    } else if id.len() >= 4 && id.starts_with("__") && id.ends_with("__") {
        "item names of the form __name__ are reserved"
    } else if id.len() > MAX_ID_BYTES {
        "item name is too long"
    } else {
        return Ok(());
    };
    Err(DomainError::invalid_id(format!("{reason}: {id:?}")))
}

impl FromStr for ItemKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl From<String> for UserId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_key_is_case_folded() {
        let key = ItemKey::from_name("Red Onions").unwrap();
        assert_eq!(key.as_str(), "red onions");
        assert_eq!(key, "RED ONIONS".parse::<ItemKey>().unwrap());
    }

    #[test]
    fn item_key_keeps_surrounding_whitespace() {
        assert_eq!(ItemKey::from_name("Milk ").unwrap().as_str(), "milk ");
    }

    #[test]
    fn stored_ids_are_kept_verbatim() {
        let key = ItemKey::from_stored("Milk ").unwrap();
        assert_eq!(key.as_str(), "Milk ");
        assert_ne!(key, ItemKey::from_name("Milk ").unwrap());
    }

    #[test]
    fn blank_names_are_rejected() {
        assert!(matches!(ItemKey::from_name(""), Err(DomainError::Validation(_))));
        assert!(matches!(ItemKey::from_name("   "), Err(DomainError::Validation(_))));
    }

    #[test]
    fn unaddressable_ids_are_rejected() {
        let long = "a".repeat(1501);
        for name in ["salt/pepper", ".", "..", "__name__", "____", long.as_str()] {
            assert!(
                matches!(ItemKey::from_name(name), Err(DomainError::InvalidId(_))),
                "{name}"
            );
            assert!(
                matches!(ItemKey::from_stored(name), Err(DomainError::InvalidId(_))),
                "{name}"
            );
        }
        assert!(matches!(ItemKey::from_stored(""), Err(DomainError::InvalidId(_))));
    }

    #[test]
    fn dots_and_underscores_inside_a_name_are_fine() {
        for name in ["...", "a.b", "__init", "__", "___", "_salt_"] {
            assert!(ItemKey::from_name(name).is_ok(), "{name}");
        }
    }

    #[test]
    fn keys_serialize_transparently() {
        let key = ItemKey::from_name("Eggs").unwrap();
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"eggs\"");
        let uid = UserId::new("abc123");
        assert_eq!(serde_json::to_string(&uid).unwrap(), "\"abc123\"");
    }
}
