//! Client-side search over an already-fetched item list.

use pantry_core::ValueObject;

use crate::item::InventoryItem;

/// Case-insensitive substring predicate over item names.
///
/// Never persisted and never sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchFilter {
    needle: String,
}

impl ValueObject for SearchFilter {}

impl SearchFilter {
    pub fn new(query: &str) -> Self {
        Self {
            needle: query.to_lowercase(),
        }
    }

    /// An empty query matches every item.
    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn matches(&self, item: &InventoryItem) -> bool {
        item.name().to_lowercase().contains(&self.needle)
    }

    /// Matching items, in the order of `items`.
    pub fn apply<'a, I>(&self, items: I) -> Vec<InventoryItem>
    where
        I: IntoIterator<Item = &'a InventoryItem>,
    {
        items
            .into_iter()
            .filter(|item| self.matches(item))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pantry_core::ItemKey;

    fn items(names: &[&str]) -> Vec<InventoryItem> {
        names
            .iter()
            .map(|n| InventoryItem::new(ItemKey::from_name(n).unwrap(), 1).unwrap())
            .collect()
    }

    fn names(items: &[InventoryItem]) -> Vec<&str> {
        items.iter().map(|i| i.name()).collect()
    }

    #[test]
    fn substring_match_preserves_order() {
        let list = items(&["milk", "eggs", "bread"]);
        let filtered = SearchFilter::new("e").apply(&list);
        assert_eq!(names(&filtered), vec!["eggs", "bread"]);
    }

    #[test]
    fn query_case_is_ignored() {
        let list = items(&["red onions", "white onions", "garlic"]);
        let filtered = SearchFilter::new("ONION").apply(&list);
        assert_eq!(names(&filtered), vec!["red onions", "white onions"]);
    }

    #[test]
    fn empty_query_matches_everything() {
        let list = items(&["milk", "eggs"]);
        let filter = SearchFilter::default();
        assert!(filter.is_empty());
        assert_eq!(filter.apply(&list), list);
    }

    #[test]
    fn no_match_yields_empty() {
        let list = items(&["milk"]);
        assert!(SearchFilter::new("xyz").apply(&list).is_empty());
    }
}
