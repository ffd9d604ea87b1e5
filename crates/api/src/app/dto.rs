use serde::Deserialize;

use pantry_auth::UserSession;
use pantry_inventory::{image_for, InventoryItem};

// -------------------------
// Request DTOs
// -------------------------

/// Body of `/items/add` and `/items/remove`.
#[derive(Debug, Deserialize)]
pub struct ItemQuantityRequest {
    pub name: String,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

fn default_quantity() -> i64 {
    1
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub q: Option<String>,
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn item_to_json(item: &InventoryItem) -> serde_json::Value {
    serde_json::json!({
        "name": item.name(),
        "quantity": item.quantity(),
        "image": image_for(item.name()),
    })
}

pub fn items_to_json(items: &[InventoryItem]) -> Vec<serde_json::Value> {
    items.iter().map(item_to_json).collect()
}

pub fn session_to_json(session: &UserSession) -> serde_json::Value {
    serde_json::json!({
        "token": session.token,
        "uid": session.uid.as_str(),
        "email": session.email,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pantry_core::ItemKey;

    #[test]
    fn items_carry_their_image() {
        let milk = InventoryItem::new(ItemKey::from_name("Milk").unwrap(), 2).unwrap();
        let saffron = InventoryItem::new(ItemKey::from_name("saffron").unwrap(), 1).unwrap();

        let json = items_to_json(&[milk, saffron]);

        assert_eq!(json[0]["image"], "/images/milk.jpg");
        assert_eq!(json[1]["image"], "/images/placeholder.jpeg");
        assert_eq!(json[0]["quantity"], 2);
    }

    #[test]
    fn quantity_defaults_to_one() {
        let req: ItemQuantityRequest = serde_json::from_str(r#"{ "name": "eggs" }"#).unwrap();
        assert_eq!(req.quantity, 1);
    }
}
