//! Static image lookup for known pantry items.

/// Image shown for items without a dedicated picture.
pub const PLACEHOLDER_IMAGE: &str = "/images/placeholder.jpeg";

const IMAGES: &[(&str, &str)] = &[
    ("chicken", "/images/whole-chicken.jpg"),
    ("carrots", "/images/carrots.jpg"),
    ("ginger", "/images/ginger.jpg"),
    ("milk", "/images/milk.jpg"),
    ("garlic", "/images/garlic.jpg"),
    ("potatoes", "/images/potatoes.jpg"),
    ("oranges", "/images/oranges.jpg"),
    ("red onions", "/images/red-onions.jpg"),
    ("white onions", "/images/white-onions.jpg"),
    ("eggs", "/images/eggs.jpg"),
    ("apples", "/images/apples.jpg"),
    ("tomatoes", "/images/tomatoes.jpg"),
    ("beef", "/images/beef.jpg"),
    ("bread", "/images/bread.jpg"),
    ("corn", "/images/corn.jpg"),
    ("salt", "/images/salt.jpg"),
    ("sugar", "/images/sugar.jpg"),
    ("toor dal", "/images/toor-dal.jpg"),
    ("water", "/images/tomatoes.jpg"),
];

/// Image path for an item name (case-insensitive), or the placeholder.
pub fn image_for(name: &str) -> &'static str {
    let name = name.to_lowercase();
    IMAGES
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, path)| *path)
        .unwrap_or(PLACEHOLDER_IMAGE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_items_have_images() {
        assert_eq!(image_for("milk"), "/images/milk.jpg");
        assert_eq!(image_for("Red Onions"), "/images/red-onions.jpg");
    }

    #[test]
    fn unknown_items_fall_back_to_placeholder() {
        assert_eq!(image_for("saffron"), PLACEHOLDER_IMAGE);
        assert_eq!(image_for(""), PLACEHOLDER_IMAGE);
    }
}
