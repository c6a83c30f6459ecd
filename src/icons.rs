//! Crop label to display icon

const DEFAULT_ICON: &str = "🌱";

/// Known crops and their icons, searched in this order
static CROP_ICONS: &[(&str, &str)] = &[
    ("Rice", "🌾"),
    ("Wheat", "🌾"),
    ("Maize", "🌽"),
    ("Corn", "🌽"),
    ("Soybean", "🌱"),
    ("Tomato", "🍅"),
    ("Chili", "🌶️"),
    ("Chilli", "🌶️"),
    ("Pepper", "🌶️"),
    ("Potato", "🥔"),
    ("Cotton", "🌱"),
    ("Sugarcane", "🎋"),
    ("Coffee", "☕"),
    ("Tea", "🍵"),
    ("Banana", "🍌"),
    ("Mango", "🥭"),
    ("Apple", "🍎"),
    ("Orange", "🍊"),
    ("Grapes", "🍇"),
    ("Watermelon", "🍉"),
    ("Coconut", "🥥"),
    ("Onion", "🧅"),
    ("Garlic", "🧄"),
    ("Carrot", "🥕"),
    ("Cabbage", "🥬"),
    ("Cauliflower", "🥦"),
    ("Pumpkin", "🎃"),
    ("Cucumber", "🥒"),
    ("Eggplant", "🍆"),
    ("Brinjal", "🍆"),
    ("Beans", "🫘"),
    ("Peas", "🫛"),
    ("Lentils", "🫘"),
    ("Chickpea", "🫘"),
    ("Sunflower", "🌻"),
    ("Mustard", "🌿"),
    ("Groundnut", "🥜"),
    ("Peanut", "🥜"),
];

/// Icon for a crop label
///
/// Exact match first, then a case-insensitive substring match in either
/// direction (first table entry wins), else the seedling.
pub fn icon_for(label: &str) -> &'static str {
    if let Some((_, icon)) = CROP_ICONS.iter().find(|(name, _)| *name == label) {
        return icon;
    }

    let needle = label.trim().to_lowercase();
    if needle.is_empty() {
        return DEFAULT_ICON;
    }

    CROP_ICONS
        .iter()
        .find(|(name, _)| {
            let name = name.to_lowercase();
            name.contains(&needle) || needle.contains(&name)
        })
        .map(|(_, icon)| *icon)
        .unwrap_or(DEFAULT_ICON)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        assert_eq!(icon_for("Rice"), "🌾");
        assert_eq!(icon_for("Coffee"), "☕");
        assert_eq!(icon_for("Groundnut"), "🥜");
    }

    #[test]
    fn test_case_insensitive_and_substring() {
        assert_eq!(icon_for("rice"), "🌾");
        assert_eq!(icon_for("Sweet Potato"), "🥔");
        assert_eq!(icon_for("Basmati Rice"), "🌾");
        assert_eq!(icon_for("mango"), "🥭");
    }

    #[test]
    fn test_table_order_breaks_ambiguity() {
        // Corn precedes Tea in the table
        assert_eq!(icon_for("Sweet Corn Tea"), "🌽");
    }

    #[test]
    fn test_unknown_label_gets_seedling() {
        assert_eq!(icon_for("Quinoa"), "🌱");
        assert_eq!(icon_for(""), "🌱");
        assert_eq!(icon_for("   "), "🌱");
    }
}
