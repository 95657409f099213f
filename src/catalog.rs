//! Static item catalogs for the roulette slots.
//!
//! Every catalog is a fixed, ordered list of [`Item`]s defined at compile time.
//! Slots copy items out of these lists by value; nothing here is ever mutated.

use serde::Serialize;

/// A selectable roulette item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Item {
    /// Display name, embedded verbatim in prompts
    pub name: &'static str,
    /// Emoji shown on the roulette face
    pub icon: &'static str,
}

impl Item {
    const fn new(name: &'static str, icon: &'static str) -> Self {
        Self { name, icon }
    }
}

impl std::fmt::Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.icon, self.name)
    }
}

/// Finished dishes
pub const DISHES: &[Item] = &[
    Item::new("ラーメン", "🍜"),
    Item::new("カレー", "🍛"),
    Item::new("ピザ", "🍕"),
    Item::new("寿司", "🍣"),
    Item::new("ハンバーガー", "🍔"),
    Item::new("パスタ", "🍝"),
    Item::new("焼き鳥", "🍗"),
    Item::new("タコス", "🌮"),
    Item::new("天ぷら", "🍤"),
    Item::new("グラタン", "🧀"),
    Item::new("餃子", "🥟"),
    Item::new("ステーキ", "🥩"),
    Item::new("オムライス", "🍳"),
    Item::new("親子丼", "🐔"),
];

/// Secret ingredients
pub const INGREDIENTS: &[Item] = &[
    Item::new("チョコレート", "🍫"),
    Item::new("納豆", "🫘"),
    Item::new("いちご", "🍓"),
    Item::new("アボカド", "🥑"),
    Item::new("バナナ", "🍌"),
    Item::new("わさび", "🌿"),
    Item::new("はちみつ", "🍯"),
    Item::new("キムチ", "🌶️"),
    Item::new("マヨネーズ", "🥚"),
    Item::new("チーズ", "🧀"),
    Item::new("パイナップル", "🍍"),
    Item::new("トマト", "🍅"),
];

/// Cooking methods
pub const COOKING_METHODS: &[Item] = &[
    Item::new("揚げた", "🔥"),
    Item::new("蒸した", "♨️"),
    Item::new("凍らせた", "🧊"),
    Item::new("燻製にした", "💨"),
    Item::new("炙った", "🕯️"),
    Item::new("煮込んだ", "🍲"),
    Item::new("漬け込んだ", "🫙"),
    Item::new("焼いた", "🍳"),
    Item::new("茹でた", "💧"),
    Item::new("生のままの", "🥗"),
];

/// Which catalog feeds a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotKind {
    Dish,
    Ingredient,
    Method,
}

impl SlotKind {
    /// The catalog this slot draws from
    pub fn catalog(&self) -> &'static [Item] {
        match self {
            SlotKind::Dish => DISHES,
            SlotKind::Ingredient => INGREDIENTS,
            SlotKind::Method => COOKING_METHODS,
        }
    }

    /// Human-readable slot label
    pub fn label(&self) -> &'static str {
        match self {
            SlotKind::Dish => "料理",
            SlotKind::Ingredient => "隠し味",
            SlotKind::Method => "調理法",
        }
    }

    /// Check whether an item belongs to this slot's catalog
    pub fn contains(&self, item: &Item) -> bool {
        self.catalog().contains(item)
    }

    /// Look up an item by exact name
    pub fn find(&self, name: &str) -> Option<Item> {
        self.catalog().iter().find(|item| item.name == name).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalogs_are_non_empty() {
        for kind in [SlotKind::Dish, SlotKind::Ingredient, SlotKind::Method] {
            assert!(!kind.catalog().is_empty(), "{:?} catalog is empty", kind);
        }
    }

    #[test]
    fn test_names_are_unique_within_catalog() {
        for kind in [SlotKind::Dish, SlotKind::Ingredient, SlotKind::Method] {
            let names: HashSet<_> = kind.catalog().iter().map(|i| i.name).collect();
            assert_eq!(names.len(), kind.catalog().len(), "duplicate name in {:?}", kind);
        }
    }

    #[test]
    fn test_dish_defaults_match_first_entries() {
        assert_eq!(DISHES[0], Item { name: "ラーメン", icon: "🍜" });
        assert_eq!(DISHES[1], Item { name: "カレー", icon: "🍛" });
    }

    #[test]
    fn test_find_and_contains() {
        let curry = SlotKind::Dish.find("カレー").unwrap();
        assert_eq!(curry.icon, "🍛");
        assert!(SlotKind::Dish.contains(&curry));
        assert!(!SlotKind::Method.contains(&curry));
        assert!(SlotKind::Method.find("カレー").is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(DISHES[3].to_string(), "🍣 寿司");
    }
}
