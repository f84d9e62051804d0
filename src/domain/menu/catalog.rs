use std::collections::HashMap;

use rust_decimal::Decimal;

use super::errors::MenuError;
use super::value_objects::{MenuCategory, MenuItem, MAX_ITEM_PRICE};

// ============================================================================
// Menu Catalog - name → MenuItem lookup
// ============================================================================

/// Read-only lookup used by the order accumulator.
///
/// `lookup` must return `Some` for every valid id and `None` otherwise; no
/// other validation of the id is expected.
pub trait MenuCatalog {
    fn lookup(&self, id: &str) -> Option<&MenuItem>;
}

/// HashMap-backed catalog
#[derive(Debug, Clone, Default)]
pub struct InMemoryMenuCatalog {
    items: HashMap<String, MenuItem>,
}

impl InMemoryMenuCatalog {
    /// Build a catalog, rejecting empty ids, duplicate ids and prices outside
    /// `0..=MAX_ITEM_PRICE`
    pub fn new(items: impl IntoIterator<Item = MenuItem>) -> Result<Self, MenuError> {
        let mut map = HashMap::new();

        for item in items {
            if item.id.is_empty() {
                return Err(MenuError::EmptyId);
            }
            if item.price < Decimal::ZERO {
                return Err(MenuError::NegativePrice {
                    id: item.id,
                    price: item.price,
                });
            }
            if item.price > MAX_ITEM_PRICE {
                return Err(MenuError::PriceOutOfRange {
                    id: item.id,
                    price: item.price,
                });
            }
            if map.contains_key(&item.id) {
                return Err(MenuError::DuplicateItem(item.id));
            }
            map.insert(item.id.clone(), item);
        }

        tracing::debug!(item_count = map.len(), "Built menu catalog");

        Ok(Self { items: map })
    }

    /// Parse a JSON array of menu items
    pub fn from_json(json: &str) -> Result<Self, MenuError> {
        let items: Vec<MenuItem> = serde_json::from_str(json)?;
        Self::new(items)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items of one category, sorted by id
    pub fn items_in(&self, category: MenuCategory) -> Vec<&MenuItem> {
        let mut items: Vec<&MenuItem> = self
            .items
            .values()
            .filter(|item| item.category == category)
            .collect();
        items.sort_by(|a, b| a.id.cmp(&b.id));
        items
    }
}

impl MenuCatalog for InMemoryMenuCatalog {
    fn lookup(&self, id: &str) -> Option<&MenuItem> {
        self.items.get(id)
    }
}

// ============================================================================
// Default Lunch Menu
// ============================================================================

/// The lunch menu the app ships with
pub fn default_menu() -> InMemoryMenuCatalog {
    use MenuCategory::*;

    let items = vec![
        MenuItem::new("cauliflower", "Cauliflower", "Whole cauliflower, brined, roasted, and deep fried", Decimal::new(700, 2), Entree),
        MenuItem::new("chili", "Three Bean Chili", "Black beans, red beans, kidney beans, slow cooked, topped with onion", Decimal::new(400, 2), Entree),
        MenuItem::new("pasta", "Mushroom Pasta", "Penne pasta, mushrooms, basil, with plum tomatoes cooked in garlic and olive oil", Decimal::new(550, 2), Entree),
        MenuItem::new("skillet", "Spicy Black Bean Skillet", "Seasonal vegetables, black beans, house spice blend", Decimal::new(550, 2), Entree),
        MenuItem::new("salad", "Summer Salad", "Heirloom tomatoes, butter lettuce, peaches, avocado, balsamic dressing", Decimal::new(250, 2), Side),
        MenuItem::new("soup", "Butternut Squash Soup", "Roasted butternut squash, roasted peppers, chili oil", Decimal::new(300, 2), Side),
        MenuItem::new("potatoes", "Spicy Potatoes", "Marble potatoes, roasted, and fried in house spice blend", Decimal::new(200, 2), Side),
        MenuItem::new("rice", "Coconut Rice", "Rice, coconut milk, lime, and sugar", Decimal::new(150, 2), Side),
        MenuItem::new("bread", "Lunch Roll", "Fresh baked roll made in house", Decimal::new(50, 2), Accompaniment),
        MenuItem::new("berries", "Mixed Berries", "Strawberries, blueberries, raspberries, and huckleberries", Decimal::new(100, 2), Accompaniment),
        MenuItem::new("pickles", "Pickled Veggies", "Pickled cucumbers and carrots, made in house", Decimal::new(50, 2), Accompaniment),
    ];

    InMemoryMenuCatalog {
        items: items.into_iter().map(|item| (item.id.clone(), item)).collect(),
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
