use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::money::format_currency;

// ============================================================================
// Menu Value Objects
// ============================================================================

/// The order slot a menu item belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuCategory {
    Entree,
    Side,
    Accompaniment,
}

impl MenuCategory {
    /// Every category, in slot order
    pub const ALL: [MenuCategory; 3] = [
        MenuCategory::Entree,
        MenuCategory::Side,
        MenuCategory::Accompaniment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MenuCategory::Entree => "entree",
            MenuCategory::Side => "side",
            MenuCategory::Accompaniment => "accompaniment",
        }
    }

    /// Position of this category in per-slot arrays
    pub(crate) fn index(self) -> usize {
        match self {
            MenuCategory::Entree => 0,
            MenuCategory::Side => 1,
            MenuCategory::Accompaniment => 2,
        }
    }
}

impl fmt::Display for MenuCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Highest accepted unit price. Three of these plus tax stay far inside
/// Decimal range for any accepted tax rate.
pub const MAX_ITEM_PRICE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// A single orderable item. Immutable once looked up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Catalog key
    pub id: String,
    /// Display name
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    pub category: MenuCategory,
}

impl MenuItem {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        price: Decimal,
        category: MenuCategory,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            price,
            category,
        }
    }

    /// Price is within `0..=MAX_ITEM_PRICE`
    pub fn has_valid_price(&self) -> bool {
        !self.price.is_sign_negative() && self.price <= MAX_ITEM_PRICE
    }

    pub fn formatted_price(&self) -> String {
        format_currency(self.price)
    }
}
