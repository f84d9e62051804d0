use rust_decimal::Decimal;

use crate::domain::menu::MenuCategory;

// ============================================================================
// Order Business Rule Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OrderError {
    #[error("Menu item not found: {item_id} (requested as {category})")]
    ItemNotFound {
        category: MenuCategory,
        item_id: String,
    },

    #[error("Menu item {item_id} has unsupported price {price}")]
    PriceOutOfRange {
        category: MenuCategory,
        item_id: String,
        price: Decimal,
    },
}

impl OrderError {
    pub fn category(&self) -> MenuCategory {
        match self {
            OrderError::ItemNotFound { category, .. } | OrderError::PriceOutOfRange { category, .. } => *category,
        }
    }
}
