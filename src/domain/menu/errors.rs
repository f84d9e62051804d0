use rust_decimal::Decimal;

// ============================================================================
// Menu Catalog Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum MenuError {
    #[error("Duplicate menu item id: {0}")]
    DuplicateItem(String),

    #[error("Menu item id cannot be empty")]
    EmptyId,

    #[error("Menu item {id} has negative price {price}")]
    NegativePrice { id: String, price: Decimal },

    #[error("Menu item {id} price {price} exceeds the maximum item price")]
    PriceOutOfRange { id: String, price: Decimal },

    #[error("Invalid menu JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
