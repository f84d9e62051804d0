use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::money::format_currency;
use super::aggregate::OrderState;

// ============================================================================
// Order Value Objects
// ============================================================================

/// Where an order is in its lifecycle. There is no terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Nothing selected
    Empty,
    /// One or two categories selected
    Partial,
    /// All three categories selected
    Complete,
    /// Tax and total computed, no selection since
    Finalized,
}

/// Presentation view of an order: item display names and formatted money
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSnapshot {
    pub order_id: Uuid,
    pub version: i64,
    pub status: OrderStatus,
    pub entree: Option<String>,
    pub side: Option<String>,
    pub accompaniment: Option<String>,
    pub subtotal: String,
    pub tax: String,
    pub total: String,
}

impl OrderSnapshot {
    pub fn from_state(state: &OrderState) -> Self {
        Self {
            order_id: state.id,
            version: state.version,
            status: state.status(),
            entree: state.entree().map(|item| item.name.clone()),
            side: state.side().map(|item| item.name.clone()),
            accompaniment: state.accompaniment().map(|item| item.name.clone()),
            subtotal: format_currency(state.subtotal()),
            tax: format_currency(state.tax()),
            total: format_currency(state.total()),
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_snapshot_of_empty_order() {
        let state = OrderState::new(Uuid::new_v4(), dec!(0.08));
        let snapshot = OrderSnapshot::from_state(&state);

        assert_eq!(snapshot.order_id, state.id);
        assert_eq!(snapshot.status, OrderStatus::Empty);
        assert_eq!(snapshot.entree, None);
        assert_eq!(snapshot.subtotal, "$0.00");
        assert_eq!(snapshot.tax, "$0.00");
        assert_eq!(snapshot.total, "$0.00");
    }

    #[test]
    fn test_order_status_serialization() {
        let json = serde_json::to_string(&OrderStatus::Finalized).unwrap();
        let deserialized: OrderStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, OrderStatus::Finalized);
    }
}
