use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::menu::{MenuCategory, MenuItem};
use crate::event_sourcing::core::DomainEvent;

// ============================================================================
// Order Events - Facts applied to OrderState
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum OrderEvent {
    ItemSelected(ItemSelected),
    TotalsCalculated(TotalsCalculated),
    Reset(OrderReset),
}

impl DomainEvent for OrderEvent {
    fn event_type(&self) -> &'static str {
        match self {
            OrderEvent::ItemSelected(_) => "ItemSelected",
            OrderEvent::TotalsCalculated(_) => "TotalsCalculated",
            OrderEvent::Reset(_) => "OrderReset",
        }
    }
}

/// A category slot now holds `item`, replacing whatever it held before
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSelected {
    pub category: MenuCategory,
    pub item: MenuItem,
}

/// Tax and total derived from the subtotal at calculation time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalsCalculated {
    pub subtotal: Decimal,
    pub tax_rate: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderReset {
    pub reset_at: DateTime<Utc>,
}
