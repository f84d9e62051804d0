use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::menu::{MenuCatalog, MenuCategory, MenuItem};
use crate::event_sourcing::core::Aggregate;
use super::commands::OrderCommand;
use super::errors::OrderError;
use super::events::*;
use super::value_objects::OrderStatus;

// ============================================================================
// Order State - Domain Logic
// ============================================================================
//
// Invariant: after any selection, `subtotal` equals the sum of the prices of
// the current selections. `tax` and `total` only change on TotalsCalculated
// and go stale when a selection follows.
//
// ============================================================================

/// Serialize-only: a state can be rebuilt solely by replaying events.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderState {
    // Identity
    pub id: Uuid,
    pub version: i64,

    // Per-category slots, indexed by MenuCategory::index
    selected: [Option<MenuItem>; 3],
    previous_price: [Decimal; 3],

    // Money
    subtotal: Decimal,
    tax: Decimal,
    total: Decimal,
    tax_rate: Decimal,

    finalized: bool,
}

/// Tax and total for a subtotal.
///
/// The tax is `subtotal + (subtotal + subtotal * rate)`, so a 0.08 rate on
/// 7.25 yields a tax of 15.08. Existing receipts depend on these figures.
pub fn compute_tax_and_total(subtotal: Decimal, tax_rate: Decimal) -> (Decimal, Decimal) {
    let with_rate = subtotal + subtotal * tax_rate;
    let tax = subtotal + with_rate;
    let total = subtotal + tax;
    (tax, total)
}

impl OrderState {
    pub fn new(id: Uuid, tax_rate: Decimal) -> Self {
        Self {
            id,
            version: 0,
            selected: [None, None, None],
            previous_price: [Decimal::ZERO; 3],
            subtotal: Decimal::ZERO,
            tax: Decimal::ZERO,
            total: Decimal::ZERO,
            tax_rate,
            finalized: false,
        }
    }

    pub fn selection(&self, category: MenuCategory) -> Option<&MenuItem> {
        self.selected[category.index()].as_ref()
    }

    pub fn entree(&self) -> Option<&MenuItem> {
        self.selection(MenuCategory::Entree)
    }

    pub fn side(&self) -> Option<&MenuItem> {
        self.selection(MenuCategory::Side)
    }

    pub fn accompaniment(&self) -> Option<&MenuItem> {
        self.selection(MenuCategory::Accompaniment)
    }

    /// Price last reversed out of the subtotal for this category
    pub fn previous_price(&self, category: MenuCategory) -> Decimal {
        self.previous_price[category.index()]
    }

    pub fn subtotal(&self) -> Decimal {
        self.subtotal
    }

    pub fn tax(&self) -> Decimal {
        self.tax
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    pub fn tax_rate(&self) -> Decimal {
        self.tax_rate
    }

    pub fn status(&self) -> OrderStatus {
        if self.finalized {
            return OrderStatus::Finalized;
        }
        match self.selected.iter().filter(|slot| slot.is_some()).count() {
            0 => OrderStatus::Empty,
            3 => OrderStatus::Complete,
            _ => OrderStatus::Partial,
        }
    }

    // ------------------------------------------------------------------------
    // Decisions (no mutation)
    // ------------------------------------------------------------------------

    /// Resolve a selection against the catalog. Fails before anything changes.
    ///
    /// Prices outside `0..=MAX_ITEM_PRICE` are refused so the subtotal and
    /// the tax derivation can never overflow, whatever catalog is plugged in.
    pub fn decide_selection(
        &self,
        category: MenuCategory,
        item_id: &str,
        catalog: &dyn MenuCatalog,
    ) -> Result<OrderEvent, OrderError> {
        let item = catalog.lookup(item_id).ok_or_else(|| OrderError::ItemNotFound {
            category,
            item_id: item_id.to_string(),
        })?;

        if !item.has_valid_price() {
            return Err(OrderError::PriceOutOfRange {
                category,
                item_id: item_id.to_string(),
                price: item.price,
            });
        }

        Ok(OrderEvent::ItemSelected(ItemSelected {
            category,
            item: item.clone(),
        }))
    }

    pub fn decide_totals(&self) -> OrderEvent {
        let (tax, total) = compute_tax_and_total(self.subtotal, self.tax_rate);
        OrderEvent::TotalsCalculated(TotalsCalculated {
            subtotal: self.subtotal,
            tax_rate: self.tax_rate,
            tax,
            total,
        })
    }

    pub fn decide_reset(&self) -> OrderEvent {
        OrderEvent::Reset(OrderReset { reset_at: Utc::now() })
    }
}

// ============================================================================
// Aggregate Trait Implementation
// ============================================================================

impl Aggregate for OrderState {
    type Event = OrderEvent;
    type Command = OrderCommand;
    type Error = OrderError;
    type Environment = dyn MenuCatalog;

    fn apply_event(&mut self, event: &Self::Event) {
        self.version += 1;

        match event {
            OrderEvent::ItemSelected(e) => {
                let slot = e.category.index();

                // Reverse the stale charge; a no-op on the first selection
                if let Some(current) = &self.selected[slot] {
                    self.previous_price[slot] = current.price;
                }
                self.subtotal -= self.previous_price[slot];

                self.selected[slot] = Some(e.item.clone());
                self.subtotal += e.item.price;
                self.finalized = false;
            }
            OrderEvent::TotalsCalculated(e) => {
                self.tax = e.tax;
                self.total = e.total;
                self.finalized = true;
            }
            OrderEvent::Reset(_) => {
                self.selected = [None, None, None];
                self.previous_price = [Decimal::ZERO; 3];
                self.subtotal = Decimal::ZERO;
                self.tax = Decimal::ZERO;
                self.total = Decimal::ZERO;
                self.finalized = false;
            }
        }
    }

    fn handle_command(
        &self,
        command: &Self::Command,
        catalog: &Self::Environment,
    ) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            OrderCommand::SelectItem { category, item_id } => {
                Ok(vec![self.decide_selection(*category, item_id, catalog)?])
            }
            OrderCommand::CalculateTaxAndTotal => Ok(vec![self.decide_totals()]),
            OrderCommand::ResetOrder => Ok(vec![self.decide_reset()]),
        }
    }

    fn aggregate_id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> i64 {
        self.version
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
