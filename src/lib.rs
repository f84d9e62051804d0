//! Order-state accumulator for a three-slot lunch order.
//!
//! An [`OrderAccumulator`] holds at most one entree, side and accompaniment,
//! keeps a running subtotal as selections are replaced, and derives tax and
//! total on request. Menu data comes from any [`MenuCatalog`].

pub mod config;
pub mod domain;
pub mod event_sourcing;
pub mod metrics;

pub use config::{ConfigError, OrderConfig, MAX_TAX_RATE};
pub use domain::menu::{
    default_menu, InMemoryMenuCatalog, MenuCatalog, MenuCategory, MenuError, MenuItem, MAX_ITEM_PRICE,
};
pub use domain::money::format_currency;
pub use domain::order::{
    compute_tax_and_total, OrderAccumulator, OrderCommand, OrderError, OrderEvent, OrderSnapshot,
    OrderState, OrderStatus,
};
pub use metrics::OrderMetrics;
