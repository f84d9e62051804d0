// ============================================================================
// Order Domain - The in-progress lunch order
// ============================================================================
//
// - Value objects (OrderStatus, OrderSnapshot)
// - Events (ItemSelected, TotalsCalculated, OrderReset)
// - Commands (SelectItem, CalculateTaxAndTotal, ResetOrder)
// - Errors (OrderError enum)
// - Aggregate (OrderState with the pricing rules)
// - Accumulator (OrderAccumulator, the public entry point)
//
// ============================================================================

pub mod value_objects;
pub mod events;
pub mod commands;
pub mod errors;
pub mod aggregate;
pub mod accumulator;

// Re-export for convenience
pub use value_objects::*;
pub use events::*;
pub use commands::*;
pub use errors::*;
pub use aggregate::*;
pub use accumulator::*;
