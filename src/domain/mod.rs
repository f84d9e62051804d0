// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// - menu: the read-only catalog collaborator
// - order: the order-state accumulator (selections, subtotal, tax, total)
// - money: currency rendering for presentation
//
// This layer is completely separate from the event sourcing infrastructure.
//
// ============================================================================

pub mod menu;
pub mod money;
pub mod order;
