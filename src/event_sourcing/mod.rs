// ============================================================================
// Event Sourcing Infrastructure
// ============================================================================
//
// Generic, reusable event plumbing used by the order accumulator.
// Domain-specific code is in src/domain/
//
// ============================================================================

// Core abstractions (GENERIC - works with any aggregate)
pub mod core;
pub mod store;

// Re-export core infrastructure
pub use self::core::*;
pub use self::store::*;
