// ============================================================================
// Event Sourcing Core - Generic Infrastructure Abstractions
// ============================================================================
//
// Key Principles:
// - No domain-specific code (no Order, MenuItem, etc.)
// - Generic over aggregate types
// - Synchronous: every transition is a pure in-memory mutation
//
// ============================================================================

pub mod aggregate;
pub mod event;

// Re-export core types for convenience
pub use aggregate::Aggregate;
pub use event::{DomainEvent, EventEnvelope, serialize_event, deserialize_event};
