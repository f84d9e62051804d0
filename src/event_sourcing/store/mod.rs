// ============================================================================
// Event Sourcing Store - In-Memory History
// ============================================================================
//
// Append-only, process-local event history. Nothing here outlives the
// owning aggregate; there is no persistence layer.
//
// ============================================================================

pub mod event_log;

pub use event_log::EventLog;
