use uuid::Uuid;
use super::event::EventEnvelope;

// ============================================================================
// Aggregate Root Pattern
// ============================================================================
//
// Key Principles:
// 1. Commands are validated before emitting events
// 2. Events represent facts that have already happened
// 3. All state changes flow through events
// 4. A rejected command leaves the aggregate untouched
//
// ============================================================================

/// Generic Aggregate trait
///
/// Type Parameters:
/// - `Event`: The domain event type for this aggregate
/// - `Command`: The command type for this aggregate
/// - `Error`: The error type for business rule violations
/// - `Environment`: Read-only collaborators consulted while handling commands
pub trait Aggregate: Sized {
    type Event;
    type Command;
    type Error;
    type Environment: ?Sized;

    /// Apply an event to update state
    fn apply_event(&mut self, event: &Self::Event);

    /// Handle command and emit events (business logic)
    fn handle_command(
        &self,
        command: &Self::Command,
        env: &Self::Environment,
    ) -> Result<Vec<Self::Event>, Self::Error>;

    /// Get aggregate ID
    fn aggregate_id(&self) -> Uuid;

    /// Get current version (sequence number of the last applied event)
    fn version(&self) -> i64;

    /// Rebuild state by replaying an event history on top of `initial`
    fn load_from_events<'a, I>(mut initial: Self, events: I) -> Self
    where
        I: IntoIterator<Item = &'a EventEnvelope<Self::Event>>,
        Self::Event: 'a,
    {
        for envelope in events {
            initial.apply_event(&envelope.event_data);
        }
        initial
    }
}
