use uuid::Uuid;

use crate::event_sourcing::core::{DomainEvent, EventEnvelope};

// ============================================================================
// Generic Event Log - Append-only history for one aggregate
// ============================================================================
//
// Responsibilities:
// 1. Wrap domain events in envelopes with gapless sequence numbers
// 2. Keep the history in append order
// 3. Hand back the freshly appended envelopes for notification
//
// ============================================================================

#[derive(Debug, Clone)]
pub struct EventLog<E> {
    aggregate_id: Uuid,
    events: Vec<EventEnvelope<E>>,
}

impl<E: DomainEvent> EventLog<E> {
    pub fn new(aggregate_id: Uuid) -> Self {
        Self {
            aggregate_id,
            events: Vec::new(),
        }
    }

    /// Sequence number of the last appended event, 0 when empty
    pub fn current_version(&self) -> i64 {
        self.events.last().map_or(0, |e| e.sequence_number)
    }

    /// Append events emitted by one command.
    /// Returns the envelopes that were just appended.
    pub fn append_events(&mut self, correlation_id: Uuid, events: Vec<E>) -> &[EventEnvelope<E>] {
        let aggregate_id = self.aggregate_id;
        let start = self.events.len();
        let mut seq = self.current_version();

        for event in events {
            seq += 1;
            self.events.push(EventEnvelope::new(aggregate_id, seq, event, correlation_id));
        }

        tracing::trace!(
            aggregate_id = %self.aggregate_id,
            new_version = seq,
            event_count = self.events.len() - start,
            "Appended events to event log"
        );

        &self.events[start..]
    }

    /// Drop every envelope sequenced before `sequence_number`.
    /// Later appends keep numbering from the current version.
    pub fn discard_before(&mut self, sequence_number: i64) {
        let before = self.events.len();
        self.events.retain(|e| e.sequence_number >= sequence_number);

        tracing::trace!(
            aggregate_id = %self.aggregate_id,
            discarded = before - self.events.len(),
            "Discarded event history"
        );
    }

    /// Sequence number of the oldest retained event, if any
    pub fn first_version(&self) -> Option<i64> {
        self.events.first().map(|e| e.sequence_number)
    }

    pub fn events(&self) -> &[EventEnvelope<E>] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
