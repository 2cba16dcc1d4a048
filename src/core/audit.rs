//! Audit sink implementations.
//!
//! Registries record register, reject, and check-out actions to an optional
//! sink; the in-memory sink keeps a bounded buffer for tests and dev.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use uuid::Uuid;

use crate::core::slot::SlotId;
use crate::util::clock::{now_ms, TimestampMs};

/// Audit event structure.
#[derive(Debug, Clone)]
pub struct AuditEvent {
    /// Event identifier.
    pub event_id: Uuid,
    /// Slot the action touched, when one was involved.
    pub slot_id: Option<SlotId>,
    /// Action taken (register, reject, checkout).
    pub action: String,
    /// Timestamp milliseconds.
    pub created_at_ms: TimestampMs,
    /// Additional context, such as the rejected occupant or the billed price.
    pub detail: Option<String>,
}

/// Audit sink abstraction.
pub trait AuditSink: Send {
    /// Record an audit event.
    fn record(&mut self, event: AuditEvent);
}

/// In-memory audit sink with a bounded buffer.
///
/// Clones share the same buffer, so a test can keep one handle while the
/// registry owns the other.
#[derive(Clone)]
pub struct InMemoryAuditSink {
    events: Arc<Mutex<VecDeque<AuditEvent>>>,
    max_events: usize,
}

impl InMemoryAuditSink {
    /// Create a new in-memory sink with a bounded buffer.
    pub fn new(max_events: usize) -> Self {
        Self {
            events: Arc::new(Mutex::new(VecDeque::with_capacity(max_events))),
            max_events,
        }
    }

    /// Retrieve a snapshot of stored events.
    pub fn events(&self) -> Vec<AuditEvent> {
        self.events.lock().iter().cloned().collect()
    }
}

impl AuditSink for InMemoryAuditSink {
    fn record(&mut self, event: AuditEvent) {
        let mut events = self.events.lock();
        if events.len() >= self.max_events {
            events.pop_front();
        }
        events.push_back(event);
    }
}

/// Helper to build an audit event from context.
pub fn build_audit_event(
    slot_id: Option<SlotId>,
    action: impl Into<String>,
    detail: Option<String>,
) -> AuditEvent {
    AuditEvent {
        event_id: Uuid::new_v4(),
        slot_id,
        action: action.into(),
        created_at_ms: now_ms(),
        detail,
    }
}
