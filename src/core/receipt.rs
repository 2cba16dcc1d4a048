//! Receipt value objects returned by register and check-out.

use bigdecimal::BigDecimal;
use uuid::Uuid;

use crate::core::slot::SlotSnapshot;
use crate::util::clock::{now_ms, TimestampMs};

/// Receipt of an allocation attempt.
///
/// An unsuccessful registration carries no snapshot; running out of matching
/// capacity is a normal outcome, not an error.
#[derive(Debug)]
pub struct Registration<T> {
    receipt_id: Uuid,
    created_at_ms: TimestampMs,
    slot: Option<SlotSnapshot<T>>,
}

impl<T> Registration<T> {
    pub(crate) fn new(slot: Option<SlotSnapshot<T>>) -> Self {
        Self {
            receipt_id: Uuid::new_v4(),
            created_at_ms: now_ms(),
            slot,
        }
    }

    /// Unique identifier of this receipt.
    pub fn receipt_id(&self) -> Uuid {
        self.receipt_id
    }

    /// Creation time of this receipt, milliseconds since the Unix epoch.
    pub fn created_at_ms(&self) -> TimestampMs {
        self.created_at_ms
    }

    /// Snapshot of the allocated slot, if a free match was found.
    pub fn slot(&self) -> Option<&SlotSnapshot<T>> {
        self.slot.as_ref()
    }

    /// Whether a slot was allocated.
    pub fn is_successful(&self) -> bool {
        self.slot.is_some()
    }
}

/// Receipt of a check-out, pairing the final occupancy snapshot with the
/// computed price.
///
/// The snapshot is frozen at release time and stays stable even after the
/// live slot is reused by another occupant.
#[derive(Debug)]
pub struct Bill<T> {
    receipt_id: Uuid,
    created_at_ms: TimestampMs,
    slot: SlotSnapshot<T>,
    price: BigDecimal,
}

impl<T> Bill<T> {
    pub(crate) fn new(slot: SlotSnapshot<T>, price: BigDecimal) -> Self {
        Self {
            receipt_id: Uuid::new_v4(),
            created_at_ms: now_ms(),
            slot,
            price,
        }
    }

    /// Unique identifier of this receipt.
    pub fn receipt_id(&self) -> Uuid {
        self.receipt_id
    }

    /// Creation time of this receipt, milliseconds since the Unix epoch.
    pub fn created_at_ms(&self) -> TimestampMs {
        self.created_at_ms
    }

    /// Final occupancy snapshot captured at release.
    pub fn slot(&self) -> &SlotSnapshot<T> {
        &self.slot
    }

    /// Amount computed by the registry's pricing policy.
    pub fn price(&self) -> &BigDecimal {
        &self.price
    }
}
