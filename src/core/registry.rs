//! Registry owning the slot pool, the pricing policy, and capacity metrics.

use parking_lot::Mutex;

use crate::builders::RegistryBuilder;
use crate::core::audit::{build_audit_event, AuditSink};
use crate::core::error::RegistryError;
use crate::core::pricing::PricingPolicy;
use crate::core::receipt::{Bill, Registration};
use crate::core::slot::{Occupant, Slot, SlotId};
use crate::util::clock::{now_ms, TimestampMs};

/// Pool-level coordinator owning all slots and the pricing policy.
///
/// `register` and `check_out` each run as one critical section under a single
/// registry-wide lock, so the scan-then-mutate sequences are atomic and two
/// callers can never race onto the same slot. Build instances through
/// [`Registry::builder`] or [`crate::builders::build_registry`].
pub struct Registry<T> {
    slots: Mutex<Vec<Slot<T>>>,
    pricing: Box<dyn PricingPolicy<T>>,
    audit: Option<Mutex<Box<dyn AuditSink>>>,
}

impl<T: Occupant> Registry<T> {
    pub(crate) fn new(
        slots: Vec<Slot<T>>,
        pricing: Box<dyn PricingPolicy<T>>,
        audit: Option<Box<dyn AuditSink>>,
    ) -> Self {
        Self {
            slots: Mutex::new(slots),
            pricing,
            audit: audit.map(Mutex::new),
        }
    }

    /// Fluent builder for assembling a registry slot by slot.
    pub fn builder() -> RegistryBuilder<T> {
        RegistryBuilder::new()
    }

    /// Total slot count, invariant over registrations and check-outs.
    pub fn capacity(&self) -> usize {
        self.slots.lock().len()
    }

    /// Count of slots whose predicate accepts the entity, occupied or not.
    pub fn capacity_for(&self, entity: &T) -> usize {
        self.slots
            .lock()
            .iter()
            .filter(|slot| slot.accepts(entity))
            .count()
    }

    /// Count of currently free slots.
    pub fn available_capacity(&self) -> usize {
        self.slots.lock().iter().filter(|slot| slot.is_free()).count()
    }

    /// Count of currently free slots whose predicate accepts the entity.
    pub fn available_capacity_for(&self, entity: &T) -> usize {
        self.slots
            .lock()
            .iter()
            .filter(|slot| slot.is_free() && slot.accepts(entity))
            .count()
    }

    /// Register an entity, allocating the first free slot that accepts it.
    ///
    /// Slots are scanned in pool insertion order; the first free match wins.
    /// When no free slot accepts the entity the registration is unsuccessful,
    /// which is a normal outcome rather than an error.
    pub fn register(&self, occupant: T, arrival_ms: TimestampMs) -> Registration<T> {
        let mut slots = self.slots.lock();
        let matched = slots
            .iter_mut()
            .find(|slot| slot.is_free() && slot.accepts(&occupant));
        match matched {
            Some(slot) => {
                let snapshot = slot.allocate(occupant, arrival_ms);
                drop(slots);
                tracing::info!(slot_id = snapshot.id(), "occupant registered");
                self.record_audit("register", Some(snapshot.id()), None);
                Registration::new(Some(snapshot))
            }
            None => {
                drop(slots);
                tracing::debug!(occupant = ?occupant, "no free slot matches occupant");
                self.record_audit("reject", None, Some(format!("{occupant:?}")));
                Registration::new(None)
            }
        }
    }

    /// Register an entity arriving now.
    pub fn register_now(&self, occupant: T) -> Registration<T> {
        self.register(occupant, now_ms())
    }

    /// Check an entity out, releasing its slot and pricing the occupancy.
    ///
    /// The occupied slot is located by occupant equality under the registry
    /// lock; the released snapshot is then fed to the pricing policy.
    ///
    /// # Errors
    ///
    /// `NotFound` if no occupied slot holds the occupant; `InvalidArgument`
    /// if `departure_ms` precedes the occupant's arrival, in which case the
    /// slot stays occupied.
    pub fn check_out(
        &self,
        occupant: &T,
        departure_ms: TimestampMs,
    ) -> Result<Bill<T>, RegistryError> {
        let snapshot = {
            let mut slots = self.slots.lock();
            let slot = slots
                .iter_mut()
                .find(|slot| slot.occupant() == Some(occupant))
                .ok_or_else(|| RegistryError::NotFound(format!("{occupant:?}")))?;
            slot.release(departure_ms)?
        };
        let price = self.pricing.compute_price(&snapshot);
        tracing::info!(slot_id = snapshot.id(), price = %price, "occupant checked out");
        self.record_audit("checkout", Some(snapshot.id()), Some(price.to_string()));
        Ok(Bill::new(snapshot, price))
    }

    /// Check an entity out departing now.
    ///
    /// # Errors
    ///
    /// Same as [`Registry::check_out`].
    pub fn check_out_now(&self, occupant: &T) -> Result<Bill<T>, RegistryError> {
        self.check_out(occupant, now_ms())
    }

    fn record_audit(&self, action: &str, slot_id: Option<SlotId>, detail: Option<String>) {
        if let Some(sink) = &self.audit {
            sink.lock().record(build_audit_event(slot_id, action, detail));
        }
    }
}

impl<T: Occupant> std::fmt::Debug for Registry<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("slots", &self.slots.lock())
            .field("has_audit", &self.audit.is_some())
            .finish_non_exhaustive()
    }
}
