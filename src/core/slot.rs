//! Slot state machine and occupancy snapshots.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::core::error::RegistryError;
use crate::util::clock::{now_ms, TimestampMs};

/// Identifier of a slot, unique within a registry and assigned at build time.
pub type SlotId = u64;

/// Admission predicate deciding whether an entity may occupy a given slot.
///
/// Predicates must be pure and tolerate any entity value, including ones
/// outside their expected domain.
pub type AdmissionPredicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// Marker trait for entity types that can occupy a slot.
///
/// The registry clones occupants into snapshots, compares them by value at
/// check-out, and renders them with `Debug` in logs and errors. Any type
/// meeting the bounds is an `Occupant`.
pub trait Occupant: Clone + PartialEq + fmt::Debug + Send + 'static {}

impl<T> Occupant for T where T: Clone + PartialEq + fmt::Debug + Send + 'static {}

/// A single allocatable unit guarded by an admission predicate.
///
/// A slot is either free (no occupant, no timestamps) or occupied (occupant
/// and arrival set, departure clear). Transitions happen through `allocate`
/// and `release`, both driven by the owning registry under its lock.
pub struct Slot<T> {
    id: SlotId,
    predicate: AdmissionPredicate<T>,
    occupant: Option<T>,
    arrival_ms: Option<TimestampMs>,
    departure_ms: Option<TimestampMs>,
}

impl<T: Occupant> Slot<T> {
    pub(crate) fn new(id: SlotId, predicate: AdmissionPredicate<T>) -> Self {
        Self {
            id,
            predicate,
            occupant: None,
            arrival_ms: None,
            departure_ms: None,
        }
    }

    /// Identifier of this slot.
    pub fn id(&self) -> SlotId {
        self.id
    }

    /// Whether the admission predicate accepts the candidate entity.
    pub fn accepts(&self, entity: &T) -> bool {
        (self.predicate)(entity)
    }

    /// Whether the slot currently has no occupant.
    pub fn is_free(&self) -> bool {
        self.occupant.is_none()
    }

    /// Current occupant, if any.
    pub fn occupant(&self) -> Option<&T> {
        self.occupant.as_ref()
    }

    /// Arrival time of the current occupant, if any.
    pub fn arrival_ms(&self) -> Option<TimestampMs> {
        self.arrival_ms
    }

    /// Elapsed occupancy time.
    ///
    /// Zero if the slot was never allocated; otherwise the time between
    /// arrival and departure, or between arrival and now while the occupancy
    /// is still in progress.
    pub fn occupancy_duration(&self) -> Duration {
        match self.arrival_ms {
            None => Duration::ZERO,
            Some(arrival) => elapsed_between(arrival, self.departure_ms.unwrap_or_else(now_ms)),
        }
    }

    /// Move the slot into the occupied state and return an independent
    /// snapshot for the caller to retain.
    ///
    /// The registry only calls this on slots it has confirmed free under its
    /// lock; the assertion fails fast if that invariant is ever broken.
    pub(crate) fn allocate(&mut self, occupant: T, arrival_ms: TimestampMs) -> SlotSnapshot<T> {
        debug_assert!(self.is_free(), "allocate called on an occupied slot");
        self.occupant = Some(occupant.clone());
        self.arrival_ms = Some(arrival_ms);
        self.departure_ms = None;
        SlotSnapshot {
            id: self.id,
            predicate: Arc::clone(&self.predicate),
            occupant,
            arrival_ms,
            departure_ms: None,
        }
    }

    /// Capture a final snapshot and return the slot to the free state.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the slot is not occupied, or if `departure_ms`
    /// precedes the occupant's arrival. On error the slot is left untouched.
    pub(crate) fn release(
        &mut self,
        departure_ms: TimestampMs,
    ) -> Result<SlotSnapshot<T>, RegistryError> {
        let (occupant, arrival_ms) = match (&self.occupant, self.arrival_ms) {
            (Some(occupant), Some(arrival_ms)) => (occupant.clone(), arrival_ms),
            _ => {
                return Err(RegistryError::InvalidArgument(format!(
                    "slot {} is not occupied",
                    self.id
                )))
            }
        };
        if departure_ms < arrival_ms {
            return Err(RegistryError::InvalidArgument(
                "departure must not precede arrival".into(),
            ));
        }
        let snapshot = SlotSnapshot {
            id: self.id,
            predicate: Arc::clone(&self.predicate),
            occupant,
            arrival_ms,
            departure_ms: Some(departure_ms),
        };
        self.occupant = None;
        self.arrival_ms = None;
        self.departure_ms = None;
        Ok(snapshot)
    }
}

impl<T: fmt::Debug> fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slot")
            .field("id", &self.id)
            .field("occupant", &self.occupant)
            .field("arrival_ms", &self.arrival_ms)
            .field("departure_ms", &self.departure_ms)
            .finish_non_exhaustive()
    }
}

/// Immutable copy of a slot's state frozen at allocation or release time.
///
/// Snapshots own their occupant and share only the immutable predicate with
/// the live slot, so receipts never observe later slot mutations.
pub struct SlotSnapshot<T> {
    id: SlotId,
    predicate: AdmissionPredicate<T>,
    occupant: T,
    arrival_ms: TimestampMs,
    departure_ms: Option<TimestampMs>,
}

impl<T: Occupant> SlotSnapshot<T> {
    /// Assemble a snapshot from parts.
    ///
    /// Useful for exercising custom pricing policies against hand-built
    /// occupancy periods.
    pub fn new(
        id: SlotId,
        predicate: AdmissionPredicate<T>,
        occupant: T,
        arrival_ms: TimestampMs,
        departure_ms: Option<TimestampMs>,
    ) -> Self {
        Self {
            id,
            predicate,
            occupant,
            arrival_ms,
            departure_ms,
        }
    }

    /// Identifier of the slot this snapshot was taken from.
    pub fn id(&self) -> SlotId {
        self.id
    }

    /// Whether the slot's admission predicate accepts the candidate entity.
    pub fn accepts(&self, entity: &T) -> bool {
        (self.predicate)(entity)
    }

    /// The occupant frozen into this snapshot.
    pub fn occupant(&self) -> &T {
        &self.occupant
    }

    /// Arrival time of the occupant.
    pub fn arrival_ms(&self) -> TimestampMs {
        self.arrival_ms
    }

    /// Departure time, set only on snapshots captured at release.
    pub fn departure_ms(&self) -> Option<TimestampMs> {
        self.departure_ms
    }

    /// Elapsed occupancy time: arrival to departure, or arrival to now for a
    /// snapshot of an occupancy still in progress.
    pub fn occupancy_duration(&self) -> Duration {
        elapsed_between(self.arrival_ms, self.departure_ms.unwrap_or_else(now_ms))
    }
}

impl<T: Clone> Clone for SlotSnapshot<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            predicate: Arc::clone(&self.predicate),
            occupant: self.occupant.clone(),
            arrival_ms: self.arrival_ms,
            departure_ms: self.departure_ms,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for SlotSnapshot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlotSnapshot")
            .field("id", &self.id)
            .field("occupant", &self.occupant)
            .field("arrival_ms", &self.arrival_ms)
            .field("departure_ms", &self.departure_ms)
            .finish_non_exhaustive()
    }
}

fn elapsed_between(arrival_ms: TimestampMs, end_ms: TimestampMs) -> Duration {
    let millis = end_ms.saturating_sub(arrival_ms);
    Duration::from_millis(u64::try_from(millis).unwrap_or(u64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE_MS: TimestampMs = 1_700_000_000_000;
    const HOUR_MS: TimestampMs = 60 * 60 * 1000;

    fn any_entity_slot() -> Slot<u32> {
        Slot::new(1, Arc::new(|_: &u32| true))
    }

    #[test]
    fn new_slot_is_free() {
        let slot = any_entity_slot();
        assert!(slot.is_free());
        assert!(slot.occupant().is_none());
        assert!(slot.arrival_ms().is_none());
        assert_eq!(slot.occupancy_duration(), Duration::ZERO);
    }

    #[test]
    fn allocate_occupies_and_snapshots() {
        let mut slot = any_entity_slot();
        let snapshot = slot.allocate(7, BASE_MS);

        assert!(!slot.is_free());
        assert_eq!(slot.occupant(), Some(&7));
        assert_eq!(slot.arrival_ms(), Some(BASE_MS));

        assert_eq!(snapshot.id(), 1);
        assert_eq!(*snapshot.occupant(), 7);
        assert_eq!(snapshot.arrival_ms(), BASE_MS);
        assert!(snapshot.departure_ms().is_none());
    }

    #[test]
    fn release_frees_and_freezes_departure() {
        let mut slot = any_entity_slot();
        slot.allocate(7, BASE_MS);
        let snapshot = slot.release(BASE_MS + 2 * HOUR_MS).expect("occupied slot");

        assert!(slot.is_free());
        assert_eq!(snapshot.departure_ms(), Some(BASE_MS + 2 * HOUR_MS));
        assert_eq!(
            snapshot.occupancy_duration(),
            Duration::from_millis(2 * 60 * 60 * 1000)
        );
    }

    #[test]
    fn release_before_arrival_is_rejected_and_slot_unchanged() {
        let mut slot = any_entity_slot();
        slot.allocate(7, BASE_MS);

        let err = slot.release(BASE_MS - 1).expect_err("departure precedes arrival");
        assert!(matches!(err, RegistryError::InvalidArgument(_)));

        // The failed release must not have mutated anything.
        assert!(!slot.is_free());
        assert_eq!(slot.occupant(), Some(&7));
        assert_eq!(slot.arrival_ms(), Some(BASE_MS));
    }

    #[test]
    fn release_of_free_slot_is_rejected() {
        let mut slot = any_entity_slot();
        let err = slot.release(BASE_MS).expect_err("slot is vacant");
        assert!(matches!(err, RegistryError::InvalidArgument(_)));
    }

    #[test]
    fn snapshot_is_independent_of_later_slot_state() {
        let mut slot = any_entity_slot();
        slot.allocate(7, BASE_MS);
        let first = slot.release(BASE_MS + HOUR_MS).expect("occupied slot");

        // Reuse the slot for another occupant.
        slot.allocate(8, BASE_MS + 3 * HOUR_MS);

        assert_eq!(*first.occupant(), 7);
        assert_eq!(first.arrival_ms(), BASE_MS);
        assert_eq!(first.departure_ms(), Some(BASE_MS + HOUR_MS));
    }

    #[test]
    fn in_progress_occupancy_reports_live_duration() {
        let mut slot = any_entity_slot();
        let ninety_minutes_ago = now_ms() - 90 * 60 * 1000;
        slot.allocate(7, ninety_minutes_ago);

        let running = slot.occupancy_duration();
        assert!(running >= Duration::from_secs(90 * 60));
        assert!(running < Duration::from_secs(95 * 60));
    }

    #[test]
    fn accepts_delegates_to_predicate() {
        let slot: Slot<u32> = Slot::new(2, Arc::new(|value: &u32| *value % 2 == 0));
        assert!(slot.accepts(&4));
        assert!(!slot.accepts(&3));
    }
}
