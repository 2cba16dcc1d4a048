//! Fluent builder for assembling a registry slot by slot.

use std::sync::Arc;

use crate::core::audit::AuditSink;
use crate::core::error::RegistryError;
use crate::core::pricing::PricingPolicy;
use crate::core::registry::Registry;
use crate::core::slot::{AdmissionPredicate, Occupant, Slot, SlotId};

/// Builder used for creating [`Registry`] instances.
///
/// Slots keep their insertion order, which is also the registry's first-fit
/// scan order. Auto-generated ids start at 1 and come from a simple counter
/// owned by the builder; explicit ids leave the counter untouched and their
/// uniqueness is the caller's responsibility.
pub struct RegistryBuilder<T> {
    slot_counter: SlotId,
    slots: Vec<Slot<T>>,
    pricing: Option<Box<dyn PricingPolicy<T>>>,
    audit: Option<Box<dyn AuditSink>>,
}

impl<T: Occupant> RegistryBuilder<T> {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self {
            slot_counter: 0,
            slots: Vec::new(),
            pricing: None,
            audit: None,
        }
    }

    fn next_id(&mut self) -> SlotId {
        self.slot_counter += 1;
        self.slot_counter
    }

    /// Set the pricing policy used for every [`crate::core::Bill`].
    pub fn pricing_policy(self, policy: impl PricingPolicy<T> + 'static) -> Self {
        self.boxed_pricing_policy(Box::new(policy))
    }

    /// Set an already boxed pricing policy.
    pub fn boxed_pricing_policy(mut self, policy: Box<dyn PricingPolicy<T>>) -> Self {
        self.pricing = Some(policy);
        self
    }

    /// Attach an audit sink recording register, reject, and check-out
    /// actions.
    pub fn audit_sink(mut self, sink: Box<dyn AuditSink>) -> Self {
        self.audit = Some(sink);
        self
    }

    /// Add one slot with an auto-generated id.
    pub fn slot(mut self, predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        let id = self.next_id();
        self.slots.push(Slot::new(id, Arc::new(predicate)));
        self
    }

    /// Add one slot with an explicit id.
    pub fn slot_with_id(
        mut self,
        id: SlotId,
        predicate: impl Fn(&T) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.slots.push(Slot::new(id, Arc::new(predicate)));
        self
    }

    /// Add `count` slots sharing one admission predicate, each with an
    /// auto-generated id.
    pub fn slots(mut self, count: usize, predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        let predicate: AdmissionPredicate<T> = Arc::new(predicate);
        for _ in 0..count {
            let id = self.next_id();
            self.slots.push(Slot::new(id, Arc::clone(&predicate)));
        }
        self
    }

    /// Validate the setup and build the registry.
    ///
    /// # Errors
    ///
    /// `NoSlots` if no slot was added, `MissingPricingPolicy` if no pricing
    /// policy was set.
    pub fn build(self) -> Result<Registry<T>, RegistryError> {
        if self.slots.is_empty() {
            return Err(RegistryError::NoSlots);
        }
        let pricing = self.pricing.ok_or(RegistryError::MissingPricingPolicy)?;
        tracing::debug!(slots = self.slots.len(), "registry built");
        Ok(Registry::new(self.slots, pricing, self.audit))
    }
}

impl<T: Occupant> Default for RegistryBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}
