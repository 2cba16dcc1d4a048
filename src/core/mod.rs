//! Core slot lifecycle, registry, pricing, and receipts.

pub mod audit;
pub mod error;
pub mod pricing;
pub mod receipt;
pub mod registry;
pub mod slot;

pub use audit::{build_audit_event, AuditEvent, AuditSink, InMemoryAuditSink};
pub use error::{AppResult, RegistryError};
pub use pricing::PricingPolicy;
pub use receipt::{Bill, Registration};
pub use registry::Registry;
pub use slot::{AdmissionPredicate, Occupant, Slot, SlotId, SlotSnapshot};
