//! # Slot Registry
//!
//! A predicate-guarded slot leasing kernel with pluggable decimal pricing.
//!
//! The registry owns a fixed pool of typed slots, each guarded by an
//! admission predicate. Arriving entities are leased the first free slot
//! whose predicate accepts them; checking out releases the slot and prices
//! the occupancy period through a caller-supplied [`core::PricingPolicy`].
//! Receipts ([`core::Registration`], [`core::Bill`]) wrap independent
//! occupancy snapshots, so they stay stable after the live slot is reused.
//!
//! ## Core behavior
//!
//! - **First-fit matching**: slots are scanned in pool insertion order and
//!   the first free match wins; running out of matching capacity yields an
//!   unsuccessful registration, never an error.
//! - **Mutual exclusion**: register and check-out are single critical
//!   sections under one registry-wide lock, so concurrent callers can never
//!   race onto the same slot.
//! - **Exact money**: prices and rates are `bigdecimal::BigDecimal`; binary
//!   floating point never touches a money path.
//!
//! ## Example
//!
//! ```rust
//! use bigdecimal::BigDecimal;
//! use slot_registry::core::{pricing, Registry, RegistryError};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Vehicle {
//!     plate: String,
//!     electric: bool,
//! }
//!
//! fn main() -> Result<(), RegistryError> {
//!     let registry = Registry::builder()
//!         .pricing_policy(pricing::hourly_and_fixed(
//!             BigDecimal::from(3),
//!             BigDecimal::from(1),
//!         ))
//!         .slots(2, |vehicle: &Vehicle| vehicle.electric)
//!         .slots(4, |vehicle: &Vehicle| !vehicle.electric)
//!         .build()?;
//!
//!     let car = Vehicle {
//!         plate: "7-AZE-129".into(),
//!         electric: false,
//!     };
//!
//!     let registration = registry.register_now(car.clone());
//!     assert!(registration.is_successful());
//!
//!     let bill = registry.check_out_now(&car)?;
//!     println!("amount due: {}", bill.price());
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! Pools can also be described as data: [`config::RegistryConfig`] carries
//! slot classes and a pricing selection (JSON or environment), and
//! [`builders::build_registry`] turns it into a validated registry given a
//! predicate factory for the class names.

#![deny(warnings)]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Core slot lifecycle, registry, pricing, and receipts.
pub mod core;
/// Configuration models for slot classes and pricing.
pub mod config;
/// Builders to assemble a registry from slots or configuration.
pub mod builders;
/// Shared utilities.
pub mod util;
