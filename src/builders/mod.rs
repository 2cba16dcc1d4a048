//! Builders to assemble registries from slots or configuration.

pub mod registry_builder;

pub use registry_builder::RegistryBuilder;

use std::str::FromStr;

use bigdecimal::BigDecimal;

use crate::config::{PricingConfig, RegistryConfig, SlotClassConfig};
use crate::core::error::RegistryError;
use crate::core::pricing::{self, PricingPolicy};
use crate::core::registry::Registry;
use crate::core::slot::{AdmissionPredicate, Occupant};

/// Build a registry from configuration using a caller-supplied predicate
/// factory.
///
/// The factory maps each configured slot class to the admission predicate
/// those slots will use; the pricing policy comes from the configuration's
/// pricing selection.
///
/// # Errors
///
/// `Configuration` if the configuration fails validation or carries
/// unparseable decimal amounts, and any error returned by the factory.
pub fn build_registry<T, F>(
    cfg: &RegistryConfig,
    mut predicates: F,
) -> Result<Registry<T>, RegistryError>
where
    T: Occupant,
    F: FnMut(&SlotClassConfig) -> Result<AdmissionPredicate<T>, RegistryError>,
{
    cfg.validate().map_err(RegistryError::Configuration)?;
    let mut builder = Registry::builder().boxed_pricing_policy(build_pricing(&cfg.pricing)?);
    for class in &cfg.slot_classes {
        let predicate = predicates(class)?;
        builder = builder.slots(class.count, move |entity: &T| predicate(entity));
    }
    builder.build()
}

/// Build a pricing policy from its configuration, parsing amounts exactly.
///
/// # Errors
///
/// `Configuration` if a rate or amount is not a valid decimal.
pub fn build_pricing<T: Occupant>(
    cfg: &PricingConfig,
) -> Result<Box<dyn PricingPolicy<T>>, RegistryError> {
    let policy: Box<dyn PricingPolicy<T>> = match cfg {
        PricingConfig::Hourly { rate } => Box::new(pricing::hourly(parse_amount("rate", rate)?)),
        PricingConfig::Fixed { amount } => Box::new(pricing::fixed(parse_amount("amount", amount)?)),
        PricingConfig::HourlyAndFixed { rate, amount } => Box::new(pricing::hourly_and_fixed(
            parse_amount("rate", rate)?,
            parse_amount("amount", amount)?,
        )),
    };
    Ok(policy)
}

fn parse_amount(field: &str, raw: &str) -> Result<BigDecimal, RegistryError> {
    BigDecimal::from_str(raw)
        .map_err(|err| RegistryError::Configuration(format!("{field} is not a valid decimal: {err}")))
}
