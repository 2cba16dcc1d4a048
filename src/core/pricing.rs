//! Pricing policies applied to occupancy snapshots at check-out.
//!
//! A policy is a pure function from a [`SlotSnapshot`] to a decimal amount.
//! The built-in combinators cover hourly, fixed, and summed pricing; any
//! `Fn(&SlotSnapshot<T>) -> BigDecimal` closure is accepted as a custom
//! policy, so callers can branch on occupant identity, admission class, or
//! duration.

use std::time::Duration;

use bigdecimal::BigDecimal;

use crate::core::slot::{Occupant, SlotSnapshot};

/// Computes the amount owed for a released slot's occupancy snapshot.
///
/// Implementations must be pure and side-effect free: pricing the same
/// snapshot twice yields the same amount.
pub trait PricingPolicy<T: Occupant>: Send + Sync {
    /// Price the given occupancy snapshot.
    fn compute_price(&self, snapshot: &SlotSnapshot<T>) -> BigDecimal;
}

impl<T, F> PricingPolicy<T> for F
where
    T: Occupant,
    F: Fn(&SlotSnapshot<T>) -> BigDecimal + Send + Sync,
{
    fn compute_price(&self, snapshot: &SlotSnapshot<T>) -> BigDecimal {
        self(snapshot)
    }
}

/// Hourly policy: the per-hour rate multiplied by fractional hours of stay.
///
/// A 90 minute stay at rate 3 prices to exactly 4.5; fractional hours are
/// never truncated to whole hours.
pub fn hourly<T: Occupant>(per_hour_rate: BigDecimal) -> impl PricingPolicy<T> {
    move |snapshot: &SlotSnapshot<T>| hourly_amount(snapshot.occupancy_duration(), &per_hour_rate)
}

/// Fixed policy: a constant amount regardless of the snapshot.
pub fn fixed<T: Occupant>(amount: BigDecimal) -> impl PricingPolicy<T> {
    move |_: &SlotSnapshot<T>| amount.clone()
}

/// Sum policy: prices the snapshot with both policies and adds the amounts.
pub fn sum<T: Occupant>(
    first: impl PricingPolicy<T>,
    second: impl PricingPolicy<T>,
) -> impl PricingPolicy<T> {
    move |snapshot: &SlotSnapshot<T>| {
        first.compute_price(snapshot) + second.compute_price(snapshot)
    }
}

/// Hourly rate plus a fixed amount.
pub fn hourly_and_fixed<T: Occupant>(
    per_hour_rate: BigDecimal,
    fixed_amount: BigDecimal,
) -> impl PricingPolicy<T> {
    sum(hourly(per_hour_rate), fixed(fixed_amount))
}

/// Whole minutes of stay divided by sixty, times the rate.
fn hourly_amount(stay: Duration, per_hour_rate: &BigDecimal) -> BigDecimal {
    let minutes = BigDecimal::from(stay.as_secs() / 60);
    minutes / BigDecimal::from(60) * per_hour_rate
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;
    use std::sync::Arc;

    use super::*;
    use crate::core::slot::SlotSnapshot;

    const BASE_MS: u128 = 1_700_000_000_000;

    fn snapshot_of_minutes(minutes: u64) -> SlotSnapshot<u32> {
        SlotSnapshot::new(
            1,
            Arc::new(|_: &u32| true),
            7,
            BASE_MS,
            Some(BASE_MS + u128::from(minutes) * 60_000),
        )
    }

    fn decimal(raw: &str) -> BigDecimal {
        BigDecimal::from_str(raw).expect("valid decimal literal")
    }

    #[test]
    fn hourly_supports_fractional_hours() {
        let policy = hourly::<u32>(BigDecimal::from(3));
        assert_eq!(policy.compute_price(&snapshot_of_minutes(30)), decimal("1.5"));
        assert_eq!(policy.compute_price(&snapshot_of_minutes(60)), decimal("3"));
        assert_eq!(policy.compute_price(&snapshot_of_minutes(90)), decimal("4.5"));
    }

    #[test]
    fn hourly_of_zero_duration_is_zero() {
        let policy = hourly::<u32>(BigDecimal::from(3));
        assert_eq!(policy.compute_price(&snapshot_of_minutes(0)), decimal("0"));
    }

    #[test]
    fn fixed_ignores_duration() {
        let policy = fixed::<u32>(BigDecimal::from(5));
        for minutes in [0, 30, 60, 119] {
            assert_eq!(
                policy.compute_price(&snapshot_of_minutes(minutes)),
                decimal("5")
            );
        }
    }

    #[test]
    fn sum_adds_component_prices() {
        let combined = sum(hourly::<u32>(BigDecimal::from(3)), fixed(BigDecimal::from(2)));
        assert_eq!(combined.compute_price(&snapshot_of_minutes(30)), decimal("3.5"));
        assert_eq!(combined.compute_price(&snapshot_of_minutes(60)), decimal("5"));
    }

    #[test]
    fn custom_closure_is_a_policy() {
        let free_for_small_ids = |snapshot: &SlotSnapshot<u32>| {
            if *snapshot.occupant() < 10 {
                BigDecimal::from(0)
            } else {
                BigDecimal::from(4)
            }
        };
        assert_eq!(
            free_for_small_ids.compute_price(&snapshot_of_minutes(60)),
            decimal("0")
        );
    }
}
