//! Pricing policy combinator tests against hand-built occupancy snapshots.

use std::str::FromStr;
use std::sync::Arc;

use bigdecimal::BigDecimal;
use slot_registry::core::{pricing, PricingPolicy, SlotSnapshot};

const BASE_MS: u128 = 1_700_000_000_000;

#[derive(Clone, Debug, PartialEq, Eq)]
struct Vehicle {
    plate: u32,
    electric: bool,
}

fn snapshot_of_minutes(minutes: u64, occupant: Vehicle) -> SlotSnapshot<Vehicle> {
    SlotSnapshot::new(
        1,
        Arc::new(|_: &Vehicle| true),
        occupant,
        BASE_MS,
        Some(BASE_MS + u128::from(minutes) * 60_000),
    )
}

fn gas(plate: u32) -> Vehicle {
    Vehicle {
        plate,
        electric: false,
    }
}

fn decimal(raw: &str) -> BigDecimal {
    BigDecimal::from_str(raw).expect("valid decimal literal")
}

#[test]
fn hourly_prices_fractional_hours_exactly() {
    let policy = pricing::hourly::<Vehicle>(BigDecimal::from(3));
    assert_eq!(
        policy.compute_price(&snapshot_of_minutes(30, gas(1))),
        decimal("1.5")
    );
    assert_eq!(
        policy.compute_price(&snapshot_of_minutes(60, gas(1))),
        decimal("3")
    );
    assert_eq!(
        policy.compute_price(&snapshot_of_minutes(90, gas(1))),
        decimal("4.5")
    );
}

#[test]
fn fixed_is_constant_across_durations() {
    let policy = pricing::fixed::<Vehicle>(decimal("5"));
    for minutes in [0, 30, 60, 119] {
        assert_eq!(
            policy.compute_price(&snapshot_of_minutes(minutes, gas(1))),
            decimal("5")
        );
    }
}

#[test]
fn hourly_and_fixed_over_two_hours_is_seven() {
    let policy = pricing::hourly_and_fixed::<Vehicle>(BigDecimal::from(3), BigDecimal::from(1));
    assert_eq!(
        policy.compute_price(&snapshot_of_minutes(120, gas(1))),
        decimal("7")
    );
}

#[test]
fn sum_equals_component_sum_for_arbitrary_policies() {
    let hourly = pricing::hourly::<Vehicle>(BigDecimal::from(3));
    let fixed = pricing::fixed::<Vehicle>(decimal("2"));
    let combined = pricing::sum(
        pricing::hourly::<Vehicle>(BigDecimal::from(3)),
        pricing::fixed::<Vehicle>(decimal("2")),
    );

    for minutes in [0, 30, 59, 60, 90, 121] {
        let snapshot = snapshot_of_minutes(minutes, gas(minutes as u32));
        let expected =
            hourly.compute_price(&snapshot) + fixed.compute_price(&snapshot);
        assert_eq!(combined.compute_price(&snapshot), expected);
    }
}

#[test]
fn custom_policy_may_branch_on_the_occupant() {
    let base = pricing::hourly_and_fixed::<Vehicle>(BigDecimal::from(3), BigDecimal::from(1));
    let free_for_electric = move |snapshot: &SlotSnapshot<Vehicle>| {
        if snapshot.occupant().electric {
            BigDecimal::from(0)
        } else {
            base.compute_price(snapshot)
        }
    };

    let electric = Vehicle {
        plate: 2,
        electric: true,
    };
    assert_eq!(
        free_for_electric.compute_price(&snapshot_of_minutes(60, electric)),
        decimal("0")
    );
    assert_eq!(
        free_for_electric.compute_price(&snapshot_of_minutes(60, gas(3))),
        decimal("4")
    );
}
