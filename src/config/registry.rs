//! Registry configuration structures.
//!
//! A configuration describes the pool as data: named slot classes with
//! counts, plus one pricing selection. Predicates cannot be serialized, so
//! [`crate::builders::build_registry`] pairs a configuration with a
//! caller-supplied predicate factory keyed by slot class.

use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use bigdecimal::BigDecimal;

use crate::core::error::AppResult;

/// Environment variable read by [`RegistryConfig::from_env`].
pub const CONFIG_ENV_VAR: &str = "SLOT_REGISTRY_CONFIG";

/// Pricing policy selection.
///
/// Rates and amounts are carried as decimal strings so they parse exactly;
/// binary floating point never enters a money path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum PricingConfig {
    /// Per-hour rate multiplied by fractional hours of occupancy.
    Hourly {
        /// Per-hour rate, as an exact decimal string.
        rate: String,
    },
    /// Constant amount regardless of occupancy.
    Fixed {
        /// Amount charged, as an exact decimal string.
        amount: String,
    },
    /// Hourly rate plus a fixed amount.
    HourlyAndFixed {
        /// Per-hour rate, as an exact decimal string.
        rate: String,
        /// Fixed amount added on top, as an exact decimal string.
        amount: String,
    },
}

/// One class of interchangeable slots sharing an admission predicate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotClassConfig {
    /// Class name handed to the predicate factory.
    pub class: String,
    /// Number of slots of this class.
    pub count: usize,
}

/// Root registry configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Slot classes in pool insertion order.
    pub slot_classes: Vec<SlotClassConfig>,
    /// Pricing policy selection.
    pub pricing: PricingConfig,
}

impl PricingConfig {
    /// Validate that every rate and amount parses as a decimal.
    ///
    /// # Errors
    ///
    /// A human-readable description of the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            Self::Hourly { rate } => ensure_decimal("rate", rate),
            Self::Fixed { amount } => ensure_decimal("amount", amount),
            Self::HourlyAndFixed { rate, amount } => {
                ensure_decimal("rate", rate)?;
                ensure_decimal("amount", amount)
            }
        }
    }
}

impl RegistryConfig {
    /// Validate slot classes and pricing, ensuring at least one slot exists.
    ///
    /// # Errors
    ///
    /// A human-readable description of the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        if self.slot_classes.is_empty() {
            return Err("at least one slot class must be defined".into());
        }
        for class in &self.slot_classes {
            if class.class.is_empty() {
                return Err("slot class names must not be empty".into());
            }
            if class.count == 0 {
                return Err(format!(
                    "slot class `{}` must have count greater than 0",
                    class.class
                ));
            }
        }
        self.pricing.validate()
    }

    /// Parse registry configuration from a JSON string and validate.
    ///
    /// # Errors
    ///
    /// A human-readable description of the parse or validation failure.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|err| format!("parse error: {err}"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load configuration from the [`CONFIG_ENV_VAR`] environment variable,
    /// honoring a `.env` file when present.
    ///
    /// # Errors
    ///
    /// The variable is unset, or its value fails [`Self::from_json_str`].
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        let raw = std::env::var(CONFIG_ENV_VAR)
            .with_context(|| format!("{CONFIG_ENV_VAR} is not set"))?;
        Self::from_json_str(&raw).map_err(|err| anyhow!("invalid {CONFIG_ENV_VAR}: {err}"))
    }
}

fn ensure_decimal(field: &str, raw: &str) -> Result<(), String> {
    BigDecimal::from_str(raw)
        .map(|_| ())
        .map_err(|err| format!("{field} is not a valid decimal: {err}"))
}
