//! Error types for registry operations.

use thiserror::Error;

/// Errors produced by registry components.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Registry was built without any slots.
    #[error("registry requires at least one slot")]
    NoSlots,
    /// Registry was built without a pricing policy.
    #[error("a pricing policy is required")]
    MissingPricingPolicy,
    /// Configuration input could not be parsed or applied.
    #[error("invalid configuration: {0}")]
    Configuration(String),
    /// An argument was out of range for the requested transition.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// No occupied slot holds the requested occupant.
    #[error("occupant not found: {0}")]
    NotFound(String),
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        assert_eq!(
            format!("{}", RegistryError::NoSlots),
            "registry requires at least one slot"
        );
        assert_eq!(
            format!("{}", RegistryError::MissingPricingPolicy),
            "a pricing policy is required"
        );
        assert_eq!(
            format!("{}", RegistryError::Configuration("rate is bad".into())),
            "invalid configuration: rate is bad"
        );
        assert_eq!(
            format!(
                "{}",
                RegistryError::InvalidArgument("departure must not precede arrival".into())
            ),
            "invalid argument: departure must not precede arrival"
        );
        assert_eq!(
            format!("{}", RegistryError::NotFound("Guest(3)".into())),
            "occupant not found: Guest(3)"
        );
    }
}
