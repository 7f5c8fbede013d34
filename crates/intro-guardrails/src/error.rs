//! Error types for guardrail configuration
//!
//! Guardrail outcomes are data ([`ValidationResult`](crate::ValidationResult)),
//! never errors. These variants cover configuration that cannot be used to
//! build a validator.

/// Guardrail configuration errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GuardrailError {
    /// Industry selector is not a known profile
    #[error("unknown industry profile '{0}' (expected 'qsr' or 'manufacturing')")]
    UnknownIndustry(String),

    /// Assumption source tag is not recognized
    #[error("unknown assumption source '{0}' (expected 'gong', 'web' or 'manual')")]
    UnknownSource(String),

    /// A lower bound exceeds its upper bound, or a bound is not finite
    #[error("invalid {name} bounds: {min} to {max}")]
    InvalidBounds {
        /// Which bound pair
        name: &'static str,
        /// Lower bound
        min: f64,
        /// Upper bound
        max: f64,
    },

    /// Accretion ceiling must be a positive percentage
    #[error("accretion ceiling must be positive, got {0}")]
    InvalidCeiling(f64),
}
