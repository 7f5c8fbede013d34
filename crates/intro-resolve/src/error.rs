//! Error types for name resolution

/// Resolution configuration errors
///
/// Resolution itself never fails: "no match" is a normal outcome. Only an
/// unusable threshold is rejected, when it is constructed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResolveError {
    /// Threshold outside `[0.0, 1.0]` (or NaN)
    #[error("similarity threshold must lie in [0, 1], got {0}")]
    InvalidThreshold(f64),
}
