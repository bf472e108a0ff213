use thiserror::Error;

/// Construction-time failures for the stateless scoring/matching/comparison
/// engines (§8(iii): an invalid weights vector must be rejected, not
/// silently normalized).
#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    #[error("scoring weights sum to {0}, expected 1.0 +/- 1e-3")]
    InvalidWeights(f64),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
