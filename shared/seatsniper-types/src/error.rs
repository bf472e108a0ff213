use thiserror::Error;

/// Validation errors raised when constructing or mutating a core entity.
///
/// These are distinct from the adapter/store/notifier error taxonomy in
/// `ticket-engine`, which concerns I/O boundaries rather than entity
/// invariants.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("minScore must be between 1 and 100, got {0}")]
    InvalidMinScore(u8),

    #[error("minQuantity must be >= 1, got {0}")]
    InvalidMinQuantity(u32),

    #[error("quantity must be >= 1, got {0}")]
    InvalidListingQuantity(u32),

    #[error("pricePerTicket must be > 0, got {0}")]
    InvalidPrice(String),

    #[error("fees must be >= 0, got {0}")]
    InvalidFees(String),

    #[error("value-score weights must sum to 1.0 +/- 1e-3, got {0}")]
    InvalidWeights(f64),

    #[error("an event match group must have members from at least two platforms")]
    InsufficientPlatforms,

    #[error("{field} cannot be empty")]
    EmptyField { field: &'static str },
}
