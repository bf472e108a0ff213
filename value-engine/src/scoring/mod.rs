pub mod engine;
pub mod historical;
pub mod price;
pub mod resale;
pub mod row;
pub mod section;

pub use engine::{ValueScoreInput, ValueScoringEngine};
