#![allow(clippy::too_many_arguments)]

//! Deterministic, stateless half of the engine: value scoring (C4), the
//! cross-platform event matcher (C5), and the price comparator (C6). No I/O,
//! no async — every function here is a pure transformation over the shared
//! data model, exhaustively unit tested.

pub mod comparator;
pub mod config;
pub mod error;
pub mod matcher;
pub mod scoring;

pub use comparator::{compare_prices, normalize_section, PriceComparison, SectionComparison};
pub use config::ValueEngineConfig;
pub use error::EngineError;
pub use matcher::{match_events, name_similarity, normalize_name, venue_canonical};
pub use scoring::{ValueScoreInput, ValueScoringEngine};
