#![allow(clippy::too_many_arguments)]
#![allow(clippy::redundant_field_names)]

pub mod alert;
pub mod audit;
pub mod encryption;
pub mod error;
pub mod event;
pub mod event_match;
pub mod listing;
pub mod price_history;
pub mod scoring;
pub mod subscription;
pub mod tracked_event;

pub use alert::*;
pub use audit::*;
pub use error::*;
pub use event::*;
pub use event_match::*;
pub use listing::*;
pub use price_history::*;
pub use scoring::*;
pub use subscription::*;
pub use tracked_event::*;
