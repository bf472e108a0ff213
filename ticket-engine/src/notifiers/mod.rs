pub mod contract;
pub mod mock;

pub use contract::{classify_failure, AlertPayload, DeliveryStatus, Notifier};
