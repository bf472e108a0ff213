pub mod config;
pub mod credentials;
pub mod telemetry;

pub use config::ConfigRegistry;
