pub mod cooldown;
pub mod dispatcher;
pub mod subscriptions;

pub use cooldown::CooldownRing;
pub use dispatcher::Dispatcher;
pub use subscriptions::SubscriptionRegistry;
