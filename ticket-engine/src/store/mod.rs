pub mod contract;
pub mod memory;
pub mod watchlist;
pub mod wizard;

pub use contract::{DurableStore, StoreError};
pub use memory::InMemoryStore;
pub use watchlist::WatchlistService;
pub use wizard::{WizardSession, WizardSessionStore, WizardStep};
