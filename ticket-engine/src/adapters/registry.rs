use super::contract::MarketplaceAdapter;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

/// §6: the set of marketplace adapters available at runtime. Adapters whose
/// credentials are missing are skipped with a warning rather than failing
/// startup, so a partially-configured deployment still serves the platforms
/// it has credentials for.
#[derive(Default)]
pub struct AdapterRegistry {
    adapters: HashMap<String, Arc<dyn MarketplaceAdapter>>,
}

impl AdapterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, adapter: Arc<dyn MarketplaceAdapter>) {
        self.adapters.insert(adapter.platform_name().to_string(), adapter);
    }

    /// Registers `adapter` only if `has_credentials` is true; otherwise logs
    /// a warning naming the skipped platform.
    pub fn register_if_configured(&mut self, adapter: Arc<dyn MarketplaceAdapter>, has_credentials: bool) {
        if has_credentials {
            self.register(adapter);
        } else {
            warn!(platform = adapter.platform_name(), "skipping adapter: no credentials configured");
        }
    }

    pub fn get(&self, platform: &str) -> Option<Arc<dyn MarketplaceAdapter>> {
        self.adapters.get(platform).cloned()
    }

    pub fn all(&self) -> Vec<Arc<dyn MarketplaceAdapter>> {
        self.adapters.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}
