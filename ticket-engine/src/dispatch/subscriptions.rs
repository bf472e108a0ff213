use seatsniper_types::Subscription;
use std::collections::HashMap;
use std::sync::RwLock;

/// §3/§4.7 `C8`: the set of active subscriptions, keyed by user id (unique
/// per §3).
#[derive(Default)]
pub struct SubscriptionRegistry {
    subscriptions: RwLock<HashMap<String, Subscription>>,
}

impl SubscriptionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upsert(&self, subscription: Subscription) {
        self.subscriptions
            .write()
            .unwrap()
            .insert(subscription.user_id.clone(), subscription);
    }

    pub fn get(&self, user_id: &str) -> Option<Subscription> {
        self.subscriptions.read().unwrap().get(user_id).cloned()
    }

    /// §3: deactivation is monotonic — once auto-deactivated a subscription
    /// stays inactive until the user re-subscribes, which is a fresh
    /// `upsert`, not a flip of this flag.
    pub fn deactivate(&self, user_id: &str) {
        if let Some(sub) = self.subscriptions.write().unwrap().get_mut(user_id) {
            sub.deactivate();
        }
    }

    /// Subscriptions eligible to receive alerts for `city` and `category`
    /// (§4.7 candidate filtering, step 1 and 3).
    pub fn candidates_for(
        &self,
        city: &str,
        category: seatsniper_types::Category,
        event_name: &str,
    ) -> Vec<Subscription> {
        self.subscriptions
            .read()
            .unwrap()
            .values()
            .filter(|s| {
                s.can_receive_alerts()
                    && s.covers_city(city)
                    && s.matches_category(category)
                    && s.matches_keywords(event_name)
            })
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.subscriptions.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
