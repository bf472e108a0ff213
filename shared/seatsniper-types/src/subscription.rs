use crate::error::ModelError;
use crate::event::Category;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Telegram,
    Sms,
    WhatsApp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserTier {
    Free,
    Pro,
    Premium,
}

/// A user's standing request to be alerted when listings meeting criteria
/// appear (§3). Identity is `userId`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub user_id: String,
    pub channel: Channel,
    /// Lowercase city names; treated as a set semantically even though
    /// stored as an ordered list (§3).
    pub cities: Vec<String>,
    pub min_score: u8,
    pub min_quantity: u32,
    /// 0 means "no cap".
    pub max_price_per_ticket: Decimal,
    pub keywords: Option<Vec<String>>,
    pub categories: Option<Vec<Category>>,
    pub active: bool,
    pub paused: bool,
    pub user_tier: UserTier,
}

impl Subscription {
    pub fn new(
        user_id: impl Into<String>,
        channel: Channel,
        cities: Vec<String>,
        min_score: u8,
        min_quantity: u32,
    ) -> Result<Self, ModelError> {
        if !(1..=100).contains(&min_score) {
            return Err(ModelError::InvalidMinScore(min_score));
        }
        if min_quantity < 1 {
            return Err(ModelError::InvalidMinQuantity(min_quantity));
        }
        Ok(Self {
            user_id: user_id.into(),
            channel,
            cities: cities.into_iter().map(|c| c.to_lowercase()).collect(),
            min_score,
            min_quantity,
            max_price_per_ticket: Decimal::ZERO,
            keywords: None,
            categories: None,
            active: true,
            paused: false,
            user_tier: UserTier::Free,
        })
    }

    /// §3 invariant: an inactive or paused subscription never triggers
    /// alert dispatch.
    pub fn can_receive_alerts(&self) -> bool {
        self.active && !self.paused
    }

    pub fn covers_city(&self, city: &str) -> bool {
        let city = city.to_lowercase();
        self.cities.iter().any(|c| c == &city)
    }

    pub fn has_budget_cap(&self) -> bool {
        self.max_price_per_ticket > Decimal::ZERO
    }

    pub fn within_budget(&self, price_per_ticket: Decimal) -> bool {
        !self.has_budget_cap() || price_per_ticket <= self.max_price_per_ticket
    }

    pub fn matches_category(&self, category: Category) -> bool {
        match &self.categories {
            None => true,
            Some(cats) => cats.contains(&category),
        }
    }

    pub fn matches_keywords(&self, event_name: &str) -> bool {
        match &self.keywords {
            None => true,
            Some(keywords) => {
                let name_lower = event_name.to_lowercase();
                keywords
                    .iter()
                    .any(|k| name_lower.contains(&k.to_lowercase()))
            }
        }
    }

    /// §3 invariant: deactivation is monotonic within a process lifetime —
    /// auto-deactivated subscriptions are not auto-reactivated. This method
    /// only ever transitions `active` from true to false.
    pub fn deactivate(&mut self) {
        self.active = false;
    }
}
