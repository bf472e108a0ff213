use std::collections::HashMap;
use std::time::Duration;

/// §10.4 `C15`: process-wide configuration loaded from environment
/// variables: defaults, then env overrides, then a `validate()` gate.
#[derive(Debug, Clone)]
pub struct ConfigRegistry {
    pub ticketmaster_api_key: Option<String>,
    pub stubhub_client_id: Option<String>,
    pub stubhub_client_secret: Option<String>,
    pub seatgeek_client_id: Option<String>,
    pub seatgeek_client_secret: Option<String>,
    pub apify_token: Option<String>,

    pub telegram_bot_token: Option<String>,
    pub twilio_account_sid: Option<String>,
    pub twilio_auth_token: Option<String>,
    pub twilio_from_number: Option<String>,

    pub monitored_cities: Vec<String>,
    pub city_state_map: HashMap<String, String>,

    pub high_priority_interval: Duration,
    pub medium_priority_interval: Duration,
    pub low_priority_interval: Duration,
    pub discovery_interval: Duration,

    pub alert_score_threshold: u8,
    pub max_events_per_cycle: usize,
    pub alert_cooldown: Duration,
    pub top_n_per_event: usize,

    pub log_level: String,
    pub store_url: String,
}

impl Default for ConfigRegistry {
    fn default() -> Self {
        Self {
            ticketmaster_api_key: None,
            stubhub_client_id: None,
            stubhub_client_secret: None,
            seatgeek_client_id: None,
            seatgeek_client_secret: None,
            apify_token: None,
            telegram_bot_token: None,
            twilio_account_sid: None,
            twilio_auth_token: None,
            twilio_from_number: None,
            monitored_cities: Vec::new(),
            city_state_map: HashMap::new(),
            high_priority_interval: Duration::from_secs(120),
            medium_priority_interval: Duration::from_secs(600),
            low_priority_interval: Duration::from_secs(1800),
            discovery_interval: Duration::from_secs(3600),
            alert_score_threshold: 70,
            max_events_per_cycle: 50,
            alert_cooldown: Duration::from_secs(1_800),
            top_n_per_event: 5,
            log_level: "info".to_string(),
            store_url: "memory://local".to_string(),
        }
    }
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

fn env_u64(key: &str, default: u64) -> u64 {
    env_string(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

/// `city_state_map` is structured data that doesn't fit comfortably in a
/// single environment variable; when `CITY_STATE_MAP_FILE` points at a TOML
/// file of `city = "state"` pairs, it's loaded from there instead.
fn load_city_state_map() -> HashMap<String, String> {
    let Some(path) = env_string("CITY_STATE_MAP_FILE") else {
        return HashMap::new();
    };
    match std::fs::read_to_string(&path) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_else(|err| {
            tracing::warn!(%path, %err, "failed to parse city_state_map file, ignoring");
            HashMap::new()
        }),
        Err(err) => {
            tracing::warn!(%path, %err, "failed to read city_state_map file, ignoring");
            HashMap::new()
        }
    }
}

impl ConfigRegistry {
    /// §10.4: loads `dotenv`, then overrides the defaults field by field
    /// from environment variables, then validates.
    pub fn from_env() -> Result<Self, String> {
        let _ = dotenv::dotenv();
        let defaults = Self::default();

        let registry = Self {
            ticketmaster_api_key: env_string("TICKETMASTER_API_KEY"),
            stubhub_client_id: env_string("STUBHUB_CLIENT_ID"),
            stubhub_client_secret: env_string("STUBHUB_CLIENT_SECRET"),
            seatgeek_client_id: env_string("SEATGEEK_CLIENT_ID"),
            seatgeek_client_secret: env_string("SEATGEEK_CLIENT_SECRET"),
            apify_token: env_string("APIFY_TOKEN"),
            telegram_bot_token: env_string("TELEGRAM_BOT_TOKEN"),
            twilio_account_sid: env_string("TWILIO_ACCOUNT_SID"),
            twilio_auth_token: env_string("TWILIO_AUTH_TOKEN"),
            twilio_from_number: env_string("TWILIO_FROM_NUMBER"),
            monitored_cities: env_string("MONITORED_CITIES")
                .map(|v| v.split(',').map(|c| c.trim().to_lowercase()).filter(|c| !c.is_empty()).collect())
                .unwrap_or_default(),
            city_state_map: load_city_state_map(),
            high_priority_interval: Duration::from_secs(env_u64("HIGH_PRIORITY_INTERVAL_SECS", defaults.high_priority_interval.as_secs())),
            medium_priority_interval: Duration::from_secs(env_u64("MEDIUM_PRIORITY_INTERVAL_SECS", defaults.medium_priority_interval.as_secs())),
            low_priority_interval: Duration::from_secs(env_u64("LOW_PRIORITY_INTERVAL_SECS", defaults.low_priority_interval.as_secs())),
            discovery_interval: Duration::from_secs(env_u64("DISCOVERY_INTERVAL_SECS", defaults.discovery_interval.as_secs())),
            alert_score_threshold: env_u64("ALERT_SCORE_THRESHOLD", defaults.alert_score_threshold as u64) as u8,
            max_events_per_cycle: env_u64("MAX_EVENTS_PER_CYCLE", defaults.max_events_per_cycle as u64) as usize,
            alert_cooldown: Duration::from_secs(env_u64("ALERT_COOLDOWN_SECS", defaults.alert_cooldown.as_secs())),
            top_n_per_event: env_u64("TOP_N_PER_EVENT", defaults.top_n_per_event as u64) as usize,
            log_level: env_string("LOG_LEVEL").unwrap_or(defaults.log_level),
            store_url: env_string("STORE_URL").unwrap_or(defaults.store_url),
        };

        registry.validate()?;
        Ok(registry)
    }

    /// §10.4/§6: the adapters whose credentials are present, by platform
    /// identifier understood by `AdapterRegistry`.
    pub fn configured_adapters(&self) -> Vec<&'static str> {
        let mut configured = Vec::new();
        if self.ticketmaster_api_key.is_some() {
            configured.push("ticketmaster");
        }
        if self.stubhub_client_id.is_some() && self.stubhub_client_secret.is_some() {
            configured.push("stubhub");
        }
        if self.seatgeek_client_id.is_some() && self.seatgeek_client_secret.is_some() {
            configured.push("seatgeek");
        }
        configured
    }

    fn configured_notifiers(&self) -> Vec<&'static str> {
        let mut configured = Vec::new();
        if self.telegram_bot_token.is_some() {
            configured.push("telegram");
        }
        if self.twilio_account_sid.is_some() && self.twilio_auth_token.is_some() {
            configured.push("sms");
        }
        configured
    }

    /// §6 hard-failure rule: zero adapters is a startup error. Zero
    /// notifiers is allowed (discovery-only deployments are valid) but
    /// should be `warn!`-logged by the caller.
    pub fn validate(&self) -> Result<(), String> {
        if self.configured_adapters().is_empty() {
            return Err("no marketplace adapter has credentials configured".to_string());
        }
        if self.alert_score_threshold > 100 {
            return Err(format!("alert_score_threshold {} out of range 0-100", self.alert_score_threshold));
        }
        if self.max_events_per_cycle == 0 {
            return Err("max_events_per_cycle must be at least 1".to_string());
        }
        Ok(())
    }

    pub fn has_no_notifiers(&self) -> bool {
        self.configured_notifiers().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_fails_validation_with_no_credentials() {
        let config = ConfigRegistry::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validation_passes_once_an_adapter_is_configured() {
        let mut config = ConfigRegistry::default();
        config.ticketmaster_api_key = Some("key".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn notifiers_absent_is_not_a_validation_error() {
        let mut config = ConfigRegistry::default();
        config.ticketmaster_api_key = Some("key".to_string());
        assert!(config.validate().is_ok());
        assert!(config.has_no_notifiers());
    }

    #[test]
    fn out_of_range_threshold_is_rejected() {
        let mut config = ConfigRegistry::default();
        config.ticketmaster_api_key = Some("key".to_string());
        config.alert_score_threshold = 150;
        assert!(config.validate().is_err());
    }

    #[test]
    fn city_state_map_loads_from_the_toml_file_named_by_env() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("cities.toml");
        std::fs::write(&file_path, "Portland = \"OR\"\nAustin = \"TX\"\n").unwrap();

        std::env::set_var("CITY_STATE_MAP_FILE", file_path.to_str().unwrap());
        let map = load_city_state_map();
        std::env::remove_var("CITY_STATE_MAP_FILE");

        assert_eq!(map.get("Portland").map(String::as_str), Some("OR"));
        assert_eq!(map.get("Austin").map(String::as_str), Some("TX"));
    }

    #[test]
    fn missing_env_var_yields_an_empty_map() {
        std::env::remove_var("CITY_STATE_MAP_FILE");
        assert!(load_city_state_map().is_empty());
    }
}
