use super::config::ConfigRegistry;
use seatsniper_types::encryption::SecureCredentialStore;

/// §10.4: wraps the shared `SecureCredentialStore` so the configuration
/// registry's plaintext env-sourced secrets are only ever held in memory
/// as `EncryptedValue`s after this point, with the plaintext `String`s
/// scrubbed on drop.
pub fn seal_credentials(config: &ConfigRegistry) -> Result<SecureCredentialStore, anyhow::Error> {
    let mut store = SecureCredentialStore::new()?;
    if let Some(key) = &config.ticketmaster_api_key {
        store.store_api_key("ticketmaster", key)?;
    }
    if let Some(key) = &config.stubhub_client_secret {
        store.store_api_key("stubhub", key)?;
    }
    if let Some(key) = &config.seatgeek_client_secret {
        store.store_api_key("seatgeek", key)?;
    }
    if let Some(token) = &config.telegram_bot_token {
        store.store_api_key("telegram", token)?;
    }
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seals_only_configured_credentials() {
        let mut config = ConfigRegistry::default();
        config.ticketmaster_api_key = Some("secret-key".to_string());
        let store = seal_credentials(&config).unwrap();
        assert!(store.get_api_key("ticketmaster").is_ok());
        assert!(store.get_api_key("stubhub").is_err());
    }
}
