use aes_gcm::{
    aead::{Aead, AeadCore, KeyInit, OsRng},
    Aes256Gcm, Key, Nonce,
};
use anyhow::{anyhow, Result};
use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use zeroize::Zeroize;

/// Encrypted-at-rest marketplace credentials (§4.15: API keys, OAuth client
/// secrets and refresh tokens never touch disk or logs in plaintext).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncryptedCredentialStore {
    pub encrypted_api_keys: HashMap<String, EncryptedValue>,
    pub encrypted_oauth_secrets: HashMap<String, EncryptedValue>,
    pub encrypted_refresh_tokens: HashMap<String, EncryptedValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncryptedValue {
    /// Base64 encoded ciphertext
    pub data: String,
    /// Base64 encoded nonce
    pub nonce: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl Zeroize for EncryptedValue {
    fn zeroize(&mut self) {
        self.data.zeroize();
        self.nonce.zeroize();
    }
}

impl Drop for EncryptedValue {
    fn drop(&mut self) {
        self.zeroize();
    }
}

/// Key management and raw encrypt/decrypt operations.
pub struct EncryptionManager {
    cipher: Aes256Gcm,
    key_id: String,
}

impl Drop for EncryptionManager {
    fn drop(&mut self) {
        self.key_id.zeroize();
    }
}

impl EncryptionManager {
    pub fn new() -> Result<Self> {
        let key = Aes256Gcm::generate_key(OsRng);
        let cipher = Aes256Gcm::new(&key);
        let key_id = uuid::Uuid::new_v4().to_string();
        Ok(Self { cipher, key_id })
    }

    pub fn from_key(key_bytes: &[u8], key_id: String) -> Result<Self> {
        if key_bytes.len() != 32 {
            return Err(anyhow!("encryption key must be exactly 32 bytes"));
        }
        let key = Key::<Aes256Gcm>::from_slice(key_bytes);
        let cipher = Aes256Gcm::new(key);
        Ok(Self { cipher, key_id })
    }

    pub fn encrypt_string(&self, plaintext: &str) -> Result<EncryptedValue> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|e| anyhow!("encryption failed: {}", e))?;

        Ok(EncryptedValue {
            data: general_purpose::STANDARD.encode(ciphertext),
            nonce: general_purpose::STANDARD.encode(nonce),
            timestamp: chrono::Utc::now(),
        })
    }

    pub fn decrypt_string(&self, encrypted: &EncryptedValue) -> Result<String> {
        let ciphertext = general_purpose::STANDARD
            .decode(&encrypted.data)
            .map_err(|e| anyhow!("failed to decode ciphertext: {}", e))?;
        let nonce_bytes = general_purpose::STANDARD
            .decode(&encrypted.nonce)
            .map_err(|e| anyhow!("failed to decode nonce: {}", e))?;
        if nonce_bytes.len() != 12 {
            return Err(anyhow!("invalid nonce length"));
        }
        let nonce = Nonce::from_slice(&nonce_bytes);
        let plaintext = self
            .cipher
            .decrypt(nonce, ciphertext.as_slice())
            .map_err(|e| anyhow!("decryption failed: {}", e))?;
        String::from_utf8(plaintext).map_err(|e| anyhow!("invalid utf-8 in decrypted data: {}", e))
    }

    pub fn key_id(&self) -> &str {
        &self.key_id
    }
}

/// Per-adapter credential vault used by the configuration registry (§4.15).
pub struct SecureCredentialStore {
    encryption_manager: EncryptionManager,
    credentials: EncryptedCredentialStore,
}

impl Drop for SecureCredentialStore {
    fn drop(&mut self) {
        for (_, mut v) in self.credentials.encrypted_api_keys.drain() {
            v.zeroize();
        }
        for (_, mut v) in self.credentials.encrypted_oauth_secrets.drain() {
            v.zeroize();
        }
        for (_, mut v) in self.credentials.encrypted_refresh_tokens.drain() {
            v.zeroize();
        }
    }
}

impl SecureCredentialStore {
    pub fn new() -> Result<Self> {
        Ok(Self {
            encryption_manager: EncryptionManager::new()?,
            credentials: EncryptedCredentialStore {
                encrypted_api_keys: HashMap::new(),
                encrypted_oauth_secrets: HashMap::new(),
                encrypted_refresh_tokens: HashMap::new(),
            },
        })
    }

    pub fn store_api_key(&mut self, platform: &str, api_key: &str) -> Result<()> {
        let encrypted = self.encryption_manager.encrypt_string(api_key)?;
        self.credentials
            .encrypted_api_keys
            .insert(platform.to_string(), encrypted);
        Ok(())
    }

    pub fn get_api_key(&self, platform: &str) -> Result<String> {
        let encrypted = self
            .credentials
            .encrypted_api_keys
            .get(platform)
            .ok_or_else(|| anyhow!("no api key stored for platform: {}", platform))?;
        self.encryption_manager.decrypt_string(encrypted)
    }

    pub fn store_oauth_secret(&mut self, platform: &str, client_secret: &str) -> Result<()> {
        let encrypted = self.encryption_manager.encrypt_string(client_secret)?;
        self.credentials
            .encrypted_oauth_secrets
            .insert(platform.to_string(), encrypted);
        Ok(())
    }

    pub fn get_oauth_secret(&self, platform: &str) -> Result<String> {
        let encrypted = self
            .credentials
            .encrypted_oauth_secrets
            .get(platform)
            .ok_or_else(|| anyhow!("no oauth secret stored for platform: {}", platform))?;
        self.encryption_manager.decrypt_string(encrypted)
    }

    pub fn store_refresh_token(&mut self, platform: &str, token: &str) -> Result<()> {
        let encrypted = self.encryption_manager.encrypt_string(token)?;
        self.credentials
            .encrypted_refresh_tokens
            .insert(platform.to_string(), encrypted);
        Ok(())
    }

    pub fn get_refresh_token(&self, platform: &str) -> Result<String> {
        let encrypted = self
            .credentials
            .encrypted_refresh_tokens
            .get(platform)
            .ok_or_else(|| anyhow!("no refresh token stored for platform: {}", platform))?;
        self.encryption_manager.decrypt_string(encrypted)
    }

    pub fn export_encrypted(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.credentials)?)
    }

    pub fn import_encrypted(&mut self, encrypted_data: &str) -> Result<()> {
        self.credentials = serde_json::from_str(encrypted_data)?;
        Ok(())
    }

    /// Flags credentials older than 60 days so operators rotate them before
    /// a marketplace revokes a stale key (§4.15).
    pub fn audit_credential_age(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        let now = chrono::Utc::now();
        let max_age = chrono::Duration::days(60);

        for (platform, value) in &self.credentials.encrypted_api_keys {
            if now - value.timestamp > max_age {
                warnings.push(format!("api key for '{}' is older than 60 days", platform));
            }
        }
        for (platform, value) in &self.credentials.encrypted_refresh_tokens {
            if now - value.timestamp > max_age {
                warnings.push(format!(
                    "refresh token for '{}' is older than 60 days",
                    platform
                ));
            }
        }
        warnings
    }
}

impl Default for SecureCredentialStore {
    fn default() -> Self {
        Self::new().expect("failed to create default SecureCredentialStore")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encryption_round_trip() {
        let manager = EncryptionManager::new().unwrap();
        let plaintext = "sk_live_abc123";
        let encrypted = manager.encrypt_string(plaintext).unwrap();
        let decrypted = manager.decrypt_string(&encrypted).unwrap();
        assert_eq!(plaintext, decrypted);
    }

    #[test]
    fn credential_store_round_trip() {
        let mut store = SecureCredentialStore::new().unwrap();
        store.store_api_key("ticketmaster", "tm_key_123").unwrap();
        assert_eq!(store.get_api_key("ticketmaster").unwrap(), "tm_key_123");

        store
            .store_refresh_token("stubhub", "refresh_456")
            .unwrap();
        assert_eq!(store.get_refresh_token("stubhub").unwrap(), "refresh_456");
    }

    #[test]
    fn missing_credential_is_an_error() {
        let store = SecureCredentialStore::new().unwrap();
        assert!(store.get_api_key("seatgeek").is_err());
    }

    #[test]
    fn export_import_requires_matching_key() {
        let mut store1 = SecureCredentialStore::new().unwrap();
        store1.store_api_key("ticketmaster", "secret123").unwrap();
        let exported = store1.export_encrypted().unwrap();

        let mut store2 = SecureCredentialStore::new().unwrap();
        store2.import_encrypted(&exported).unwrap();

        // Different random key per store, so decrypting imported ciphertext fails.
        assert!(store2.get_api_key("ticketmaster").is_err());
    }

    #[test]
    fn fresh_credentials_produce_no_warnings() {
        let store = SecureCredentialStore::new().unwrap();
        assert!(store.audit_credential_age().is_empty());
    }
}
