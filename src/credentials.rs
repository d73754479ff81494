//! API key holder
//!
//! The generation provider needs an API key. It is resolved from the
//! `CLIPSCRIBE_API_KEY` environment variable first and the OS keyring second,
//! and never lives in the configuration file.

use crate::error::{ClipscribeError, Result};

/// Environment variable that supplies the API key directly
pub const API_KEY_ENV: &str = "CLIPSCRIBE_API_KEY";

/// Something that can hand out the configured API key
pub trait CredentialSource: Send + Sync {
    /// The API key, or `None` when none is configured
    fn api_key(&self) -> Result<Option<String>>;
}

/// Keyring-backed credential store
///
/// # Examples
///
/// ```no_run
/// use clipscribe::credentials::{CredentialSource, KeyringCredentialStore};
///
/// # fn example() -> clipscribe::error::Result<()> {
/// let store = KeyringCredentialStore::new();
/// store.save("  sk-or-v1-abc  ")?;
/// assert_eq!(store.api_key()?.as_deref(), Some("sk-or-v1-abc"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct KeyringCredentialStore {
    keyring_service: String,
    keyring_user: String,
}

impl KeyringCredentialStore {
    /// Store under the default service/user pair
    pub fn new() -> Self {
        Self::with_names("clipscribe", "openrouter")
    }

    /// Store under a custom service/user pair
    pub fn with_names(service: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            keyring_service: service.into(),
            keyring_user: user.into(),
        }
    }

    /// Save a new API key
    ///
    /// Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for a blank key, or a keyring error if
    /// the key cannot be written.
    pub fn save(&self, key: &str) -> Result<()> {
        let key = key.trim();
        if key.is_empty() {
            return Err(ClipscribeError::Config("API key cannot be empty".to_string()).into());
        }

        let entry = keyring::Entry::new(&self.keyring_service, &self.keyring_user)?;
        entry.set_password(key)?;
        tracing::info!("Saved API key to keyring");
        Ok(())
    }

    /// Remove the stored API key; removing an absent key is not an error
    pub fn clear(&self) -> Result<()> {
        let entry = keyring::Entry::new(&self.keyring_service, &self.keyring_user)?;
        match entry.delete_password() {
            Ok(()) | Err(keyring::Error::NoEntry) => {
                tracing::info!("Cleared API key from keyring");
                Ok(())
            }
            Err(e) => Err(ClipscribeError::Keyring(e).into()),
        }
    }

    fn from_keyring(&self) -> Result<Option<String>> {
        let entry = keyring::Entry::new(&self.keyring_service, &self.keyring_user)?;
        match entry.get_password() {
            Ok(key) => Ok(non_blank(key)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(ClipscribeError::Keyring(e).into()),
        }
    }
}

impl Default for KeyringCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialSource for KeyringCredentialStore {
    fn api_key(&self) -> Result<Option<String>> {
        if let Some(key) = std::env::var(API_KEY_ENV).ok().and_then(non_blank) {
            tracing::debug!("Using API key from {}", API_KEY_ENV);
            return Ok(Some(key));
        }
        self.from_keyring()
    }
}

/// Fixed credential, for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct StaticCredential(Option<String>);

impl StaticCredential {
    /// A holder with the given key
    pub fn new(key: impl Into<String>) -> Self {
        Self(non_blank(key.into()))
    }

    /// A holder with no key
    pub fn none() -> Self {
        Self(None)
    }
}

impl CredentialSource for StaticCredential {
    fn api_key(&self) -> Result<Option<String>> {
        Ok(self.0.clone())
    }
}

fn non_blank(key: String) -> Option<String> {
    let trimmed = key.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
