//! Configuration for the hardware-key second-factor core.

use anyhow::{Result, anyhow};
use std::time::Duration;

const DEFAULT_CHALLENGE_TTL_SECONDS: u64 = 300;
const DEFAULT_DISALLOWED_PASSWORD_CHARS: &str = "&%";
const ENV_U2F_APP_ID: &str = "FIKEY_APP_ID";
const ENV_U2F_DISALLOWED_PASSWORD_CHARS: &str = "FIKEY_DISALLOWED_PASSWORD_CHARS";
const ENV_U2F_CHALLENGE_TTL_SECONDS: &str = "FIKEY_CHALLENGE_TTL_SECONDS";

/// Settings shared by every protocol operation: the application identity the
/// engine scopes challenges to, the password-policy character blacklist, and
/// the lifetime of a pending challenge.
#[derive(Clone, Debug)]
pub struct U2fConfig {
    app_id: String,
    disallowed_characters: String,
    challenge_ttl: Duration,
}

impl U2fConfig {
    /// Build configuration from environment with safe defaults.
    ///
    /// # Errors
    /// Returns error if the resulting application identity is empty.
    pub fn from_env(app_id: &str) -> Result<Self> {
        let app_id = std::env::var(ENV_U2F_APP_ID)
            .ok()
            .map(|val| val.trim().to_string())
            .filter(|val| !val.is_empty())
            .unwrap_or_else(|| app_id.to_string());

        let disallowed_characters = std::env::var(ENV_U2F_DISALLOWED_PASSWORD_CHARS)
            .ok()
            .map(|val| val.trim().to_string())
            .unwrap_or_else(|| DEFAULT_DISALLOWED_PASSWORD_CHARS.to_string());

        let challenge_ttl = std::env::var(ENV_U2F_CHALLENGE_TTL_SECONDS)
            .ok()
            .and_then(|value| value.trim().parse::<u64>().ok())
            .filter(|value| *value > 0)
            .map_or_else(
                || Duration::from_secs(DEFAULT_CHALLENGE_TTL_SECONDS),
                Duration::from_secs,
            );

        Self::new(app_id, disallowed_characters, challenge_ttl)
    }

    /// Create a new configuration.
    ///
    /// # Errors
    /// Returns error if the application identity is empty.
    pub fn new(app_id: String, disallowed_characters: String, challenge_ttl: Duration) -> Result<Self> {
        if app_id.trim().is_empty() {
            return Err(anyhow!("U2F application identity must not be empty"));
        }

        Ok(Self {
            app_id,
            disallowed_characters,
            challenge_ttl,
        })
    }

    #[must_use]
    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    #[must_use]
    pub fn disallowed_characters(&self) -> &str {
        &self.disallowed_characters
    }

    #[must_use]
    pub fn challenge_ttl(&self) -> Duration {
        self.challenge_ttl
    }
}
