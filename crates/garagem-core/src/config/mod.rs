//! Client configuration for the Garagem front-ends.
//!
//! The backend host is an external collaborator: every front-end resolves a
//! base URL from the environment (or an explicit override) and hands it to
//! the API and auth clients. No endpoint is hardcoded.

use serde::{Deserialize, Serialize};

use crate::util::{normalize_base_url, normalize_text_option};
use crate::{Error, Result};

/// Environment variable naming the car API base URL.
pub const ENV_API_BASE_URL: &str = "GARAGEM_API_BASE_URL";
/// Environment variable naming the auth service base URL.
pub const ENV_AUTH_BASE_URL: &str = "GARAGEM_AUTH_BASE_URL";

/// Endpoints required to bootstrap the client apps.
///
/// These values are safe-to-ship public endpoints; secret credentials never
/// live here.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    #[serde(default)]
    pub api_base_url: Option<String>,
    #[serde(default)]
    pub auth_base_url: Option<String>,
}

impl ClientConfig {
    /// Build a config from raw values, trimming empties away.
    #[must_use]
    pub fn from_raw(api_base_url: Option<String>, auth_base_url: Option<String>) -> Self {
        Self {
            api_base_url: normalize_text_option(api_base_url),
            auth_base_url: normalize_text_option(auth_base_url),
        }
    }

    /// Read the config from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_raw(
            std::env::var(ENV_API_BASE_URL).ok(),
            std::env::var(ENV_AUTH_BASE_URL).ok(),
        )
    }

    /// The car API base URL, validated.
    pub fn require_api_base_url(&self) -> Result<String> {
        let raw = self.api_base_url.as_deref().ok_or_else(|| {
            Error::InvalidInput(format!("{ENV_API_BASE_URL} is not configured"))
        })?;
        normalize_base_url(raw).map_err(Error::InvalidInput)
    }

    /// The auth service base URL, validated.
    pub fn require_auth_base_url(&self) -> Result<String> {
        let raw = self.auth_base_url.as_deref().ok_or_else(|| {
            Error::InvalidInput(format!("{ENV_AUTH_BASE_URL} is not configured"))
        })?;
        normalize_base_url(raw).map_err(Error::InvalidInput)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_drops_blank_values() {
        let config = ClientConfig::from_raw(Some("   ".to_string()), None);
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn require_api_base_url_validates_scheme() {
        let config = ClientConfig::from_raw(Some("api.example.com".to_string()), None);
        assert!(config.require_api_base_url().is_err());

        let config = ClientConfig::from_raw(Some(" https://api.example.com/ ".to_string()), None);
        assert_eq!(
            config.require_api_base_url().unwrap(),
            "https://api.example.com"
        );
    }

    #[test]
    fn missing_values_are_reported_by_name() {
        let config = ClientConfig::default();
        let error = config.require_auth_base_url().unwrap_err();
        assert!(error.to_string().contains(ENV_AUTH_BASE_URL));
    }
}
