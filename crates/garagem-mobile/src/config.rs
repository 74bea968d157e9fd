//! Runtime configuration handling for mobile.
//!
//! Endpoint overrides typed into the settings UI are persisted to a small
//! JSON file; environment variables remain the fallback for provisioned
//! builds.
#![cfg_attr(not(target_os = "android"), allow(dead_code))]

use std::path::{Path, PathBuf};

use garagem_core::config::ClientConfig;
use garagem_core::Result;

const RUNTIME_CONFIG_FILE: &str = "mobile-config.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    RuntimeSettings,
    EnvironmentFallback,
    None,
}

#[derive(Debug, Clone)]
pub struct ResolvedClientConfig {
    pub config: ClientConfig,
    pub source: ConfigSource,
}

pub fn default_runtime_config_path() -> PathBuf {
    dirs::data_local_dir()
        .or_else(dirs::data_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("garagem")
        .join(RUNTIME_CONFIG_FILE)
}

pub fn load_runtime_config() -> ClientConfig {
    load_runtime_config_from_path(&default_runtime_config_path())
}

pub fn load_runtime_config_from_path(path: &Path) -> ClientConfig {
    if !path.exists() {
        return ClientConfig::default();
    }

    match std::fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<ClientConfig>(&content) {
            Ok(config) => config,
            Err(error) => {
                tracing::warn!(
                    "Failed to parse mobile runtime config at {}: {}",
                    path.display(),
                    error
                );
                ClientConfig::default()
            }
        },
        Err(error) => {
            tracing::warn!(
                "Failed to read mobile runtime config at {}: {}",
                path.display(),
                error
            );
            ClientConfig::default()
        }
    }
}

pub fn save_runtime_config(config: &ClientConfig) -> Result<()> {
    save_runtime_config_to_path(config, &default_runtime_config_path())
}

pub fn save_runtime_config_to_path(config: &ClientConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let normalized =
        ClientConfig::from_raw(config.api_base_url.clone(), config.auth_base_url.clone());
    let content = serde_json::to_string_pretty(&normalized)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Resolve the effective endpoints: runtime settings win over environment.
pub fn resolve_client_config() -> ResolvedClientConfig {
    let runtime_config = load_runtime_config();
    if runtime_config.api_base_url.is_some() {
        return ResolvedClientConfig {
            config: runtime_config,
            source: ConfigSource::RuntimeSettings,
        };
    }

    let env_config = ClientConfig::from_env();
    if env_config.api_base_url.is_some() || env_config.auth_base_url.is_some() {
        return ResolvedClientConfig {
            config: env_config,
            source: ConfigSource::EnvironmentFallback,
        };
    }

    ResolvedClientConfig {
        config: ClientConfig::default(),
        source: ConfigSource::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_means_default_config() {
        let path = std::env::temp_dir().join("garagem-config-does-not-exist.json");
        assert_eq!(load_runtime_config_from_path(&path), ClientConfig::default());
    }

    #[test]
    fn corrupt_file_falls_back_to_default() {
        let test_dir = std::env::temp_dir().join(format!(
            "garagem-mobile-config-corrupt-{}",
            chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
        ));
        std::fs::create_dir_all(&test_dir).unwrap();
        let config_path = test_dir.join(RUNTIME_CONFIG_FILE);
        std::fs::write(&config_path, "{ not json").unwrap();

        assert_eq!(
            load_runtime_config_from_path(&config_path),
            ClientConfig::default()
        );

        let _ = std::fs::remove_dir_all(test_dir);
    }

    #[test]
    fn save_and_load_runtime_config_roundtrip() {
        let test_dir = std::env::temp_dir().join(format!(
            "garagem-mobile-config-test-{}",
            chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
        ));
        let config_path = test_dir.join(RUNTIME_CONFIG_FILE);

        let config = ClientConfig::from_raw(
            Some(" https://api.garagem.example ".to_string()),
            Some(" https://auth.garagem.example ".to_string()),
        );
        save_runtime_config_to_path(&config, &config_path).unwrap();

        let loaded = load_runtime_config_from_path(&config_path);
        assert_eq!(
            loaded.api_base_url.as_deref(),
            Some("https://api.garagem.example")
        );
        assert_eq!(
            loaded.auth_base_url.as_deref(),
            Some("https://auth.garagem.example")
        );

        let _ = std::fs::remove_file(config_path);
        let _ = std::fs::remove_dir_all(test_dir);
    }
}
