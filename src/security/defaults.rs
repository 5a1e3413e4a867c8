//! Process-wide secure defaults.
//!
//! # Responsibilities
//! - Build the fetch client, YAML loader and JSON encoder from config
//! - Publish them exactly once per process
//!
//! # Design Decisions
//! - `OnceLock` is the only global; callers hold `&'static SecureDefaults`
//! - A second install is a no-op, never an error
//! - The first configuration wins; a differing later one is logged

use std::sync::OnceLock;

use thiserror::Error;

use crate::config::{AppConfig, FetchConfig, JsonConfig, YamlConfig};
use crate::security::fetch::{FetchClient, FetchError};
use crate::security::json::JsonEncoder;
use crate::security::yaml::YamlLoader;

static INSTALLED: OnceLock<SecureDefaults> = OnceLock::new();

/// Errors raised while building the defaults.
#[derive(Debug, Error)]
pub enum InstallError {
    #[error("failed to build fetch client: {0}")]
    Fetch(#[from] FetchError),
}

/// The configured fetch client, YAML loader and JSON encoder.
#[derive(Debug, Clone)]
pub struct SecureDefaults {
    fetch: FetchClient,
    yaml: YamlLoader,
    json: JsonEncoder,
    // Kept to detect conflicting installs.
    source: (FetchConfig, YamlConfig, JsonConfig),
}

impl SecureDefaults {
    pub fn from_config(config: &AppConfig) -> Result<Self, InstallError> {
        Ok(Self {
            fetch: FetchClient::from_config(&config.fetch)?,
            yaml: YamlLoader::from_config(&config.yaml),
            json: JsonEncoder::from_config(&config.json),
            source: (config.fetch.clone(), config.yaml.clone(), config.json.clone()),
        })
    }

    pub fn fetch(&self) -> &FetchClient {
        &self.fetch
    }

    pub fn yaml(&self) -> &YamlLoader {
        &self.yaml
    }

    pub fn json(&self) -> &JsonEncoder {
        &self.json
    }

    fn built_from(&self, config: &AppConfig) -> bool {
        self.source.0 == config.fetch && self.source.1 == config.yaml && self.source.2 == config.json
    }
}

/// Install the secure defaults for this process.
///
/// Calling this again returns the already installed instance.
pub fn install(config: &AppConfig) -> Result<&'static SecureDefaults, InstallError> {
    if let Some(existing) = INSTALLED.get() {
        note_reinstall(existing, config);
        return Ok(existing);
    }

    let defaults = SecureDefaults::from_config(config)?;
    let mut published = false;
    let installed = INSTALLED.get_or_init(|| {
        published = true;
        defaults
    });

    if published {
        tracing::info!(
            validate_certificate = config.fetch.validate_certificate,
            yaml_safe = !config.yaml.allow_tags,
            json_escape_html = config.json.escape_html,
            "Secure defaults installed"
        );
    } else {
        // Lost a race with a concurrent first install.
        note_reinstall(installed, config);
    }

    Ok(installed)
}

/// The installed defaults, if [`install`] has run.
pub fn installed() -> Option<&'static SecureDefaults> {
    INSTALLED.get()
}

fn note_reinstall(existing: &SecureDefaults, config: &AppConfig) {
    if existing.built_from(config) {
        tracing::debug!("Secure defaults already installed");
    } else {
        tracing::warn!("Secure defaults already installed with a different configuration; keeping the first");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_uses_secure_defaults() {
        let defaults = SecureDefaults::from_config(&AppConfig::default()).unwrap();
        assert!(defaults.yaml().is_safe());
        assert!(defaults.json().escapes_html());
        assert!(defaults
            .fetch()
            .effective_validation(&crate::security::fetch::FetchRequest::get("https://example.com")));
    }

    #[test]
    fn test_built_from_detects_changes() {
        let config = AppConfig::default();
        let defaults = SecureDefaults::from_config(&config).unwrap();
        assert!(defaults.built_from(&config));

        let mut other = config.clone();
        other.json.escape_html = false;
        assert!(!defaults.built_from(&other));

        // Sections unrelated to the defaults are ignored.
        let mut unrelated = config;
        unrelated.csrf.use_sessions = true;
        assert!(defaults.built_from(&unrelated));
    }
}
