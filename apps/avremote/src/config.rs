//! Remote configuration.
//!
//! Supports loading from YAML files with environment variable overrides.

use std::path::Path;

use anyhow::{Context, Result};
use avremote_core::Config;
use serde::Deserialize;

/// Configuration loaded from YAML with environment overrides.
///
/// Receiver settings sit at the top level of the file:
///
/// ```yaml
/// name: Living Room
/// host: 192.168.1.40
/// port: 8080
/// timeout_ms: 5000
/// default_uri: http://radio.example/stream.mp3
/// sources:
///   - name: Radio
///     uri: http://stream/x.mp3
///   - name: Spotify
///     uri: http://stream/y
///     mime: audio/aac
/// init_on_start: true
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Receiver configuration handed to the control surface.
    #[serde(flatten)]
    pub receiver: Config,

    /// Load the default source before entering the interactive shell.
    pub init_on_start: bool,
}

impl RemoteConfig {
    /// Loads configuration from a YAML file, then applies environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = if let Some(path) = path {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            Self::from_yaml(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    fn from_yaml(content: &str) -> Result<Self> {
        // An empty file is a valid, all-default configuration
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Applies environment variable overrides to the configuration.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from `lookup`. Unparsable values are ignored.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(host) = lookup("AVREMOTE_HOST") {
            self.receiver.host = Some(host);
        }

        if let Some(val) = lookup("AVREMOTE_PORT") {
            if let Ok(port) = val.parse() {
                self.receiver.port = port;
            }
        }

        if let Some(val) = lookup("AVREMOTE_TIMEOUT_MS") {
            if let Ok(timeout_ms) = val.parse() {
                self.receiver.timeout_ms = timeout_ms;
            }
        }

        if let Some(uri) = lookup("AVREMOTE_DEFAULT_URI") {
            self.receiver.default_uri = Some(uri);
        }
    }
}
