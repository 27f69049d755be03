//! Configuration and cached control state.
//!
//! [`Config`] is the construction input handed over by the host runtime.
//! [`CachedControlState`] is the only mutable state in the crate; it is owned
//! by the control facade and never persisted.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::protocol_constants::{
    DEFAULT_CACHED_VOLUME, DEFAULT_DEVICE_PORT, DEFAULT_TIMEOUT_MS, MAX_VOLUME,
};
use crate::upnp::types::{DeviceEndpoint, SourceDescriptor};

/// Display name used when none is configured.
pub const DEFAULT_DEVICE_NAME: &str = "UPnP Receiver";

// ─────────────────────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// One configured input source.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct SourceConfig {
    /// Display name (also the descriptor title).
    pub name: String,
    /// Stream URI loaded when the source is selected.
    pub uri: String,
    /// Explicit MIME type; inferred from the URI when absent.
    pub mime: Option<String>,
}

/// Configuration for one controlled receiver.
///
/// All fields have sensible defaults.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Display name of the receiver.
    pub name: String,

    // Device
    /// Receiver address. Missing is allowed; every network call then fails
    /// with a configuration fault.
    pub host: Option<String>,

    /// UPnP control port.
    pub port: u16,

    /// Per-call timeout (milliseconds).
    pub timeout_ms: u64,

    // Sources
    /// Ordered input sources; the position is the source index.
    pub sources: Vec<SourceConfig>,

    /// Stream loaded by `init` when set (takes precedence over the first source).
    pub default_uri: Option<String>,

    // Accessory information
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name: DEFAULT_DEVICE_NAME.to_string(),
            host: None,
            port: DEFAULT_DEVICE_PORT,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            sources: Vec::new(),
            default_uri: None,
            manufacturer: None,
            model: None,
            serial_number: None,
        }
    }
}

impl Config {
    /// Derives the immutable device endpoint.
    #[must_use]
    pub fn endpoint(&self) -> DeviceEndpoint {
        DeviceEndpoint::new(
            self.host.clone(),
            self.port,
            Duration::from_millis(self.timeout_ms),
        )
    }

    /// Configured sources with their stable indices.
    #[must_use]
    pub fn source_descriptors(&self) -> Vec<SourceDescriptor> {
        self.sources
            .iter()
            .enumerate()
            .map(|(index, s)| SourceDescriptor {
                index,
                name: s.name.clone(),
                uri: s.uri.clone(),
                mime: s.mime.clone().filter(|m| !m.trim().is_empty()),
            })
            .collect()
    }

    /// Accessory information, with defaults filled in.
    #[must_use]
    pub fn device_info(&self) -> DeviceInfo {
        let defaults = DeviceInfo::default();
        DeviceInfo {
            name: self.name.clone(),
            manufacturer: self.manufacturer.clone().unwrap_or(defaults.manufacturer),
            model: self.model.clone().unwrap_or(defaults.model),
            serial_number: self.serial_number.clone().unwrap_or(defaults.serial_number),
        }
    }

    /// Non-fatal configuration problems, for logging.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        let endpoint = self.endpoint();
        match endpoint.host() {
            None => warnings.push("host not set; configure the receiver address".to_string()),
            Some(host) if endpoint.host_includes_port() => warnings.push(format!(
                "host {:?} includes a port; set `port` separately",
                host
            )),
            Some(_) => {}
        }
        if self.timeout_ms == 0 {
            warnings.push("timeout_ms is 0; every request will time out".to_string());
        }
        for (index, source) in self.sources.iter().enumerate() {
            if source.uri.trim().is_empty() {
                warnings.push(format!(
                    "source {} ({:?}) has an empty uri and cannot be selected",
                    index, source.name
                ));
            }
        }
        warnings
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Accessory Information
// ─────────────────────────────────────────────────────────────────────────────

/// Static identity reported to the host runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    pub name: String,
    pub manufacturer: String,
    pub model: String,
    pub serial_number: String,
}

impl Default for DeviceInfo {
    fn default() -> Self {
        Self {
            name: DEFAULT_DEVICE_NAME.to_string(),
            manufacturer: "Naim Audio".to_string(),
            model: "UnitiQute 2".to_string(),
            serial_number: "Unknown".to_string(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Cached Control State
// ─────────────────────────────────────────────────────────────────────────────

/// Last volume and mute values confirmed by the device.
///
/// Optimistic: updated only after a successful set, never polled back. The
/// volume is always within `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CachedControlState {
    volume: u8,
    pub muted: bool,
}

impl Default for CachedControlState {
    fn default() -> Self {
        Self {
            volume: DEFAULT_CACHED_VOLUME,
            muted: false,
        }
    }
}

impl CachedControlState {
    #[must_use]
    pub fn new(volume: u8, muted: bool) -> Self {
        Self {
            volume: clamp_volume(i64::from(volume)),
            muted,
        }
    }

    #[must_use]
    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn set_volume(&mut self, volume: u8) {
        self.volume = clamp_volume(i64::from(volume));
    }
}

/// Clamps any requested level onto the `0..=100` scale.
#[must_use]
pub fn clamp_volume(level: i64) -> u8 {
    // Lossless: the value is within 0..=100 after clamping
    level.clamp(0, i64::from(MAX_VOLUME)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::default();
        assert_eq!(config.name, "UPnP Receiver");
        assert_eq!(config.port, 8080);
        assert_eq!(config.timeout_ms, 5000);
        assert!(config.sources.is_empty());
        assert!(config.default_uri.is_none());

        let cached = CachedControlState::default();
        assert_eq!(cached.volume(), 25);
        assert!(!cached.muted);
    }

    #[test]
    fn partial_config_deserializes_with_defaults() {
        let config: Config = serde_json::from_str(
            r#"{"host":"10.0.0.5","sources":[{"name":"Radio","uri":"http://stream/x.mp3"},{"name":"Spotify","uri":"http://stream/y","mime":"audio/aac"}]}"#,
        )
        .unwrap();

        assert_eq!(config.port, 8080);
        let sources = config.source_descriptors();
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].index, 0);
        assert_eq!(sources[1].index, 1);
        assert_eq!(sources[1].mime.as_deref(), Some("audio/aac"));
        assert_eq!(
            config.endpoint().base_url().unwrap(),
            "http://10.0.0.5:8080"
        );
    }

    #[test]
    fn validate_warns_without_failing() {
        let mut config = Config::default();
        config.sources.push(SourceConfig {
            name: "Broken".into(),
            uri: " ".into(),
            mime: None,
        });
        let warnings = config.validate();
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("host"));

        config.host = Some("10.0.0.5".into());
        config.sources.clear();
        assert!(config.validate().is_empty());
    }

    #[test]
    fn host_with_port_is_flagged() {
        let config = Config {
            host: Some("10.0.0.5:8080".into()),
            ..Config::default()
        };
        let warnings = config.validate();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("includes a port"));
    }

    #[test]
    fn device_info_overrides() {
        let config = Config {
            model: Some("NDX".into()),
            ..Config::default()
        };
        let info = config.device_info();
        assert_eq!(info.manufacturer, "Naim Audio");
        assert_eq!(info.model, "NDX");
        assert_eq!(info.serial_number, "Unknown");
    }

    #[test]
    fn volume_is_clamped() {
        assert_eq!(clamp_volume(-5), 0);
        assert_eq!(clamp_volume(57), 57);
        assert_eq!(clamp_volume(250), 100);

        let mut cached = CachedControlState::new(200, true);
        assert_eq!(cached.volume(), 100);
        cached.set_volume(130);
        assert_eq!(cached.volume(), 100);
    }
}
