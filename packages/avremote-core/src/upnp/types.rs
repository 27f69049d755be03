//! Domain types for receiver control.

use std::fmt;
use std::net::Ipv6Addr;
use std::time::Duration;

use serde::Serialize;

use crate::upnp::didl::infer_mime_type;
use crate::upnp::soap::{SoapError, SoapResult};

// ─────────────────────────────────────────────────────────────────────────────
// Device Endpoint
// ─────────────────────────────────────────────────────────────────────────────

/// Network location of the receiver plus the per-call timeout.
///
/// Immutable after construction. A missing host is accepted here and only
/// surfaces as [`SoapError::NotConfigured`] when a request is attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceEndpoint {
    host: Option<String>,
    port: u16,
    timeout: Duration,
}

impl DeviceEndpoint {
    /// Creates an endpoint. Blank hosts are treated as missing.
    #[must_use]
    pub fn new(host: Option<String>, port: u16, timeout: Duration) -> Self {
        let host = host
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty());
        Self {
            host,
            port,
            timeout,
        }
    }

    /// The configured host, if any.
    #[must_use]
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// Timeout applied to every request against this endpoint.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Whether the host string carries its own `:port` suffix, which the
    /// URL builder would then duplicate.
    #[must_use]
    pub fn host_includes_port(&self) -> bool {
        self.host.as_deref().is_some_and(|h| {
            if h.starts_with('[') {
                h.contains("]:")
            } else {
                h.contains(':') && h.parse::<Ipv6Addr>().is_err()
            }
        })
    }

    /// Base URL (`http://host:port`) for all control requests.
    ///
    /// # Errors
    /// Returns [`SoapError::NotConfigured`] when no host was supplied.
    pub fn base_url(&self) -> SoapResult<String> {
        let host = self.host.as_deref().ok_or(SoapError::NotConfigured)?;
        // Bare IPv6 literals need brackets in a URL authority
        if host.parse::<Ipv6Addr>().is_ok() {
            Ok(format!("http://[{}]:{}", host, self.port))
        } else {
            Ok(format!("http://{}:{}", host, self.port))
        }
    }

    /// Full URL of a control path (e.g. `/AVTransport/ctrl`).
    ///
    /// # Errors
    /// Returns [`SoapError::NotConfigured`] when no host was supplied.
    pub fn control_url(&self, path: &str) -> SoapResult<String> {
        Ok(format!("{}{}", self.base_url()?, path))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Transport State
// ─────────────────────────────────────────────────────────────────────────────

/// Transport state reported by `GetTransportInfo`.
///
/// Derived on demand and never cached: the device can change state through
/// other control points at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransportState {
    Stopped,
    Playing,
    Paused,
    Transitioning,
    NoMediaPresent,
    Unknown,
}

impl TransportState {
    /// Maps a UPnP `CurrentTransportState` value, case-insensitively.
    ///
    /// Both paused variants collapse to [`TransportState::Paused`]; anything
    /// unrecognized becomes [`TransportState::Unknown`].
    #[must_use]
    pub fn from_upnp(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "STOPPED" => Self::Stopped,
            "PLAYING" => Self::Playing,
            "PAUSED_PLAYBACK" | "PAUSED_RECORDING" | "PAUSED" => Self::Paused,
            "TRANSITIONING" => Self::Transitioning,
            "NO_MEDIA_PRESENT" => Self::NoMediaPresent,
            _ => Self::Unknown,
        }
    }

    /// Whether the receiver should be reported as active (playing).
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Playing | Self::Transitioning)
    }
}

impl fmt::Display for TransportState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Stopped => "STOPPED",
            Self::Playing => "PLAYING",
            Self::Paused => "PAUSED",
            Self::Transitioning => "TRANSITIONING",
            Self::NoMediaPresent => "NO_MEDIA_PRESENT",
            Self::Unknown => "UNKNOWN",
        };
        f.write_str(s)
    }
}

/// Result of `GetTransportInfo`.
///
/// An empty value (`state == None`) means the query failed or the response
/// could not be read; it is never an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TransportInfo {
    pub state: Option<TransportState>,
}

impl TransportInfo {
    /// Whether the reported state is PLAYING or TRANSITIONING.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state.is_some_and(|s| s.is_active())
    }
}

/// Result of `GetMediaInfo`: what the device has loaded.
///
/// `current_uri` is entity-decoded; `current_metadata` is kept as the raw,
/// still-escaped blob the device returned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaInfo {
    pub current_uri: Option<String>,
    pub current_metadata: Option<String>,
}

impl MediaInfo {
    /// Whether the device reports a loaded URI.
    #[must_use]
    pub fn has_media(&self) -> bool {
        self.current_uri.as_deref().is_some_and(|u| !u.is_empty())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Sources
// ─────────────────────────────────────────────────────────────────────────────

/// A selectable input: a named stream URI with a stable index.
///
/// The index is the position in the configured list and doubles as the
/// identifier exposed to hosts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceDescriptor {
    pub index: usize,
    pub name: String,
    pub uri: String,
    pub mime: Option<String>,
}

impl SourceDescriptor {
    /// MIME type announced to the device: the explicit one, or inferred from the URI.
    #[must_use]
    pub fn mime_type(&self) -> String {
        infer_mime_type(&self.uri, self.mime.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint(host: Option<&str>) -> DeviceEndpoint {
        DeviceEndpoint::new(host.map(String::from), 8080, Duration::from_millis(5000))
    }

    #[test]
    fn base_url_uses_host_and_port() {
        let ep = endpoint(Some("10.0.0.5"));
        assert_eq!(ep.base_url().unwrap(), "http://10.0.0.5:8080");
        assert_eq!(
            ep.control_url("/AVTransport/ctrl").unwrap(),
            "http://10.0.0.5:8080/AVTransport/ctrl"
        );
    }

    #[test]
    fn base_url_brackets_ipv6_literals() {
        let ep = endpoint(Some("fe80::1"));
        assert_eq!(ep.base_url().unwrap(), "http://[fe80::1]:8080");
    }

    #[test]
    fn host_with_port_is_not_taken_for_ipv6() {
        let ep = endpoint(Some("10.0.0.5:8080"));
        assert!(ep.host_includes_port());
        assert!(!ep.base_url().unwrap().contains('['));

        assert!(endpoint(Some("[fe80::1]:8080")).host_includes_port());
        assert!(!endpoint(Some("fe80::1")).host_includes_port());
        assert!(!endpoint(Some("[fe80::1]")).host_includes_port());
        assert!(!endpoint(Some("receiver.local")).host_includes_port());
        assert_eq!(
            endpoint(Some("[fe80::1]")).base_url().unwrap(),
            "http://[fe80::1]:8080"
        );
    }

    #[test]
    fn missing_or_blank_host_is_not_configured() {
        for ep in [endpoint(None), endpoint(Some("   "))] {
            assert_eq!(ep.host(), None);
            assert!(matches!(ep.base_url(), Err(SoapError::NotConfigured)));
        }
    }

    #[test]
    fn transport_state_parses_upnp_values() {
        assert_eq!(TransportState::from_upnp("PLAYING"), TransportState::Playing);
        assert_eq!(TransportState::from_upnp(" playing "), TransportState::Playing);
        assert_eq!(
            TransportState::from_upnp("PAUSED_PLAYBACK"),
            TransportState::Paused
        );
        assert_eq!(
            TransportState::from_upnp("NO_MEDIA_PRESENT"),
            TransportState::NoMediaPresent
        );
        assert_eq!(TransportState::from_upnp("RECORDING"), TransportState::Unknown);
    }

    #[test]
    fn only_playing_and_transitioning_are_active() {
        assert!(TransportState::Playing.is_active());
        assert!(TransportState::Transitioning.is_active());
        assert!(!TransportState::Paused.is_active());
        assert!(!TransportState::Stopped.is_active());
        assert!(!TransportInfo::default().is_active());
    }

    #[test]
    fn empty_current_uri_is_no_media() {
        let info = MediaInfo {
            current_uri: Some(String::new()),
            current_metadata: None,
        };
        assert!(!info.has_media());
        assert!(!MediaInfo::default().has_media());
    }
}
