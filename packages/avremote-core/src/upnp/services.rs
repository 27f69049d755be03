//! UPnP service definitions.
//!
//! Single source of truth for the service URNs and control paths the
//! receiver exposes. No other services or paths are ever addressed.

use serde::Serialize;

/// UPnP services used for control.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum UpnpService {
    /// Audio/Video transport control (play, pause, stop, source selection).
    AVTransport,
    /// Master volume and mute control.
    RenderingControl,
}

impl UpnpService {
    /// Returns the UPnP service URN for SOAP requests.
    #[must_use]
    pub fn urn(&self) -> &'static str {
        match self {
            Self::AVTransport => "urn:schemas-upnp-org:service:AVTransport:1",
            Self::RenderingControl => "urn:schemas-upnp-org:service:RenderingControl:1",
        }
    }

    /// Returns the UPnP control endpoint path for SOAP requests.
    #[must_use]
    pub fn control_path(&self) -> &'static str {
        match self {
            Self::AVTransport => "/AVTransport/ctrl",
            Self::RenderingControl => "/RenderingControl/ctrl",
        }
    }
}
