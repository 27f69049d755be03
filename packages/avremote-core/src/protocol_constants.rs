//! Fixed protocol constants that should NOT be changed.
//!
//! These values come from UPnP AV, SOAP 1.1 and DIDL-Lite or from the
//! receivers this crate talks to. Changing them breaks protocol compliance.

// ─────────────────────────────────────────────────────────────────────────────
// Device Defaults
// ─────────────────────────────────────────────────────────────────────────────

/// Default UPnP control port of the receiver.
pub const DEFAULT_DEVICE_PORT: u16 = 8080;

/// Default per-call timeout for SOAP requests (milliseconds).
///
/// 5 seconds is generous for LAN round trips to low-power renderers.
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Volume reported before any set has been confirmed by the device.
pub const DEFAULT_CACHED_VOLUME: u8 = 25;

/// Upper bound of the absolute volume scale exposed to hosts.
pub const MAX_VOLUME: u8 = 100;

// ─────────────────────────────────────────────────────────────────────────────
// UPnP Action Arguments
// ─────────────────────────────────────────────────────────────────────────────

/// AVTransport/RenderingControl instance addressed by every action.
pub const INSTANCE_ID: &str = "0";

/// RenderingControl channel for volume and mute.
pub const MASTER_CHANNEL: &str = "Master";

/// Playback speed sent with `Play`.
pub const PLAY_SPEED: &str = "1";

// ─────────────────────────────────────────────────────────────────────────────
// SOAP
// ─────────────────────────────────────────────────────────────────────────────

/// SOAP 1.1 envelope namespace.
pub const SOAP_ENVELOPE_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// SOAP 1.1 encoding style required by UPnP control.
pub const SOAP_ENCODING_STYLE: &str = "http://schemas.xmlsoap.org/soap/encoding/";

/// Header carrying the quoted `urn#Action` value.
pub const SOAP_ACTION_HEADER: &str = "SOAPAction";

/// Content type of every SOAP request body.
pub const SOAP_CONTENT_TYPE: &str = "text/xml; charset=\"utf-8\"";

// ─────────────────────────────────────────────────────────────────────────────
// DIDL-Lite
// ─────────────────────────────────────────────────────────────────────────────

/// Default DIDL-Lite namespace.
pub const DIDL_LITE_NS: &str = "urn:schemas-upnp-org:metadata-1-0/DIDL-Lite/";

/// Dublin Core namespace (`dc:title`).
pub const DC_NS: &str = "http://purl.org/dc/elements/1.1/";

/// UPnP metadata namespace (`upnp:class`).
pub const UPNP_METADATA_NS: &str = "urn:schemas-upnp-org:metadata-1-0/upnp/";

/// Item class announced for every stream.
pub const AUDIO_ITEM_CLASS: &str = "object.item.audioItem";

/// MIME type assumed for URIs without a recognized extension.
///
/// Most internet radio streams are MP3 behind an extension-less URL.
pub const FALLBACK_MIME_TYPE: &str = "audio/mpeg";

/// Descriptor title used when neither the source nor the device has a name.
pub const FALLBACK_TITLE: &str = "Stream";

/// Descriptor title used for the configured default stream.
pub const DEFAULT_SOURCE_TITLE: &str = "Default";

// ─────────────────────────────────────────────────────────────────────────────
// Events
// ─────────────────────────────────────────────────────────────────────────────

/// Capacity of the front-end broadcast channel.
pub const EVENT_CHANNEL_CAPACITY: usize = 64;
