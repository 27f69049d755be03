//! UPnP fault classification.
//!
//! A receiver that rejects an action answers with HTTP 500 and a SOAP fault
//! whose `detail` carries a `<UPnPError><errorCode>NNN</errorCode>` block.
//! Callers use the numeric code to tell "the device understood and declined"
//! (safe to downgrade) from transport-level failures (must propagate).

use crate::upnp::utils::extract_xml_text;

/// Extracts the numeric UPnP error code from a fault payload.
///
/// Scans for an `<errorCode>` element (tag match is case-insensitive) and
/// parses its content. Returns `None` when the tag is absent or its content
/// is not a number.
#[must_use]
pub fn extract_fault_code(payload: &str) -> Option<u32> {
    extract_xml_text(payload, "errorCode").and_then(|code| code.trim().parse().ok())
}

/// Short description of the well-known AVTransport/RenderingControl codes, for logs.
#[must_use]
pub fn describe_fault_code(code: u32) -> &'static str {
    match code {
        401 => "invalid action",
        402 => "invalid args",
        501 => "action failed",
        701 => "transition not available",
        702 => "no contents",
        704 => "format not supported for playback",
        705 => "transport is locked",
        710 => "seek mode not supported",
        711 => "illegal seek target",
        714 => "illegal MIME-type",
        716 => "resource not found",
        718 => "invalid instance ID",
        _ => "unrecognized UPnP error",
    }
}
