//! AVTransport control commands.
//!
//! Direct actions (play, pause, stop, next, previous, set source) return the
//! device's verdict to the caller. Queries never fail: a "don't know" answer
//! is an empty result. The orchestration helpers at the bottom of the module
//! swallow and log every fault.

use reqwest::Client;

use crate::protocol_constants::{DEFAULT_SOURCE_TITLE, FALLBACK_TITLE, PLAY_SPEED};
use crate::upnp::didl::{build_descriptor, infer_mime_type};
use crate::upnp::fault::describe_fault_code;
use crate::upnp::services::UpnpService;
use crate::upnp::soap::{SoapRequestBuilder, SoapResult};
use crate::upnp::traits::AvTransportControl;
use crate::upnp::types::{DeviceEndpoint, MediaInfo, SourceDescriptor, TransportInfo, TransportState};
use crate::upnp::utils::{extract_xml_text, extract_xml_text_decoded};

// ─────────────────────────────────────────────────────────────────────────────
// Transport Actions
// ─────────────────────────────────────────────────────────────────────────────

/// Sends an argument-less AVTransport action (only `InstanceID`).
async fn send_simple_action(
    client: &Client,
    endpoint: &DeviceEndpoint,
    action: &str,
) -> SoapResult<()> {
    SoapRequestBuilder::new(client, endpoint)
        .service(UpnpService::AVTransport)
        .action(action)
        .instance_id()
        .send()
        .await?;
    Ok(())
}

/// Starts (or resumes) playback of whatever the device has loaded.
///
/// # Arguments
/// * `client` - The HTTP client to use for the request
/// * `endpoint` - The receiver to command
pub async fn play(client: &Client, endpoint: &DeviceEndpoint) -> SoapResult<()> {
    log::debug!("[AVT] Play");
    SoapRequestBuilder::new(client, endpoint)
        .service(UpnpService::AVTransport)
        .action("Play")
        .instance_id()
        .arg("Speed", PLAY_SPEED)
        .send()
        .await?;
    Ok(())
}

pub async fn pause(client: &Client, endpoint: &DeviceEndpoint) -> SoapResult<()> {
    log::debug!("[AVT] Pause");
    send_simple_action(client, endpoint, "Pause").await
}

pub async fn stop(client: &Client, endpoint: &DeviceEndpoint) -> SoapResult<()> {
    log::debug!("[AVT] Stop");
    send_simple_action(client, endpoint, "Stop").await
}

pub async fn next(client: &Client, endpoint: &DeviceEndpoint) -> SoapResult<()> {
    log::debug!("[AVT] Next");
    send_simple_action(client, endpoint, "Next").await
}

pub async fn previous(client: &Client, endpoint: &DeviceEndpoint) -> SoapResult<()> {
    log::debug!("[AVT] Previous");
    send_simple_action(client, endpoint, "Previous").await
}

/// Loads a stream URI on the device without starting playback.
///
/// The URI is sent alongside a DIDL-Lite descriptor; strict renderers reject
/// a bare URI.
///
/// # Arguments
/// * `client` - The HTTP client to use for the request
/// * `endpoint` - The receiver to command
/// * `uri` - The stream URL
/// * `title` - Display title placed in the descriptor
/// * `mime` - MIME type announced in the descriptor's protocol info
pub async fn set_av_transport_uri(
    client: &Client,
    endpoint: &DeviceEndpoint,
    uri: &str,
    title: &str,
    mime: &str,
) -> SoapResult<()> {
    let metadata = build_descriptor(uri, title, mime);

    log::info!(
        "[AVT] SetAVTransportURI: uri={}, mime={}, title={:?}",
        uri,
        mime,
        title
    );

    SoapRequestBuilder::new(client, endpoint)
        .service(UpnpService::AVTransport)
        .action("SetAVTransportURI")
        .instance_id()
        .arg("CurrentURI", uri)
        .raw_arg("CurrentURIMetaData", metadata)
        .send()
        .await?;
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Queries
// ─────────────────────────────────────────────────────────────────────────────

/// Parses a `GetTransportInfo` response body.
pub(crate) fn parse_transport_info(body: &str) -> TransportInfo {
    let state = extract_xml_text(body, "CurrentTransportState")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .map(|s| TransportState::from_upnp(&s));
    TransportInfo { state }
}

/// Parses a `GetMediaInfo` response body.
///
/// `CurrentURI` is entity-decoded; `CurrentURIMetaData` is kept raw.
pub(crate) fn parse_media_info(body: &str) -> MediaInfo {
    MediaInfo {
        current_uri: extract_xml_text_decoded(body, "CurrentURI"),
        current_metadata: extract_xml_text(body, "CurrentURIMetaData"),
    }
}

/// Queries the current transport state.
///
/// Returns an empty [`TransportInfo`] if the request fails or the response
/// carries no state.
pub async fn get_transport_info(client: &Client, endpoint: &DeviceEndpoint) -> TransportInfo {
    let result = SoapRequestBuilder::new(client, endpoint)
        .service(UpnpService::AVTransport)
        .action("GetTransportInfo")
        .instance_id()
        .send()
        .await;

    match result {
        Ok(body) => parse_transport_info(&body),
        Err(e) => {
            log::debug!("[AVT] GetTransportInfo failed, reporting unknown: {}", e);
            TransportInfo::default()
        }
    }
}

/// Queries what the device has loaded.
///
/// Returns an empty [`MediaInfo`] if the request fails.
pub async fn get_media_info(client: &Client, endpoint: &DeviceEndpoint) -> MediaInfo {
    let result = SoapRequestBuilder::new(client, endpoint)
        .service(UpnpService::AVTransport)
        .action("GetMediaInfo")
        .instance_id()
        .send()
        .await;

    match result {
        Ok(body) => parse_media_info(&body),
        Err(e) => {
            log::debug!("[AVT] GetMediaInfo failed, reporting nothing loaded: {}", e);
            MediaInfo::default()
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Orchestration
// ─────────────────────────────────────────────────────────────────────────────

/// What [`toggle_play_pause`] ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The device reported no current URI; nothing was sent.
    NothingLoaded,
    /// The device was playing and a Pause was sent.
    Paused,
    /// The device was not playing and a Play was sent.
    Played,
    /// The Play/Pause action itself failed (logged).
    Failed,
}

/// Query-then-act play/pause toggle.
///
/// Checks the loaded media first (no URI means nothing to toggle), then the
/// transport state, and sends Pause when PLAYING or TRANSITIONING, Play
/// otherwise. Faults are logged, never returned.
pub async fn toggle_play_pause(transport: &dyn AvTransportControl) -> ToggleOutcome {
    let media = transport.media_info().await;
    if !media.has_media() {
        log::debug!("[AVT] PlayPause: no current URI, nothing to toggle");
        return ToggleOutcome::NothingLoaded;
    }

    let info = transport.transport_info().await;
    let (result, outcome) = if info.is_active() {
        (transport.pause().await, ToggleOutcome::Paused)
    } else {
        (transport.play().await, ToggleOutcome::Played)
    };

    match result {
        Ok(()) => {
            log::debug!("[AVT] PlayPause: state={:?} -> {:?}", info.state, outcome);
            outcome
        }
        Err(e) => {
            match e.upnp_error_code() {
                Some(code) => log::warn!(
                    "[AVT] PlayPause failed with UPnP error {} ({})",
                    code,
                    describe_fault_code(code)
                ),
                None => log::warn!("[AVT] PlayPause failed: {}", e),
            }
            ToggleOutcome::Failed
        }
    }
}

/// Title announced for a stream: the given name, else `fallback`, else "Stream".
#[must_use]
pub fn descriptor_title<'a>(name: &'a str, fallback: &'a str) -> &'a str {
    [name, fallback]
        .into_iter()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or(FALLBACK_TITLE)
}

/// Loads the initial stream, if one is configured.
///
/// `default_uri` wins (titled "Default", MIME inferred); otherwise the first
/// configured source is used; otherwise nothing happens. Failures are logged
/// at warn and never returned.
///
/// # Returns
/// `true` if a SetAVTransportURI was sent and accepted.
pub async fn set_default_source_if_configured(
    transport: &dyn AvTransportControl,
    default_uri: Option<&str>,
    sources: &[SourceDescriptor],
    fallback_title: &str,
) -> bool {
    let target = match default_uri.map(str::trim).filter(|u| !u.is_empty()) {
        Some(uri) => Some((
            uri.to_string(),
            DEFAULT_SOURCE_TITLE.to_string(),
            infer_mime_type(uri, None),
        )),
        None => sources.first().filter(|s| !s.uri.is_empty()).map(|s| {
            (
                s.uri.clone(),
                descriptor_title(&s.name, fallback_title).to_string(),
                s.mime_type(),
            )
        }),
    };

    let Some((uri, title, mime)) = target else {
        log::debug!("[AVT] No default URI or sources configured; skipping SetAVTransportURI");
        return false;
    };

    log::debug!("[AVT] Setting default transport URI: {}", uri);
    match transport.set_source(&uri, &title, &mime).await {
        Ok(()) => true,
        Err(e) => {
            log::warn!("[AVT] Failed to set default URI: {}", e);
            false
        }
    }
}
