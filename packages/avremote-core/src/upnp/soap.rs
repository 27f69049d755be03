//! Low-level SOAP protocol implementation for UPnP communication.
//!
//! This module handles SOAP envelope building, the HTTP transport and the
//! classification of failures. It never retries: callers decide what a
//! failure means. For the action surface, see `playback.rs` and `volume.rs`.

use std::time::Instant;

use reqwest::header::{CONNECTION, CONTENT_TYPE};
use reqwest::Client;
use thiserror::Error;

use super::fault::extract_fault_code;
use super::services::UpnpService;
use super::types::DeviceEndpoint;
use super::utils::escape_xml;
use crate::protocol_constants::{
    INSTANCE_ID, SOAP_ACTION_HEADER, SOAP_CONTENT_TYPE, SOAP_ENCODING_STYLE, SOAP_ENVELOPE_NS,
};

// ─────────────────────────────────────────────────────────────────────────────
// Error Types
// ─────────────────────────────────────────────────────────────────────────────

/// Errors that can occur during SOAP operations with the receiver.
#[derive(Debug, Error)]
pub enum SoapError {
    /// No device address was configured.
    #[error("device address is not configured")]
    NotConfigured,

    /// The request never produced a response (refused, DNS, timeout).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The device answered with a non-2xx status. The body is kept verbatim;
    /// for UPnP faults it is a SOAP fault document.
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },
}

/// Convenient Result alias for SOAP operations.
pub type SoapResult<T> = Result<T, SoapError>;

/// Coarse classification of a [`SoapError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    /// Missing device address.
    Configuration,
    /// Connection refused, DNS failure or timeout.
    Network,
    /// Non-2xx status without a UPnP error code.
    Http(u16),
    /// Non-2xx status whose body carries a UPnP error code.
    Upnp(u32),
}

impl SoapError {
    /// Raw response body of an HTTP fault.
    #[must_use]
    pub fn fault_payload(&self) -> Option<&str> {
        match self {
            SoapError::HttpStatus { body, .. } => Some(body),
            _ => None,
        }
    }

    /// UPnP error code carried by the fault body, if any.
    #[must_use]
    pub fn upnp_error_code(&self) -> Option<u32> {
        self.fault_payload().and_then(extract_fault_code)
    }

    #[must_use]
    pub fn kind(&self) -> FaultKind {
        match self {
            SoapError::NotConfigured => FaultKind::Configuration,
            SoapError::Http(_) => FaultKind::Network,
            SoapError::HttpStatus { status, .. } => match self.upnp_error_code() {
                Some(code) => FaultKind::Upnp(code),
                None => FaultKind::Http(*status),
            },
        }
    }

    /// Returns true if the request timed out.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, SoapError::Http(e) if e.is_timeout())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// HTTP Client
// ─────────────────────────────────────────────────────────────────────────────

/// Builds the HTTP client used for all control requests.
///
/// Idle connections are never pooled: every call is an independent request
/// and the connection is closed afterwards. Embedded renderer network stacks
/// tend to drop idle sockets without notice.
///
/// # Errors
/// Returns the underlying reqwest error if the TLS/HTTP backend cannot be initialized.
pub fn build_http_client() -> reqwest::Result<Client> {
    Client::builder()
        .pool_max_idle_per_host(0)
        .http1_title_case_headers()
        .build()
}

// ─────────────────────────────────────────────────────────────────────────────
// SOAP Request/Response
// ─────────────────────────────────────────────────────────────────────────────

/// Wraps an argument fragment in a SOAP 1.1 envelope.
///
/// The envelope is a single line with no whitespace before the root element;
/// some embedded SOAP parsers reject anything else.
pub(crate) fn build_envelope(service_urn: &str, action: &str, args_xml: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?><s:Envelope xmlns:s="{}" s:encodingStyle="{}"><s:Body><u:{} xmlns:u="{}">{}</u:{}></s:Body></s:Envelope>"#,
        SOAP_ENVELOPE_NS, SOAP_ENCODING_STYLE, action, service_urn, args_xml, action
    )
}

/// Sends a SOAP request to the receiver.
///
/// This is the core transport function for all UPnP SOAP operations.
///
/// The SOAPAction value is quoted (`"urn#Action"`) and sent once. Header
/// names are case-insensitive and normalized by the HTTP stack, so the
/// title-case writer puts it on the wire as `Soapaction`.
///
/// # Arguments
/// * `client` - The HTTP client to use for the request
/// * `endpoint` - Device address and per-call timeout
/// * `path` - The control URL path (e.g., "/AVTransport/ctrl")
/// * `service_urn` - The UPnP service URN
/// * `action` - The SOAP action name (e.g., "Play")
/// * `args_xml` - Pre-rendered argument elements placed inside the action element
///
/// # Returns
/// The response body on 2xx, otherwise a `SoapError`.
pub async fn send_soap_request(
    client: &Client,
    endpoint: &DeviceEndpoint,
    path: &str,
    service_urn: &str,
    action: &str,
    args_xml: &str,
) -> SoapResult<String> {
    let url = endpoint.control_url(path)?;
    let body = build_envelope(service_urn, action, args_xml);
    let soap_action = format!("\"{}#{}\"", service_urn, action);

    log::debug!("[SOAP] {} -> {} (body: {} bytes)", action, url, body.len());
    log::trace!("[SOAP] Request body: {}", body);

    let start = Instant::now();
    let res = client
        .post(&url)
        .header(CONTENT_TYPE, SOAP_CONTENT_TYPE)
        .header(SOAP_ACTION_HEADER, soap_action.as_str())
        .header(CONNECTION, "close")
        .body(body)
        .timeout(endpoint.timeout())
        .send()
        .await;

    log::debug!(
        "[SOAP] {} completed in {:?}: {:?}",
        action,
        start.elapsed(),
        res.as_ref().map(|r| r.status())
    );

    let res = res?;
    let status = res.status();
    let response_text = res.text().await?;

    if !status.is_success() {
        return Err(SoapError::HttpStatus {
            status: status.as_u16(),
            body: response_text,
        });
    }

    Ok(response_text)
}

// ─────────────────────────────────────────────────────────────────────────────
// SOAP Request Builder
// ─────────────────────────────────────────────────────────────────────────────

/// Builder for constructing and sending SOAP requests to the receiver.
///
/// # Example
/// ```ignore
/// let response = SoapRequestBuilder::new(&client, &endpoint)
///     .service(UpnpService::AVTransport)
///     .action("Play")
///     .instance_id()
///     .arg("Speed", "1")
///     .send()
///     .await?;
/// ```
pub struct SoapRequestBuilder<'a> {
    client: &'a Client,
    endpoint: &'a DeviceEndpoint,
    service: UpnpService,
    action: &'a str,
    args: Vec<(&'a str, String)>,
}

impl<'a> SoapRequestBuilder<'a> {
    /// Creates a new SOAP request builder.
    ///
    /// Defaults to the AVTransport service with an empty action; both are
    /// expected to be set before sending.
    #[must_use]
    pub fn new(client: &'a Client, endpoint: &'a DeviceEndpoint) -> Self {
        Self {
            client,
            endpoint,
            service: UpnpService::AVTransport,
            action: "",
            args: Vec::new(),
        }
    }

    #[must_use]
    pub fn service(mut self, service: UpnpService) -> Self {
        self.service = service;
        self
    }

    #[must_use]
    pub fn action(mut self, action: &'a str) -> Self {
        self.action = action;
        self
    }

    /// Adds a text argument. The value is XML-escaped.
    ///
    /// Arguments are included in the SOAP body in the order they are added.
    #[must_use]
    pub fn arg(mut self, key: &'a str, value: impl AsRef<str>) -> Self {
        self.args.push((key, escape_xml(value.as_ref())));
        self
    }

    /// Adds an argument whose value is already escaped XML text.
    ///
    /// Used for `CurrentURIMetaData`, which the descriptor builder escapes itself.
    #[must_use]
    pub fn raw_arg(mut self, key: &'a str, escaped: impl Into<String>) -> Self {
        self.args.push((key, escaped.into()));
        self
    }

    /// Adds the standard `InstanceID=0` argument used by every action.
    #[must_use]
    pub fn instance_id(self) -> Self {
        self.raw_arg("InstanceID", INSTANCE_ID)
    }

    /// Renders the argument elements.
    fn args_xml(&self) -> String {
        self.args
            .iter()
            .map(|(k, v)| format!("<{k}>{v}</{k}>"))
            .collect()
    }

    /// Sends the SOAP request and returns the response body.
    ///
    /// # Errors
    /// Returns `SoapError` if the device is not configured, unreachable, or
    /// answers with a non-success status.
    pub async fn send(self) -> SoapResult<String> {
        let args_xml = self.args_xml();
        send_soap_request(
            self.client,
            self.endpoint,
            self.service.control_path(),
            self.service.urn(),
            self.action,
            &args_xml,
        )
        .await
    }

    /// Returns the request parts without sending (for testing).
    #[cfg(test)]
    pub fn into_parts(self) -> (UpnpService, &'a str, Vec<(&'a str, String)>) {
        (self.service, self.action, self.args)
    }
}
