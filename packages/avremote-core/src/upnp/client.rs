//! HTTP-backed receiver client.

use async_trait::async_trait;
use reqwest::Client;

use crate::upnp::playback;
use crate::upnp::soap::{build_http_client, SoapResult};
use crate::upnp::traits::{AvTransportControl, RenderingControl};
use crate::upnp::types::{DeviceEndpoint, MediaInfo, TransportInfo};
use crate::upnp::volume;

// ─────────────────────────────────────────────────────────────────────────────
// Trait Implementation
// ─────────────────────────────────────────────────────────────────────────────

/// Concrete implementation of the receiver traits.
///
/// Binds an HTTP client to one [`DeviceEndpoint`] and forwards to the free
/// functions in `playback` and `volume`.
#[derive(Clone)]
pub struct RendererClientImpl {
    client: Client,
    endpoint: DeviceEndpoint,
}

impl std::fmt::Debug for RendererClientImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RendererClientImpl")
            .field("client", &"Client")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl RendererClientImpl {
    /// Creates a client with the given HTTP client.
    ///
    /// # Arguments
    /// * `client` - The HTTP client to use for all requests
    /// * `endpoint` - The receiver to talk to
    #[must_use]
    pub fn new(client: Client, endpoint: DeviceEndpoint) -> Self {
        Self { client, endpoint }
    }

    /// Creates a client with a fresh non-pooling HTTP client.
    ///
    /// # Errors
    /// Returns the reqwest error if the HTTP backend cannot be initialized.
    pub fn connect(endpoint: DeviceEndpoint) -> reqwest::Result<Self> {
        Ok(Self::new(build_http_client()?, endpoint))
    }
}

#[async_trait]
impl AvTransportControl for RendererClientImpl {
    async fn play(&self) -> SoapResult<()> {
        playback::play(&self.client, &self.endpoint).await
    }

    async fn pause(&self) -> SoapResult<()> {
        playback::pause(&self.client, &self.endpoint).await
    }

    async fn stop(&self) -> SoapResult<()> {
        playback::stop(&self.client, &self.endpoint).await
    }

    async fn next(&self) -> SoapResult<()> {
        playback::next(&self.client, &self.endpoint).await
    }

    async fn previous(&self) -> SoapResult<()> {
        playback::previous(&self.client, &self.endpoint).await
    }

    async fn set_source(&self, uri: &str, title: &str, mime: &str) -> SoapResult<()> {
        playback::set_av_transport_uri(&self.client, &self.endpoint, uri, title, mime).await
    }

    async fn transport_info(&self) -> TransportInfo {
        playback::get_transport_info(&self.client, &self.endpoint).await
    }

    async fn media_info(&self) -> MediaInfo {
        playback::get_media_info(&self.client, &self.endpoint).await
    }
}

#[async_trait]
impl RenderingControl for RendererClientImpl {
    async fn set_volume(&self, level: u8) -> SoapResult<()> {
        volume::set_volume(&self.client, &self.endpoint, level).await
    }

    async fn set_mute(&self, mute: bool) -> SoapResult<()> {
        volume::set_mute(&self.client, &self.endpoint, mute).await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::upnp::types::TransportState;

    async fn client_for(server: &MockServer, timeout: Duration) -> RendererClientImpl {
        let addr = server.address();
        let ep = DeviceEndpoint::new(Some(addr.ip().to_string()), addr.port(), timeout);
        RendererClientImpl::connect(ep).expect("client")
    }

    fn soap_response(action: &str, inner: &str) -> String {
        format!(
            r#"<?xml version="1.0"?><s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/"><s:Body><u:{action}Response xmlns:u="urn:schemas-upnp-org:service:AVTransport:1">{inner}</u:{action}Response></s:Body></s:Envelope>"#
        )
    }

    /// Mounts a mock that accepts exactly one `action` request whose body
    /// contains `args_xml` as the action element's full content.
    async fn expect_action(server: &MockServer, action: &str, args_xml: &str) {
        let element = format!(
            r#"<u:{action} xmlns:u="urn:schemas-upnp-org:service:AVTransport:1">{args_xml}</u:{action}>"#
        );
        let soap_action = format!("\"urn:schemas-upnp-org:service:AVTransport:1#{action}\"");
        Mock::given(method("POST"))
            .and(path("/AVTransport/ctrl"))
            .and(header("Connection", "close"))
            .and(header("SOAPAction", soap_action.as_str()))
            .and(body_string_contains(element))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn play_sends_speed_one() {
        let server = MockServer::start().await;
        expect_action(
            &server,
            "Play",
            "<InstanceID>0</InstanceID><Speed>1</Speed>",
        )
        .await;

        let rc = client_for(&server, Duration::from_secs(2)).await;
        rc.play().await.unwrap();
    }

    #[tokio::test]
    async fn argument_less_actions_send_only_instance_id() {
        let server = MockServer::start().await;
        for action in ["Pause", "Stop", "Next", "Previous"] {
            expect_action(&server, action, "<InstanceID>0</InstanceID>").await;
        }

        let rc = client_for(&server, Duration::from_secs(2)).await;
        rc.pause().await.unwrap();
        rc.stop().await.unwrap();
        rc.next().await.unwrap();
        rc.previous().await.unwrap();
    }

    #[tokio::test]
    async fn transport_info_reads_state_from_device() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/AVTransport/ctrl"))
            .and(body_string_contains("<u:GetTransportInfo "))
            .respond_with(ResponseTemplate::new(200).set_body_string(soap_response(
                "GetTransportInfo",
                "<CurrentTransportState>PLAYING</CurrentTransportState>",
            )))
            .expect(1)
            .mount(&server)
            .await;

        let rc = client_for(&server, Duration::from_secs(2)).await;
        assert_eq!(rc.transport_info().await.state, Some(TransportState::Playing));
    }

    #[tokio::test]
    async fn queries_degrade_to_empty_on_http_fault() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("<errorCode>718</errorCode>"))
            .mount(&server)
            .await;

        let rc = client_for(&server, Duration::from_secs(2)).await;
        assert_eq!(rc.transport_info().await, TransportInfo::default());
        assert_eq!(rc.media_info().await, MediaInfo::default());
    }

    #[tokio::test]
    async fn queries_degrade_to_empty_on_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
            .mount(&server)
            .await;

        let rc = client_for(&server, Duration::from_millis(100)).await;
        assert!(!rc.transport_info().await.is_active());
        assert!(!rc.media_info().await.has_media());
    }

    #[tokio::test]
    async fn set_volume_and_mute_hit_rendering_control() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/RenderingControl/ctrl"))
            .and(body_string_contains(
                r#"<u:SetVolume xmlns:u="urn:schemas-upnp-org:service:RenderingControl:1"><InstanceID>0</InstanceID><Channel>Master</Channel><DesiredVolume>57</DesiredVolume></u:SetVolume>"#,
            ))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/RenderingControl/ctrl"))
            .and(body_string_contains(
                r#"<u:SetMute xmlns:u="urn:schemas-upnp-org:service:RenderingControl:1"><InstanceID>0</InstanceID><Channel>Master</Channel><DesiredMute>1</DesiredMute></u:SetMute>"#,
            ))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let rc = client_for(&server, Duration::from_secs(2)).await;
        rc.set_volume(57).await.unwrap();
        rc.set_mute(true).await.unwrap();
    }

    #[tokio::test]
    async fn set_source_sends_escaped_uri_and_descriptor() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/AVTransport/ctrl"))
            .and(body_string_contains(
                "<CurrentURI>http://h/s.flac?a=1&amp;b=2</CurrentURI>",
            ))
            .and(body_string_contains(
                "<CurrentURIMetaData>&lt;DIDL-Lite xmlns=&quot;",
            ))
            .and(body_string_contains("http-get:*:audio/flac:*"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let rc = client_for(&server, Duration::from_secs(2)).await;
        rc.set_source("http://h/s.flac?a=1&b=2", "Tom & Jerry", "audio/flac")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn direct_actions_propagate_upnp_faults() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("<errorCode>701</errorCode>"))
            .mount(&server)
            .await;

        let rc = client_for(&server, Duration::from_secs(2)).await;
        let err = rc.play().await.unwrap_err();
        assert_eq!(err.upnp_error_code(), Some(701));
    }
}
