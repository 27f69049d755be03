//! Trait abstractions for receiver operations.
//!
//! The facade and the orchestration helpers depend on these traits rather
//! than on the HTTP client, so they can be exercised against scripted mocks.

use async_trait::async_trait;

use crate::upnp::soap::SoapResult;
use crate::upnp::types::{MediaInfo, TransportInfo};

/// AVTransport operations against a single receiver.
#[async_trait]
pub trait AvTransportControl: Send + Sync {
    /// Starts or resumes playback (`Play`, Speed=1).
    async fn play(&self) -> SoapResult<()>;

    async fn pause(&self) -> SoapResult<()>;

    async fn stop(&self) -> SoapResult<()>;

    /// Skips to the next track.
    async fn next(&self) -> SoapResult<()>;

    /// Skips to the previous track.
    async fn previous(&self) -> SoapResult<()>;

    /// Loads a stream URI (`SetAVTransportURI`) with a generated descriptor.
    ///
    /// # Arguments
    /// * `uri` - The stream URL
    /// * `title` - Display title for the descriptor
    /// * `mime` - MIME type announced to the device
    async fn set_source(&self, uri: &str, title: &str, mime: &str) -> SoapResult<()>;

    /// Current transport state. Empty on any failure.
    async fn transport_info(&self) -> TransportInfo;

    /// Currently loaded media. Empty on any failure.
    async fn media_info(&self) -> MediaInfo;
}

/// RenderingControl operations against a single receiver.
#[async_trait]
pub trait RenderingControl: Send + Sync {
    /// Sets the master volume. The level is passed through unvalidated.
    async fn set_volume(&self, level: u8) -> SoapResult<()>;

    /// Sets the master mute flag.
    async fn set_mute(&self, mute: bool) -> SoapResult<()>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Combined Traits (for trait objects)
// ─────────────────────────────────────────────────────────────────────────────

/// Combined trait for everything the control facade needs.
pub trait RendererClient: AvTransportControl + RenderingControl {
    /// Upcast for helpers that only need the transport half.
    fn as_transport(&self) -> &dyn AvTransportControl;
}

/// Blanket implementation for any type implementing both traits.
impl<T: AvTransportControl + RenderingControl> RendererClient for T {
    fn as_transport(&self) -> &dyn AvTransportControl {
        self
    }
}
