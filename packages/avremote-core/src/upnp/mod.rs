//! UPnP/SOAP receiver control.
//!
//! # Module Structure
//!
//! - `types` - Endpoint, transport state, media and source types
//! - `services` - UPnP service definitions (URNs, paths)
//! - `traits` - Trait abstractions for testability
//! - `client` - `RendererClientImpl` concrete trait implementation
//! - `didl` - MIME inference and DIDL-Lite descriptors
//! - `playback` - AVTransport actions, queries and orchestration
//! - `volume` - RenderingControl volume/mute
//! - `fault` - UPnP error code extraction
//! - `soap` - Low-level SOAP protocol implementation
//! - `utils` - XML helpers

pub mod client;
pub mod didl;
pub mod fault;
pub mod playback;
pub mod services;
pub mod soap;
pub mod traits;
pub mod types;
pub mod utils;
pub(crate) mod volume;

// Re-export domain types
pub use services::UpnpService;
pub use types::{DeviceEndpoint, MediaInfo, SourceDescriptor, TransportInfo, TransportState};

// Re-export trait abstractions
pub use traits::{AvTransportControl, RendererClient, RenderingControl};

// Re-export concrete implementation
pub use client::RendererClientImpl;
