//! avremote core - control a networked audio receiver over UPnP/SOAP.
//!
//! The crate exposes a smart-home style control surface (power, volume,
//! mute, input source, remote keys) and implements it with AVTransport and
//! RenderingControl actions against a single receiver.
//!
//! # Architecture
//!
//! - [`upnp`]: SOAP transport, fault classification, DIDL-Lite descriptors,
//!   transport and rendering clients
//! - [`services`]: the [`ControlSurface`] facade, front-end views, remote keys
//! - [`events`]: event emission towards the host
//! - [`state`]: configuration and cached control state
//! - [`error`]: machine-readable error codes
//!
//! # Abstraction Traits
//!
//! - [`RendererClient`](upnp::RendererClient): receiver operations (mocked in tests)
//! - [`EventEmitter`](events::EventEmitter): front-end notification

#![warn(clippy::all)]

pub mod error;
pub mod events;
pub mod protocol_constants;
pub mod services;
pub mod state;
pub mod upnp;

pub use error::{ErrorCode, FaultKind, SoapError, SoapResult};
pub use events::{
    BroadcastEventBridge, ControlEvent, EventEmitter, LoggingEventEmitter, NoopEventEmitter,
};
pub use services::{
    ControlStatus, ControlSurface, FrontEnd, FrontEndReading, KeyAction, RemoteKey,
};
pub use state::{CachedControlState, Config, DeviceInfo, SourceConfig};
pub use upnp::playback::ToggleOutcome;
pub use upnp::{
    DeviceEndpoint, RendererClient, RendererClientImpl, SourceDescriptor, TransportState,
};
