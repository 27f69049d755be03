//! Application services layer.
//!
//! The control facade and the host-facing pieces around it: front-end views
//! and remote-key mapping. Everything here talks to the receiver only through
//! the traits in `upnp::traits`.

pub mod control_surface;
pub mod front_ends;
pub mod remote_key;

pub use control_surface::{ControlStatus, ControlSurface};
pub use front_ends::{FrontEnd, FrontEndReading};
pub use remote_key::{KeyAction, RemoteKey, UnknownRemoteKey};
