//! Event system for host notification.
//!
//! This module provides:
//! - [`EventEmitter`] trait the control facade emits through
//! - [`BroadcastEventBridge`] for hosts that subscribe to a channel
//! - [`ControlEvent`], the single event type
//!
//! Front-ends never share mutable state: after every confirmed change the
//! facade emits one reading per front-end and hosts redraw from it.

mod bridge;
mod emitter;

pub use bridge::BroadcastEventBridge;
pub use emitter::{EventEmitter, LoggingEventEmitter, NoopEventEmitter};

use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

use crate::services::front_ends::FrontEndReading;

/// Events emitted by the control facade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ControlEvent {
    /// A front-end's displayed value changed after a confirmed volume or mute set.
    FrontEndUpdated {
        reading: FrontEndReading,
        /// Unix timestamp in milliseconds.
        timestamp: u64,
    },
    /// A source was loaded on the device.
    SourceSelected {
        index: usize,
        uri: String,
        /// Unix timestamp in milliseconds.
        timestamp: u64,
    },
    /// Play (`active == true`) or Pause was accepted, or declined with a UPnP code.
    PlaybackRequested {
        active: bool,
        /// Unix timestamp in milliseconds.
        timestamp: u64,
    },
}

/// Current Unix time in milliseconds (0 if the clock is before the epoch).
#[must_use]
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}
