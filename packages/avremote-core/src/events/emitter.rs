//! Event emitter abstraction for decoupling the facade from hosts.
//!
//! The facade depends on the [`EventEmitter`] trait rather than a concrete
//! channel, so hosts pick the delivery mechanism and tests can count events.

use super::ControlEvent;

/// Trait for emitting control events without knowledge of transport.
///
/// # Example
///
/// ```ignore
/// let surface = ControlSurface::new(config, client, Arc::new(LoggingEventEmitter));
/// surface.set_mute(true).await?; // emits one FrontEndUpdated per front-end
/// ```
pub trait EventEmitter: Send + Sync {
    fn emit_control(&self, event: ControlEvent);
}

/// No-op emitter for hosts that poll instead of subscribing.
pub struct NoopEventEmitter;

impl EventEmitter for NoopEventEmitter {
    fn emit_control(&self, _event: ControlEvent) {}
}

/// Logging emitter for debugging.
///
/// Logs all events at debug level.
pub struct LoggingEventEmitter;

impl EventEmitter for LoggingEventEmitter {
    fn emit_control(&self, event: ControlEvent) {
        tracing::debug!(?event, "control_event");
    }
}
