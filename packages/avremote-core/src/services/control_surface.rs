//! State-sync facade consumed by the host runtime.
//!
//! [`ControlSurface`] maps abstract control events (activate, volume, mute,
//! source, remote key) onto receiver calls. It exclusively owns the
//! [`CachedControlState`], updates it only after the device confirmed a set,
//! and then emits one reading per front-end so every view agrees.
//!
//! Error policy by operation category:
//! - Direct actions (activate, stop, next, previous) downgrade faults that
//!   carry a UPnP error code to a debug log and report success; everything
//!   else propagates.
//! - Volume, mute and source selection propagate every fault.
//! - Orchestration (play/pause toggle, remote keys, default source) never
//!   propagates.
//! - Queries never fault; failures read as "inactive" / index 0.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;

use crate::events::{now_millis, ControlEvent, EventEmitter};
use crate::services::front_ends::{FrontEnd, FrontEndReading};
use crate::services::remote_key::{KeyAction, RemoteKey};
use crate::state::{clamp_volume, CachedControlState, Config, DeviceInfo};
use crate::upnp::client::RendererClientImpl;
use crate::upnp::fault::describe_fault_code;
use crate::upnp::playback::{
    descriptor_title, set_default_source_if_configured, toggle_play_pause, ToggleOutcome,
};
use crate::upnp::soap::{SoapError, SoapResult};
use crate::upnp::traits::RendererClient;
use crate::upnp::types::{MediaInfo, SourceDescriptor, TransportState};

/// Snapshot of everything a host displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlStatus {
    pub active: bool,
    pub transport_state: Option<TransportState>,
    pub source_index: usize,
    pub current_uri: Option<String>,
    pub volume: u8,
    pub muted: bool,
}

/// The control facade for one receiver.
pub struct ControlSurface {
    client: Arc<dyn RendererClient>,
    emitter: Arc<dyn EventEmitter>,
    sources: Vec<SourceDescriptor>,
    default_uri: Option<String>,
    device_info: DeviceInfo,
    front_ends: Vec<FrontEnd>,
    cached: RwLock<CachedControlState>,
}

impl ControlSurface {
    /// Creates the facade over an existing client.
    ///
    /// Configuration problems are logged as warnings; none of them is fatal.
    pub fn new(
        config: &Config,
        client: Arc<dyn RendererClient>,
        emitter: Arc<dyn EventEmitter>,
    ) -> Self {
        for warning in config.validate() {
            log::warn!("[Control] {}", warning);
        }

        Self {
            client,
            emitter,
            sources: config.source_descriptors(),
            default_uri: config
                .default_uri
                .clone()
                .filter(|u| !u.trim().is_empty()),
            device_info: config.device_info(),
            front_ends: FrontEnd::ALL.to_vec(),
            cached: RwLock::new(CachedControlState::default()),
        }
    }

    /// Creates the facade with an HTTP client bound to the configured endpoint.
    ///
    /// # Errors
    /// Returns the reqwest error if the HTTP backend cannot be initialized.
    pub fn from_config(config: &Config, emitter: Arc<dyn EventEmitter>) -> reqwest::Result<Self> {
        let client = RendererClientImpl::connect(config.endpoint())?;
        Ok(Self::new(config, Arc::new(client), emitter))
    }

    /// Restricts notifications to the front-ends the host actually exposes.
    #[must_use]
    pub fn with_front_ends(mut self, front_ends: Vec<FrontEnd>) -> Self {
        self.front_ends = front_ends;
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Static Information
    // ─────────────────────────────────────────────────────────────────────────

    #[must_use]
    pub fn device_info(&self) -> &DeviceInfo {
        &self.device_info
    }

    /// Configured sources, ordered by their stable index.
    #[must_use]
    pub fn sources(&self) -> &[SourceDescriptor] {
        &self.sources
    }

    #[must_use]
    pub fn front_ends(&self) -> &[FrontEnd] {
        &self.front_ends
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Cached State
    // ─────────────────────────────────────────────────────────────────────────

    /// Last confirmed volume and mute, without a device round trip.
    #[must_use]
    pub fn cached_state(&self) -> CachedControlState {
        *self.cached.read()
    }

    /// Current reading of one front-end, computed from the cached state.
    #[must_use]
    pub fn read_front_end(&self, front_end: FrontEnd) -> FrontEndReading {
        front_end.read(&self.cached.read())
    }

    fn notify_front_ends(&self, state: CachedControlState) {
        let timestamp = now_millis();
        for front_end in &self.front_ends {
            self.emitter.emit_control(ControlEvent::FrontEndUpdated {
                reading: front_end.read(&state),
                timestamp,
            });
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Power / Transport
    // ─────────────────────────────────────────────────────────────────────────

    /// Downgrades faults that carry a UPnP error code; propagates the rest.
    fn downgrade_upnp_fault(&self, action: &str, result: SoapResult<()>) -> SoapResult<()> {
        match result {
            Ok(()) => Ok(()),
            Err(e) => match e.upnp_error_code() {
                Some(code) => {
                    log::debug!(
                        "[Control] {} ignored due to UPnP error {} ({})",
                        action,
                        code,
                        describe_fault_code(code)
                    );
                    Ok(())
                }
                None => {
                    log::error!("[Control] {} failed: {}", action, e);
                    Err(e)
                }
            },
        }
    }

    /// Activates (Play) or deactivates (Pause) the receiver.
    ///
    /// # Errors
    /// Propagates faults without a UPnP error code (configuration, network,
    /// plain HTTP status).
    pub async fn set_active(&self, active: bool) -> SoapResult<()> {
        let (action, result) = if active {
            ("Play", self.client.play().await)
        } else {
            ("Pause", self.client.pause().await)
        };
        self.downgrade_upnp_fault(action, result)?;

        self.emitter.emit_control(ControlEvent::PlaybackRequested {
            active,
            timestamp: now_millis(),
        });
        Ok(())
    }

    /// Whether the receiver is playing.
    ///
    /// PLAYING and TRANSITIONING are active; every other state, and any
    /// failure to ask, reads as inactive.
    pub async fn is_active(&self) -> bool {
        self.client.transport_info().await.is_active()
    }

    /// # Errors
    /// Same policy as [`set_active`](Self::set_active).
    pub async fn stop(&self) -> SoapResult<()> {
        let result = self.client.stop().await;
        self.downgrade_upnp_fault("Stop", result)
    }

    /// # Errors
    /// Same policy as [`set_active`](Self::set_active).
    pub async fn next(&self) -> SoapResult<()> {
        let result = self.client.next().await;
        self.downgrade_upnp_fault("Next", result)
    }

    /// # Errors
    /// Same policy as [`set_active`](Self::set_active).
    pub async fn previous(&self) -> SoapResult<()> {
        let result = self.client.previous().await;
        self.downgrade_upnp_fault("Previous", result)
    }

    /// Query-then-act play/pause toggle. Never fails.
    pub async fn play_pause(&self) -> ToggleOutcome {
        toggle_play_pause(self.client.as_transport()).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Volume / Mute
    // ─────────────────────────────────────────────────────────────────────────

    /// Sets the volume, clamped to `0..=100`.
    ///
    /// Raising the volume above zero while muted also unmutes. Every front-end
    /// is notified once the device confirmed the new level.
    ///
    /// # Returns
    /// The cached state after the call.
    ///
    /// # Errors
    /// Propagates any SetVolume fault; the cache is untouched in that case.
    /// A failed implicit unmute is logged and leaves the cached mute as is.
    pub async fn set_volume(&self, level: i64) -> SoapResult<CachedControlState> {
        let level = clamp_volume(level);

        if let Err(e) = self.client.set_volume(level).await {
            log::error!("[Control] Failed to set volume {}: {}", level, e);
            return Err(e);
        }

        let was_muted = {
            let mut cached = self.cached.write();
            cached.set_volume(level);
            cached.muted
        };

        if level > 0 && was_muted {
            match self.client.set_mute(false).await {
                Ok(()) => {
                    log::debug!("[Control] Volume raised to {} while muted, unmuted", level);
                    self.cached.write().muted = false;
                }
                Err(e) => log::warn!("[Control] Implicit unmute failed: {}", e),
            }
        }

        let state = self.cached_state();
        self.notify_front_ends(state);
        Ok(state)
    }

    /// Sets the mute flag and notifies every front-end.
    ///
    /// # Errors
    /// Propagates any SetMute fault; the cache is untouched in that case.
    pub async fn set_mute(&self, mute: bool) -> SoapResult<CachedControlState> {
        if let Err(e) = self.client.set_mute(mute).await {
            log::error!("[Control] Failed to set mute: {}", e);
            return Err(e);
        }

        let state = {
            let mut cached = self.cached.write();
            cached.muted = mute;
            *cached
        };
        self.notify_front_ends(state);
        Ok(state)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Sources
    // ─────────────────────────────────────────────────────────────────────────

    /// Loads the source with the given index.
    ///
    /// # Returns
    /// `false` if no source has this index (nothing is sent).
    ///
    /// # Errors
    /// Propagates any SetAVTransportURI fault.
    pub async fn select_source(&self, index: usize) -> SoapResult<bool> {
        let Some(source) = self.sources.get(index) else {
            log::debug!("[Control] No source with index {}", index);
            return Ok(false);
        };

        let title = descriptor_title(&source.name, &self.device_info.name);
        let mime = source.mime_type();
        if let Err(e) = self.client.set_source(&source.uri, title, &mime).await {
            log::error!("[Control] Failed to switch source {}: {}", index, e);
            return Err(e);
        }

        self.emitter.emit_control(ControlEvent::SourceSelected {
            index,
            uri: source.uri.clone(),
            timestamp: now_millis(),
        });
        Ok(true)
    }

    /// Index of the configured source matching what the device has loaded.
    fn source_index_for(&self, media: &MediaInfo) -> usize {
        media
            .current_uri
            .as_deref()
            .and_then(|uri| self.sources.iter().find(|s| s.uri == uri))
            .map_or(0, |s| s.index)
    }

    /// Index of the currently loaded source; 0 when unknown or unmatched.
    pub async fn current_source_index(&self) -> usize {
        let media = self.client.media_info().await;
        self.source_index_for(&media)
    }

    /// Loads the configured default stream (or the first source). Never fails.
    ///
    /// # Returns
    /// `true` if a stream was loaded.
    pub async fn apply_default_source(&self) -> bool {
        set_default_source_if_configured(
            self.client.as_transport(),
            self.default_uri.as_deref(),
            &self.sources,
            &self.device_info.name,
        )
        .await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Remote Keys / Status
    // ─────────────────────────────────────────────────────────────────────────

    /// Handles a remote-key press. Faults are logged, never returned.
    pub async fn press_key(&self, key: RemoteKey) -> KeyAction {
        let action = key.action();
        let result: Result<(), SoapError> = match action {
            KeyAction::TogglePlayPause => {
                self.play_pause().await;
                Ok(())
            }
            KeyAction::Next => self.client.next().await,
            KeyAction::Previous => self.client.previous().await,
            KeyAction::Ignore => {
                log::debug!("[Control] Unhandled RemoteKey: {} ({})", key, key.code());
                Ok(())
            }
        };

        if let Err(e) = result {
            log::error!("[Control] Failed handling RemoteKey {}: {}", key, e);
        }
        action
    }

    /// Handles a raw HomeKit key code. Unassigned codes are logged and ignored.
    pub async fn press_key_code(&self, code: u8) -> KeyAction {
        match RemoteKey::from_code(code) {
            Some(key) => self.press_key(key).await,
            None => {
                log::debug!("[Control] Unhandled RemoteKey code: {}", code);
                KeyAction::Ignore
            }
        }
    }

    /// Active flag, transport state, source and cached volume/mute.
    ///
    /// Queries the device once for transport and once for media. Never fails.
    pub async fn status(&self) -> ControlStatus {
        let info = self.client.transport_info().await;
        let media = self.client.media_info().await;
        let cached = self.cached_state();

        ControlStatus {
            active: info.is_active(),
            transport_state: info.state,
            source_index: self.source_index_for(&media),
            current_uri: media.current_uri.filter(|u| !u.is_empty()),
            volume: cached.volume(),
            muted: cached.muted,
        }
    }
}

impl std::fmt::Debug for ControlSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControlSurface")
            .field("device_info", &self.device_info)
            .field("sources", &self.sources)
            .field("default_uri", &self.default_uri)
            .field("front_ends", &self.front_ends)
            .field("cached", &*self.cached.read())
            .finish()
    }
}
