//! Remote-control keys.
//!
//! Numeric values are the HomeKit `RemoteKey` characteristic codes, so hosts
//! can forward them unchanged.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RemoteKey {
    Rewind,
    FastForward,
    NextTrack,
    PreviousTrack,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Select,
    Back,
    Exit,
    PlayPause,
    Information,
}

/// What a key press does on the receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    TogglePlayPause,
    Next,
    Previous,
    /// Logged and ignored.
    Ignore,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown remote key: {0}")]
pub struct UnknownRemoteKey(pub String);

impl RemoteKey {
    /// Every key, in code order.
    pub const ALL: [RemoteKey; 13] = [
        Self::Rewind,
        Self::FastForward,
        Self::NextTrack,
        Self::PreviousTrack,
        Self::ArrowUp,
        Self::ArrowDown,
        Self::ArrowLeft,
        Self::ArrowRight,
        Self::Select,
        Self::Back,
        Self::Exit,
        Self::PlayPause,
        Self::Information,
    ];

    /// Maps a HomeKit key code.
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.code() == code)
    }

    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Rewind => 0,
            Self::FastForward => 1,
            Self::NextTrack => 2,
            Self::PreviousTrack => 3,
            Self::ArrowUp => 4,
            Self::ArrowDown => 5,
            Self::ArrowLeft => 6,
            Self::ArrowRight => 7,
            Self::Select => 8,
            Self::Back => 9,
            Self::Exit => 10,
            Self::PlayPause => 11,
            Self::Information => 15,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Rewind => "REWIND",
            Self::FastForward => "FAST_FORWARD",
            Self::NextTrack => "NEXT_TRACK",
            Self::PreviousTrack => "PREVIOUS_TRACK",
            Self::ArrowUp => "ARROW_UP",
            Self::ArrowDown => "ARROW_DOWN",
            Self::ArrowLeft => "ARROW_LEFT",
            Self::ArrowRight => "ARROW_RIGHT",
            Self::Select => "SELECT",
            Self::Back => "BACK",
            Self::Exit => "EXIT",
            Self::PlayPause => "PLAY_PAUSE",
            Self::Information => "INFORMATION",
        }
    }

    /// The receiver action bound to this key.
    ///
    /// Only the arrow and seek keys skip tracks; NEXT_TRACK and
    /// PREVIOUS_TRACK are ignored like every other key.
    #[must_use]
    pub fn action(self) -> KeyAction {
        match self {
            Self::PlayPause => KeyAction::TogglePlayPause,
            Self::ArrowRight | Self::FastForward => KeyAction::Next,
            Self::ArrowLeft | Self::Rewind => KeyAction::Previous,
            _ => KeyAction::Ignore,
        }
    }
}

impl fmt::Display for RemoteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RemoteKey {
    type Err = UnknownRemoteKey;

    /// Accepts a numeric code or a name (`play_pause`, `PLAY-PAUSE`, `PlayPause`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(code) = trimmed.parse::<u8>() {
            return Self::from_code(code).ok_or_else(|| UnknownRemoteKey(s.to_string()));
        }

        let normalized: String = trimmed
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .map(|c| c.to_ascii_uppercase())
            .collect();
        Self::ALL
            .into_iter()
            .find(|key| key.name().replace('_', "") == normalized)
            .ok_or_else(|| UnknownRemoteKey(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_codes_and_names() {
        assert_eq!("11".parse::<RemoteKey>(), Ok(RemoteKey::PlayPause));
        assert_eq!("15".parse::<RemoteKey>(), Ok(RemoteKey::Information));
        assert_eq!("play_pause".parse::<RemoteKey>(), Ok(RemoteKey::PlayPause));
        assert_eq!("ArrowRight".parse::<RemoteKey>(), Ok(RemoteKey::ArrowRight));
        assert_eq!("fast-forward".parse::<RemoteKey>(), Ok(RemoteKey::FastForward));
        assert!("12".parse::<RemoteKey>().is_err());
        assert!("volume".parse::<RemoteKey>().is_err());
    }

    #[test]
    fn codes_and_names_resolve_back_to_the_key() {
        for key in RemoteKey::ALL {
            assert_eq!(RemoteKey::from_code(key.code()), Some(key));
            assert_eq!(key.name().parse::<RemoteKey>(), Ok(key));
        }
        assert_eq!(RemoteKey::PlayPause.code(), 11);
        assert_eq!(RemoteKey::Information.to_string(), "INFORMATION");
    }

    #[test]
    fn only_transport_keys_have_actions() {
        assert_eq!(RemoteKey::PlayPause.action(), KeyAction::TogglePlayPause);
        assert_eq!(RemoteKey::ArrowRight.action(), KeyAction::Next);
        assert_eq!(RemoteKey::FastForward.action(), KeyAction::Next);
        assert_eq!(RemoteKey::ArrowLeft.action(), KeyAction::Previous);
        assert_eq!(RemoteKey::Rewind.action(), KeyAction::Previous);
        assert_eq!(RemoteKey::NextTrack.action(), KeyAction::Ignore);
        assert_eq!(RemoteKey::Select.action(), KeyAction::Ignore);
        assert_eq!(RemoteKey::Information.action(), KeyAction::Ignore);
    }
}
