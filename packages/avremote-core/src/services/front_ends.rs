//! Redundant front-end views over the cached control state.
//!
//! A host may expose the same volume/mute state through several controls (a
//! speaker with volume and mute, a separate mute switch, a dimmer-style volume
//! fader). None of them holds state: each computes its reading from the
//! facade's [`CachedControlState`] when asked, so they always agree.

use serde::Serialize;

use crate::state::CachedControlState;

/// Front-end kinds a host can expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FrontEnd {
    /// Speaker control: absolute volume plus mute. Always on.
    Speaker,
    /// On/off switch that is on while the receiver is NOT muted.
    MuteSwitch,
    /// Fader whose level is the volume; on while unmuted with volume > 0.
    VolumeFader,
}

impl FrontEnd {
    /// Every front-end kind, in notification order.
    pub const ALL: [FrontEnd; 3] = [Self::Speaker, Self::MuteSwitch, Self::VolumeFader];

    /// Computes what this front-end should display.
    #[must_use]
    pub fn read(self, state: &CachedControlState) -> FrontEndReading {
        let volume = state.volume();
        let muted = state.muted;
        match self {
            Self::Speaker => FrontEndReading {
                front_end: self,
                on: true,
                level: Some(volume),
                muted: Some(muted),
            },
            Self::MuteSwitch => FrontEndReading {
                front_end: self,
                on: !muted,
                level: None,
                muted: None,
            },
            Self::VolumeFader => FrontEndReading {
                front_end: self,
                on: !muted && volume > 0,
                level: Some(volume),
                muted: None,
            },
        }
    }
}

/// Displayed value of one front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrontEndReading {
    pub front_end: FrontEnd,
    pub on: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub muted: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mute_switch_is_on_when_unmuted() {
        assert!(FrontEnd::MuteSwitch.read(&CachedControlState::new(30, false)).on);
        assert!(!FrontEnd::MuteSwitch.read(&CachedControlState::new(30, true)).on);
    }

    #[test]
    fn fader_is_off_at_zero_or_muted() {
        let on = FrontEnd::VolumeFader.read(&CachedControlState::new(57, false));
        assert!(on.on);
        assert_eq!(on.level, Some(57));

        assert!(!FrontEnd::VolumeFader.read(&CachedControlState::new(0, false)).on);
        assert!(!FrontEnd::VolumeFader.read(&CachedControlState::new(57, true)).on);
    }

    #[test]
    fn speaker_reports_volume_and_mute() {
        let reading = FrontEnd::Speaker.read(&CachedControlState::new(12, true));
        assert!(reading.on);
        assert_eq!(reading.level, Some(12));
        assert_eq!(reading.muted, Some(true));
    }
}
