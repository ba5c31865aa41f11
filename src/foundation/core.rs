use std::fmt;

use crate::data::payload::HostData;

/// Transport state of a template.
///
/// A fresh controller holds no state at all (`Option::None`) until the first state command
/// arrives; hosts render that the same way as a non-playing template.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    /// The template is off air. Graphics are expected to stop rendering.
    Stopped,
    /// The template is on air and its timeline runs.
    Playing,
    /// The template is on air with its timeline held.
    Paused,
}

impl PlaybackState {
    /// Lowercase name, as used in logs and reports.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stopped => "stopped",
            Self::Playing => "playing",
            Self::Paused => "paused",
        }
    }
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full mutable record held by a controller.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct ControllerSnapshot {
    /// Set by `load`; never reset.
    pub loaded: bool,
    /// Set once the graphic granted the initial play; reset by `remove`.
    pub started: bool,
    /// Set once the controller attached; never reset.
    pub mounted: bool,
    /// Set once a render fault was captured; never cleared.
    pub errored: bool,
    /// One-way latch handing timeline playback over to the graphic.
    pub prevent_autoplay: bool,
    /// Current transport state, `None` before the first state command.
    pub state: Option<PlaybackState>,
    /// Payload the graphic renders from. Empty when absent, never null.
    pub data: HostData,
}

impl ControllerSnapshot {
    pub fn new(data: HostData) -> Self {
        Self {
            data,
            ..Self::default()
        }
    }

    pub fn is_playing(&self) -> bool {
        self.state == Some(PlaybackState::Playing)
    }

    pub fn is_paused(&self) -> bool {
        self.state == Some(PlaybackState::Paused)
    }

    pub fn is_stopped(&self) -> bool {
        self.state == Some(PlaybackState::Stopped)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
