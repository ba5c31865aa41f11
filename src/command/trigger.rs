use std::fmt;
use std::str::FromStr;

use crate::data::payload::HostData;
use crate::foundation::error::OnairError;

/// The six commands a playout server can send to a template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoteKey {
    Stop,
    Play,
    Load,
    Pause,
    Update,
    Preview,
}

impl RemoteKey {
    pub const ALL: [RemoteKey; 6] = [
        Self::Stop,
        Self::Play,
        Self::Load,
        Self::Pause,
        Self::Update,
        Self::Preview,
    ];

    /// Keyboard code the key is bound to in a browser host. F5 is left to the browser.
    pub fn key_code(self) -> &'static str {
        match self {
            Self::Stop => "F1",
            Self::Play => "F2",
            Self::Load => "F3",
            Self::Pause => "F4",
            Self::Update => "F6",
            Self::Preview => "F7",
        }
    }

    pub fn command_name(self) -> &'static str {
        match self {
            Self::Stop => "CMD_STOP",
            Self::Play => "CMD_PLAY",
            Self::Load => "CMD_LOAD",
            Self::Pause => "CMD_PAUSE",
            Self::Update => "CMD_UPDATE",
            Self::Preview => "CMD_PREVIEW",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stop => "stop",
            Self::Play => "play",
            Self::Load => "load",
            Self::Pause => "pause",
            Self::Update => "update",
            Self::Preview => "preview",
        }
    }

    /// Match a trigger against key codes, `CMD_*` names and operation names.
    /// Unknown triggers yield `None`; callers ignore them.
    pub fn parse(trigger: &str) -> Option<Self> {
        let trigger = trigger.trim();
        Self::ALL.into_iter().find(|k| {
            trigger == k.key_code()
                || trigger.eq_ignore_ascii_case(k.command_name())
                || trigger.eq_ignore_ascii_case(k.as_str())
        })
    }
}

impl fmt::Display for RemoteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RemoteKey {
    type Err = OnairError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| OnairError::validation(format!("unknown trigger '{s}'")))
    }
}

/// Every operation a controller accepts.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Load,
    Preview,
    Play,
    Pause,
    Stop,
    /// Replace the payload; `None` falls back to host data, then to an empty map.
    Update(Option<HostData>),
    Remove,
    DisableAutoplay,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Preview => "preview",
            Self::Play => "play",
            Self::Pause => "pause",
            Self::Stop => "stop",
            Self::Update(_) => "update",
            Self::Remove => "remove",
            Self::DisableAutoplay => "disable_autoplay",
        }
    }
}

impl From<RemoteKey> for Command {
    fn from(key: RemoteKey) -> Self {
        match key {
            RemoteKey::Stop => Self::Stop,
            RemoteKey::Play => Self::Play,
            RemoteKey::Load => Self::Load,
            RemoteKey::Pause => Self::Pause,
            RemoteKey::Update => Self::Update(None),
            RemoteKey::Preview => Self::Preview,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/command/trigger.rs"]
mod tests;
