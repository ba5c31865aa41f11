use std::path::Path;

use crate::data::payload::DataMap;
use crate::foundation::error::{OnairError, OnairResult};

/// Name used in log lines when the host does not name its controller.
pub const DEFAULT_NAME: &str = "caspar";

/// Host-side settings for a single controller instance.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ControllerConfig {
    /// Name prefixed to every command log line.
    pub name: Option<String>,
    /// Production playout. Preview affordances are off unless the payload asks for them.
    pub production: bool,
    /// Run `preview` as soon as the controller attaches.
    pub auto_preview: bool,
    /// Data supplied by the host. Takes precedence over resolved external data.
    pub data: Option<DataMap>,
}

impl ControllerConfig {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(DEFAULT_NAME)
    }

    pub fn from_json_str(s: &str) -> OnairResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_path(path: &Path) -> OnairResult<Self> {
        let s = std::fs::read_to_string(path)
            .map_err(|e| OnairError::config(format!("read '{}': {e}", path.display())))?;
        Self::from_json_str(&s)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
