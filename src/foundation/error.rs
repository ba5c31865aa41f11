/// Convenience result type used across onair.
pub type OnairResult<T> = Result<T, OnairError>;

/// Top-level error taxonomy used by controller APIs.
///
/// Render faults raised by a graphic are captured at the controller boundary and never
/// propagate to the host; the variant exists so graphics have a typed way to report them.
#[derive(thiserror::Error, Debug)]
pub enum OnairError {
    /// Invalid user-provided data or incomplete controller wiring.
    #[error("validation error: {0}")]
    Validation(String),

    /// A graphic failed while rendering.
    #[error("render fault: {0}")]
    Render(String),

    /// Invalid or unreadable configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl OnairError {
    /// Build a [`OnairError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`OnairError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`OnairError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`OnairError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for OnairError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
