use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use serde_json::Value;

use crate::foundation::error::{OnairError, OnairResult};

/// Untyped payload a template renders from.
pub type DataMap = serde_json::Map<String, Value>;

/// Underscore-prefixed payload keys the controller itself reads.
pub mod keys {
    /// Forces preview affordances on, even in production.
    pub const PREVIEW: &str = "_preview";
    /// Runs `preview` right after attach.
    pub const AUTO_PREVIEW: &str = "_autoPreview";
    /// Stage background: `true` for the preview green, or any CSS color string.
    pub const BACKGROUND: &str = "_bg";
    /// Asks the graphic to scale its output to fit the stage.
    pub const FIT: &str = "_fit";
}

/// Shared, immutable payload reference.
///
/// Change detection between host updates compares references ([`HostData::same_ref`]), not
/// contents: a host that mutates data behind the same reference is not seen as a change.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HostData(Arc<DataMap>);

impl HostData {
    pub fn new(map: DataMap) -> Self {
        Self(Arc::new(map))
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a JSON object. Anything other than an object is rejected.
    pub fn from_json_str(s: &str) -> OnairResult<Self> {
        match serde_json::from_str::<Value>(s)? {
            Value::Object(map) => Ok(Self::new(map)),
            other => Err(OnairError::validation(format!(
                "template data must be a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Reference identity, the only notion of "changed" the controller uses.
    pub fn same_ref(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }

    pub fn as_map(&self) -> &DataMap {
        &self.0
    }

    /// True only for a literal JSON `true`.
    pub fn flag(&self, key: &str) -> bool {
        matches!(self.0.get(key), Some(Value::Bool(true)))
    }

    /// Loose truthiness: present and not `null`, `false`, `0` or `""`.
    pub fn truthy(&self, key: &str) -> bool {
        self.0.get(key).is_some_and(is_truthy)
    }
}

impl Deref for HostData {
    type Target = DataMap;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<DataMap> for HostData {
    fn from(map: DataMap) -> Self {
        Self::new(map)
    }
}

impl fmt::Display for HostData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = serde_json::to_string(self.as_map()).map_err(|_| fmt::Error)?;
        f.write_str(&s)
    }
}

impl serde::Serialize for HostData {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_map().serialize(serializer)
    }
}

impl<'de> serde::Deserialize<'de> for HostData {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        DataMap::deserialize(deserializer).map(Self::new)
    }
}

/// Shallow merge; keys in `overlay` win.
pub fn merge(base: &DataMap, overlay: &DataMap) -> DataMap {
    let mut out = base.clone();
    for (k, v) in overlay {
        out.insert(k.clone(), v.clone());
    }
    out
}

fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[path = "../../tests/unit/data/payload.rs"]
mod tests;
