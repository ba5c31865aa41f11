use crate::data::payload::{DataMap, HostData, keys};
use crate::foundation::error::{OnairError, OnairResult};
use crate::graphic::gate::ReadyGate;
use crate::graphic::link::GraphicLink;
use crate::timeline::handle::Timeline;

/// Stage background used when the payload sets `_bg: true`.
pub const PREVIEW_BACKGROUND: &str = "#5ebb78";

/// Reusable template definition a graphic is built from.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TemplateDescriptor {
    pub name: String,
    /// Defaults shown by `preview`, overlaid by resolved external data.
    #[serde(default)]
    pub preview_data: DataMap,
}

impl TemplateDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            preview_data: DataMap::new(),
        }
    }

    pub fn with_preview_data(mut self, data: DataMap) -> Self {
        self.preview_data = data;
        self
    }

    pub fn from_json_str(s: &str) -> OnairResult<Self> {
        let t: Self = serde_json::from_str(s)?;
        t.validate()?;
        Ok(t)
    }

    pub fn validate(&self) -> OnairResult<()> {
        if self.name.trim().is_empty() {
            return Err(OnairError::validation("template name must not be empty"));
        }
        Ok(())
    }
}

/// Container styling around the graphic.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Stage {
    /// CSS background, `None` for transparent.
    pub background: Option<String>,
    /// Hidden until the initial play was granted.
    pub opacity: f32,
}

impl Stage {
    pub fn new(data: &HostData, started: bool) -> Self {
        let background = match data.get(keys::BACKGROUND) {
            Some(serde_json::Value::Bool(true)) => Some(PREVIEW_BACKGROUND.to_string()),
            Some(serde_json::Value::String(color)) => Some(color.clone()),
            _ => None,
        };
        Self {
            background,
            opacity: if started { 1.0 } else { 0.0 },
        }
    }
}

/// Inputs a graphic renders from. Rebuilt by the controller for every render.
#[derive(Clone, Debug)]
pub struct GraphicProps {
    pub data: HostData,
    /// False while stopped.
    pub should_render: bool,
    pub did_start: bool,
    /// Show preview-only affordances (guides, placeholder backgrounds).
    pub is_preview: bool,
    pub is_paused: bool,
    /// Scale output to the stage. The scaling itself is up to the graphic.
    pub fit: bool,
    pub stage: Stage,
    /// Carries `onRemove` / `disableAutoPlay` back to the controller.
    pub link: GraphicLink,
}

/// Visual content driven by a controller.
pub trait Graphic {
    /// Render from `props`, building tweens into `timeline` as needed.
    ///
    /// An error is a render fault: the controller latches `errored`, logs it and carries on.
    fn render(&mut self, props: &GraphicProps, timeline: &mut dyn Timeline) -> OnairResult<()>;

    /// The graphic's ready gate, if it has one. Without a gate the initial play is granted
    /// immediately.
    fn ready_gate(&mut self) -> Option<&mut dyn ReadyGate> {
        None
    }
}

/// Builds the graphic for a template, handing it the link back to its controller.
pub trait GraphicFactory {
    fn build(&mut self, template: &TemplateDescriptor, link: GraphicLink) -> Box<dyn Graphic>;
}

impl<F> GraphicFactory for F
where
    F: FnMut(&TemplateDescriptor, GraphicLink) -> Box<dyn Graphic>,
{
    fn build(&mut self, template: &TemplateDescriptor, link: GraphicLink) -> Box<dyn Graphic> {
        self(template, link)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/graphic/adapter.rs"]
mod tests;
