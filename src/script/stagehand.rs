use std::cell::RefCell;
use std::rc::Rc;

use crate::foundation::error::{OnairError, OnairResult};
use crate::graphic::adapter::{Graphic, GraphicFactory, GraphicProps, TemplateDescriptor};
use crate::graphic::gate::{PlayGrant, ReadyGate};
use crate::graphic::link::GraphicLink;
use crate::timeline::handle::Timeline;

/// How a [`ScriptedGraphic`] answers initial-play requests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GateMode {
    /// No ready gate: plays are granted immediately by the controller.
    #[default]
    None,
    /// A gate that grants on the spot.
    Immediate,
    /// A gate that holds every grant until released.
    Hold,
}

#[derive(Default)]
struct Backstage {
    gate: GateMode,
    held: Option<PlayGrant>,
    fail_next: Option<String>,
    take_over: bool,
    renders: u64,
    gate_requests: u64,
    last: Option<GraphicProps>,
    link: Option<GraphicLink>,
}

/// Remote control for scripted graphics: builds them, releases their held grants, injects
/// render faults, and records what they were rendered with.
#[derive(Clone, Default)]
pub struct Stagehand {
    inner: Rc<RefCell<Backstage>>,
}

impl Stagehand {
    pub fn new(gate: GateMode) -> Self {
        let hand = Self::default();
        hand.inner.borrow_mut().gate = gate;
        hand
    }

    pub fn gate(&self) -> GateMode {
        self.inner.borrow().gate
    }

    /// Answer the held grant. Returns `false` when no grant was held.
    pub fn release(&self, should_play: bool) -> bool {
        let held = self.inner.borrow_mut().held.take();
        match held {
            Some(grant) => {
                grant.grant(should_play);
                true
            }
            None => false,
        }
    }

    /// Drop the held grant without answering. Returns `false` when no grant was held.
    pub fn abandon(&self) -> bool {
        self.inner.borrow_mut().held.take().is_some()
    }

    pub fn is_holding(&self) -> bool {
        self.inner.borrow().held.is_some()
    }

    pub fn fail_next_render(&self, msg: impl Into<String>) {
        self.inner.borrow_mut().fail_next = Some(msg.into());
    }

    /// Ask the controller to remove, the way a graphic does once its outro finished.
    pub fn request_remove(&self) -> OnairResult<()> {
        self.link()?.remove();
        Ok(())
    }

    /// On its next render the graphic disables autoplay through its props link, taking its
    /// timeline over the way graphics do on mount.
    pub fn take_over_on_next_render(&self) {
        self.inner.borrow_mut().take_over = true;
    }

    pub fn renders(&self) -> u64 {
        self.inner.borrow().renders
    }

    pub fn gate_requests(&self) -> u64 {
        self.inner.borrow().gate_requests
    }

    pub fn last_props(&self) -> Option<GraphicProps> {
        self.inner.borrow().last.clone()
    }

    fn link(&self) -> OnairResult<GraphicLink> {
        self.inner
            .borrow()
            .link
            .clone()
            .ok_or_else(|| OnairError::validation("no graphic has been built yet"))
    }
}

impl GraphicFactory for Stagehand {
    fn build(&mut self, template: &TemplateDescriptor, link: GraphicLink) -> Box<dyn Graphic> {
        tracing::debug!(template = %template.name, gate = ?self.gate(), "building scripted graphic");
        self.inner.borrow_mut().link = Some(link);
        Box::new(ScriptedGraphic { hand: self.clone() })
    }
}

/// Graphic without visuals, steered by its [`Stagehand`].
pub struct ScriptedGraphic {
    hand: Stagehand,
}

impl Graphic for ScriptedGraphic {
    fn render(&mut self, props: &GraphicProps, _timeline: &mut dyn Timeline) -> OnairResult<()> {
        let mut stage = self.hand.inner.borrow_mut();
        stage.renders += 1;
        stage.last = Some(props.clone());
        if std::mem::take(&mut stage.take_over) {
            props.link.disable_autoplay();
        }
        match stage.fail_next.take() {
            Some(msg) => Err(OnairError::render(msg)),
            None => Ok(()),
        }
    }

    fn ready_gate(&mut self) -> Option<&mut dyn ReadyGate> {
        if self.hand.gate() == GateMode::None {
            return None;
        }
        Some(self)
    }
}

impl ReadyGate for ScriptedGraphic {
    fn will_play(&mut self, grant: PlayGrant) {
        let mut stage = self.hand.inner.borrow_mut();
        stage.gate_requests += 1;
        match stage.gate {
            GateMode::Hold => stage.held = Some(grant),
            GateMode::Immediate | GateMode::None => grant.ready(),
        }
    }
}
