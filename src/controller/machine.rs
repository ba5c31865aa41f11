use crate::command::hooks::RemoteHooks;
use crate::command::trigger::{Command, RemoteKey};
use crate::controller::builder::ControllerBuilder;
use crate::controller::observer::HostObserver;
use crate::data::payload::{HostData, keys, merge};
use crate::data::resolver::DataResolver;
use crate::foundation::config::ControllerConfig;
use crate::foundation::core::{ControllerSnapshot, PlaybackState};
use crate::foundation::error::OnairError;
use crate::graphic::adapter::{
    Graphic, GraphicFactory, GraphicProps, Stage, TemplateDescriptor,
};
use crate::graphic::gate::{GrantPoll, PendingGrant, PlayGrant};
use crate::graphic::link::{GraphicLink, GraphicRequest};
use crate::timeline::handle::{Timeline, TimelineFactory};

pub(crate) struct Parts {
    pub(crate) template: TemplateDescriptor,
    pub(crate) config: ControllerConfig,
    pub(crate) graphics: Box<dyn GraphicFactory>,
    pub(crate) timelines: Box<dyn TimelineFactory>,
    pub(crate) resolver: Box<dyn DataResolver>,
    pub(crate) observer: Option<Box<dyn HostObserver>>,
    pub(crate) hooks: Option<Box<dyn RemoteHooks>>,
}

/// Playback state machine for one on-air template.
///
/// Every command runs the same cycle on the caller's thread:
///
/// 1. settle a pending ready-gate answer, if one arrived
/// 2. apply the command to the snapshot
/// 3. re-render the graphic (once attached)
/// 4. react to the state transition: notify the host, drive the timeline
/// 5. apply requests the graphic raised through its [`GraphicLink`]
///
/// Nothing blocks. The only suspension point is the ready gate, whose answer is picked up at
/// the start of the next command or by [`Controller::poll_grant`].
pub struct Controller {
    name: String,
    production: bool,
    auto_preview: bool,
    template: TemplateDescriptor,
    graphic: Box<dyn Graphic>,
    link: GraphicLink,
    timeline: Box<dyn Timeline>,
    timelines: Box<dyn TimelineFactory>,
    resolver: Box<dyn DataResolver>,
    observer: Option<Box<dyn HostObserver>>,
    hooks: Option<Box<dyn RemoteHooks>>,
    host_data: Option<HostData>,
    snapshot: ControllerSnapshot,
    pending: Option<PendingGrant>,
    draining: bool,
}

impl Controller {
    pub fn builder(template: TemplateDescriptor) -> ControllerBuilder {
        ControllerBuilder::new(template)
    }

    pub(crate) fn assemble(parts: Parts) -> Self {
        let Parts {
            template,
            config,
            mut graphics,
            mut timelines,
            resolver,
            observer,
            hooks,
        } = parts;

        let link = GraphicLink::default();
        let graphic = graphics.build(&template, link.clone());
        let timeline = timelines.create_paused();
        let host_data = config.data.clone().map(HostData::new);
        let data = host_data
            .clone()
            .unwrap_or_else(|| HostData::new(resolver.resolve()));

        Self {
            name: config.name().to_string(),
            production: config.production,
            auto_preview: config.auto_preview,
            template,
            graphic,
            link,
            timeline,
            timelines,
            resolver,
            observer,
            hooks,
            host_data,
            snapshot: ControllerSnapshot::new(data),
            pending: None,
            draining: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn template(&self) -> &TemplateDescriptor {
        &self.template
    }

    pub fn snapshot(&self) -> &ControllerSnapshot {
        &self.snapshot
    }

    /// Data last supplied by the host, if any.
    pub fn host_data(&self) -> Option<&HostData> {
        self.host_data.as_ref()
    }

    pub fn state(&self) -> Option<PlaybackState> {
        self.snapshot.state
    }

    /// True while an initial-play request waits for the graphic's answer.
    pub fn is_awaiting_grant(&self) -> bool {
        self.pending.is_some()
    }

    /// Props the graphic is rendered with for the current snapshot.
    pub fn props(&self) -> GraphicProps {
        let snap = &self.snapshot;
        GraphicProps {
            data: snap.data.clone(),
            should_render: !snap.is_stopped(),
            did_start: snap.started,
            is_preview: !self.production || snap.data.flag(keys::PREVIEW),
            is_paused: snap.is_paused(),
            fit: snap.data.truthy(keys::FIT),
            stage: Stage::new(&snap.data, snap.started),
            link: self.link.clone(),
        }
    }

    /// Mount the controller: install remote hooks, render, then auto-preview if asked to.
    ///
    /// Commands issued before attach still move the state, but drive no timeline.
    pub fn attach(&mut self) {
        if self.snapshot.mounted {
            tracing::warn!(controller = %self.name, "attach called twice, ignoring");
            return;
        }
        self.snapshot.mounted = true;
        if let Some(hooks) = self.hooks.as_mut() {
            hooks.install(&self.name);
        }
        tracing::info!(controller = %self.name, template = %self.template.name, "attached");
        self.render();
        // Requests raised on mount apply before auto-preview.
        self.drain_requests();

        if self.auto_preview || self.snapshot.data.truthy(keys::AUTO_PREVIEW) {
            self.preview();
        }
    }

    /// Release the controller: uninstall hooks, drop any pending grant, clear and dispose the
    /// timeline.
    pub fn dispose(mut self) {
        if self.snapshot.mounted
            && let Some(hooks) = self.hooks.as_mut()
        {
            hooks.uninstall(&self.name);
        }
        self.pending = None;
        self.timeline.clear();
        self.timeline.dispose();
        tracing::info!(controller = %self.name, "disposed");
    }

    pub fn load(&mut self) {
        self.dispatch(Command::Load);
    }

    pub fn preview(&mut self) {
        self.dispatch(Command::Preview);
    }

    pub fn play(&mut self) {
        self.dispatch(Command::Play);
    }

    pub fn pause(&mut self) {
        self.dispatch(Command::Pause);
    }

    pub fn stop(&mut self) {
        self.dispatch(Command::Stop);
    }

    pub fn update(&mut self, data: Option<HostData>) {
        self.dispatch(Command::Update(data));
    }

    pub fn remove(&mut self) {
        self.dispatch(Command::Remove);
    }

    pub fn disable_autoplay(&mut self) {
        self.dispatch(Command::DisableAutoplay);
    }

    /// Handle a remote trigger. Unknown triggers, and any trigger before attach, are ignored.
    pub fn handle_trigger(&mut self, trigger: &str) -> Option<RemoteKey> {
        if !self.snapshot.mounted {
            tracing::debug!(controller = %self.name, trigger, "not attached, trigger ignored");
            return None;
        }
        let Some(key) = RemoteKey::parse(trigger) else {
            tracing::debug!(controller = %self.name, trigger, "unknown trigger ignored");
            return None;
        };
        self.dispatch(key.into());
        Some(key)
    }

    /// The host passed new data. A different reference replaces the payload; no other
    /// reaction runs for this cycle.
    pub fn on_host_data_changed(&mut self, data: Option<HostData>) {
        self.resolve_pending();
        let changed = match (&self.host_data, &data) {
            (None, None) => false,
            (Some(old), Some(new)) => !HostData::same_ref(old, new),
            _ => true,
        };
        self.host_data = data;
        if !changed {
            return;
        }
        self.apply(Command::Update(self.host_data.clone()));
        self.render();
        self.drain_requests();
    }

    /// Pick up a ready-gate answer that arrived since the last command, and apply requests
    /// the graphic raised in the meantime. Hosts call this from their event loop.
    pub fn poll_grant(&mut self) {
        self.resolve_pending();
        self.drain_requests();
    }

    pub fn dispatch(&mut self, command: Command) {
        self.resolve_pending();
        let prev = self.snapshot.state;
        self.apply(command);
        self.render();
        self.latch_autoplay_requests();
        self.react(prev);
        self.drain_requests();
    }

    fn apply(&mut self, command: Command) {
        let name = self.name.as_str();
        match command {
            Command::Load => {
                tracing::info!(controller = name, "load");
                self.snapshot.loaded = true;
            }
            Command::Preview => {
                tracing::info!(controller = name, "preview");
                self.snapshot.state = Some(PlaybackState::Playing);
                self.snapshot.data = self.preview_data();
            }
            Command::Play => {
                tracing::info!(controller = name, "play");
                self.snapshot.state = Some(PlaybackState::Playing);
            }
            Command::Pause => {
                tracing::info!(controller = name, "pause");
                self.snapshot.state = Some(PlaybackState::Paused);
            }
            Command::Stop => {
                tracing::info!(controller = name, "stop");
                self.snapshot.state = Some(PlaybackState::Stopped);
            }
            Command::Update(data) => {
                let data = data
                    .or_else(|| self.host_data.clone())
                    .unwrap_or_default();
                tracing::info!(controller = name, %data, "update");
                self.snapshot.data = data;
            }
            Command::Remove => {
                tracing::info!(controller = name, "remove");
                self.replace_timeline();
                self.pending = None;
                self.snapshot.started = false;
                self.snapshot.data = self
                    .host_data
                    .clone()
                    .unwrap_or_else(|| HostData::new(self.resolver.resolve()));
            }
            Command::DisableAutoplay => {
                tracing::debug!(controller = name, "timeline autoplay disabled");
                self.snapshot.prevent_autoplay = true;
            }
        }
    }

    fn preview_data(&self) -> HostData {
        match &self.host_data {
            Some(data) => data.clone(),
            None => HostData::new(merge(
                &self.template.preview_data,
                &self.resolver.resolve(),
            )),
        }
    }

    fn replace_timeline(&mut self) {
        let fresh = self.timelines.create_paused();
        let mut old = std::mem::replace(&mut self.timeline, fresh);
        old.clear();
        old.dispose();
    }

    fn render(&mut self) {
        if !self.snapshot.mounted {
            return;
        }
        let props = self.props();
        if let Err(err) = self.graphic.render(&props, self.timeline.as_mut()) {
            self.capture_fault(err);
        }
    }

    fn capture_fault(&mut self, err: OnairError) {
        if self.snapshot.errored {
            tracing::debug!(controller = %self.name, error = %err, "graphic failed to render again");
            return;
        }
        tracing::error!(controller = %self.name, error = %err, "graphic failed to render");
        self.snapshot.errored = true;
    }

    /// Apply a `disable_autoplay` raised during this cycle's render before the timeline is
    /// driven. Other requests wait for the drain.
    fn latch_autoplay_requests(&mut self) {
        if self.link.take_disable_autoplay() && !self.snapshot.prevent_autoplay {
            tracing::debug!(controller = %self.name, "timeline autoplay disabled by graphic");
            self.snapshot.prevent_autoplay = true;
        }
    }

    #[tracing::instrument(level = "debug", skip(self), fields(controller = %self.name))]
    fn react(&mut self, prev: Option<PlaybackState>) {
        let state = self.snapshot.state;
        if prev != state
            && let (Some(state), Some(observer)) = (state, self.observer.as_mut())
        {
            observer.on_state_change(state);
        }

        if !self.snapshot.mounted {
            return;
        }

        match state {
            Some(PlaybackState::Playing) if prev != state => {
                if self.snapshot.started {
                    self.play_timeline();
                } else {
                    self.request_initial_play();
                }
            }
            Some(PlaybackState::Paused) if prev != state => self.pause_timeline(),
            _ => {}
        }
    }

    fn request_initial_play(&mut self) {
        let Some(gate) = self.graphic.ready_gate() else {
            self.on_ready_to_play(true);
            return;
        };
        let (grant, pending) = PlayGrant::pair();
        // A newer request supersedes one still waiting.
        self.pending = Some(pending);
        tracing::debug!(controller = %self.name, "waiting for graphic to be ready");
        gate.will_play(grant);
        self.resolve_pending();
    }

    fn resolve_pending(&mut self) {
        let Some(pending) = self.pending.as_mut() else {
            return;
        };
        let should_play = match pending.poll() {
            GrantPoll::Pending => return,
            GrantPoll::Granted => true,
            GrantPoll::Declined => false,
            GrantPoll::Abandoned => {
                tracing::warn!(controller = %self.name, "ready gate dropped its grant");
                false
            }
        };
        self.pending = None;
        self.on_ready_to_play(should_play);
    }

    fn on_ready_to_play(&mut self, should_play: bool) {
        if !should_play {
            tracing::info!(controller = %self.name, "graphic declined to play");
            return;
        }
        if !self.snapshot.is_playing() {
            tracing::debug!(
                controller = %self.name,
                state = ?self.snapshot.state,
                "grant arrived after leaving playing, discarded"
            );
            return;
        }
        self.snapshot.started = true;
        self.play_timeline();
        self.render();
    }

    fn play_timeline(&mut self) {
        if self.snapshot.errored {
            tracing::debug!(controller = %self.name, "errored, timeline play skipped");
            return;
        }
        if self.snapshot.prevent_autoplay {
            tracing::debug!(controller = %self.name, "autoplay disabled, timeline left to graphic");
            return;
        }
        self.timeline.play();
    }

    fn pause_timeline(&mut self) {
        if self.snapshot.errored {
            tracing::debug!(controller = %self.name, "errored, timeline pause skipped");
            return;
        }
        self.timeline.pause();
    }

    fn drain_requests(&mut self) {
        if self.draining {
            return;
        }
        self.draining = true;
        while let Some(request) = self.link.pop() {
            let command = match request {
                GraphicRequest::Remove => Command::Remove,
                GraphicRequest::DisableAutoplay => Command::DisableAutoplay,
            };
            self.dispatch(command);
        }
        self.draining = false;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/controller/machine.rs"]
mod tests;
