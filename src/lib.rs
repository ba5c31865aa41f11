//! onair is a playout lifecycle controller for on-air broadcast graphics.
//!
//! A template (a lower third, a score bug, a full-frame card) is one reusable graphic driven
//! remotely by a playout operator or automation system through a handful of transport
//! commands: `load`, `preview`, `play`, `pause`, `stop`, `update` and `remove`. The
//! [`Controller`] owns the transport state, the payload the graphic renders from and the
//! animation [`Timeline`] the graphic fills with tweens, and keeps the three in step.
//!
//! # Collaborators
//!
//! Rendering, animation and transport are out of scope; the controller talks to them through
//! narrow traits:
//!
//! - [`Graphic`] renders from [`GraphicProps`] and may expose a [`ReadyGate`] to defer its
//!   first play until its own setup completes.
//! - [`Timeline`] is played, paused, cleared and disposed, never inspected.
//! - [`DataResolver`] supplies external data (query string, launch arguments).
//! - [`HostObserver`] hears about every genuine state transition.
//! - [`RemoteHooks`] installs and removes global remote-control entry points.
//!
//! # Failure model
//!
//! Nothing the graphic does can take the controller down. Render faults latch
//! [`ControllerSnapshot::errored`] and are logged; from then on the timeline is no longer
//! driven, but commands keep being accepted.
#![forbid(unsafe_code)]

mod command;
mod controller;
mod data;
mod foundation;
mod graphic;
mod timeline;

/// Headless replay of playout scripts.
pub mod script;

pub use command::hooks::{DirectHooks, RemoteHooks};
pub use command::trigger::{Command, RemoteKey};
pub use controller::builder::ControllerBuilder;
pub use controller::machine::Controller;
pub use controller::observer::HostObserver;
pub use data::payload::{DataMap, HostData, keys, merge};
pub use data::resolver::{DataResolver, StaticData};
pub use foundation::config::{ControllerConfig, DEFAULT_NAME};
pub use foundation::core::{ControllerSnapshot, PlaybackState};
pub use foundation::error::{OnairError, OnairResult};
pub use graphic::adapter::{
    Graphic, GraphicFactory, GraphicProps, PREVIEW_BACKGROUND, Stage, TemplateDescriptor,
};
pub use graphic::gate::{GrantPoll, PendingGrant, PlayGrant, ReadyGate};
pub use graphic::link::{GraphicLink, GraphicRequest};
pub use script::stagehand::{GateMode, ScriptedGraphic, Stagehand};
pub use script::{ScriptReport, ScriptStep, parse_script, run_script};
pub use timeline::handle::{Timeline, TimelineFactory};
pub use timeline::memory::{InMemoryTimeline, TimelineCall, TimelineEvent, TimelineLog};
