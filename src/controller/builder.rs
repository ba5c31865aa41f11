use crate::command::hooks::RemoteHooks;
use crate::controller::machine::{Controller, Parts};
use crate::controller::observer::HostObserver;
use crate::data::resolver::{DataResolver, StaticData};
use crate::foundation::config::ControllerConfig;
use crate::foundation::error::{OnairError, OnairResult};
use crate::graphic::adapter::{GraphicFactory, TemplateDescriptor};
use crate::timeline::handle::TimelineFactory;

/// Wires a [`Controller`] to its collaborators.
///
/// A graphic factory and a timeline factory are required; everything else is optional.
pub struct ControllerBuilder {
    template: TemplateDescriptor,
    config: ControllerConfig,
    graphics: Option<Box<dyn GraphicFactory>>,
    timelines: Option<Box<dyn TimelineFactory>>,
    resolver: Option<Box<dyn DataResolver>>,
    observer: Option<Box<dyn HostObserver>>,
    hooks: Option<Box<dyn RemoteHooks>>,
}

impl ControllerBuilder {
    pub fn new(template: TemplateDescriptor) -> Self {
        Self {
            template,
            config: ControllerConfig::default(),
            graphics: None,
            timelines: None,
            resolver: None,
            observer: None,
            hooks: None,
        }
    }

    pub fn config(mut self, config: ControllerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn graphics(mut self, factory: impl GraphicFactory + 'static) -> Self {
        self.graphics = Some(Box::new(factory));
        self
    }

    pub fn timelines(mut self, factory: impl TimelineFactory + 'static) -> Self {
        self.timelines = Some(Box::new(factory));
        self
    }

    /// Source of external data. Defaults to an empty payload.
    pub fn resolver(mut self, resolver: impl DataResolver + 'static) -> Self {
        self.resolver = Some(Box::new(resolver));
        self
    }

    pub fn observer(mut self, observer: impl HostObserver + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn hooks(mut self, hooks: impl RemoteHooks + 'static) -> Self {
        self.hooks = Some(Box::new(hooks));
        self
    }

    pub fn build(self) -> OnairResult<Controller> {
        self.template.validate()?;
        let graphics = self
            .graphics
            .ok_or_else(|| OnairError::validation("controller needs a graphic factory"))?;
        let timelines = self
            .timelines
            .ok_or_else(|| OnairError::validation("controller needs a timeline factory"))?;

        Ok(Controller::assemble(Parts {
            template: self.template,
            config: self.config,
            graphics,
            timelines,
            resolver: self
                .resolver
                .unwrap_or_else(|| Box::new(StaticData::default())),
            observer: self.observer,
            hooks: self.hooks,
        }))
    }
}
