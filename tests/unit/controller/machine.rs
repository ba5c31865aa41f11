use super::*;
use crate::script::stagehand::{GateMode, Stagehand};
use crate::timeline::memory::{TimelineCall, TimelineLog};
use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

fn rig(gate: GateMode) -> (Controller, Stagehand, TimelineLog) {
    let hand = Stagehand::new(gate);
    let log = TimelineLog::new();
    let controller = Controller::builder(TemplateDescriptor::new("probe"))
        .graphics(hand.clone())
        .timelines(log.clone())
        .build()
        .unwrap();
    (controller, hand, log)
}

#[test]
fn commands_before_attach_move_state_without_side_effects() {
    let (mut c, hand, log) = rig(GateMode::None);
    c.play();
    c.pause();

    assert_eq!(c.state(), Some(PlaybackState::Paused));
    assert!(!c.snapshot().started);
    assert!(log.events().is_empty());
    assert_eq!(hand.renders(), 0);
}

#[test]
fn play_before_attach_is_not_replayed_on_attach() {
    let (mut c, _hand, log) = rig(GateMode::None);
    c.play();
    c.attach();

    assert_eq!(log.count(TimelineCall::Play), 0);
    assert!(!c.snapshot().started);
}

#[test]
fn render_fault_latches_errored_and_silences_timeline() {
    let (mut c, hand, log) = rig(GateMode::None);
    c.attach();
    hand.fail_next_render("missing font");
    c.play();

    assert!(c.snapshot().errored);
    assert_eq!(c.state(), Some(PlaybackState::Playing));
    assert_eq!(log.count(TimelineCall::Play), 0);

    c.pause();
    assert_eq!(c.state(), Some(PlaybackState::Paused));
    assert_eq!(log.count(TimelineCall::Pause), 0);
    assert!(c.snapshot().errored);
}

#[test]
fn grant_arriving_after_pause_is_discarded() {
    let (mut c, hand, log) = rig(GateMode::Hold);
    c.attach();
    c.play();
    assert!(c.is_awaiting_grant());

    c.pause();
    assert!(hand.is_holding());
    assert!(hand.release(true));
    c.poll_grant();

    assert!(!c.is_awaiting_grant());
    assert!(!c.snapshot().started);
    assert_eq!(log.count(TimelineCall::Play), 0);
    assert_eq!(log.count(TimelineCall::Pause), 1);
}

#[test]
fn grant_is_picked_up_by_the_next_command() {
    let (mut c, hand, log) = rig(GateMode::Hold);
    c.attach();
    c.play();
    assert!(hand.release(true));

    c.load();
    assert!(c.snapshot().started);
    assert!(c.snapshot().loaded);
    assert_eq!(log.count(TimelineCall::Play), 1);
}

#[test]
fn remove_discards_pending_grant() {
    let (mut c, hand, log) = rig(GateMode::Hold);
    c.attach();
    c.play();
    c.remove();
    assert!(!c.is_awaiting_grant());

    hand.release(true);
    c.poll_grant();
    assert!(!c.snapshot().started);
    assert_eq!(log.count(TimelineCall::Play), 0);
}

#[test]
fn abandoned_grant_counts_as_declined() {
    let (mut c, hand, log) = rig(GateMode::Hold);
    c.attach();
    c.play();
    assert!(hand.abandon());
    c.poll_grant();

    assert!(!c.is_awaiting_grant());
    assert!(!c.snapshot().started);
    assert_eq!(log.count(TimelineCall::Play), 0);
}

#[test]
fn graphic_requests_apply_after_the_cycle() {
    let (mut c, hand, log) = rig(GateMode::None);
    c.attach();
    c.play();
    c.stop();

    hand.request_remove().unwrap();
    c.poll_grant();

    assert_eq!(log.allocated(), 2);
    assert_eq!(log.count_for(0, TimelineCall::Dispose), 1);
    assert!(!c.snapshot().started);
    assert_eq!(c.state(), Some(PlaybackState::Stopped));
}

#[test]
fn props_follow_snapshot() {
    let (mut c, _hand, _log) = rig(GateMode::None);
    c.attach();
    c.update(Some(
        HostData::from_json_str(r#"{ "_bg": true, "_fit": 1 }"#).unwrap(),
    ));

    let props = c.props();
    assert!(props.should_render);
    assert!(props.is_preview);
    assert!(props.fit);
    assert!(!props.did_start);
    assert_eq!(props.stage.opacity, 0.0);

    c.play();
    c.pause();
    let props = c.props();
    assert!(props.is_paused);
    assert!(props.did_start);
    assert_eq!(props.stage.opacity, 1.0);

    c.stop();
    assert!(!c.props().should_render);
}

#[test]
fn production_hides_preview_unless_payload_asks() {
    let hand = Stagehand::new(GateMode::None);
    let mut c = Controller::builder(TemplateDescriptor::new("probe"))
        .config(ControllerConfig {
            production: true,
            ..ControllerConfig::default()
        })
        .graphics(hand)
        .timelines(TimelineLog::new())
        .build()
        .unwrap();

    assert!(!c.props().is_preview);
    c.update(Some(HostData::from_json_str(r#"{ "_preview": true }"#).unwrap()));
    assert!(c.props().is_preview);
}

#[test]
fn hooks_are_scoped_to_attach_and_dispose() {
    #[derive(Clone, Default)]
    struct Hooks(Rc<RefCell<Vec<String>>>);

    impl RemoteHooks for Hooks {
        fn install(&mut self, controller: &str) {
            self.0.borrow_mut().push(format!("install {controller}"));
        }

        fn uninstall(&mut self, controller: &str) {
            self.0.borrow_mut().push(format!("uninstall {controller}"));
        }
    }

    let hooks = Hooks::default();
    let log = TimelineLog::new();
    let mut c = Controller::builder(TemplateDescriptor::new("probe"))
        .config(ControllerConfig {
            name: Some("bug".to_string()),
            ..ControllerConfig::default()
        })
        .graphics(Stagehand::new(GateMode::None))
        .timelines(log.clone())
        .hooks(hooks.clone())
        .build()
        .unwrap();

    assert_eq!(c.handle_trigger("F2"), None);
    c.attach();
    assert_eq!(c.handle_trigger("F2"), Some(RemoteKey::Play));
    c.dispose();

    assert_eq!(
        *hooks.0.borrow(),
        vec!["install bug".to_string(), "uninstall bug".to_string()]
    );
    assert_eq!(log.count_for(0, TimelineCall::Clear), 1);
    assert_eq!(log.count_for(0, TimelineCall::Dispose), 1);
}

#[test]
fn builder_requires_factories() {
    let err = Controller::builder(TemplateDescriptor::new("probe"))
        .timelines(TimelineLog::new())
        .build()
        .err()
        .unwrap();
    assert!(err.to_string().contains("graphic factory"));

    let err = Controller::builder(TemplateDescriptor::new("probe"))
        .graphics(Stagehand::new(GateMode::None))
        .build()
        .err()
        .unwrap();
    assert!(err.to_string().contains("timeline factory"));
}

#[test]
fn takeover_on_mount_keeps_auto_preview_from_playing() {
    let hand = Stagehand::new(GateMode::None);
    let log = TimelineLog::new();
    hand.take_over_on_next_render();
    let mut c = Controller::builder(TemplateDescriptor::new("probe"))
        .config(ControllerConfig {
            auto_preview: true,
            ..ControllerConfig::default()
        })
        .graphics(hand.clone())
        .timelines(log.clone())
        .build()
        .unwrap();
    c.attach();

    assert_eq!(c.state(), Some(PlaybackState::Playing));
    assert!(c.snapshot().prevent_autoplay);
    assert!(c.snapshot().started);
    assert_eq!(log.count(TimelineCall::Play), 0);
}

#[test]
fn takeover_raised_while_rendering_play_applies_before_the_timeline() {
    let (mut c, hand, log) = rig(GateMode::Immediate);
    c.attach();
    hand.take_over_on_next_render();
    c.play();

    assert!(c.snapshot().prevent_autoplay);
    assert!(c.snapshot().started);
    assert_eq!(hand.gate_requests(), 1);
    assert_eq!(log.count(TimelineCall::Play), 0);
}

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn repeated_faults_log_one_error() {
    let out = Captured::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer({
            let out = out.clone();
            move || out.clone()
        })
        .with_ansi(false)
        .with_max_level(tracing::Level::ERROR)
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let (mut c, hand, _log) = rig(GateMode::None);
        c.attach();
        for _ in 0..3 {
            hand.fail_next_render("missing font");
            c.update(None);
        }
        assert!(c.snapshot().errored);
    });

    let text = String::from_utf8(out.0.lock().unwrap().clone()).unwrap();
    assert_eq!(text.matches("graphic failed to render").count(), 1);
}
