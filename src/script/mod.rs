//! Headless playout scripts.
//!
//! A script is a line-oriented list of host events replayed against a controller driving a
//! [`ScriptedGraphic`](stagehand::ScriptedGraphic). Lines that are not directives are remote
//! triggers (`F2`, `CMD_PLAY`, `play`, ...).
//!
//! ```text
//! # comment
//! F3
//! update {"f0": "Jane Doe"}
//! play
//! # answer the held ready-gate grant, decline it, or drop it unanswered
//! ready
//! decline
//! abandon
//! host-data {"f0": "Live", "_bg": "#000"}
//! # same reference again, not a change
//! host-data same
//! host-data none
//! # next render fails
//! fault broken font
//! # graphic requests remove
//! outro
//! disable-autoplay
//! # graphic disables autoplay itself on its next render
//! takeover
//! remove
//! poll
//! ```

pub(crate) mod stagehand;

use crate::controller::machine::Controller;
use crate::data::payload::HostData;
use crate::foundation::error::{OnairError, OnairResult};
use stagehand::Stagehand;

/// One parsed script line.
#[derive(Clone, Debug, PartialEq)]
pub enum ScriptStep {
    Trigger(String),
    Update(HostData),
    Remove,
    DisableAutoplay,
    HostData(Option<HostData>),
    HostDataSame,
    Grant(bool),
    Abandon,
    Fault(String),
    Outro,
    Takeover,
    Poll,
}

pub fn parse_script(src: &str) -> OnairResult<Vec<ScriptStep>> {
    let mut steps = Vec::new();
    for (idx, raw) in src.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let at = |e: OnairError| OnairError::validation(format!("script line {}: {e}", idx + 1));

        let step = match word.to_ascii_lowercase().as_str() {
            "update" if !rest.is_empty() => {
                ScriptStep::Update(HostData::from_json_str(rest).map_err(at)?)
            }
            "remove" => ScriptStep::Remove,
            "disable-autoplay" => ScriptStep::DisableAutoplay,
            "host-data" => match rest {
                "none" => ScriptStep::HostData(None),
                "same" => ScriptStep::HostDataSame,
                "" => return Err(at(OnairError::validation("host-data needs a payload"))),
                json => ScriptStep::HostData(Some(HostData::from_json_str(json).map_err(at)?)),
            },
            "ready" => ScriptStep::Grant(true),
            "decline" => ScriptStep::Grant(false),
            "abandon" => ScriptStep::Abandon,
            "fault" if rest.is_empty() => ScriptStep::Fault("scripted fault".to_string()),
            "fault" => ScriptStep::Fault(rest.to_string()),
            "outro" => ScriptStep::Outro,
            "takeover" => ScriptStep::Takeover,
            "poll" => ScriptStep::Poll,
            _ => ScriptStep::Trigger(line.to_string()),
        };
        steps.push(step);
    }
    Ok(steps)
}

/// What happened while replaying a script.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct ScriptReport {
    pub steps: usize,
    /// Triggers the controller ignored.
    pub ignored: Vec<String>,
    /// Grant directives with no grant held.
    pub unanswered: usize,
    /// Initial-play requests the graphic received.
    pub gate_requests: u64,
    /// A grant is still held when the script ends.
    pub holding: bool,
}

/// Replay `steps` against `controller`. Grant directives go through `hand`; the controller
/// picks the answer up right away, as a host event loop would.
pub fn run_script(
    controller: &mut Controller,
    hand: &Stagehand,
    steps: &[ScriptStep],
) -> OnairResult<ScriptReport> {
    let mut report = ScriptReport::default();
    let mut host = controller.host_data().cloned();

    for step in steps {
        report.steps += 1;
        match step {
            ScriptStep::Trigger(trigger) => {
                if controller.handle_trigger(trigger).is_none() {
                    report.ignored.push(trigger.clone());
                }
            }
            ScriptStep::Update(data) => controller.update(Some(data.clone())),
            ScriptStep::Remove => controller.remove(),
            ScriptStep::DisableAutoplay => controller.disable_autoplay(),
            ScriptStep::HostData(data) => {
                host = data.clone();
                controller.on_host_data_changed(host.clone());
            }
            ScriptStep::HostDataSame => controller.on_host_data_changed(host.clone()),
            ScriptStep::Grant(should_play) => {
                if !hand.release(*should_play) {
                    report.unanswered += 1;
                }
                controller.poll_grant();
            }
            ScriptStep::Abandon => {
                if !hand.abandon() {
                    report.unanswered += 1;
                }
                controller.poll_grant();
            }
            ScriptStep::Fault(msg) => hand.fail_next_render(msg.clone()),
            ScriptStep::Outro => {
                hand.request_remove()?;
                controller.poll_grant();
            }
            ScriptStep::Takeover => hand.take_over_on_next_render(),
            ScriptStep::Poll => controller.poll_grant(),
        }
    }
    report.gate_requests = hand.gate_requests();
    report.holding = hand.is_holding();
    Ok(report)
}

#[cfg(test)]
#[path = "../../tests/unit/script/mod.rs"]
mod tests;
