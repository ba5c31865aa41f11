use std::cell::RefCell;
use std::rc::Rc;

use crate::timeline::handle::{Timeline, TimelineFactory};

/// A call made on a timeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimelineCall {
    Play,
    Pause,
    Clear,
    Dispose,
}

/// One recorded call, tagged with the allocation id of the timeline it hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct TimelineEvent {
    pub timeline: u64,
    pub call: TimelineCall,
}

#[derive(Debug, Default)]
struct LogInner {
    allocated: u64,
    events: Vec<TimelineEvent>,
}

/// Factory for [`InMemoryTimeline`]s that records every call they receive.
///
/// Clones share the same log, so a test can keep one while the controller owns another.
#[derive(Clone, Debug, Default)]
pub struct TimelineLog {
    inner: Rc<RefCell<LogInner>>,
}

impl TimelineLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// All calls in the order they were made.
    pub fn events(&self) -> Vec<TimelineEvent> {
        self.inner.borrow().events.clone()
    }

    /// Number of timelines allocated so far. Ids run from `0` to `allocated() - 1`.
    pub fn allocated(&self) -> u64 {
        self.inner.borrow().allocated
    }

    /// Id of the most recently allocated timeline, if any.
    pub fn current(&self) -> Option<u64> {
        self.allocated().checked_sub(1)
    }

    pub fn count(&self, call: TimelineCall) -> usize {
        self.inner
            .borrow()
            .events
            .iter()
            .filter(|e| e.call == call)
            .count()
    }

    pub fn count_for(&self, timeline: u64, call: TimelineCall) -> usize {
        self.inner
            .borrow()
            .events
            .iter()
            .filter(|e| e.timeline == timeline && e.call == call)
            .count()
    }

    fn allocate(&self) -> u64 {
        let mut inner = self.inner.borrow_mut();
        let id = inner.allocated;
        inner.allocated += 1;
        id
    }

    fn record(&self, timeline: u64, call: TimelineCall) {
        self.inner
            .borrow_mut()
            .events
            .push(TimelineEvent { timeline, call });
    }
}

impl TimelineFactory for TimelineLog {
    fn create_paused(&mut self) -> Box<dyn Timeline> {
        Box::new(InMemoryTimeline::new(self.clone()))
    }
}

/// Timeline without an animation engine behind it, for tests and headless playout.
#[derive(Debug)]
pub struct InMemoryTimeline {
    id: u64,
    log: TimelineLog,
    playing: bool,
    disposed: bool,
}

impl InMemoryTimeline {
    pub fn new(log: TimelineLog) -> Self {
        let id = log.allocate();
        Self {
            id,
            log,
            playing: false,
            disposed: false,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl Timeline for InMemoryTimeline {
    fn play(&mut self) {
        self.playing = true;
        self.log.record(self.id, TimelineCall::Play);
    }

    fn pause(&mut self) {
        self.playing = false;
        self.log.record(self.id, TimelineCall::Pause);
    }

    fn clear(&mut self) {
        self.log.record(self.id, TimelineCall::Clear);
    }

    fn dispose(&mut self) {
        self.playing = false;
        self.disposed = true;
        self.log.record(self.id, TimelineCall::Dispose);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/memory.rs"]
mod tests;
