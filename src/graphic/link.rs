use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Something a graphic asks of its controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GraphicRequest {
    /// The outro finished; reset for another take.
    Remove,
    /// The graphic drives its own timeline from now on.
    DisableAutoplay,
}

/// Callback channel from a graphic back to the controller that owns it.
///
/// Graphics may keep a clone and raise requests at any time; the controller applies them in
/// order once its current command cycle completes.
#[derive(Clone, Debug, Default)]
pub struct GraphicLink {
    queue: Rc<RefCell<VecDeque<GraphicRequest>>>,
}

impl GraphicLink {
    pub fn remove(&self) {
        self.queue.borrow_mut().push_back(GraphicRequest::Remove);
    }

    pub fn disable_autoplay(&self) {
        self.queue
            .borrow_mut()
            .push_back(GraphicRequest::DisableAutoplay);
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    pub(crate) fn pop(&self) -> Option<GraphicRequest> {
        self.queue.borrow_mut().pop_front()
    }

    /// Pull every queued `DisableAutoplay` out of the queue, leaving other requests in order.
    /// Returns whether there was one.
    pub(crate) fn take_disable_autoplay(&self) -> bool {
        let mut queue = self.queue.borrow_mut();
        let before = queue.len();
        queue.retain(|r| *r != GraphicRequest::DisableAutoplay);
        queue.len() != before
    }
}

#[cfg(test)]
#[path = "../../tests/unit/graphic/link.rs"]
mod tests;
