use futures::channel::oneshot;

/// Capability of graphics that defer their first play until their own setup completes
/// (fonts loaded, images decoded, intro tweens built).
pub trait ReadyGate {
    /// Called once per initial-play request. The graphic answers through `grant`, right away
    /// or at any later point.
    fn will_play(&mut self, grant: PlayGrant);
}

/// Single-shot answer to an initial-play request.
///
/// Dropping a grant without answering counts as declining it.
#[derive(Debug)]
pub struct PlayGrant {
    tx: oneshot::Sender<bool>,
}

impl PlayGrant {
    pub fn pair() -> (PlayGrant, PendingGrant) {
        let (tx, rx) = oneshot::channel();
        (PlayGrant { tx }, PendingGrant { rx })
    }

    /// Ready to play.
    pub fn ready(self) {
        self.grant(true);
    }

    /// Answer the request. `false` declines the play; the controller does not ask again
    /// until the next transition into playing.
    pub fn grant(self, should_play: bool) {
        // The controller may have moved on (remove, a newer request); the answer is moot then.
        let _ = self.tx.send(should_play);
    }

    pub fn decline(self) {
        self.grant(false);
    }
}

/// Outcome of polling a [`PendingGrant`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GrantPoll {
    /// No answer yet.
    Pending,
    Granted,
    Declined,
    /// The grant was dropped unanswered.
    Abandoned,
}

/// Controller side of a [`PlayGrant`].
#[derive(Debug)]
pub struct PendingGrant {
    rx: oneshot::Receiver<bool>,
}

impl PendingGrant {
    /// Non-blocking check for an answer. Once an answer was observed the pending grant is
    /// spent and further polls report [`GrantPoll::Abandoned`].
    pub fn poll(&mut self) -> GrantPoll {
        match self.rx.try_recv() {
            Ok(None) => GrantPoll::Pending,
            Ok(Some(true)) => GrantPoll::Granted,
            Ok(Some(false)) => GrantPoll::Declined,
            Err(oneshot::Canceled) => GrantPoll::Abandoned,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/graphic/gate.rs"]
mod tests;
