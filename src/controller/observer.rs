use crate::foundation::core::PlaybackState;

/// Host listener for transport state changes.
///
/// Called once per genuine transition; repeating a command that lands in the current state
/// produces no call.
pub trait HostObserver {
    fn on_state_change(&mut self, state: PlaybackState);
}

impl<F> HostObserver for F
where
    F: FnMut(PlaybackState),
{
    fn on_state_change(&mut self, state: PlaybackState) {
        self(state)
    }
}
