/// Animation sequence owned by a controller.
///
/// The controller never inspects a timeline. It only calls these four methods, at transport
/// transitions (`play`, `pause`) and when the handle is released (`clear`, then `dispose`).
/// Graphics fill the timeline with their own tweens while rendering.
pub trait Timeline {
    /// Start or resume the sequence.
    fn play(&mut self);
    /// Hold the sequence at its current position.
    fn pause(&mut self);
    /// Drop every tween from the sequence.
    fn clear(&mut self);
    /// Release engine resources. The handle is not used again afterwards.
    fn dispose(&mut self);
}

/// Allocates fresh, paused timelines: one at construction and one per `remove`.
pub trait TimelineFactory {
    fn create_paused(&mut self) -> Box<dyn Timeline>;
}

impl<F> TimelineFactory for F
where
    F: FnMut() -> Box<dyn Timeline>,
{
    fn create_paused(&mut self) -> Box<dyn Timeline> {
        self()
    }
}
