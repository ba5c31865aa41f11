use super::*;

#[test]
fn timelines_start_paused_with_sequential_ids() {
    let mut log = TimelineLog::new();
    assert_eq!(log.current(), None);

    let a = log.create_paused();
    let b = log.create_paused();
    drop((a, b));

    assert_eq!(log.allocated(), 2);
    assert_eq!(log.current(), Some(1));
    assert!(log.events().is_empty());
}

#[test]
fn calls_are_recorded_per_timeline() {
    let log = TimelineLog::new();
    let mut first = InMemoryTimeline::new(log.clone());
    let mut second = InMemoryTimeline::new(log.clone());

    first.play();
    assert!(first.is_playing());
    first.pause();
    second.play();
    first.clear();
    first.dispose();
    assert!(first.is_disposed());
    assert!(!first.is_playing());

    assert_eq!(log.count(TimelineCall::Play), 2);
    assert_eq!(log.count_for(first.id(), TimelineCall::Play), 1);
    assert_eq!(log.count_for(second.id(), TimelineCall::Dispose), 0);
    assert_eq!(
        log.events().last(),
        Some(&TimelineEvent {
            timeline: 0,
            call: TimelineCall::Dispose
        })
    );
}
