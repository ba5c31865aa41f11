use super::*;

#[test]
fn requests_come_out_in_order_across_clones() {
    let link = GraphicLink::default();
    let held = link.clone();

    held.disable_autoplay();
    link.remove();
    assert_eq!(link.pending(), 2);

    assert_eq!(link.pop(), Some(GraphicRequest::DisableAutoplay));
    assert_eq!(held.pop(), Some(GraphicRequest::Remove));
    assert_eq!(link.pop(), None);
    assert_eq!(held.pending(), 0);
}

#[test]
fn taking_disable_autoplay_keeps_other_requests_in_order() {
    let link = GraphicLink::default();
    link.remove();
    link.disable_autoplay();
    link.remove();

    assert!(link.take_disable_autoplay());
    assert!(!link.take_disable_autoplay());
    assert_eq!(link.pop(), Some(GraphicRequest::Remove));
    assert_eq!(link.pop(), Some(GraphicRequest::Remove));
    assert_eq!(link.pop(), None);
}
