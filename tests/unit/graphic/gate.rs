use super::*;

#[test]
fn unanswered_grant_stays_pending() {
    let (_grant, mut pending) = PlayGrant::pair();
    assert_eq!(pending.poll(), GrantPoll::Pending);
    assert_eq!(pending.poll(), GrantPoll::Pending);
}

#[test]
fn ready_grants() {
    let (grant, mut pending) = PlayGrant::pair();
    grant.ready();
    assert_eq!(pending.poll(), GrantPoll::Granted);
}

#[test]
fn explicit_false_declines() {
    let (grant, mut pending) = PlayGrant::pair();
    grant.grant(false);
    assert_eq!(pending.poll(), GrantPoll::Declined);
}

#[test]
fn dropped_grant_is_abandoned() {
    let (grant, mut pending) = PlayGrant::pair();
    drop(grant);
    assert_eq!(pending.poll(), GrantPoll::Abandoned);
}

#[test]
fn answering_after_controller_moved_on_is_silent() {
    let (grant, pending) = PlayGrant::pair();
    drop(pending);
    grant.ready();
}
