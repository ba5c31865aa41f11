use super::*;

#[test]
fn fresh_snapshot_has_no_state() {
    let snap = ControllerSnapshot::default();
    assert_eq!(snap.state, None);
    assert!(!snap.is_playing());
    assert!(!snap.is_paused());
    assert!(!snap.is_stopped());
    assert!(snap.data.is_empty());
}

#[test]
fn state_serializes_lowercase() {
    let s = serde_json::to_string(&PlaybackState::Playing).unwrap();
    assert_eq!(s, "\"playing\"");
    let back: PlaybackState = serde_json::from_str("\"paused\"").unwrap();
    assert_eq!(back, PlaybackState::Paused);
    assert_eq!(PlaybackState::Stopped.to_string(), "stopped");
}

#[test]
fn snapshot_serializes_data_as_object() {
    let mut map = crate::data::payload::DataMap::new();
    map.insert("title".to_string(), serde_json::json!("Breaking"));
    let mut snap = ControllerSnapshot::new(HostData::new(map));
    snap.state = Some(PlaybackState::Playing);

    let v = serde_json::to_value(&snap).unwrap();
    assert_eq!(v["state"], "playing");
    assert_eq!(v["data"]["title"], "Breaking");
    assert_eq!(v["started"], false);
}
