use super::*;
use serde_json::json;

fn map(v: Value) -> DataMap {
    match v {
        Value::Object(m) => m,
        _ => panic!("expected object"),
    }
}

#[test]
fn identity_not_contents_decides_sameness() {
    let a = HostData::new(map(json!({ "f0": "x" })));
    let b = a.clone();
    let c = HostData::new(map(json!({ "f0": "x" })));

    assert!(HostData::same_ref(&a, &b));
    assert!(!HostData::same_ref(&a, &c));
    assert_eq!(a, c);
}

#[test]
fn merge_overlay_wins() {
    let base = map(json!({ "title": "Preview", "subtitle": "Default" }));
    let overlay = map(json!({ "title": "Live" }));
    let out = merge(&base, &overlay);
    assert_eq!(out["title"], "Live");
    assert_eq!(out["subtitle"], "Default");
}

#[test]
fn flag_requires_literal_true() {
    let d = HostData::new(map(json!({ "_preview": true, "_autoPreview": "yes" })));
    assert!(d.flag(keys::PREVIEW));
    assert!(!d.flag(keys::AUTO_PREVIEW));
    assert!(!d.flag("missing"));
}

#[test]
fn truthiness_matches_loose_rules() {
    let d = HostData::new(map(json!({
        "null": null,
        "zero": 0,
        "one": 1,
        "empty": "",
        "text": "a",
        "list": [],
        "no": false,
    })));
    assert!(!d.truthy("null"));
    assert!(!d.truthy("zero"));
    assert!(d.truthy("one"));
    assert!(!d.truthy("empty"));
    assert!(d.truthy("text"));
    assert!(d.truthy("list"));
    assert!(!d.truthy("no"));
    assert!(!d.truthy("absent"));
}

#[test]
fn from_json_str_requires_object() {
    let d = HostData::from_json_str(r#"{ "f0": 1 }"#).unwrap();
    assert_eq!(d["f0"], 1);

    let err = HostData::from_json_str("[1, 2]").unwrap_err();
    assert!(err.to_string().contains("an array"));
}

#[test]
fn display_is_compact_json() {
    let d = HostData::new(map(json!({ "a": 1 })));
    assert_eq!(d.to_string(), r#"{"a":1}"#);
}
