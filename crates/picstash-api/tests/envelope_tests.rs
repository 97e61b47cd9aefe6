//! Tests for the response envelope and null sanitation.

use picstash_api::{Envelope, Status, strip_nulls};
use serde_json::{Value, json};

#[test]
fn strip_nulls_collapses_nested_nulls_to_absent() {
    let sanitized = strip_nulls(json!({
        "data": {"a": null, "b": [1, null, 3], "c": {"d": null}},
        "status": "success",
    }));

    // Null object entries vanish; null array elements stay positional so the
    // sequence keeps its length.
    assert_eq!(
        sanitized,
        json!({
            "data": {"b": [1, null, 3], "c": {}},
            "status": "success",
        })
    );
    assert_eq!(sanitized["data"]["b"].as_array().unwrap().len(), 3);

    // In typed form, both collapsed shapes read as "absent".
    let elements: Vec<Option<u32>> = serde_json::from_value(sanitized["data"]["b"].clone()).unwrap();
    assert_eq!(elements, vec![Some(1), None, Some(3)]);
}

#[test]
fn strip_nulls_preserves_structure_order_and_scalars() {
    let sanitized = strip_nulls(json!(["z", 1, true, [null, "a"], {"keep": "x", "drop": null}]));

    assert_eq!(
        sanitized,
        json!(["z", 1, true, [null, "a"], {"keep": "x"}])
    );
}

#[test]
fn strip_nulls_handles_deep_nesting() {
    let sanitized = strip_nulls(json!({
        "a": {"b": {"c": {"d": null, "e": [{"f": null, "g": 1}]}}},
    }));

    assert_eq!(sanitized, json!({"a": {"b": {"c": {"e": [{"g": 1}]}}}}));
}

#[test]
fn strip_nulls_passes_scalars_through() {
    assert_eq!(strip_nulls(json!(42)), json!(42));
    assert_eq!(strip_nulls(json!("text")), json!("text"));
    assert_eq!(strip_nulls(Value::Null), Value::Null);
}

#[test]
fn envelope_collects_extra_backend_fields() {
    let envelope: Envelope<Value> = serde_json::from_value(json!({
        "status": "success",
        "code": "0",
        "msg": "ok",
        "data": {"value": 1},
        "trace_id": "abc-123",
    }))
    .unwrap();

    assert!(envelope.is_success());
    assert_eq!(envelope.code.as_deref(), Some("0"));
    assert_eq!(envelope.data, Some(json!({"value": 1})));
    assert_eq!(envelope.extra["trace_id"], json!("abc-123"));
}

#[test]
fn envelope_status_defaults_to_success_when_absent() {
    let envelope: Envelope<Value> = serde_json::from_value(json!({"data": [1, 2]})).unwrap();

    assert_eq!(envelope.status, Status::Success);
    assert_eq!(envelope.data, Some(json!([1, 2])));
}

#[test]
fn envelope_status_round_trips_lowercase() {
    assert_eq!(serde_json::to_value(Status::Failure).unwrap(), json!("failure"));
    assert_eq!(
        serde_json::from_value::<Status>(json!("success")).unwrap(),
        Status::Success
    );
    assert_eq!(Status::Failure.to_string(), "failure");
}

#[test]
fn user_message_filters_empty_strings() {
    let with_message: Envelope<Value> =
        serde_json::from_value(json!({"status": "failure", "msg": "not found"})).unwrap();
    assert_eq!(with_message.user_message(), Some("not found"));

    let empty: Envelope<Value> =
        serde_json::from_value(json!({"status": "failure", "msg": ""})).unwrap();
    assert_eq!(empty.user_message(), None);

    let absent: Envelope<Value> = serde_json::from_value(json!({"status": "failure"})).unwrap();
    assert_eq!(absent.user_message(), None);
}

#[test]
fn sanitized_envelope_deserializes_into_typed_payload() {
    #[derive(Debug, PartialEq, serde::Deserialize)]
    struct Profile {
        name: String,
        nickname: Option<String>,
    }

    let sanitized = strip_nulls(json!({
        "status": "success",
        "data": {"name": "cat.png", "nickname": null},
    }));
    let envelope: Envelope<Profile> = serde_json::from_value(sanitized).unwrap();

    assert_eq!(
        envelope.into_data(),
        Some(Profile {
            name: "cat.png".to_string(),
            nickname: None,
        })
    );
}
