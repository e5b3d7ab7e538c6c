use serde_json::{Value, json};
use shifttrack::normalize::alias::{is_usable, pick, pick_f64, pick_i64, pick_text};
use shifttrack::normalize::{ResponseShape, classify, first_record, normalize_list};

#[test]
fn test_empty_inputs_give_no_records() {
    for raw in [
        Value::Null,
        json!(""),
        json!({}),
        json!({ "foo": 1 }),
        json!({ "data": "not a list" }),
        json!(42),
        json!(true),
    ] {
        assert!(normalize_list(&raw).is_empty(), "expected no records for {raw}");
    }
}

#[test]
fn test_array_length_is_preserved() {
    let raw = json!([1, null, { "a": 1 }, { "json": { "b": 2 } }, "x"]);
    assert_eq!(normalize_list(&raw).len(), 5);
    assert!(normalize_list(&json!([])).is_empty());
}

#[test]
fn test_data_container_is_unwrapped() {
    let raw = json!({ "data": [{ "id": 1 }, { "id": 2 }] });
    assert_eq!(normalize_list(&raw), vec![json!({ "id": 1 }), json!({ "id": 2 })]);
}

#[test]
fn test_container_keys_follow_priority() {
    let raw = json!({ "users": [{ "id": "u" }], "rows": [{ "id": "r" }], "data": "text" });
    assert_eq!(classify(&raw), ResponseShape::Wrapped("rows"));
    assert_eq!(normalize_list(&raw), vec![json!({ "id": "r" })]);

    let raw = json!({ "output": [{ "id": "o" }] });
    assert_eq!(normalize_list(&raw), vec![json!({ "id": "o" })]);
}

#[test]
fn test_item_envelope_is_unwrapped() {
    let raw = json!([{ "json": { "id": 7 } }, { "id": 8 }]);
    assert_eq!(normalize_list(&raw), vec![json!({ "id": 7 }), json!({ "id": 8 })]);

    let wrapped = json!({ "shifts": [{ "json": { "id": 9 } }] });
    assert_eq!(normalize_list(&wrapped), vec![json!({ "id": 9 })]);

    // only objects count as envelopes
    let raw = json!([{ "json": 0 }, { "json": "x", "id": 3 }, { "json": null }]);
    assert_eq!(
        normalize_list(&raw),
        vec![
            json!({ "json": 0 }),
            json!({ "json": "x", "id": 3 }),
            json!({ "json": null })
        ]
    );
}

#[test]
fn test_classify_reports_each_branch() {
    assert_eq!(classify(&Value::Null), ResponseShape::Empty);
    assert_eq!(classify(&json!({})), ResponseShape::Empty);
    assert_eq!(classify(&json!([])), ResponseShape::List);
    assert_eq!(classify(&json!({ "items": [] })), ResponseShape::Wrapped("items"));
    assert_eq!(classify(&json!({ "foo": 1 })), ResponseShape::Unrecognized);
}

#[test]
fn test_first_record_falls_back_to_payload() {
    assert_eq!(first_record(&json!([{ "id": 1 }, { "id": 2 }])), json!({ "id": 1 }));
    assert_eq!(first_record(&json!({ "id": "5" })), json!({ "id": "5" }));
    assert_eq!(first_record(&json!([])), json!([]));
}

#[test]
fn test_usable_values() {
    assert!(!is_usable(&Value::Null));
    assert!(!is_usable(&json!(false)));
    assert!(!is_usable(&json!("   ")));
    assert!(is_usable(&json!(0)));
    assert!(is_usable(&json!(true)));
    assert!(is_usable(&json!("x")));
}

#[test]
fn test_pick_takes_first_usable_alias() {
    let record = json!({ "user_name": "", "nombre": null, "name": "Luis" });
    assert_eq!(
        pick_text(&record, &["user_name", "nombre", "name"]).as_deref(),
        Some("Luis")
    );

    let record = json!({ "rol": "Admin", "role": "User" });
    assert_eq!(pick(&record, &["rol", "role"]), Some(&json!("Admin")));
    assert_eq!(pick(&record, &["missing"]), None);
}

#[test]
fn test_numeric_picks_accept_strings() {
    let record = json!({ "lat": "12.5", "secs": 3600.9, "bad": "north" });
    assert_eq!(pick_f64(&record, &["lat"]), Some(12.5));
    assert_eq!(pick_i64(&record, &["secs"]), Some(3600));
    assert_eq!(pick_f64(&record, &["bad"]), None);
    assert_eq!(pick_text(&json!({ "id": 12 }), &["id"]).as_deref(), Some("12"));
}
