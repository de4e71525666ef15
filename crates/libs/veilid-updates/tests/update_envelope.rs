use serde_json::{json, Value as JsonValue};
use veilid_types::{ToJson, TypedKey, VeilidError};
use veilid_updates::{
    decode_message, decode_update, AttachmentState, NodeMessage, ResponseError, VeilidApiError,
    VeilidLogLevel, VeilidUpdate, VeilidUpdateKind,
};

fn example_for(kind: VeilidUpdateKind) -> JsonValue {
    match kind {
        VeilidUpdateKind::Log => json!({
            "kind": "Log",
            "log_level": "Info",
            "message": "attached",
            "backtrace": null,
        }),
        VeilidUpdateKind::AppMessage => {
            json!({ "kind": "AppMessage", "sender": null, "message": "aGVsbG8" })
        }
        VeilidUpdateKind::AppCall => json!({
            "kind": "AppCall",
            "sender": "VLD0:abcd",
            "message": "cGluZw",
            "operation_id": "42",
        }),
        VeilidUpdateKind::Attachment => json!({
            "kind": "Attachment",
            "state": "AttachedGood",
            "public_internet_ready": true,
            "local_network_ready": false,
        }),
        VeilidUpdateKind::Network => json!({
            "kind": "Network",
            "started": true,
            "bps_down": "0",
            "bps_up": "0",
            "peers": [],
        }),
        VeilidUpdateKind::Config => {
            json!({ "kind": "Config", "config": { "program_name": "veilid-server" } })
        }
        VeilidUpdateKind::RouteChange => json!({
            "kind": "RouteChange",
            "dead_routes": ["r1"],
            "dead_remote_routes": ["r2", "r3"],
        }),
        VeilidUpdateKind::ValueChange => json!({
            "kind": "ValueChange",
            "key": "VLD0:rec",
            "subkeys": [1, 2],
            "count": 4,
            "value": { "seq": 7, "data": "AQID", "writer": "w1" },
        }),
        VeilidUpdateKind::Shutdown => json!({ "kind": "Shutdown" }),
    }
}

#[test]
fn every_kind_dispatches_to_its_variant() {
    for kind in VeilidUpdateKind::ALL {
        let update = decode_update(&example_for(kind))
            .unwrap_or_else(|err| panic!("{kind} example should decode: {err}"));
        assert_eq!(update.kind(), kind);
        assert_eq!(update.payload_is_empty(), kind == VeilidUpdateKind::Shutdown);
    }
}

#[test]
fn bogus_kind_is_unknown() {
    let err = decode_update(&json!({ "kind": "Bogus" })).expect_err("bogus kind");
    assert_eq!(err, VeilidError::UnknownUpdateKind { kind: "Bogus".into() });
}

#[test]
fn shutdown_example() {
    let update = decode_update(&json!({ "kind": "Shutdown" })).expect("shutdown");
    assert_eq!(update, VeilidUpdate::Shutdown);
}

#[test]
fn app_message_example() {
    let update = decode_update(&example_for(VeilidUpdateKind::AppMessage)).expect("app message");
    let VeilidUpdate::AppMessage(message) = update else {
        panic!("expected an app message");
    };
    assert_eq!(message.sender, None);
    assert_eq!(message.message, b"hello");
}

#[test]
fn payload_fields_are_siblings_of_kind() {
    let VeilidUpdate::Log(log) =
        decode_update(&example_for(VeilidUpdateKind::Log)).expect("log")
    else {
        panic!("expected a log update");
    };
    assert_eq!(log.log_level, VeilidLogLevel::Info);
    assert_eq!(log.message, "attached");

    let VeilidUpdate::Attachment(attachment) =
        decode_update(&example_for(VeilidUpdateKind::Attachment)).expect("attachment")
    else {
        panic!("expected an attachment update");
    };
    assert_eq!(attachment.state, AttachmentState::AttachedGood);

    let nested = json!({ "kind": "Log", "log": { "log_level": "Info", "message": "x" } });
    let err = decode_update(&nested).expect_err("payload is not nested");
    assert_eq!(err, VeilidError::MissingField { field: "log_level" });
}

#[test]
fn malformed_nested_encoding_fails_the_whole_update() {
    let mut input = example_for(VeilidUpdateKind::ValueChange);
    input["value"]["data"] = json!("AQI=");
    let err = decode_update(&input).expect_err("padded data");
    assert!(matches!(err, VeilidError::MalformedEncoding { .. }));
    assert!(!err.is_structural());

    let mut input = example_for(VeilidUpdateKind::AppCall);
    input["message"] = json!("a");
    let err = decode_update(&input).expect_err("length 1 is never valid");
    assert!(matches!(err, VeilidError::MalformedEncoding { .. }));
}

#[test]
fn field_errors_name_the_offending_wire_field() {
    let mut input = example_for(VeilidUpdateKind::Network);
    input["bps_down"] = json!(-1);
    let err = decode_update(&input).expect_err("negative rate");
    assert_eq!(
        err,
        VeilidError::InvalidField { field: "bps_down", expected: "an unsigned integer" }
    );

    let mut input = example_for(VeilidUpdateKind::AppCall);
    input["sender"] = json!(5);
    let err = decode_update(&input).expect_err("numeric sender");
    assert_eq!(err, VeilidError::InvalidField { field: "sender", expected: "a string" });

    let mut input = example_for(VeilidUpdateKind::ValueChange);
    input["value"]["seq"] = json!("seven");
    let err = decode_update(&input).expect_err("non-numeric seq");
    assert!(matches!(err, VeilidError::InvalidField { field: "seq", .. }));
}

#[test]
fn value_change_keeps_typed_key_and_subkeys() {
    let VeilidUpdate::ValueChange(change) =
        decode_update(&example_for(VeilidUpdateKind::ValueChange)).expect("value change")
    else {
        panic!("expected a value change");
    };
    assert_eq!(change.key, TypedKey::new("VLD0:rec"));
    assert_eq!(change.subkeys.len(), 2);
    assert_eq!(change.value.data, vec![1, 2, 3]);
}

#[test]
fn updates_re_emit_their_wire_form() {
    for kind in [
        VeilidUpdateKind::AppMessage,
        VeilidUpdateKind::Attachment,
        VeilidUpdateKind::RouteChange,
        VeilidUpdateKind::Shutdown,
    ] {
        let input = example_for(kind);
        let update = decode_update(&input).expect("decodes");
        assert_eq!(update.to_json(), input, "{kind}");
    }
}

#[test]
fn ndjson_lines_split_into_responses_and_updates() {
    let stream = concat!(
        r#"{"type":"Update","kind":"Attachment","state":"Attaching","public_internet_ready":false,"local_network_ready":false}"#,
        "\n",
        r#"{"type":"Response","id":1,"op":"Attach","value":null}"#,
        "\n",
        r#"{"type":"Response","id":2,"op":"GetState","error":{"kind":"NotInitialized"}}"#,
        "\n",
    );

    let messages: Vec<NodeMessage> = stream
        .lines()
        .map(|line| {
            let value: JsonValue = serde_json::from_str(line).expect("json line");
            decode_message(&value).expect("message")
        })
        .collect();

    assert_eq!(messages.len(), 3);
    assert_eq!(
        messages[0].as_update().map(VeilidUpdate::kind),
        Some(VeilidUpdateKind::Attachment)
    );
    let NodeMessage::Response(attach) = &messages[1] else {
        panic!("expected a response");
    };
    assert_eq!(attach.result().expect("attach ok"), &JsonValue::Null);
    let NodeMessage::Response(get_state) = &messages[2] else {
        panic!("expected a response");
    };
    assert_eq!(get_state.id, 2);
    assert_eq!(
        get_state.result(),
        Err(ResponseError::Api(VeilidApiError::NotInitialized))
    );
}
