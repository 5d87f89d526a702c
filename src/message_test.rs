use super::*;

// =============================================================
// Sender
// =============================================================

#[test]
fn sender_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Sender::User).unwrap(), "\"user\"");
    assert_eq!(serde_json::to_string(&Sender::Bot).unwrap(), "\"bot\"");
}

#[test]
fn sender_as_str_matches_wire_name() {
    assert_eq!(Sender::User.as_str(), "user");
    assert_eq!(Sender::Bot.as_str(), "bot");
}

#[test]
fn sender_rejects_unknown_name() {
    assert!(serde_json::from_str::<Sender>("\"system\"").is_err());
}

// =============================================================
// ChatMessage
// =============================================================

#[test]
fn message_decodes_server_shape() {
    let json = serde_json::json!({
        "sender": "bot",
        "text": "hello",
        "timestamp": "2025-01-02T03:04:05.000Z"
    });
    let msg: ChatMessage = serde_json::from_value(json).unwrap();
    assert_eq!(msg.sender, Sender::Bot);
    assert_eq!(msg.text, "hello");
    assert_eq!(msg.timestamp, "2025-01-02T03:04:05.000Z");
}

#[test]
fn message_missing_timestamp_defaults_empty() {
    let msg: ChatMessage = serde_json::from_str(r#"{"sender":"user","text":"hi"}"#).unwrap();
    assert_eq!(msg.timestamp, "");
}

#[test]
fn message_now_stamps_parseable_utc_time() {
    let msg = ChatMessage::now(Sender::User, "hi");
    assert_eq!(msg.text, "hi");
    let parsed = OffsetDateTime::parse(&msg.timestamp, &Rfc3339).unwrap();
    assert!(parsed.offset().is_utc());
}
