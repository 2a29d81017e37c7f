use parley_llm::{Message, Role};

#[test]
fn test_message_roles() {
    assert_eq!(Message::system("Be brief").role(), Role::System);
    assert_eq!(Message::human("Hello").role(), Role::User);
    assert_eq!(Message::ai("Hi there!").role(), Role::Assistant);
}

#[test]
fn test_message_content() {
    let msg = Message::human("Explain recursion");
    assert_eq!(msg.content(), "Explain recursion");
}

#[test]
fn test_message_serialization_human() {
    let msg = Message::human("Hello");
    let json = serde_json::to_string(&msg).unwrap();
    assert!(json.contains("\"role\":\"user\""));
    assert!(json.contains("Hello"));
}

#[test]
fn test_message_serialization_ai() {
    let msg = Message::ai("Response");
    let json = serde_json::to_string(&msg).unwrap();
    assert!(json.contains("\"role\":\"assistant\""));
}

#[test]
fn test_message_deserialization() {
    let json = r#"{"role":"user","content":"Test"}"#;
    let msg: Message = serde_json::from_str(json).unwrap();
    assert_eq!(msg, Message::human("Test"));
}
