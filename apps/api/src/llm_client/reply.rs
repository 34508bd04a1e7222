//! Reply shapes returned by the serving endpoint.
//!
//! The endpoint answers either in the chat-completions shape
//! (`choices[0].message.content`) or the legacy `predictions` shape. Anything
//! else is kept whole and stringified so normalization never has to fail.

use serde::Deserialize;
use serde_json::Value;

/// A decoded reply, classified once by shape at the client boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum InferenceReply {
    /// `choices[0].message.content` of a chat-completions reply.
    Chat(MessageContent),
    /// `predictions[0]` of a legacy reply.
    Legacy(Value),
    /// Unrecognized payload, kept whole.
    Unknown(Value),
}

/// The `content` field of a chat message.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageContent {
    Text(String),
    /// Multi-part content, e.g. reasoning blocks followed by a text block.
    Parts(Vec<Value>),
    Other(Value),
}

#[derive(Debug, Deserialize)]
struct ContentPart {
    #[serde(rename = "type")]
    part_type: String,
    #[serde(default)]
    text: Option<String>,
}

impl InferenceReply {
    pub fn from_value(raw: Value) -> Self {
        if let Some(content) =
            first_element(&raw, "choices").and_then(|c| c.pointer("/message/content"))
        {
            return InferenceReply::Chat(MessageContent::from(content.clone()));
        }
        if let Some(prediction) = first_element(&raw, "predictions") {
            return InferenceReply::Legacy(prediction.clone());
        }
        InferenceReply::Unknown(raw)
    }

    pub fn shape(&self) -> &'static str {
        match self {
            InferenceReply::Chat(_) => "chat",
            InferenceReply::Legacy(_) => "predictions",
            InferenceReply::Unknown(_) => "unknown",
        }
    }

    /// The model's text, extracted from whichever shape the reply has.
    pub fn content(&self) -> String {
        match self {
            InferenceReply::Chat(content) => content.text(),
            InferenceReply::Legacy(Value::String(s)) => s.clone(),
            InferenceReply::Legacy(other) => other.to_string(),
            InferenceReply::Unknown(raw) => raw.to_string(),
        }
    }
}

impl From<Value> for MessageContent {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => MessageContent::Text(s),
            Value::Array(parts) => MessageContent::Parts(parts),
            other => MessageContent::Other(other),
        }
    }
}

impl MessageContent {
    /// Text of the first `"type": "text"` part; falls back to the serialized
    /// list when there is no such part or its text is empty.
    pub fn text(&self) -> String {
        match self {
            MessageContent::Text(s) => s.clone(),
            MessageContent::Parts(parts) => parts
                .iter()
                .filter_map(|p| ContentPart::deserialize(p).ok())
                .find(|p| p.part_type == "text")
                .and_then(|p| p.text)
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| Value::Array(parts.clone()).to_string()),
            MessageContent::Other(value) => value.to_string(),
        }
    }
}

fn first_element<'a>(raw: &'a Value, key: &str) -> Option<&'a Value> {
    raw.get(key)?.as_array()?.first()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_chat_string_content() {
        let reply = InferenceReply::from_value(json!({
            "choices": [{"message": {"role": "assistant", "content": "hello"}}]
        }));
        assert_eq!(
            reply,
            InferenceReply::Chat(MessageContent::Text("hello".to_string()))
        );
        assert_eq!(reply.content(), "hello");
    }

    #[test]
    fn test_chat_parts_uses_first_text_part() {
        let reply = InferenceReply::from_value(json!({
            "choices": [{"message": {"content": [
                {"type": "reasoning", "summary": [{"type": "summary_text", "text": "thinking"}]},
                {"type": "text", "text": "{\"subject\":\"S\",\"body\":\"B\"}"},
                {"type": "text", "text": "ignored"}
            ]}}]
        }));
        assert_eq!(reply.content(), "{\"subject\":\"S\",\"body\":\"B\"}");
    }

    #[test]
    fn test_chat_parts_without_text_part_serializes_list() {
        let parts = json!([{"type": "reasoning", "summary": []}]);
        let reply = InferenceReply::from_value(json!({
            "choices": [{"message": {"content": parts.clone()}}]
        }));
        assert_eq!(reply.content(), parts.to_string());
    }

    #[test]
    fn test_chat_parts_with_empty_text_serializes_list() {
        let parts = json!([{"type": "text", "text": ""}]);
        let reply = InferenceReply::from_value(json!({
            "choices": [{"message": {"content": parts.clone()}}]
        }));
        assert_eq!(reply.content(), parts.to_string());
    }

    #[test]
    fn test_legacy_prediction_string() {
        let reply = InferenceReply::from_value(json!({"predictions": ["Subject line\nBody"]}));
        assert_eq!(reply, InferenceReply::Legacy(json!("Subject line\nBody")));
        assert_eq!(reply.content(), "Subject line\nBody");
    }

    #[test]
    fn test_legacy_prediction_object_is_serialized() {
        let reply =
            InferenceReply::from_value(json!({"predictions": [{"subject": "S", "body": "B"}]}));
        let decoded: Value = serde_json::from_str(&reply.content()).unwrap();
        assert_eq!(decoded, json!({"subject": "S", "body": "B"}));
    }

    #[test]
    fn test_empty_choices_falls_through_to_predictions() {
        let reply = InferenceReply::from_value(json!({"choices": [], "predictions": ["p"]}));
        assert_eq!(reply.content(), "p");
    }

    #[test]
    fn test_unknown_shape_stringifies_payload() {
        let raw = json!({"output": "something else"});
        let reply = InferenceReply::from_value(raw.clone());
        assert_eq!(reply, InferenceReply::Unknown(raw.clone()));
        assert_eq!(reply.content(), raw.to_string());
    }

    #[test]
    fn test_choice_without_message_is_unknown() {
        let raw = json!({"choices": [{"text": "completion style"}]});
        assert_eq!(InferenceReply::from_value(raw.clone()), InferenceReply::Unknown(raw));
    }
}
