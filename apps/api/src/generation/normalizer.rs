//! Turns the model's text into a `{subject, body}` email draft.
//!
//! The model is asked for a JSON object but is not forced to comply, so
//! `normalize` accepts anything: JSON is kept for `EmailDraft::from_fields`
//! to check, free text is split heuristically.

use serde_json::Value;
use thiserror::Error;

use crate::generation::prompts::{FALLBACK_SIGN_OFF, MISSING_BODY};
use crate::models::excuse::ExcuseRequest;

/// A structured reply that cannot be turned into an email draft.
#[derive(Debug, Error, PartialEq)]
pub enum DraftError {
    #[error("model returned JSON {0} instead of an object")]
    NotAnObject(&'static str),

    #[error("field '{field}' must be a string, got {kind}")]
    FieldType {
        field: &'static str,
        kind: &'static str,
    },
}

/// What `normalize` found in the model's text.
#[derive(Debug, Clone, PartialEq)]
pub enum DraftFields {
    /// The text decoded as JSON.
    Structured(Value),
    /// Free text, already split into subject and a wrapped body.
    Text { subject: String, body: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmailDraft {
    pub subject: String,
    pub body: String,
}

/// Never fails: any text yields `DraftFields`.
pub fn normalize(content: &str, request: &ExcuseRequest) -> DraftFields {
    if let Ok(value) = serde_json::from_str::<Value>(strip_json_fences(content)) {
        return DraftFields::Structured(value);
    }

    let mut lines = content.trim().lines();
    let subject = match lines.next() {
        Some(first) if !first.trim().is_empty() => first.to_string(),
        _ => default_subject(&request.category),
    };
    let rest: Vec<&str> = lines.collect();
    let body = if rest.is_empty() {
        content.to_string()
    } else {
        rest.join("\n")
    };

    DraftFields::Text {
        subject,
        body: format!(
            "Dear {},\n\n{}\n\n{}\n{}",
            request.recipient_name, body, FALLBACK_SIGN_OFF, request.sender_name
        ),
    }
}

impl EmailDraft {
    /// Missing fields fall back to defaults; anything else that is not a
    /// string, `null` included, is rejected.
    pub fn from_fields(fields: DraftFields, category: &str) -> Result<Self, DraftError> {
        match fields {
            DraftFields::Text { subject, body } => Ok(EmailDraft { subject, body }),
            DraftFields::Structured(Value::Object(map)) => Ok(EmailDraft {
                subject: string_field(map.get("subject"), "subject")?
                    .unwrap_or_else(|| default_subject(category)),
                body: string_field(map.get("body"), "body")?
                    .unwrap_or_else(|| MISSING_BODY.to_string()),
            }),
            DraftFields::Structured(other) => Err(DraftError::NotAnObject(kind_of(&other))),
        }
    }
}

fn default_subject(category: &str) -> String {
    format!("Re: {category}")
}

fn string_field(value: Option<&Value>, field: &'static str) -> Result<Option<String>, DraftError> {
    match value {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(DraftError::FieldType {
            field,
            kind: kind_of(other),
        }),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
