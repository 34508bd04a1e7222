// All prompt text for excuse drafting.
// Placeholders are replaced verbatim by `excuse::render_excuse_prompt`; no escaping.

/// Excuse email prompt template.
/// Replace: {category}, {tone}, {seriousness}, {recipient_name}, {sender_name},
///          {eta_when}, {json_only_instruction}
pub const EXCUSE_PROMPT_TEMPLATE: &str = r#"
Generate a professional excuse email based on the following parameters:

Category: {category}
Tone: {tone}
Seriousness Level: {seriousness}/5
Recipient: {recipient_name}
Sender: {sender_name}
ETA/When: {eta_when}

Please generate a JSON response with the following format:
{
    "subject": "Email subject line",
    "body": "Dear {recipient_name},\n\n[Email body content]\n\nBest regards,\n{sender_name}"
}

The email should:
- Match the specified tone ({tone})
- Be appropriate for the seriousness level ({seriousness}/5)
- Include a professional greeting and sign-off
- Be concise but complete
- Sound natural and believable

{json_only_instruction}
"#;

/// Sign-off used when the model's reply has to be wrapped heuristically.
pub const FALLBACK_SIGN_OFF: &str = "Best regards,";

/// Body used when a structured reply has no `body` field.
pub const MISSING_BODY: &str = "Email content could not be generated.";
