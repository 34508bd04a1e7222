//! Excuse drafting — prompt rendering plus the single inference call.

use tracing::info;

use crate::generation::normalizer::{normalize, DraftFields};
use crate::generation::prompts::EXCUSE_PROMPT_TEMPLATE;
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::{InferenceClient, LlmError};
use crate::models::excuse::ExcuseRequest;

/// Renders the instruction sent to the model. Field values are interpolated
/// as-is and never rescanned for placeholders.
pub fn render_excuse_prompt(request: &ExcuseRequest) -> String {
    let seriousness = request.seriousness.to_string();
    fill_template(
        EXCUSE_PROMPT_TEMPLATE,
        &[
            ("category", request.category.as_str()),
            ("tone", request.tone.as_str()),
            ("seriousness", seriousness.as_str()),
            ("recipient_name", request.recipient_name.as_str()),
            ("sender_name", request.sender_name.as_str()),
            ("eta_when", request.eta_when.as_str()),
            ("json_only_instruction", JSON_ONLY_INSTRUCTION),
        ],
    )
}

/// Single left-to-right pass over `template`. `{name}` is replaced when `name`
/// is in `values`; any other brace is copied through unchanged.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let filled = after.find('}').and_then(|close| {
            let name = &after[..close];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, close))
        });
        match filled {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Calls the model and normalizes whatever it says.
/// Errors here are transport/upstream failures only.
pub async fn draft_excuse(
    request: &ExcuseRequest,
    llm: &InferenceClient,
) -> Result<DraftFields, LlmError> {
    let prompt = render_excuse_prompt(request);
    let reply = llm.call(&prompt).await?;
    info!("Inference reply shape: {}", reply.shape());

    Ok(normalize(&reply.content(), request))
}
