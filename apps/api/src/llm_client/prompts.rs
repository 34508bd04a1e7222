// Shared prompt fragments for inference calls.
// Feature prompts live next to the feature (see generation/prompts.rs).

/// Closing instruction for every prompt that expects a bare JSON object back.
pub const JSON_ONLY_INSTRUCTION: &str = "Respond with ONLY the JSON object, no additional text.";
