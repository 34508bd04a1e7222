// Excuse generation: prompt rendering, one inference call, reply normalization.
// All inference calls go through llm_client.

pub mod excuse;
pub mod handlers;
pub mod normalizer;
pub mod prompts;
