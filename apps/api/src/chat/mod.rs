// Copilot chat: conversation assembly around the fixed persona.
// All LLM calls go through llm_client.

pub mod conversation;
pub mod handlers;
pub mod prompts;
