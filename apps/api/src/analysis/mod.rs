// Job-description analysis: the local classifier, its sector table, and the
// optional AI enrichment layered on top. All LLM calls go through llm_client.

pub mod classifier;
pub mod enrichment;
pub mod handlers;
pub mod prompts;
pub mod sectors;
