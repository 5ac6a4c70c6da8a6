//! Axum route handler for the copilot chat.

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::debug;

use crate::chat::conversation::{build_conversation, ChatRequest};
use crate::chat::prompts::CHAT_TEMPERATURE;
use crate::errors::AppError;
use crate::llm_client::{complete_with_timeout, LlmError};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// POST /api/chat
///
/// Stateless pass-through: assembles the conversation and forwards it to the
/// model. There is no local fallback, so a missing or failing model is a 503.
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    if request.messages.is_empty() {
        return Err(AppError::Validation(
            "messages array is required".to_string(),
        ));
    }

    let model = state.llm.as_deref().ok_or_else(|| {
        AppError::ServiceUnavailable("AI provider not configured".to_string())
    })?;

    let conversation = build_conversation(&request, &state.patterns);
    debug!(turns = conversation.len(), "forwarding chat conversation");

    let reply = match complete_with_timeout(
        model,
        &conversation,
        CHAT_TEMPERATURE,
        state.config.llm_timeout,
    )
    .await
    {
        Ok(reply) => reply,
        Err(LlmError::EmptyContent) => String::new(),
        Err(e) => return Err(e.into()),
    };

    Ok(Json(ChatResponse { reply }))
}
