use axum::Json;
use axum::extract::State;
use chrono::Utc;
use serde_json::{Value, json};
use tracing::info;

use crate::payload::{ChatSessionPayload, ProcessedResponse, ResponseMeta};
use crate::{AppState, Result};

pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn process_chat_session(
    State(state): State<AppState>,
    Json(payload): Json<ChatSessionPayload>,
) -> Result<Json<ProcessedResponse>> {
    process_session(&state, payload).await.map(Json)
}

/// Select the prompt, extract, and shape the response.
pub async fn process_session(
    state: &AppState,
    payload: ChatSessionPayload,
) -> Result<ProcessedResponse> {
    let selection = payload.select_prompt()?;

    info!(
        "Processing session {:?}: {} message(s), {} from user, full_history={}, override={}",
        payload.session_id,
        payload.messages.len(),
        selection.user_messages,
        payload.use_full_history,
        selection.override_used
    );

    let extractor = state.extractor_for(payload.api_key.as_deref());
    let extraction = extractor.extract(&selection.prompt).await;

    let meta = ResponseMeta {
        messages_received: payload.messages.len(),
        user_messages_processed: selection.user_messages,
        used_full_history: payload.use_full_history,
        used_delegate: extraction.used_delegate(),
        processed_at: Utc::now(),
        prompt_override_used: selection.override_used,
    };

    Ok(ProcessedResponse {
        session_id: payload.session_id,
        prompt: selection.prompt,
        parameters: extraction.parameters.to_mapping(),
        meta,
    })
}
