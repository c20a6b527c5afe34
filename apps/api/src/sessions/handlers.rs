//! Session routes. `init` is a fixed stub; `chat` relays to the parser service.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::state::AppState;

const STUB_SESSION_ID: &str = "session-12345";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub session_id: Option<String>,
    pub question: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub session_id: String,
    pub answer: String,
}

/// GET /api/v1/sessions/init
pub async fn handle_init() -> Json<Value> {
    Json(json!({
        "sessionId": STUB_SESSION_ID,
        "status": "initialized",
        "message": "Session initialized successfully"
    }))
}

/// POST /api/v1/sessions/chat
pub async fn handle_chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(request) = payload?;
    let session_id = required(request.session_id, "sessionId")?;
    let question = required(request.question, "question")?;

    let reply = state.parser.chat(&session_id, &question).await?;

    Ok(Json(ChatResponse {
        session_id: reply.session_id,
        answer: reply.answer,
    }))
}

fn required(value: Option<String>, field: &str) -> Result<String, AppError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::Validation(format!("{field} is required")))
}
