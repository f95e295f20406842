//! Assistant and conversation history routes

use axum::extract::{Query, State};
use axum::response::Json;
use serde::Deserialize;

use crate::core::{ChatResponse, ConversationTurn};
use crate::AppState;

use super::error::{ApiError, ApiResult};
use super::SessionFilter;

const MAX_MESSAGE_CHARS: usize = 1000;
const MAX_SESSION_CHARS: usize = 100;
const HISTORY_LIMIT: usize = 50;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(alias = "mensagem")]
    pub message: String,

    #[serde(default, alias = "sessao_id")]
    pub session_id: Option<String>,
}

impl ChatRequest {
    fn validate(&self) -> ApiResult<()> {
        let length = self.message.chars().count();
        if self.message.trim().is_empty() || length > MAX_MESSAGE_CHARS {
            return Err(ApiError::BadRequest(format!(
                "A mensagem deve ter entre 1 e {} caracteres",
                MAX_MESSAGE_CHARS
            )));
        }
        if let Some(session_id) = &self.session_id {
            if session_id.trim().is_empty() || session_id.chars().count() > MAX_SESSION_CHARS {
                return Err(ApiError::BadRequest(format!(
                    "sessao_id deve ter entre 1 e {} caracteres",
                    MAX_SESSION_CHARS
                )));
            }
        }
        Ok(())
    }
}

/// `POST /api/bot/chat`: answer a message and record the exchange.
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> ApiResult<Json<ChatResponse>> {
    request.validate()?;

    let response = state
        .chat_engine
        .converse(request.session_id, &request.message)
        .await;

    Ok(Json(response))
}

/// `GET /api/conversations`: latest turns, newest first.
pub async fn list_conversations(
    State(state): State<AppState>,
    Query(filter): Query<SessionFilter>,
) -> ApiResult<Json<Vec<ConversationTurn>>> {
    let turns = state
        .store
        .list_turns(filter.session_id.as_deref(), HISTORY_LIMIT)
        .await?;
    Ok(Json(turns))
}
