//! Chat engine
//!
//! The ChatEngine turns one user message into one reply:
//! 1. Classifies the message into an intent
//! 2. Renders the reply for that intent from the catalog
//! 3. Picks suggestions to show alongside it
//! 4. Records the exchange in the store
//!
//! Every step returns a `Result`; the only place errors are swallowed is
//! [`ChatEngine::respond`], which maps any failure to the fixed degraded reply.

use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use crate::catalog::Catalog;
use crate::conversation::{classify, generate_reply, suggestions, templates, Intent, Suggestion};

use super::store::{NewTurn, RestaurantStore, StoreError};

/// Errors from the chat engine
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("Failed to render reply: {0}")]
    Render(#[from] fmt::Error),

    #[error("Failed to record conversation: {0}")]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyStatus {
    Success,
    Error,
}

/// Reply to a single message
#[derive(Debug, Clone, Serialize)]
pub struct BotReply {
    pub reply: String,
    pub intent: Intent,
    pub suggestions: Vec<Suggestion>,
    pub status: ReplyStatus,

    /// Description of the failure behind a degraded reply
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BotReply {
    fn degraded(error: &ChatError) -> Self {
        Self {
            reply: templates::DEGRADED.to_string(),
            intent: Intent::Error,
            suggestions: Vec::new(),
            status: ReplyStatus::Error,
            error: Some(error.to_string()),
        }
    }
}

/// Reply plus the session it was recorded under
#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    #[serde(flatten)]
    pub reply: BotReply,
    pub session_id: String,
}

/// The restaurant assistant
pub struct ChatEngine {
    catalog: Arc<Catalog>,
    store: Arc<RestaurantStore>,
}

impl ChatEngine {
    pub fn new(catalog: Arc<Catalog>, store: Arc<RestaurantStore>) -> Self {
        Self { catalog, store }
    }

    /// Process a message without recording it. Never fails.
    pub fn respond(&self, message: &str) -> BotReply {
        match self.try_respond(message) {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(error = %e, "Failed to process message");
                BotReply::degraded(&e)
            }
        }
    }

    fn try_respond(&self, message: &str) -> Result<BotReply, ChatError> {
        let intent = classify(&self.catalog, message);
        let reply = generate_reply(&self.catalog, message, intent)?;
        let suggestions = suggestions(&self.catalog, message, intent);

        tracing::debug!(%intent, suggestions = suggestions.len(), "Classified message");

        Ok(BotReply {
            reply,
            intent,
            suggestions,
            status: ReplyStatus::Success,
            error: None,
        })
    }

    /// Process a message and record the exchange under `session_id`
    /// (a fresh id is generated when none is given)
    pub async fn converse(&self, session_id: Option<String>, message: &str) -> ChatResponse {
        let session_id = session_id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        let reply = self.respond(message);

        let turn = NewTurn {
            session_id: session_id.clone(),
            user_message: message.to_string(),
            bot_reply: reply.reply.clone(),
            intent: reply.intent,
            suggestions: reply.suggestions.clone(),
        };

        let reply = match self.store.append_turn(turn).await {
            Ok(_) => reply,
            Err(e) => {
                let e = ChatError::from(e);
                tracing::error!(error = %e, session_id = %session_id, "Failed to record turn");
                BotReply::degraded(&e)
            }
        };

        ChatResponse { reply, session_id }
    }
}
