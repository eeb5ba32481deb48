use std::sync::Arc;

use validator::Validate;

use crate::{
    auth::Claims,
    constants::prompts,
    errors::{AppError, AppResult},
    models::dto::{
        request::ChatRequest,
        response::{ChatReply, ChatSuggestions},
    },
    services::generation_service::ContentGenerator,
};

/// Single-turn teaching assistant. Nothing about the conversation is stored.
pub struct AssistantService {
    generator: Arc<dyn ContentGenerator>,
}

impl AssistantService {
    pub fn new(generator: Arc<dyn ContentGenerator>) -> Self {
        Self { generator }
    }

    pub async fn chat(&self, claims: &Claims, request: ChatRequest) -> AppResult<ChatReply> {
        request.validate()?;
        let message = request.message.trim();
        if message.is_empty() {
            return Err(AppError::ValidationError("Message must not be empty".to_string()));
        }

        log::info!("Assistant question from user {} ({} chars)", claims.user_id(), message.len());
        let reply = self.generator.chat(message).await?;
        Ok(ChatReply { reply })
    }

    pub fn suggestions(&self) -> ChatSuggestions {
        ChatSuggestions {
            suggestions: prompts::CHAT_SUGGESTED_PROMPTS.to_vec(),
        }
    }
}
