/// Tools for the safe wellness chat
///
/// This module implements the chat and chat_history MCP tools. Every chat
/// call persists the user turn first, then either the safety refusal or the
/// scripted wellness reply as the assistant turn, so history always shows
/// complete exchanges.

use serde::{Deserialize, Serialize};

use crate::domain::{ChatMessage, Locale, Sender};
use crate::safety::SafetyFilter;
use crate::storage::WellnessStore;
use crate::tools::log::parse_user_id;
use crate::tools::ToolError;

const DEFAULT_HISTORY_LIMIT: u32 = 50;

/// Scripted wellness replies, pending a real assistant backend
const REPLY_EN: &str = "That is a great wellness question! Here is my advice: stay \
    hydrated, sleep 7-9 hours, and move your body every day. I am here to support \
    your wellness journey!";
const REPLY_FR: &str = "C'est une excellente question de bien-être! Voici mon conseil: \
    Restez hydraté, dormez 7-9 heures, et bougez votre corps quotidiennement. Je suis \
    là pour soutenir votre parcours de bien-être!";

/// Parameters for sending a chat message
#[derive(Debug, Deserialize)]
pub struct ChatParams {
    pub user_id: String,
    pub message: String,
    pub locale: Option<String>, // "en" or "fr", defaults to English
}

/// The completed exchange: the user turn and the assistant turn
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub messages: Vec<ChatMessage>,
    /// Whether the safety filter blocked the question
    pub blocked: bool,
}

/// Handle one chat turn through the safety filter
pub fn chat<S: WellnessStore>(
    storage: &S,
    safety: &SafetyFilter,
    params: ChatParams,
) -> Result<ChatResponse, ToolError> {
    let user_id = parse_user_id(&params.user_id)?;
    if params.message.trim().is_empty() {
        return Err(ToolError::invalid("Message cannot be empty"));
    }
    let locale = Locale::parse_or_default(params.locale.as_deref().unwrap_or("en"));

    let user_turn = ChatMessage::new(user_id.clone(), Sender::User, params.message.clone());
    storage.create_chat_message(&user_turn)?;

    let verdict = safety.classify(&params.message, locale);
    let (reply, blocked) = if verdict.safe {
        let reply = match locale {
            Locale::En => REPLY_EN,
            Locale::Fr => REPLY_FR,
        };
        (reply.to_string(), false)
    } else {
        tracing::warn!("Safety filter triggered for user {}", params.user_id);
        (verdict.block_message, true)
    };

    let assistant_turn = ChatMessage::new(user_id, Sender::Assistant, reply);
    storage.create_chat_message(&assistant_turn)?;

    Ok(ChatResponse {
        messages: vec![user_turn, assistant_turn],
        blocked,
    })
}

/// Parameters for reading chat history
#[derive(Debug, Deserialize)]
pub struct ChatHistoryParams {
    pub user_id: String,
    pub limit: Option<u32>,
}

/// The most recent chat turns, oldest of the window first
#[derive(Debug, Serialize)]
pub struct ChatHistoryResponse {
    pub messages: Vec<ChatMessage>,
    pub count: usize,
}

/// Read back a user's recent chat exchanges
pub fn chat_history<S: WellnessStore>(
    storage: &S,
    params: ChatHistoryParams,
) -> Result<ChatHistoryResponse, ToolError> {
    let user_id = parse_user_id(&params.user_id)?;
    let limit = params.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);

    let messages = storage.chat_history(&user_id, limit)?;
    let count = messages.len();

    Ok(ChatHistoryResponse { messages, count })
}
