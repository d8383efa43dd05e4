//! Chat-completion client for the assistant answers.
//!
//! One synchronous (from the caller's point of view) completion call per
//! request, no retries: any failure is reported back to the engine, which
//! substitutes its deterministic fallback message instead of propagating.

use anyhow::Result;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::LLMConfig;

/// System instruction for the dashboard assistant. Data questions must be
/// answered from the supplied metrics only; general questions pass through.
pub const SYSTEM_PROMPT: &str = "You are an intelligent assistant inside a cafeteria \
analytics dashboard. You can see some metrics from the database. When the user asks \
about sales, menu items, or trends, use ONLY the metrics I give you and explain them \
clearly. When the question is general (for example, about the weather or colors), \
just answer normally.";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChatMessage,
}

pub struct LLMClient {
    client: Client,
    api_key: String,
    config: LLMConfig,
}

impl LLMClient {
    pub fn new(api_key: String, config: LLMConfig) -> Self {
        Self {
            client: Client::new(),
            api_key,
            config,
        }
    }

    /// Send one chat-completion request and return the assistant text.
    pub async fn chat(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        let url = format!("{}/chat/completions", self.config.api_base.trim_end_matches('/'));

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("HTTP request failed: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!("[LLMClient] API returned error status {}: {}", status, error_text);
            return Err(anyhow::anyhow!("API error {}: {}", status, error_text));
        }

        let chat_response = response
            .json::<ChatResponse>()
            .await
            .map_err(|e| anyhow::anyhow!("Response decode error: {}", e))?;

        Ok(chat_response
            .choices
            .first()
            .map(|c| c.message.content.clone())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_constructors_set_roles() {
        assert_eq!(ChatMessage::system("a").role, "system");
        assert_eq!(ChatMessage::user("b").role, "user");
    }
}
