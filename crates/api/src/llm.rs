use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::LlmConfig;

const SYSTEM_PROMPT: &str = "You are a helpful assistant that answers questions using ONLY the provided document context. If the answer is not contained in the context, say you don't know. When you reference facts, include the DOC ID in brackets (e.g., [FBI_3]). Be concise.";

#[derive(Clone)]
pub struct ChatClient {
    base_url: String,
    api_key: Option<String>,
    model: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

impl ChatClient {
    pub fn new(config: &LlmConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            client: reqwest::Client::new(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Answer a question against the prepared document context.
    pub async fn answer(&self, question: &str, context: &str) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .context("OPENAI_API_KEY not configured")?;

        let url = format!("{}/v1/chat/completions", self.base_url);
        let user_prompt = format!(
            "Question:\n{}\n\nContext:\n{}\n\nAnswer concisely.",
            question,
            if context.is_empty() {
                "[no documents provided]"
            } else {
                context
            },
        );

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user_prompt,
                },
            ],
            max_tokens: 2000,
            temperature: 0.0,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to send request to LLM provider")?;

        if !response.status().is_success() {
            anyhow::bail!("LLM request failed: {}", response.status());
        }

        let chat: ChatResponse = response
            .json()
            .await
            .context("Failed to parse LLM response")?;

        let answer = chat
            .choices
            .first()
            .context("LLM response contained no choices")?
            .message
            .content
            .trim()
            .to_string();

        Ok(answer)
    }
}
