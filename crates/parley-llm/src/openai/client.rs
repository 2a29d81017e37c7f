// OpenAI-compatible chat-completions client

use crate::error::{LlmError, Result};
use crate::traits::{ChatClient, ChatRequest, ChatResponse, TokenUsage};
use crate::types::Message;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use serde_json::Value;

const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// OpenAI client (HTTP direct, no SDK)
pub struct OpenAIClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl OpenAIClient {
    /// Create new client against the public OpenAI endpoint
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, OPENAI_API_BASE)
    }

    /// Create new client against any OpenAI-compatible endpoint (e.g. OpenRouter)
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", api_key))
                .map_err(|_| LlmError::Config("Invalid API key format".to_string()))?,
        );

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| LlmError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build chat completion request payload
    fn build_chat_request(&self, request: &ChatRequest) -> Value {
        let messages: Vec<Value> = request.messages.iter().map(convert_message).collect();

        let mut payload = serde_json::json!({
            "model": request.model,
            "messages": messages,
            "stream": false,
        });

        if let Some(obj) = payload.as_object_mut() {
            if let Some(temp) = request.options.temperature {
                obj.insert("temperature".to_string(), serde_json::json!(temp));
            }
            if let Some(max_tokens) = request.options.max_tokens {
                obj.insert("max_tokens".to_string(), serde_json::json!(max_tokens));
            }
        }

        payload
    }
}

fn convert_message(message: &Message) -> Value {
    serde_json::json!({
        "role": message.role().as_str(),
        "content": message.content(),
    })
}

#[async_trait]
impl ChatClient for OpenAIClient {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        let payload = self.build_chat_request(&request);
        tracing::debug!(
            model = %request.model,
            messages = request.messages.len(),
            "sending chat completion request"
        );

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::warn!(%status, "chat completion request rejected");
            return Err(LlmError::from_status(status, error_text));
        }

        let body = response.text().await?;
        let raw: Value = serde_json::from_str(&body)
            .map_err(|e| LlmError::MalformedResponse(format!("invalid JSON body: {}", e)))?;
        let parsed: OpenAIChatResponse = serde_json::from_value(raw.clone())
            .map_err(|e| LlmError::MalformedResponse(format!("unexpected response shape: {}", e)))?;

        // Convert to provider-agnostic response
        let choice = parsed.choices.into_iter().next();
        let (content, finish_reason) = match choice {
            Some(choice) => (choice.message.content, choice.finish_reason),
            None => (None, None),
        };

        Ok(ChatResponse {
            content,
            model: parsed.model,
            usage: parsed.usage.map(|u| TokenUsage {
                input_tokens: u.prompt_tokens,
                output_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            }),
            finish_reason,
            raw,
        })
    }
}

// ============================================================================
// OPENAI-SPECIFIC RESPONSE TYPES
// ============================================================================

#[derive(Debug, Deserialize)]
struct OpenAIChatResponse {
    #[serde(default)]
    model: Option<String>,
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::ChatOptions;

    #[test]
    fn test_payload_shape() {
        let client = OpenAIClient::with_base_url("k", "https://openrouter.ai/api/v1/").unwrap();
        assert_eq!(client.base_url(), "https://openrouter.ai/api/v1");

        let request = ChatRequest::new(
            "mistralai/mistral-7b-instruct",
            vec![Message::ai("Hi!"), Message::human("Explain recursion")],
        )
        .with_options(ChatOptions::new().temperature(0.2));

        let payload = client.build_chat_request(&request);
        assert_eq!(payload["model"], "mistralai/mistral-7b-instruct");
        assert_eq!(payload["stream"], false);
        assert_eq!(payload["messages"][0]["role"], "assistant");
        assert_eq!(payload["messages"][1]["content"], "Explain recursion");
        assert!(payload.get("max_tokens").is_none());
        assert!(payload["temperature"].is_number());
    }
}
