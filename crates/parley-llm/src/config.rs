// Provider configuration and client construction

use crate::error::{LlmError, Result};
use crate::traits::ChatClient;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Wire protocol spoken by the provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    /// OpenAI chat-completions API, also served by OpenRouter and others
    #[default]
    OpenAI,
}

/// Everything needed to reach a hosted model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub provider: ProviderType,
    pub api_key: String,
    /// Base URL of the API (defaults to https://api.openai.com/v1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl ProviderConfig {
    pub fn openai(api_key: impl Into<String>) -> Self {
        Self {
            provider: ProviderType::OpenAI,
            api_key: api_key.into(),
            base_url: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn provider_type(&self) -> ProviderType {
        self.provider
    }
}

/// Factory for creating chat clients from configuration
pub struct ClientFactory;

impl ClientFactory {
    pub fn create_chat_client(config: ProviderConfig) -> Result<Arc<dyn ChatClient>> {
        if config.api_key.trim().is_empty() {
            return Err(LlmError::Config("API key is empty".to_string()));
        }

        match config.provider {
            ProviderType::OpenAI => {
                let client = match config.base_url {
                    Some(base_url) => {
                        crate::openai::OpenAIClient::with_base_url(config.api_key, base_url)?
                    }
                    None => crate::openai::OpenAIClient::new(config.api_key)?,
                };
                Ok(Arc::new(client))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openai_config() {
        let config = ProviderConfig::openai("test-key");
        assert_eq!(config.provider_type(), ProviderType::OpenAI);
        assert!(config.base_url.is_none());
    }

    #[test]
    fn test_base_url_override() {
        let config = ProviderConfig::openai("test-key").with_base_url("https://openrouter.ai/api/v1");
        assert_eq!(config.base_url.as_deref(), Some("https://openrouter.ai/api/v1"));
    }

    #[test]
    fn test_provider_defaults_when_missing() {
        let config: ProviderConfig = serde_json::from_str(r#"{"api_key":"k"}"#).unwrap();
        assert_eq!(config.provider_type(), ProviderType::OpenAI);
    }

    #[test]
    fn test_empty_key_rejected() {
        let err = ClientFactory::create_chat_client(ProviderConfig::openai("  ")).err();
        assert!(matches!(err, Some(LlmError::Config(_))));
    }

    #[test]
    fn test_factory_builds_client() {
        let config = ProviderConfig::openai("test-key").with_base_url("http://localhost:9");
        assert!(ClientFactory::create_chat_client(config).is_ok());
    }
}
