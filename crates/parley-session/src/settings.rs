use serde::de::{self, Deserializer};
use serde::Deserialize;

/// Title carried by a chat until its first message names it
pub const NEW_CHAT_TITLE: &str = "New Chat";

pub const DEFAULT_GREETING: &str = "Hi! I'm your GPT Clone. Ask me anything.";

/// Tunables of the session store
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Assistant turn every new chat starts with
    pub greeting: String,
    /// Maximum characters of a title derived from a first message, at least 1
    #[serde(deserialize_with = "at_least_one")]
    pub title_max_chars: usize,
    /// Characters of extracted PDF text injected into the conversation
    pub pdf_preview_chars: usize,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            greeting: DEFAULT_GREETING.to_string(),
            title_max_chars: 40,
            pdf_preview_chars: 1000,
        }
    }
}

fn at_least_one<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    let value = usize::deserialize(deserializer)?;
    if value == 0 {
        return Err(de::Error::custom("title_max_chars must be at least 1"));
    }
    Ok(value)
}
