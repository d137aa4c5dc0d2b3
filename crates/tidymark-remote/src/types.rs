//! Provider selection types.

use serde::{Deserialize, Serialize};

/// Chat completion provider identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    HuggingFace,
    OpenAI,
    Anthropic,
    Groq,
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provider::HuggingFace => write!(f, "huggingface"),
            Provider::OpenAI => write!(f, "openai"),
            Provider::Anthropic => write!(f, "anthropic"),
            Provider::Groq => write!(f, "groq"),
        }
    }
}

/// A resolved provider with the model and credential to call it with.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderSelection {
    pub provider: Provider,
    pub model: String,
    pub api_key: String,
}

impl std::fmt::Debug for ProviderSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSelection")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("api_key", &"***")
            .finish()
    }
}
