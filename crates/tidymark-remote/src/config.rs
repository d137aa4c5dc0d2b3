//! Remote classifier configuration and provider selection.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tidymark_core::EngineConfig;

use crate::types::{Provider, ProviderSelection};

pub const DEFAULT_HUGGINGFACE_MODEL: &str = "deepseek-ai/DeepSeek-V3-0324";
pub const DEFAULT_HUGGINGFACE_ROUTE: &str = "novita";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-3-5-haiku-20241022";
pub const DEFAULT_GROQ_MODEL: &str = "llama-3.3-70b-versatile";

/// Stored classifier configuration (JSON file + environment).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    #[serde(default = "default_preferred")]
    pub preferred_provider: String,
    #[serde(default)]
    pub huggingface_api_key: Option<String>,
    #[serde(default)]
    pub openai_api_key: Option<String>,
    #[serde(default)]
    pub anthropic_api_key: Option<String>,
    #[serde(default)]
    pub groq_api_key: Option<String>,
    #[serde(default = "default_huggingface_model")]
    pub huggingface_model: String,
    /// Inference provider the Hugging Face router forwards to.
    #[serde(default = "default_huggingface_route")]
    pub huggingface_route: String,
    #[serde(default = "default_openai_model")]
    pub openai_model: String,
    #[serde(default = "default_anthropic_model")]
    pub anthropic_model: String,
    #[serde(default = "default_groq_model")]
    pub groq_model: String,
    #[serde(default)]
    pub engine: EngineConfig,
}

fn default_preferred() -> String {
    "auto".into()
}
fn default_huggingface_model() -> String {
    DEFAULT_HUGGINGFACE_MODEL.into()
}
fn default_huggingface_route() -> String {
    DEFAULT_HUGGINGFACE_ROUTE.into()
}
fn default_openai_model() -> String {
    DEFAULT_OPENAI_MODEL.into()
}
fn default_anthropic_model() -> String {
    DEFAULT_ANTHROPIC_MODEL.into()
}
fn default_groq_model() -> String {
    DEFAULT_GROQ_MODEL.into()
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            preferred_provider: default_preferred(),
            huggingface_api_key: None,
            openai_api_key: None,
            anthropic_api_key: None,
            groq_api_key: None,
            huggingface_model: default_huggingface_model(),
            huggingface_route: default_huggingface_route(),
            openai_model: default_openai_model(),
            anthropic_model: default_anthropic_model(),
            groq_model: default_groq_model(),
            engine: EngineConfig::default(),
        }
    }
}

impl ClassifierConfig {
    /// Load config from file, falling back to env vars and defaults.
    pub fn load(config_path: &Path) -> Self {
        let mut config: ClassifierConfig = std::fs::read_to_string(config_path)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default();

        config.fill_from_env();
        config
    }

    /// Defaults plus environment, without a backing file.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.fill_from_env();
        config
    }

    fn fill_from_env(&mut self) {
        fill_key(&mut self.huggingface_api_key, "HUGGINGFACE_API_KEY");
        fill_key(&mut self.openai_api_key, "OPENAI_API_KEY");
        fill_key(&mut self.anthropic_api_key, "ANTHROPIC_API_KEY");
        fill_key(&mut self.groq_api_key, "GROQ_API_KEY");
        self.engine = self.engine.clone().with_env_overrides();
    }

    /// Resolve which provider, model and key to use.
    ///
    /// An explicit preference is honored only if its key is set. In auto
    /// mode the order is Hugging Face > Anthropic > Groq > OpenAI.
    pub fn resolve_provider(&self) -> Option<ProviderSelection> {
        if self.preferred_provider != "auto" {
            return match self.preferred_provider.as_str() {
                "huggingface" => self.selection(Provider::HuggingFace),
                "openai" => self.selection(Provider::OpenAI),
                "anthropic" => self.selection(Provider::Anthropic),
                "groq" => self.selection(Provider::Groq),
                _ => None,
            };
        }

        [
            Provider::HuggingFace,
            Provider::Anthropic,
            Provider::Groq,
            Provider::OpenAI,
        ]
        .into_iter()
        .find_map(|p| self.selection(p))
    }

    fn selection(&self, provider: Provider) -> Option<ProviderSelection> {
        let (key, model) = match provider {
            Provider::HuggingFace => (
                &self.huggingface_api_key,
                format!("{}:{}", self.huggingface_model, self.huggingface_route),
            ),
            Provider::OpenAI => (&self.openai_api_key, self.openai_model.clone()),
            Provider::Anthropic => (&self.anthropic_api_key, self.anthropic_model.clone()),
            Provider::Groq => (&self.groq_api_key, self.groq_model.clone()),
        };
        key.as_ref().map(|k| ProviderSelection {
            provider,
            model,
            api_key: k.clone(),
        })
    }
}

fn fill_key(slot: &mut Option<String>, var: &str) {
    if slot.is_none() {
        *slot = std::env::var(var).ok().filter(|v| !v.trim().is_empty());
    }
}
