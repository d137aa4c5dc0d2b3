//! Chat completion backends.
//!
//! Hugging Face (router), OpenAI and Groq share the OpenAI request format.
//! Anthropic uses the Messages API. Requests are non-streaming: the
//! classifier needs the whole answer before it can parse it.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tidymark_core::{Error, Result};
use tracing::debug;

use crate::types::{Provider, ProviderSelection};

const HUGGINGFACE_URL: &str = "https://router.huggingface.co/v1/chat/completions";
const OPENAI_URL: &str = "https://api.openai.com/v1/chat/completions";
const GROQ_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
const ANTHROPIC_URL: &str = "https://api.anthropic.com/v1/messages";

/// Something that turns a prompt into generated text.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, prompt: &str, max_tokens: usize) -> Result<String>;
}

/// HTTP backend for the configured provider.
pub struct HttpCompletionBackend {
    client: Client,
    selection: ProviderSelection,
}

impl HttpCompletionBackend {
    pub fn new(selection: ProviderSelection, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Http(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client, selection })
    }

    async fn complete_openai_compat(&self, url: &str, prompt: &str, max_tokens: usize) -> Result<String> {
        let body = json!({
            "model": self.selection.model,
            "messages": [{"role": "user", "content": prompt}],
            "temperature": 0.0,
            "max_tokens": max_tokens,
            "stream": false,
        });

        debug!("Requesting completion from {} with model {}", url, self.selection.model);

        let response = self
            .client
            .post(url)
            .header("Authorization", format!("Bearer {}", self.selection.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Http(format!("Request failed: {}", e)))?;

        let parsed = read_json(response).await?;
        parsed["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| Error::Provider("Response has no choices[0].message.content".into()))
    }

    async fn complete_anthropic(&self, prompt: &str, max_tokens: usize) -> Result<String> {
        let body = json!({
            "model": self.selection.model,
            "messages": [{"role": "user", "content": prompt}],
            "temperature": 0.0,
            "max_tokens": max_tokens,
        });

        debug!("Requesting completion from Anthropic with model {}", self.selection.model);

        let response = self
            .client
            .post(ANTHROPIC_URL)
            .header("x-api-key", &self.selection.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Http(format!("Request failed: {}", e)))?;

        let parsed = read_json(response).await?;
        let blocks = parsed["content"]
            .as_array()
            .ok_or_else(|| Error::Provider("Response has no content blocks".into()))?;
        Ok(blocks
            .iter()
            .filter_map(|b| b["text"].as_str())
            .collect::<Vec<_>>()
            .join(""))
    }
}

#[async_trait]
impl CompletionBackend for HttpCompletionBackend {
    async fn complete(&self, prompt: &str, max_tokens: usize) -> Result<String> {
        match self.selection.provider {
            Provider::HuggingFace => self.complete_openai_compat(HUGGINGFACE_URL, prompt, max_tokens).await,
            Provider::OpenAI => self.complete_openai_compat(OPENAI_URL, prompt, max_tokens).await,
            Provider::Groq => self.complete_openai_compat(GROQ_URL, prompt, max_tokens).await,
            Provider::Anthropic => self.complete_anthropic(prompt, max_tokens).await,
        }
    }
}

async fn read_json(response: reqwest::Response) -> Result<serde_json::Value> {
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(Error::Http(format!("API error {}: {}", status, body)));
    }
    response
        .json::<serde_json::Value>()
        .await
        .map_err(|e| Error::Parse(format!("Invalid response body: {}", e)))
}
