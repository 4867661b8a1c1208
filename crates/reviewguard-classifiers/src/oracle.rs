//! Generative-text keyword oracle
//!
//! The oracle turns a free-text prompt into a free-text completion; the
//! engine uses it to synthesize per-product keyword and contrast-keyword
//! lists. Responses are arbitrary model output, so parsing is defensive:
//! quotes, brackets, code fences, and a leading "keywords:" label are all
//! tolerated and stripped before splitting on commas.

use async_trait::async_trait;
use reviewguard_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Free-text completion oracle
#[async_trait]
pub trait KeywordOracle: Send + Sync {
    /// Send a prompt, get a completion
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Prompt asking for descriptive product keywords
pub fn keyword_prompt(product_name: &str, max: usize) -> String {
    format!(
        "Generate up to {} lowercase, comma-separated keywords describing \
         features, specs, and usage of {}. Respond with the list only.",
        max, product_name
    )
}

/// Prompt asking for terms that would never describe the product
pub fn contrast_prompt(product_name: &str, max: usize) -> String {
    format!(
        "List {} lowercase, comma-separated words that would never describe {}. \
         Respond with the list only.",
        max, product_name
    )
}

/// Split a free-text oracle completion into clean lowercase terms
///
/// Tolerates markdown quoting/brackets, a leading "keywords:"-style label,
/// and empty fields. Returns at most `max` distinct terms.
pub fn parse_term_list(raw: &str, max: usize) -> Vec<String> {
    let mut cleaned = raw.replace("```", " ");

    // Drop a leading "<label>:" such as "keywords:" or "contrast words:",
    // but only if it appears before the first comma
    if let Some(colon) = cleaned.find(':') {
        let comma = cleaned.find(',').unwrap_or(usize::MAX);
        if colon < comma {
            cleaned = cleaned[colon + 1..].to_string();
        }
    }

    let mut terms = Vec::new();
    for token in cleaned.split(',') {
        let term: String = token
            .trim()
            .trim_matches(|c: char| matches!(c, '"' | '\'' | '[' | ']' | '{' | '}' | '(' | ')' | '`' | '.' | '-' | '*'))
            .trim()
            .to_lowercase();

        if term.is_empty() || terms.contains(&term) {
            continue;
        }
        terms.push(term);
        if terms.len() == max {
            break;
        }
    }
    terms
}

/// OpenAI-style chat-completions oracle client
pub struct OpenAiOracle {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiOracle {
    /// Create a client against a chat-completions endpoint
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        request_timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| Error::oracle(format!("failed to build http client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
        })
    }
}

#[async_trait]
impl KeywordOracle for OpenAiOracle {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatRequestMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: 0.2,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::oracle(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::oracle(format!(
                "oracle returned status {}",
                response.status()
            )));
        }

        let completion: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::oracle(format!("malformed response: {}", e)))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| Error::oracle("response contained no completion text"))
    }
}

// =============================================================================
// Chat completions wire structures
// =============================================================================

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatRequestMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatRequestMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize, Default)]
struct ChatResponseMessage {
    content: Option<String>,
}
