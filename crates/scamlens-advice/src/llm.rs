use std::time::Duration;

use scamlens_core::{LlmConfig, ScamlensError};

/// A text generation capability: one prompt in, one response out.
///
/// The shipped implementation is [`LlmClient`]; tests inject doubles that
/// echo, fail, or return empty output. Implementations must not retry
/// internally, a failed call surfaces as [`ScamlensError::Generation`].
pub trait TextGenerator {
    /// Generate a response for `prompt`.
    ///
    /// A single round trip, no streaming and no conversation state.
    async fn generate(&self, prompt: &str) -> Result<String, ScamlensError>;

    /// Identifier of the model answering, for display in reports.
    fn model(&self) -> &str {
        "unknown"
    }
}

/// OpenAI-compatible chat completions client.
///
/// Works with any provider that exposes the `chat/completions` endpoint:
/// OpenAI, Gemini (OpenAI-compat mode), Anthropic (OpenAI-compat mode),
/// Ollama, vLLM, LiteLLM, etc.
///
/// The configuration is passed in explicitly; the client never reads
/// environment variables or other global state.
///
/// # Examples
///
/// ```
/// use scamlens_core::LlmConfig;
/// use scamlens_advice::llm::LlmClient;
///
/// let config = LlmConfig {
///     api_key: Some("test-key".into()),
///     ..LlmConfig::default()
/// };
/// let client = LlmClient::new(&config).unwrap();
/// ```
pub struct LlmClient {
    client: reqwest::Client,
    config: LlmConfig,
}

impl LlmClient {
    /// Create a new client from configuration.
    ///
    /// The configured `timeout_secs` bounds the whole round trip; expiry is
    /// reported as [`ScamlensError::Generation`] like any other request
    /// failure.
    ///
    /// # Errors
    ///
    /// Returns [`ScamlensError::Generation`] if the HTTP client cannot be
    /// built.
    pub fn new(config: &LlmConfig) -> Result<Self, ScamlensError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ScamlensError::Generation(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Base URL for API requests, falling back to the provider preset.
    ///
    /// # Examples
    ///
    /// ```
    /// use scamlens_core::LlmConfig;
    /// use scamlens_advice::llm::LlmClient;
    ///
    /// let client = LlmClient::new(&LlmConfig::default()).unwrap();
    /// assert!(client.base_url().contains("generativelanguage"));
    /// ```
    pub fn base_url(&self) -> &str {
        self.config
            .base_url
            .as_deref()
            .unwrap_or_else(|| default_base_url(&self.config.provider))
    }

    /// Send one chat completion request and return the text response.
    ///
    /// # Errors
    ///
    /// Returns [`ScamlensError::Generation`] on transport errors, timeouts,
    /// non-success HTTP statuses, or an unexpected response shape.
    pub async fn chat(&self, prompt: &str) -> Result<String, ScamlensError> {
        let url = format!("{}/chat/completions", self.base_url());

        let body = serde_json::json!({
            "model": self.config.model,
            "messages": [{ "role": "user", "content": prompt }],
            "temperature": 0.2,
        });

        let mut request = self.client.post(&url);
        if let Some(api_key) = &self.config.api_key {
            request = request.header("Authorization", format!("Bearer {api_key}"));
        }
        request = request.header("Content-Type", "application/json");

        let response = request
            .json(&body)
            .send()
            .await
            .map_err(|e| ScamlensError::Generation(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            return Err(ScamlensError::Generation(format!(
                "LLM API error {status}: {body_text}"
            )));
        }

        let response_body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ScamlensError::Generation(format!("failed to parse response: {e}")))?;

        let content = response_body
            .get("choices")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(|c| c.as_str())
            .ok_or_else(|| {
                ScamlensError::Generation(format!("unexpected response structure: {response_body}"))
            })?;

        Ok(content.to_string())
    }
}

impl TextGenerator for LlmClient {
    async fn generate(&self, prompt: &str) -> Result<String, ScamlensError> {
        self.chat(prompt).await
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}

fn default_base_url(provider: &str) -> &'static str {
    match provider {
        "gemini" => "https://generativelanguage.googleapis.com/v1beta/openai",
        "anthropic" => "https://api.anthropic.com/v1",
        _ => "https://api.openai.com/v1",
    }
}
