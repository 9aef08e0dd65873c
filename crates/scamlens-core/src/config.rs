use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ScamlensError;

/// Top-level configuration loaded from `.scamlens.toml`.
///
/// Supports layered resolution: CLI flags > env vars > local config > defaults.
///
/// # Examples
///
/// ```
/// use scamlens_core::ScamlensConfig;
///
/// let config = ScamlensConfig::default();
/// assert_eq!(config.llm.provider, "gemini");
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScamlensConfig {
    /// LLM provider settings.
    #[serde(default)]
    pub llm: LlmConfig,
}

impl ScamlensConfig {
    /// Load configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ScamlensError::Io`] if the file cannot be read, or
    /// [`ScamlensError::Toml`] if the content is not valid TOML.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use scamlens_core::ScamlensConfig;
    /// use std::path::Path;
    ///
    /// let config = ScamlensConfig::from_file(Path::new(".scamlens.toml")).unwrap();
    /// ```
    pub fn from_file(path: &Path) -> Result<Self, ScamlensError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`ScamlensError::Toml`] if parsing fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use scamlens_core::ScamlensConfig;
    ///
    /// let toml = r#"
    /// [llm]
    /// model = "gpt-4o-mini"
    /// "#;
    /// let config = ScamlensConfig::from_toml(toml).unwrap();
    /// assert_eq!(config.llm.model, "gpt-4o-mini");
    /// ```
    pub fn from_toml(content: &str) -> Result<Self, ScamlensError> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }
}

/// LLM provider configuration.
///
/// Passed explicitly into the client constructor at startup; the client
/// itself never reads environment or global state.
///
/// # Examples
///
/// ```
/// use scamlens_core::LlmConfig;
///
/// let config = LlmConfig::default();
/// assert_eq!(config.model, "gemini-2.5-flash");
/// assert_eq!(config.timeout_secs, 30);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Provider name (e.g. `"gemini"`, `"anthropic"`, `"openai"`).
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Model identifier.
    #[serde(default = "default_model")]
    pub model: String,
    /// API key for the provider.
    pub api_key: Option<String>,
    /// Custom base URL for API requests.
    pub base_url: Option<String>,
    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_provider() -> String {
    "gemini".into()
}

fn default_model() -> String {
    "gemini-2.5-flash".into()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            api_key: None,
            base_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl LlmConfig {
    /// Conventional API-key environment variable for the configured provider.
    ///
    /// # Examples
    ///
    /// ```
    /// use scamlens_core::LlmConfig;
    ///
    /// let config = LlmConfig::default();
    /// assert_eq!(config.env_key(), "GEMINI_API_KEY");
    /// ```
    pub fn env_key(&self) -> &'static str {
        match self.provider.as_str() {
            "gemini" => "GEMINI_API_KEY",
            "anthropic" => "ANTHROPIC_API_KEY",
            _ => "OPENAI_API_KEY",
        }
    }
}
