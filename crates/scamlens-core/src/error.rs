/// Errors that can occur across the scamlens crates.
///
/// Each variant wraps a specific error domain. Library crates use this type
/// directly; the binary crate converts to miette diagnostics at the boundary.
///
/// # Examples
///
/// ```
/// use scamlens_core::ScamlensError;
///
/// let err = ScamlensError::Config("missing model name".into());
/// assert!(err.to_string().contains("missing model name"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ScamlensError {
    /// Filesystem I/O failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or missing configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Empty or whitespace-only content submitted for analysis.
    #[error("input error: {0}")]
    Input(String),

    /// The text generation service failed or returned an unusable response.
    ///
    /// Covers network errors, authentication and quota rejections, timeouts,
    /// non-success HTTP statuses, unexpected response shapes, and empty
    /// responses. Generation failures are never retried.
    #[error("generation error: {0}")]
    Generation(String),

    /// JSON serialization / deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML deserialization failure.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}
