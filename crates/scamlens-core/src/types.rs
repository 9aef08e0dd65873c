use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of content submitted for analysis.
///
/// Advisory metadata only: the kind is carried through to the report for
/// display but never changes how the content is scored.
///
/// # Examples
///
/// ```
/// use scamlens_core::InputKind;
///
/// let kind: InputKind = "sms".parse().unwrap();
/// assert_eq!(kind, InputKind::Sms);
/// assert_eq!(kind.to_string(), "sms");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    /// A URL or link.
    #[default]
    Url,
    /// An SMS message body.
    Sms,
    /// An email body.
    Email,
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputKind::Url => write!(f, "url"),
            InputKind::Sms => write!(f, "sms"),
            InputKind::Email => write!(f, "email"),
        }
    }
}

impl FromStr for InputKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "url" => Ok(InputKind::Url),
            "sms" => Ok(InputKind::Sms),
            "email" => Ok(InputKind::Email),
            other => Err(format!("unknown input kind: {other}")),
        }
    }
}

/// Score at or above which content is flagged as suspicious.
pub const SUSPICION_THRESHOLD: u32 = 2;

/// Outcome of the heuristic spam/phishing rules for one piece of content.
///
/// The `suspicious` flag is derived deterministically from the score at
/// construction and is never set independently.
///
/// # Examples
///
/// ```
/// use scamlens_core::HeuristicResult;
///
/// let result = HeuristicResult::new(3);
/// assert_eq!(result.score, 3);
/// assert!(result.suspicious);
///
/// let benign = HeuristicResult::new(1);
/// assert!(!benign.suspicious);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeuristicResult {
    /// Accumulated rule score (non-negative).
    pub score: u32,
    /// Whether the score meets [`SUSPICION_THRESHOLD`].
    pub suspicious: bool,
}

impl HeuristicResult {
    /// Create a result from an accumulated rule score.
    ///
    /// # Examples
    ///
    /// ```
    /// use scamlens_core::{HeuristicResult, SUSPICION_THRESHOLD};
    ///
    /// let at_threshold = HeuristicResult::new(SUSPICION_THRESHOLD);
    /// assert!(at_threshold.suspicious);
    ///
    /// let below = HeuristicResult::new(SUSPICION_THRESHOLD - 1);
    /// assert!(!below.suspicious);
    /// ```
    pub fn new(score: u32) -> Self {
        Self {
            score,
            suspicious: score >= SUSPICION_THRESHOLD,
        }
    }
}

impl fmt::Display for HeuristicResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flag = if self.suspicious { "yes" } else { "no" };
        write!(f, "score {} (suspicious: {flag})", self.score)
    }
}

/// Output format for CLI subcommands.
///
/// Implements [`FromStr`] so it can be used directly with `clap` argument
/// parsing.
///
/// # Examples
///
/// ```
/// use scamlens_core::OutputFormat;
///
/// let fmt: OutputFormat = "json".parse().unwrap();
/// assert_eq!(fmt, OutputFormat::Json);
///
/// let fmt: OutputFormat = "md".parse().unwrap();
/// assert_eq!(fmt, OutputFormat::Markdown);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text (default).
    #[default]
    Text,
    /// Machine-readable JSON with camelCase keys.
    Json,
    /// Markdown-formatted output.
    Markdown,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}
