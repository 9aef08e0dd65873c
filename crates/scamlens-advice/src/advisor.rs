use std::fmt;

use serde::Serialize;

use scamlens_core::{HeuristicResult, InputKind, ScamlensError};

use crate::llm::TextGenerator;
use crate::prompt;

/// Advice text produced by the generation service.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Advice {
    /// Free-form explanation and recommendation prose.
    pub text: String,
    /// Model that produced the advice.
    pub model: String,
}

/// The combined, renderable outcome of one check.
///
/// The heuristic half is always present; the advice half is either the
/// generated [`Advice`], a failure notice, or absent when advice was
/// skipped.
///
/// # Examples
///
/// ```
/// use scamlens_advice::advisor::CheckReport;
/// use scamlens_core::{HeuristicResult, InputKind};
///
/// let report = CheckReport::heuristic_only(InputKind::Sms, "free win", HeuristicResult::new(2));
/// assert!(report.heuristic.suspicious);
/// assert!(report.advice.is_none());
/// assert!(report.advice_error.is_none());
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckReport {
    /// Declared kind of the analyzed content.
    pub kind: InputKind,
    /// Length of the analyzed content in characters.
    pub content_chars: usize,
    /// Outcome of the heuristic rules.
    pub heuristic: HeuristicResult,
    /// Generated advice, when the round trip succeeded.
    pub advice: Option<Advice>,
    /// Failure notice, when advice was requested but generation failed.
    pub advice_error: Option<String>,
}

impl CheckReport {
    /// Report for a check where advice was not requested.
    pub fn heuristic_only(kind: InputKind, content: &str, heuristic: HeuristicResult) -> Self {
        Self {
            kind,
            content_chars: content.chars().count(),
            heuristic,
            advice: None,
            advice_error: None,
        }
    }

    /// Report carrying successfully generated advice.
    pub fn with_advice(
        kind: InputKind,
        content: &str,
        heuristic: HeuristicResult,
        advice: Advice,
    ) -> Self {
        Self {
            kind,
            content_chars: content.chars().count(),
            heuristic,
            advice: Some(advice),
            advice_error: None,
        }
    }

    /// Report for a check where advice generation failed.
    ///
    /// The heuristic result still renders; the failure shows up as a notice
    /// in place of the advice text.
    pub fn with_failure(
        kind: InputKind,
        content: &str,
        heuristic: HeuristicResult,
        error: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            content_chars: content.chars().count(),
            heuristic,
            advice: None,
            advice_error: Some(error.into()),
        }
    }

    /// Render the report as markdown.
    ///
    /// # Examples
    ///
    /// ```
    /// use scamlens_advice::advisor::CheckReport;
    /// use scamlens_core::{HeuristicResult, InputKind};
    ///
    /// let report = CheckReport::heuristic_only(InputKind::Url, "x", HeuristicResult::new(0));
    /// let md = report.to_markdown();
    /// assert!(md.contains("# Check Report"));
    /// ```
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str("# Check Report\n\n");
        out.push_str(&format!(
            "**Kind:** {} | **Suspicion score:** {} | **Likely suspicious:** {}\n\n",
            self.kind,
            self.heuristic.score,
            if self.heuristic.suspicious { "yes" } else { "no" },
        ));

        if let Some(advice) = &self.advice {
            out.push_str(&format!("## Recommendations ({})\n\n", advice.model));
            out.push_str(&advice.text);
            if !advice.text.ends_with('\n') {
                out.push('\n');
            }
        } else if let Some(err) = &self.advice_error {
            out.push_str("## Recommendations\n\n");
            out.push_str(&format!("> Advice unavailable: {err}\n"));
        }
        out
    }
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Heuristic Result")?;
        writeln!(f, "================")?;
        writeln!(f, "Kind: {}", self.kind)?;
        writeln!(f, "Suspicion score: {}", self.heuristic.score)?;
        writeln!(
            f,
            "Likely suspicious: {}",
            if self.heuristic.suspicious { "yes" } else { "no" }
        )?;

        if let Some(advice) = &self.advice {
            writeln!(f)?;
            writeln!(f, "Recommendations ({})", advice.model)?;
            writeln!(f, "----------------")?;
            writeln!(f, "{}", advice.text.trim_end())?;
        } else if let Some(err) = &self.advice_error {
            writeln!(f)?;
            writeln!(f, "Advice unavailable: {err}")?;
        }
        Ok(())
    }
}

/// Requests advice from an injected [`TextGenerator`].
///
/// One prompt, one round trip, no retries. Holds no state between calls.
pub struct Advisor<G> {
    generator: G,
}

impl<G: TextGenerator> Advisor<G> {
    /// Create an advisor around a generation capability.
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    /// Request advice for `content` given its heuristic result.
    ///
    /// # Errors
    ///
    /// Returns [`ScamlensError::Generation`] if the generator fails or
    /// returns an empty response.
    pub async fn advise(
        &self,
        content: &str,
        heuristic: &HeuristicResult,
    ) -> Result<Advice, ScamlensError> {
        let prompt = prompt::build_advice_prompt(content, heuristic);
        let text = self.generator.generate(&prompt).await?;
        if text.trim().is_empty() {
            return Err(ScamlensError::Generation(
                "generator returned empty advice".into(),
            ));
        }
        Ok(Advice {
            text,
            model: self.generator.model().to_string(),
        })
    }

    /// Assemble a full report, failing closed on generation errors.
    ///
    /// Any [`ScamlensError::Generation`] from the round trip is converted
    /// into the report's failure notice; the heuristic result is always
    /// preserved.
    pub async fn report(
        &self,
        kind: InputKind,
        content: &str,
        heuristic: HeuristicResult,
    ) -> CheckReport {
        match self.advise(content, &heuristic).await {
            Ok(advice) => CheckReport::with_advice(kind, content, heuristic, advice),
            Err(e) => CheckReport::with_failure(kind, content, heuristic, e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoGenerator(&'static str);

    impl TextGenerator for EchoGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String, ScamlensError> {
            Ok(self.0.to_string())
        }

        fn model(&self) -> &str {
            "echo-model"
        }
    }

    struct FailingGenerator;

    impl TextGenerator for FailingGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String, ScamlensError> {
            Err(ScamlensError::Generation("connection refused".into()))
        }
    }

    struct EmptyGenerator;

    impl TextGenerator for EmptyGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String, ScamlensError> {
            Ok("   \n".into())
        }
    }

    struct PromptCapture;

    impl TextGenerator for PromptCapture {
        async fn generate(&self, prompt: &str) -> Result<String, ScamlensError> {
            Ok(prompt.to_string())
        }
    }

    #[tokio::test]
    async fn advise_returns_generator_output() {
        let advisor = Advisor::new(EchoGenerator("looks safe to ignore"));
        let advice = advisor
            .advise("hello", &HeuristicResult::new(0))
            .await
            .unwrap();
        assert_eq!(advice.text, "looks safe to ignore");
        assert_eq!(advice.model, "echo-model");
    }

    #[tokio::test]
    async fn advise_propagates_generation_failure() {
        let advisor = Advisor::new(FailingGenerator);
        let err = advisor
            .advise("hello", &HeuristicResult::new(0))
            .await
            .unwrap_err();
        assert!(matches!(err, ScamlensError::Generation(_)));
    }

    #[tokio::test]
    async fn advise_rejects_empty_response() {
        let advisor = Advisor::new(EmptyGenerator);
        let err = advisor
            .advise("hello", &HeuristicResult::new(0))
            .await
            .unwrap_err();
        assert!(matches!(err, ScamlensError::Generation(_)));
        assert!(err.to_string().contains("empty"));
    }

    #[tokio::test]
    async fn advise_sends_the_templated_prompt() {
        let advisor = Advisor::new(PromptCapture);
        let heuristic = HeuristicResult::new(2);
        let advice = advisor.advise("free win", &heuristic).await.unwrap();
        assert_eq!(advice.text, prompt::build_advice_prompt("free win", &heuristic));
    }

    #[tokio::test]
    async fn report_fails_closed_and_keeps_heuristic() {
        let advisor = Advisor::new(FailingGenerator);
        let heuristic = HeuristicResult::new(6);
        let report = advisor
            .report(InputKind::Sms, "WIN free bit.ly/x", heuristic)
            .await;
        assert_eq!(report.heuristic, heuristic);
        assert!(report.advice.is_none());
        let notice = report.advice_error.as_deref().unwrap();
        assert!(notice.contains("connection refused"));
    }

    #[tokio::test]
    async fn report_carries_advice_on_success() {
        let advisor = Advisor::new(EchoGenerator("do not click the link"));
        let report = advisor
            .report(InputKind::Url, "check bit.ly/x", HeuristicResult::new(2))
            .await;
        assert_eq!(report.advice.unwrap().text, "do not click the link");
        assert!(report.advice_error.is_none());
    }

    #[test]
    fn display_shows_heuristic_and_failure_notice() {
        let report = CheckReport::with_failure(
            InputKind::Email,
            "free stuff",
            HeuristicResult::new(1),
            "request timed out",
        );
        let text = format!("{report}");
        assert!(text.contains("Suspicion score: 1"));
        assert!(text.contains("Likely suspicious: no"));
        assert!(text.contains("Advice unavailable: request timed out"));
    }

    #[test]
    fn display_shows_advice_text() {
        let report = CheckReport::with_advice(
            InputKind::Sms,
            "free win",
            HeuristicResult::new(2),
            Advice {
                text: "report and delete this message".into(),
                model: "gemini-2.5-flash".into(),
            },
        );
        let text = format!("{report}");
        assert!(text.contains("Likely suspicious: yes"));
        assert!(text.contains("report and delete this message"));
        assert!(text.contains("gemini-2.5-flash"));
    }

    #[test]
    fn markdown_renders_both_halves() {
        let report = CheckReport::with_advice(
            InputKind::Url,
            "check bit.ly/x",
            HeuristicResult::new(2),
            Advice {
                text: "do not click".into(),
                model: "m".into(),
            },
        );
        let md = report.to_markdown();
        assert!(md.contains("# Check Report"));
        assert!(md.contains("**Suspicion score:** 2"));
        assert!(md.contains("do not click"));
    }

    #[test]
    fn report_serializes_camel_case() {
        let report = CheckReport::with_failure(
            InputKind::Sms,
            "free",
            HeuristicResult::new(1),
            "boom",
        );
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("contentChars").is_some());
        assert!(json.get("adviceError").is_some());
        assert!(json.get("advice_error").is_none());
        assert_eq!(json["heuristic"]["score"], 1);
        assert_eq!(json["heuristic"]["suspicious"], false);
    }

    #[test]
    fn content_chars_counts_characters() {
        let report =
            CheckReport::heuristic_only(InputKind::Sms, "héllo", HeuristicResult::new(0));
        assert_eq!(report.content_chars, 5);
    }
}
