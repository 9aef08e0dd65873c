use scamlens_core::HeuristicResult;

/// Build the advice prompt for one piece of content.
///
/// Embeds the content verbatim, the integer heuristic score, and a yes/no
/// restatement of the suspicion flag, then asks for a short explanation, a
/// clear recommendation, and a simple, friendly tone. Deterministic given
/// the same inputs.
///
/// # Examples
///
/// ```
/// use scamlens_advice::prompt::build_advice_prompt;
/// use scamlens_core::HeuristicResult;
///
/// let prompt = build_advice_prompt("check bit.ly/x", &HeuristicResult::new(2));
/// assert!(prompt.contains("check bit.ly/x"));
/// assert!(prompt.contains("score: 2"));
/// assert!(prompt.contains("suspicion: Yes"));
/// ```
pub fn build_advice_prompt(content: &str, result: &HeuristicResult) -> String {
    let suspicion = if result.suspicious { "Yes" } else { "No" };
    format!(
        "Here is a user-submitted content to check for spam, phishing, or scam:\n\
         \n\
         Content: {content}\n\
         \n\
         Heuristic suspicion score: {score}\n\
         Basic suspicion: {suspicion}\n\
         \n\
         Provide:\n\
         - A short explanation of why this may or may not be spam or phishing.\n\
         - Clear recommendations for the user (e.g., don't click, report, or safe to ignore).\n\
         - Keep it simple and friendly.\n",
        score = result.score,
    )
}
