use scamlens_core::HeuristicResult;

/// Keywords that each add one point when present (case-insensitive substring).
pub const SPAM_KEYWORDS: [&str; 7] = [
    "free",
    "urgent",
    "click here",
    "win",
    "limited time",
    "act now",
    "verify account",
];

/// Link-shortener domains that add two points when any is present
/// (case-sensitive substring).
pub const SHORTENER_DOMAINS: [&str; 4] = ["bit.ly", "tinyurl", "t.co", "goo.gl"];

/// More `!` characters than this add one point.
const EXCLAMATION_LIMIT: usize = 3;

/// All-caps tokens must be longer than this to count as shouting.
const SHOUT_MIN_CHARS: usize = 4;

/// Score a piece of content against the fixed heuristic rules.
///
/// Pure and total: every string scores, the empty string scores 0. Each rule
/// contributes independently, no rule short-circuits another:
///
/// 1. one point per matched keyword from [`SPAM_KEYWORDS`]
/// 2. one point for more than three `!` characters
/// 3. one point if any whitespace-split token is entirely upper-case and
///    longer than four characters
/// 4. two points if any [`SHORTENER_DOMAINS`] substring is present
///
/// Keyword matching is substring-based, so "freedom" matches "free". That is
/// the intended behavior of these rules, not an oversight.
///
/// # Examples
///
/// ```
/// use scamlens_heuristics::score;
///
/// assert_eq!(score("").score, 0);
/// assert_eq!(score("hello there").score, 0);
///
/// let result = score("WIN a FREE prize now!!!! click here: bit.ly/abc");
/// assert_eq!(result.score, 6);
/// assert!(result.suspicious);
/// ```
pub fn score(text: &str) -> HeuristicResult {
    let mut score = keyword_hits(text);

    if exclamation_count(text) > EXCLAMATION_LIMIT {
        score += 1;
    }
    if has_shouted_token(text) {
        score += 1;
    }
    if has_shortened_url(text) {
        score += 2;
    }

    HeuristicResult::new(score)
}

/// Number of distinct keywords present in `text`, case-insensitively.
///
/// Each keyword counts at most once regardless of how often it occurs.
fn keyword_hits(text: &str) -> u32 {
    let lowered = text.to_lowercase();
    SPAM_KEYWORDS
        .iter()
        .copied()
        .filter(|kw| lowered.contains(kw))
        .count() as u32
}

fn exclamation_count(text: &str) -> usize {
    text.chars().filter(|c| *c == '!').count()
}

fn has_shouted_token(text: &str) -> bool {
    text.split_whitespace().any(is_shouted)
}

/// A token is shouted when it has at least one upper-case letter, no
/// lower-case letters, and more than [`SHOUT_MIN_CHARS`] characters.
/// Attached punctuation counts toward the length ("HELLO!!" qualifies).
fn is_shouted(token: &str) -> bool {
    let mut has_upper = false;
    for c in token.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_upper = true;
        }
    }
    has_upper && token.chars().count() > SHOUT_MIN_CHARS
}

fn has_shortened_url(text: &str) -> bool {
    SHORTENER_DOMAINS.iter().any(|domain| text.contains(domain))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_benign_text_score_zero() {
        assert_eq!(score("").score, 0);
        assert!(!score("").suspicious);
        assert_eq!(score("   \t\n").score, 0);
        assert_eq!(score("see you at lunch tomorrow").score, 0);
        assert_eq!(score("the meeting moved to 3pm!").score, 0);
    }

    #[test]
    fn each_keyword_contributes_exactly_one() {
        for kw in SPAM_KEYWORDS {
            let result = score(kw);
            assert_eq!(result.score, 1, "keyword {kw:?} should score 1");
            assert!(!result.suspicious);
        }
    }

    #[test]
    fn keyword_match_is_case_insensitive() {
        // Mixed case keeps the shouting rule out of the tally.
        assert_eq!(score("Urgent").score, 1);
        assert_eq!(score("Verify Account").score, 1);
        assert_eq!(score("Click Here").score, 1);
    }

    #[test]
    fn all_caps_keyword_also_counts_as_shouting() {
        // "URGENT" matches the keyword and is a shouted token of 6 chars.
        assert_eq!(score("URGENT").score, 2);
    }

    #[test]
    fn repeated_keyword_counts_once() {
        assert_eq!(score("free free free").score, 1);
    }

    #[test]
    fn distinct_keywords_accumulate() {
        assert_eq!(score("free win").score, 2);
        assert_eq!(score("free urgent win").score, 3);
    }

    #[test]
    fn keyword_matches_inside_longer_words() {
        // Substring semantics are intentional: "freedom" contains "free",
        // "window" contains "win".
        assert_eq!(score("freedom").score, 1);
        assert_eq!(score("window").score, 1);
    }

    #[test]
    fn exclamation_threshold_is_strictly_more_than_three() {
        assert_eq!(score("!!!").score, 0);
        assert_eq!(score("!!!!").score, 1);
        assert_eq!(score("wow!! really!!").score, 1);
    }

    #[test]
    fn shouting_requires_length_above_four() {
        assert_eq!(score("HELLO world").score, 1);
        assert_eq!(score("HI world").score, 0);
        assert_eq!(score("FREE stuff").score, 1, "FREE is only 4 chars, keyword only");
    }

    #[test]
    fn shouting_is_binary_across_tokens() {
        assert_eq!(score("HELLO THERE EVERYONE").score, 1);
    }

    #[test]
    fn shouting_counts_attached_punctuation_toward_length() {
        // "WOW!!" has no lower-case letters and 5 chars total.
        assert_eq!(score("WOW!! ok").score, 1);
    }

    #[test]
    fn mixed_case_token_is_not_shouting() {
        assert_eq!(score("Hello WORLd").score, 0);
    }

    #[test]
    fn digits_alone_are_not_shouting() {
        assert_eq!(score("123456 78901").score, 0);
    }

    #[test]
    fn shortened_url_adds_two() {
        let result = score("check bit.ly/x");
        assert_eq!(result.score, 2);
        assert!(result.suspicious);
    }

    #[test]
    fn each_shortener_domain_is_recognized() {
        for domain in SHORTENER_DOMAINS {
            assert_eq!(score(domain).score, 2, "domain {domain:?} should score 2");
        }
    }

    #[test]
    fn shortener_match_is_case_sensitive() {
        assert_eq!(score("BIT.LY/x").score, 0);
    }

    #[test]
    fn multiple_shorteners_still_add_two() {
        assert_eq!(score("bit.ly and tinyurl").score, 2);
    }

    #[test]
    fn score_one_is_not_suspicious() {
        let result = score("free");
        assert_eq!(result.score, 1);
        assert!(!result.suspicious);
    }

    #[test]
    fn score_two_is_suspicious() {
        let result = score("free win");
        assert_eq!(result.score, 2);
        assert!(result.suspicious);
    }

    #[test]
    fn prize_scam_end_to_end() {
        // "WIN", "a", "FREE", "prize", "now!!!!", "click", "here:",
        // "bit.ly/abc": three keywords (win, free, click here), four
        // exclamation marks, no token both all-caps and longer than four
        // chars, one shortener.
        let result = score("WIN a FREE prize now!!!! click here: bit.ly/abc");
        assert_eq!(result.score, 6);
        assert!(result.suspicious);
    }

    #[test]
    fn rules_accumulate_independently() {
        // keyword (urgent) + exclamations + shouting + shortener
        let result = score("URGENT!!!! ACTION required at bit.ly/pay");
        assert_eq!(result.score, 5);
        assert!(result.suspicious);
    }
}
