//! Keyword rule matching, the fast path before any model call.

use pulso_core::SentimentLabel;

/// Case-insensitive substring match against the configured keyword lists.
///
/// The positive list is checked first; the first list with any hit decides
/// the label, so a text containing keywords from both lists comes out
/// positive. Returns `None` when neither list matches.
#[must_use]
pub fn keyword_match(text: &str, positive: &[String], negative: &[String]) -> Option<SentimentLabel> {
    let lowered = text.to_lowercase();
    if positive.iter().any(|k| lowered.contains(&k.to_lowercase())) {
        return Some(SentimentLabel::Positive);
    }
    if negative.iter().any(|k| lowered.contains(&k.to_lowercase())) {
        return Some(SentimentLabel::Negative);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kw(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| (*w).to_owned()).collect()
    }

    #[test]
    fn matches_are_case_insensitive_substrings() {
        let positive = kw(&["excelente", "love"]);
        let negative = kw(&["horrible"]);
        assert_eq!(
            keyword_match("EXCELENTE servicio!", &positive, &negative),
            Some(SentimentLabel::Positive)
        );
        assert_eq!(
            keyword_match("una experiencia Horrible", &positive, &negative),
            Some(SentimentLabel::Negative)
        );
    }

    #[test]
    fn positive_list_wins_when_both_match() {
        let positive = kw(&["love"]);
        let negative = kw(&["hate"]);
        assert_eq!(
            keyword_match("love it and hate it", &positive, &negative),
            Some(SentimentLabel::Positive)
        );
    }

    #[test]
    fn no_keyword_means_no_decision() {
        let positive = kw(&["love"]);
        let negative = kw(&["hate"]);
        assert!(keyword_match("just a plain comment", &positive, &negative).is_none());
    }
}
