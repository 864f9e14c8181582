use std::sync::LazyLock;

use regex::Regex;

use crate::text::stopwords::is_stopword;

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(www\.[^\s]+)|(https?://[^\s]+)").unwrap());
static NON_SPACE_WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\t\n\r\f\v]").unwrap());
static HASHTAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#([^\s]+)").unwrap());
static NON_ALPHA_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z\s]").unwrap());
static MULTI_SPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\s]{2,}").unwrap());

/// Sanitize one free-text sample down to lowercase alphabetic words.
/// The rewrite order matters: URLs must go before the non-alpha sweep or
/// their remnants leak into the token stream. Idempotent.
pub fn normalize(text: &str) -> String {
    let text = text.to_lowercase();
    let text = URL_RE.replace_all(&text, "");
    let text = NON_SPACE_WS_RE.replace_all(&text, " ");
    let text = HASHTAG_RE.replace_all(&text, "$1");
    let text = text.replace('\'', "");
    let text = NON_ALPHA_RE.replace_all(&text, " ");
    let text = MULTI_SPACE_RE.replace_all(&text, " ");
    text.trim().to_string()
}

/// Candidate associated words of one sample: the normalized tokens minus
/// empties, the seed term itself, and English stopwords.
pub fn candidate_terms(text: &str, seed: &str) -> Vec<String> {
    normalize(text)
        .split_whitespace()
        .filter(|w| !w.is_empty() && *w != seed && !is_stopword(w))
        .map(|w| w.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_urls_hashtags_and_punctuation() {
        let terms = candidate_terms("Check http://x.co #Hype it's GREAT!!", "hype");
        assert!(!terms.contains(&"hype".to_string()));
        assert!(terms.contains(&"check".to_string()));
        assert!(terms.contains(&"great".to_string()));
        assert!(terms.iter().all(|t| !t.contains("http") && !t.contains("x.co")));
        // "it's" collapses to "its", which the stopword set removes
        assert_eq!(terms, vec!["check", "great"]);
    }

    #[test]
    fn strips_www_urls() {
        let terms = candidate_terms("go watch www.example.com/live stream", "go");
        assert_eq!(terms, vec!["watch", "stream"]);
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = normalize("Some #tag text\twith  http://u.rl and MORE!");
        let twice = normalize(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn numbers_and_symbols_become_spaces() {
        assert_eq!(normalize("abc123def 40% off"), "abc def off");
    }

    #[test]
    fn seed_term_excluded_stopwords_excluded() {
        let terms = candidate_terms("the stream is live stream", "live");
        assert_eq!(terms, vec!["stream", "stream"]);
    }
}
