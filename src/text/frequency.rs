use std::collections::HashMap;

use crate::config::MIN_ASSOCIATED_WORD_COUNT;
use crate::text::normalizer::candidate_terms;

/// Count candidate terms across a batch of text samples. A sample that
/// normalizes to nothing simply contributes no tokens.
pub fn count_terms<S: AsRef<str>>(samples: &[S], seed: &str) -> HashMap<String, u32> {
    let mut counts: HashMap<String, u32> = HashMap::new();
    for sample in samples {
        for term in candidate_terms(sample.as_ref(), seed) {
            *counts.entry(term).or_insert(0) += 1;
        }
    }
    counts
}

/// Keep only terms frequent enough to persist.
pub fn retained(counts: HashMap<String, u32>) -> HashMap<String, u32> {
    counts
        .into_iter()
        .filter(|(_, count)| *count >= MIN_ASSOCIATED_WORD_COUNT)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_sum_across_samples() {
        let samples: Vec<String> = (0..7).map(|i| format!("foo number {i}")).collect();
        let counts = count_terms(&samples, "number");
        assert_eq!(counts.get("foo"), Some(&7));
    }

    #[test]
    fn threshold_drops_rare_terms() {
        let samples = vec!["foo bar", "foo bar", "foo bar", "foo bar", "foo"];
        let kept = retained(count_terms(&samples, ""));
        assert_eq!(kept.get("foo"), Some(&5));
        // "bar" appeared 4 times, below the retention threshold
        assert!(!kept.contains_key("bar"));
    }

    #[test]
    fn absent_term_is_absent_not_zero() {
        let kept = retained(count_terms(&["nothing here"], ""));
        assert!(!kept.contains_key("foo"));
    }

    #[test]
    fn empty_samples_contribute_nothing() {
        let counts = count_terms(&["", "   ", "!!!"], "seed");
        assert!(counts.is_empty());
    }
}
