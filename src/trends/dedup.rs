use std::collections::HashSet;

use crate::config::MAX_TERMS_PER_BUCKET;
use crate::types::TrendEntry;

/// One source bucket's raw trending terms, as fetched. Upstream order is
/// unspecified; selection sorts by volume before picking.
#[derive(Debug, Clone)]
pub struct BucketTrends {
    pub bucket: u64,
    /// (term, tweet volume) pairs.
    pub terms: Vec<(String, i64)>,
}

/// Select the terms to persist this cycle. Buckets are processed in the
/// given order; within a bucket, terms are taken in descending-volume order
/// until the per-bucket cap is hit. A term already accepted from an earlier
/// bucket is suppressed (exact, case-sensitive match), so earlier buckets
/// win ties. Yields at most `MAX_TERMS_PER_BUCKET * buckets.len()` entries.
pub fn select_top_trends(buckets: Vec<BucketTrends>) -> Vec<TrendEntry> {
    let mut out = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for BucketTrends { bucket, mut terms } in buckets {
        terms.sort_by(|a, b| b.1.cmp(&a.1));

        let mut accepted = 0;
        for (term, volume) in terms {
            if accepted >= MAX_TERMS_PER_BUCKET {
                break;
            }
            if seen.contains(&term) {
                continue;
            }
            seen.insert(term.clone());
            out.push(TrendEntry { term, volume, bucket });
            accepted += 1;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket(id: u64, terms: &[(&str, i64)]) -> BucketTrends {
        BucketTrends {
            bucket: id,
            terms: terms.iter().map(|(t, v)| (t.to_string(), *v)).collect(),
        }
    }

    #[test]
    fn cross_bucket_duplicates_are_suppressed() {
        let selected = select_top_trends(vec![
            bucket(1, &[("x", 100), ("y", 50)]),
            bucket(2, &[("x", 90), ("z", 80)]),
        ]);
        let flat: Vec<(&str, u64)> =
            selected.iter().map(|e| (e.term.as_str(), e.bucket)).collect();
        assert_eq!(flat, vec![("x", 1), ("y", 1), ("z", 2)]);
    }

    #[test]
    fn selection_is_descending_volume_within_bucket() {
        let selected = select_top_trends(vec![bucket(1, &[("low", 5), ("high", 500), ("mid", 50)])]);
        let terms: Vec<&str> = selected.iter().map(|e| e.term.as_str()).collect();
        assert_eq!(terms, vec!["high", "mid", "low"]);
    }

    #[test]
    fn per_bucket_cap_applies() {
        let terms: Vec<(String, i64)> =
            (0..20).map(|i| (format!("t{i}"), 1000 - i as i64)).collect();
        let selected = select_top_trends(vec![BucketTrends { bucket: 1, terms }]);
        assert_eq!(selected.len(), MAX_TERMS_PER_BUCKET);
        assert_eq!(selected[0].term, "t0");
    }

    #[test]
    fn duplicates_do_not_consume_the_cap() {
        // 12 duplicates of an earlier bucket's term must not starve the rest
        let mut terms = vec![("dup".to_string(), 999)];
        terms.extend((0..12).map(|i| (format!("t{i}"), 100 - i as i64)));
        let selected = select_top_trends(vec![
            bucket(1, &[("dup", 10)]),
            BucketTrends { bucket: 2, terms },
        ]);
        assert_eq!(selected.len(), 13);
        assert_eq!(selected[0].term, "dup");
        assert_eq!(selected[0].bucket, 1);
    }

    #[test]
    fn matching_is_case_sensitive() {
        let selected = select_top_trends(vec![
            bucket(1, &[("Term", 10)]),
            bucket(2, &[("term", 10)]),
        ]);
        assert_eq!(selected.len(), 2);
    }
}
