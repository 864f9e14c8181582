use crate::config::TREND_GAP_SECS;
use crate::types::{RawTrendSample, TrendWindow};

/// Merge a time-ascending run of trend samples into display-ready windows.
///
/// Single pass: each row either extends the first open window whose keyword
/// matches and whose end lies within the gap threshold, or opens a new one.
/// First match wins — two windows for the same keyword are never merged
/// with each other, even if a later row would bridge them. Windows are
/// never closed; everything opened during the pass is returned.
///
/// `volume` stays at the value of the sample that opened the window.
/// O(rows * open_windows), fine for the row counts a bounded time range
/// produces.
pub fn build_windows<I>(rows: I) -> Vec<TrendWindow>
where
    I: IntoIterator<Item = RawTrendSample>,
{
    let mut windows: Vec<TrendWindow> = Vec::new();

    for row in rows {
        let existing = windows
            .iter_mut()
            .find(|w| w.keyword == row.keyword && w.end_time + TREND_GAP_SECS > row.timestamp);

        match existing {
            Some(window) => window.end_time = row.timestamp,
            None => windows.push(TrendWindow {
                start_time: row.timestamp,
                end_time: row.timestamp,
                volume: row.volume,
                keyword: row.keyword,
            }),
        }
    }

    windows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(timestamp: i64, keyword: &str, volume: i64) -> RawTrendSample {
        RawTrendSample {
            timestamp,
            keyword: keyword.to_string(),
            volume,
            bucket: 1,
        }
    }

    #[test]
    fn close_samples_merge_into_one_window() {
        let windows = build_windows(vec![
            sample(0, "k", 10),
            sample(1000, "k", 20),
            sample(3300, "k", 30),
        ]);
        assert_eq!(
            windows,
            vec![TrendWindow {
                start_time: 0,
                end_time: 3300,
                volume: 10,
                keyword: "k".to_string(),
            }]
        );
    }

    #[test]
    fn gap_is_measured_from_the_window_end() {
        // 1000 extends the window, but 5000 is 4000s past the new end and
        // must open a second window
        let windows = build_windows(vec![
            sample(0, "k", 10),
            sample(1000, "k", 20),
            sample(5000, "k", 30),
        ]);
        assert_eq!(
            windows,
            vec![
                TrendWindow { start_time: 0, end_time: 1000, volume: 10, keyword: "k".to_string() },
                TrendWindow { start_time: 5000, end_time: 5000, volume: 30, keyword: "k".to_string() },
            ]
        );
    }

    #[test]
    fn gap_at_threshold_starts_a_new_window() {
        let windows = build_windows(vec![sample(0, "k", 10), sample(3000, "k", 20)]);
        assert_eq!(windows.len(), 2);
        assert_eq!(windows[0].end_time, 0);
        assert_eq!(windows[1].start_time, 3000);
        assert_eq!(windows[1].volume, 20);
    }

    #[test]
    fn exact_gap_threshold_is_exclusive() {
        // end_time + 2400 > ts must be strict: a sample exactly 2400s later
        // does not extend the window
        let windows = build_windows(vec![sample(0, "k", 10), sample(2400, "k", 20)]);
        assert_eq!(windows.len(), 2);
        let windows = build_windows(vec![sample(0, "k", 10), sample(2399, "k", 20)]);
        assert_eq!(windows.len(), 1);
    }

    #[test]
    fn different_keywords_never_share_a_window() {
        let windows = build_windows(vec![sample(0, "a", 1), sample(10, "b", 2)]);
        assert_eq!(windows.len(), 2);
    }

    #[test]
    fn volume_is_pinned_to_the_opening_sample() {
        let windows = build_windows(vec![sample(0, "k", 10), sample(100, "k", 9999)]);
        assert_eq!(windows[0].volume, 10);
    }

    #[test]
    fn later_rows_extend_the_newest_reachable_window() {
        let windows = build_windows(vec![
            sample(0, "k", 1),
            sample(3000, "k", 2),
            sample(3100, "k", 3),
        ]);
        // 3000 opened a second window; 3100 is only reachable from it
        // (window 1's end never advanced past 0).
        assert_eq!(windows.len(), 2);
        assert_eq!(windows[0].end_time, 0);
        assert_eq!(windows[1].end_time, 3100);
    }

    #[test]
    fn first_match_wins_windows_do_not_merge() {
        // A row in range of two same-keyword windows extends the earliest
        // one and leaves the other alone; the pair is never collapsed.
        let windows = build_windows(vec![
            sample(0, "k", 1),
            sample(2000, "k", 2),
            sample(4500, "k", 3),
            sample(4000, "k", 4),
        ]);
        assert_eq!(windows.len(), 2);
        assert_eq!(windows[0].end_time, 4000);
        assert_eq!(windows[1].end_time, 4500);
    }

    #[test]
    fn empty_input_yields_no_windows() {
        assert!(build_windows(Vec::new()).is_empty());
    }
}
