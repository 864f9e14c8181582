use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Persisted rows
// ---------------------------------------------------------------------------

/// One trending-term observation, written once per poll cycle per accepted
/// term. Timestamps are Unix seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTrendSample {
    pub timestamp: i64,
    pub keyword: String,
    pub volume: i64,
    /// WOEID of the locale the term was trending in.
    pub bucket: u64,
}

/// One surviving associated word for a (timestamp, keyword) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssociatedWordSample {
    pub timestamp: i64,
    pub keyword: String,
    pub associated_word: String,
}

// ---------------------------------------------------------------------------
// Derived aggregates (never persisted)
// ---------------------------------------------------------------------------

/// A merged span of same-keyword samples built at query time. `volume` is
/// the opening sample's volume and is not updated as the window extends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendWindow {
    pub start_time: i64,
    pub end_time: i64,
    pub volume: i64,
    pub keyword: String,
}

/// A video-on-demand resolved from one helix response plus its parsed
/// duration. Start and end are Unix seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Vod {
    pub id: String,
    pub user_name: String,
    pub title: String,
    pub start_time: i64,
    pub end_time: i64,
}

// ---------------------------------------------------------------------------
// Ingestion-time values
// ---------------------------------------------------------------------------

/// A trending term accepted by the deduplicator, tagged with the bucket it
/// was accepted from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendEntry {
    pub term: String,
    pub volume: i64,
    pub bucket: u64,
}
