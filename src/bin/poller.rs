use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use trend_recap::config::{Config, POLL_INTERVAL_SECS, TREND_BUCKETS};
use trend_recap::db::TrendStore;
use trend_recap::error::{AppError, Result};
use trend_recap::text::frequency::{count_terms, retained};
use trend_recap::trends::dedup::{select_top_trends, BucketTrends};
use trend_recap::twitter::TwitterClient;
use trend_recap::types::{AssociatedWordSample, RawTrendSample, TrendEntry};

#[tokio::main]
async fn main() {
    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {e}");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cfg.log_level))
        .init();

    let store = match TrendStore::open(&cfg.db_path).await {
        Ok(s) => s,
        Err(e) => {
            error!("Fatal error: {e}");
            std::process::exit(1);
        }
    };
    info!("Database ready at {}", cfg.db_path);

    let http = match reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
    {
        Ok(c) => c,
        Err(e) => {
            error!("Fatal error: {e}");
            std::process::exit(1);
        }
    };
    let twitter = TwitterClient::new(
        http,
        cfg.twitter_api_url.clone(),
        cfg.twitter_bearer_token.clone(),
    );

    let poller = Poller { store, twitter };
    poller.run().await;
}

/// Long-lived ingestion loop. One cycle fetches every bucket's trending
/// terms, deduplicates across buckets, and persists each accepted term plus
/// its frequent associated words, all stamped with the cycle's start time.
/// Cycles never overlap; a failed cycle only delays the next one.
struct Poller {
    store: TrendStore,
    twitter: TwitterClient,
}

impl Poller {
    async fn run(self) {
        loop {
            if let Err(e) = self.cycle().await {
                error!("Poll cycle failed: {e}");
            }
            info!("Sleeping {POLL_INTERVAL_SECS}s until next cycle");
            tokio::time::sleep(Duration::from_secs(POLL_INTERVAL_SECS)).await;
        }
    }

    async fn cycle(&self) -> Result<()> {
        let cycle_ts = now_secs();

        let mut buckets: Vec<BucketTrends> = Vec::with_capacity(TREND_BUCKETS.len());
        for &woeid in TREND_BUCKETS {
            match self.twitter.place_trends(woeid).await {
                Ok(b) => buckets.push(b),
                // A dead bucket shouldn't sink the cycle
                Err(e) => warn!(bucket = woeid, "trend fetch failed: {e}"),
            }
        }

        if buckets.is_empty() {
            return Err(AppError::Lookup("no trend bucket responded".to_string()));
        }

        let entries = select_top_trends(buckets);
        info!(terms = entries.len(), "Cycle selected trending terms");

        let mut words_written = 0usize;
        for entry in &entries {
            self.persist_entry(cycle_ts, entry, &mut words_written).await;
        }

        info!(
            trends = entries.len(),
            associated_words = words_written,
            "Cycle complete at ts {cycle_ts}"
        );
        Ok(())
    }

    async fn persist_entry(&self, cycle_ts: i64, entry: &TrendEntry, words_written: &mut usize) {
        let sample = RawTrendSample {
            timestamp: cycle_ts,
            keyword: entry.term.clone(),
            volume: entry.volume,
            bucket: entry.bucket,
        };
        if let Err(e) = self.store.insert_trend(&sample).await {
            warn!(keyword = %entry.term, "trend insert failed, skipping: {e}");
            return;
        }

        let texts = match self.twitter.search_texts(&entry.term).await {
            Ok(t) => t,
            Err(e) => {
                warn!(keyword = %entry.term, "tweet search failed: {e}");
                return;
            }
        };

        for (word, _count) in retained(count_terms(&texts, &entry.term)) {
            let word_sample = AssociatedWordSample {
                timestamp: cycle_ts,
                keyword: entry.term.clone(),
                associated_word: word,
            };
            match self.store.insert_associated_word(&word_sample).await {
                Ok(()) => *words_written += 1,
                Err(e) => warn!(
                    keyword = %entry.term,
                    word = %word_sample.associated_word,
                    "associated word insert failed, skipping: {e}"
                ),
            }
        }
    }
}

fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}
