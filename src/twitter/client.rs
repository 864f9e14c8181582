use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::config::TWEET_SEARCH_COUNT;
use crate::trends::dedup::BucketTrends;

#[derive(Debug, Deserialize)]
struct PlaceTrendsPage {
    trends: Vec<PlaceTrendItem>,
}

#[derive(Debug, Deserialize)]
struct PlaceTrendItem {
    name: String,
    /// Absent or null for low-volume terms.
    tweet_volume: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    statuses: Vec<Status>,
}

#[derive(Debug, Deserialize)]
struct Status {
    full_text: String,
}

/// Thin typed wrapper over the trend and tweet-search endpoints.
pub struct TwitterClient {
    http: reqwest::Client,
    api_url: String,
    bearer_token: String,
}

impl TwitterClient {
    pub fn new(http: reqwest::Client, api_url: String, bearer_token: String) -> Self {
        Self { http, api_url, bearer_token }
    }

    /// Trending terms for one WOEID. Order is whatever the API returns;
    /// absent tweet volumes map to 0.
    pub async fn place_trends(&self, woeid: u64) -> Result<BucketTrends> {
        let response = self
            .http
            .get(format!("{}/trends/place.json?id={}", self.api_url, woeid))
            .bearer_auth(&self.bearer_token)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(AppError::Lookup(format!(
                "trends request for bucket {woeid} returned status {}",
                response.status()
            )));
        }

        // The endpoint wraps the single requested location in an array.
        let pages: Vec<PlaceTrendsPage> = response.json().await?;
        let terms = pages
            .into_iter()
            .next()
            .map(|page| {
                page.trends
                    .into_iter()
                    .map(|t| (t.name, t.tweet_volume.unwrap_or(0)))
                    .collect()
            })
            .unwrap_or_default();

        Ok(BucketTrends { bucket: woeid, terms })
    }

    /// Full-text bodies of popular English tweets mentioning `term`.
    pub async fn search_texts(&self, term: &str) -> Result<Vec<String>> {
        let count = TWEET_SEARCH_COUNT.to_string();
        let response = self
            .http
            .get(format!("{}/search/tweets.json", self.api_url))
            .query(&[
                ("q", term),
                ("lang", "en"),
                ("result_type", "popular"),
                ("count", count.as_str()),
                ("tweet_mode", "extended"),
            ])
            .bearer_auth(&self.bearer_token)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(AppError::Lookup(format!(
                "tweet search for {term:?} returned status {}",
                response.status()
            )));
        }

        let body: SearchResponse = response.json().await?;
        Ok(body.statuses.into_iter().map(|s| s.full_text).collect())
    }
}
