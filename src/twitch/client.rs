use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use crate::duration;
use crate::error::{AppError, Result};
use crate::twitch::TokenProvider;
use crate::types::Vod;

#[derive(Debug, Deserialize)]
struct VideosResponse {
    data: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    id: String,
    user_name: String,
    title: String,
    /// ISO-8601 UTC, `%Y-%m-%dT%H:%M:%SZ`
    created_at: String,
    /// Compact encoding, e.g. `"3h21m8s"`
    duration: String,
}

/// Helix video lookup. Holds the credential provider; on a 401 it refreshes
/// the token and retries the request once.
pub struct TwitchClient {
    http: reqwest::Client,
    api_url: String,
    client_id: String,
    tokens: Arc<TokenProvider>,
}

impl TwitchClient {
    pub fn new(
        http: reqwest::Client,
        api_url: String,
        client_id: String,
        tokens: Arc<TokenProvider>,
    ) -> Self {
        Self { http, api_url, client_id, tokens }
    }

    pub async fn get_vod(&self, video_id: &str) -> Result<Vod> {
        let mut response = self.fetch_video(video_id, &self.tokens.current().await).await?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            debug!("helix rejected token, refreshing");
            let fresh = self.tokens.refresh().await?;
            response = self.fetch_video(video_id, &fresh).await?;
        }

        if !response.status().is_success() {
            return Err(AppError::Lookup(format!(
                "video request returned status {}",
                response.status()
            )));
        }

        let body: VideosResponse = response.json().await?;
        let item = body
            .data
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Lookup(format!("no video with id {video_id}")))?;

        let start_time = parse_iso_to_unix_secs(&item.created_at)
            .ok_or_else(|| AppError::Lookup(format!("unparseable created_at {:?}", item.created_at)))?;
        let end_time = start_time + duration::parse(&item.duration)?.total_seconds();

        Ok(Vod {
            id: item.id,
            user_name: item.user_name,
            title: item.title,
            start_time,
            end_time,
        })
    }

    async fn fetch_video(&self, video_id: &str, token: &str) -> Result<reqwest::Response> {
        Ok(self
            .http
            .get(format!("{}/videos?id={}", self.api_url, video_id))
            .header("Client-ID", &self.client_id)
            .bearer_auth(token)
            .send()
            .await?)
    }
}

/// Parse an ISO 8601 UTC timestamp string to Unix seconds.
pub fn parse_iso_to_unix_secs(s: &str) -> Option<i64> {
    let s = s.trim();
    let s = s.strip_suffix('Z').unwrap_or(s);
    let s = if let Some(dot) = s.find('.') { &s[..dot] } else { s };
    let (year, month, day, hour, minute, second): (i64, i64, i64, i64, i64, i64) =
        if s.len() == 10 {
            (s[0..4].parse().ok()?, s[5..7].parse().ok()?, s[8..10].parse().ok()?, 0, 0, 0)
        } else if s.len() >= 19 {
            (s[0..4].parse().ok()?, s[5..7].parse().ok()?, s[8..10].parse().ok()?,
             s[11..13].parse().ok()?, s[14..16].parse().ok()?, s[17..19].parse().ok()?)
        } else {
            return None;
        };

    let a = (14 - month) / 12;
    let y = year + 4800 - a;
    let m = month + 12 * a - 3;
    let jdn = day + (153 * m + 2) / 5 + 365 * y + y / 4 - y / 100 + y / 400 - 32045;
    let unix_days = jdn - 2_440_588;
    Some(unix_days * 86_400 + hour * 3_600 + minute * 60 + second)
}
