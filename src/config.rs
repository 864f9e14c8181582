use crate::error::{AppError, Result};

pub const HELIX_API_URL: &str = "https://api.twitch.tv/helix";
pub const TWITCH_AUTH_URL: &str = "https://id.twitch.tv/oauth2";
pub const TWITTER_API_URL: &str = "https://api.twitter.com/1.1";

/// How often the poller fetches trending terms (seconds).
pub const POLL_INTERVAL_SECS: u64 = 300;

/// Maximum gap between samples of the same keyword before a new trend
/// window opens (seconds). 40 minutes.
pub const TREND_GAP_SECS: i64 = 40 * 60;

/// Trending terms accepted per source bucket each poll cycle.
pub const MAX_TERMS_PER_BUCKET: usize = 12;

/// An associated word must appear at least this many times across one
/// cycle's tweet batch to be persisted.
pub const MIN_ASSOCIATED_WORD_COUNT: u32 = 5;

/// Tweets requested per trending term when extracting associated words.
pub const TWEET_SEARCH_COUNT: u32 = 100;

/// WOEIDs polled each cycle, in priority order: worldwide, USA, Canada,
/// UK, Australia. Earlier buckets win cross-bucket duplicate terms.
pub const TREND_BUCKETS: &[u64] = &[1, 23424977, 23424775, 23424975, 23424748];

#[derive(Debug, Clone)]
pub struct Config {
    pub helix_api_url: String,
    pub twitch_auth_url: String,
    pub twitter_api_url: String,
    pub log_level: String,
    pub db_path: String,
    pub api_port: u16,
    /// Helix application client id (TWITCH_CLIENT_ID)
    pub twitch_client_id: String,
    /// Helix application secret, used for token refresh (TWITCH_CLIENT_SECRET)
    pub twitch_client_secret: String,
    /// Seed app access token; refreshed on rejection (TWITCH_ACCESS_TOKEN)
    pub twitch_access_token: String,
    /// Bearer token for the trend/tweet API (TWITTER_BEARER_TOKEN)
    pub twitter_bearer_token: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            helix_api_url: std::env::var("HELIX_API_URL")
                .unwrap_or_else(|_| HELIX_API_URL.to_string()),
            twitch_auth_url: std::env::var("TWITCH_AUTH_URL")
                .unwrap_or_else(|_| TWITCH_AUTH_URL.to_string()),
            twitter_api_url: std::env::var("TWITTER_API_URL")
                .unwrap_or_else(|_| TWITTER_API_URL.to_string()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            db_path: std::env::var("DB_PATH").unwrap_or_else(|_| "trends.sqlite".to_string()),
            api_port: std::env::var("API_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse::<u16>()
                .map_err(|_| AppError::Config("API_PORT must be a valid port number".to_string()))?,
            twitch_client_id: std::env::var("TWITCH_CLIENT_ID").unwrap_or_default(),
            twitch_client_secret: std::env::var("TWITCH_CLIENT_SECRET").unwrap_or_default(),
            twitch_access_token: std::env::var("TWITCH_ACCESS_TOKEN").unwrap_or_default(),
            twitter_bearer_token: std::env::var("TWITTER_BEARER_TOKEN").unwrap_or_default(),
        })
    }
}
