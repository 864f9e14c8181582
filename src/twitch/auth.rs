use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::error::{AppError, Result};

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Holds the current app access token and knows how to replace it via the
/// client-credentials grant. Callers take the current token, and on a 401
/// from the API call `refresh` and retry once — no shared mutable global.
pub struct TokenProvider {
    http: reqwest::Client,
    auth_url: String,
    client_id: String,
    client_secret: String,
    token: RwLock<String>,
}

impl TokenProvider {
    pub fn new(
        http: reqwest::Client,
        auth_url: String,
        client_id: String,
        client_secret: String,
        seed_token: String,
    ) -> Self {
        Self {
            http,
            auth_url,
            client_id,
            client_secret,
            token: RwLock::new(seed_token),
        }
    }

    pub async fn current(&self) -> String {
        self.token.read().await.clone()
    }

    /// True if the upstream validate endpoint accepts the current token.
    pub async fn validate(&self) -> Result<bool> {
        let token = self.current().await;
        let response = self
            .http
            .get(format!("{}/validate", self.auth_url))
            .bearer_auth(&token)
            .send()
            .await?;
        Ok(response.status().is_success())
    }

    /// Exchange client credentials for a fresh token, store it, and return
    /// it. The configured seed token is stale once this fires.
    pub async fn refresh(&self) -> Result<String> {
        let url = format!(
            "{}/token?client_id={}&client_secret={}&grant_type=client_credentials",
            self.auth_url, self.client_id, self.client_secret
        );
        let response = self.http.post(&url).send().await?;
        if !response.status().is_success() {
            warn!(status = %response.status(), "token refresh rejected");
            return Err(AppError::Lookup(format!(
                "token refresh returned status {}",
                response.status()
            )));
        }

        let body: TokenResponse = response.json().await?;
        let mut token = self.token.write().await;
        *token = body.access_token.clone();
        info!("access token regenerated; update TWITCH_ACCESS_TOKEN to avoid refreshing on every start");
        Ok(body.access_token)
    }
}
