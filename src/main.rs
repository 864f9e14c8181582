use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use trend_recap::api::{router, ApiState};
use trend_recap::config::Config;
use trend_recap::db::TrendStore;
use trend_recap::error::Result;
use trend_recap::twitch::{TokenProvider, TwitchClient};

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

    if let Err(e) = run(cfg).await {
        error!("Fatal error: {e}");
        std::process::exit(1);
    }
}

async fn run(cfg: Config) -> Result<()> {
    let store = TrendStore::open(&cfg.db_path).await?;
    info!("Database ready at {}", cfg.db_path);

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()?;

    let tokens = Arc::new(TokenProvider::new(
        http.clone(),
        cfg.twitch_auth_url.clone(),
        cfg.twitch_client_id.clone(),
        cfg.twitch_client_secret.clone(),
        cfg.twitch_access_token.clone(),
    ));

    // Warm check so a dead seed token is replaced before the first lookup.
    match tokens.validate().await {
        Ok(true) => info!("access token validated"),
        Ok(false) => {
            info!("access token rejected, refreshing");
            tokens.refresh().await?;
        }
        Err(e) => error!("token validation unreachable: {e}"),
    }

    let twitch = Arc::new(TwitchClient::new(
        http,
        cfg.helix_api_url.clone(),
        cfg.twitch_client_id.clone(),
        tokens,
    ));

    let app = router(ApiState { store, twitch });
    let bind_addr = format!("0.0.0.0:{}", cfg.api_port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("HTTP API listening on {bind_addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
