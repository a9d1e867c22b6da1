use lastfm_scrobble::{ApiCredentials, LastFmClient, Session};
use std::env;

/// Get the API key and secret from environment variables
pub fn get_api_credentials() -> Result<ApiCredentials, Box<dyn std::error::Error>> {
    let api_key =
        env::var("LASTFM_API_KEY").map_err(|_| "LASTFM_API_KEY environment variable not set")?;
    let secret = env::var("LASTFM_API_SECRET")
        .map_err(|_| "LASTFM_API_SECRET environment variable not set")?;
    Ok(ApiCredentials::new(api_key, secret))
}

/// Restore the session printed by a previous `authorise` run
pub fn restore_session(client: &LastFmClient) -> Result<Session, Box<dyn std::error::Error>> {
    let username = env::var("LASTFM_USERNAME").unwrap_or_default();
    let key = env::var("LASTFM_SESSION_KEY").map_err(|_| {
        "LASTFM_SESSION_KEY environment variable not set (run `lastfm-scrobble authorise <token>` first)"
    })?;
    Ok(client.restore_session(username, key))
}

/// Current Unix time in seconds
pub fn now_timestamp() -> i64 {
    chrono::Utc::now().timestamp()
}
