/// Public endpoint of the Last.fm 2.0 API.
pub const DEFAULT_API_URL: &str = "https://ws.audioscrobbler.com/2.0/";

/// Configuration for [`HttpTransport`](crate::HttpTransport).
///
/// # Examples
///
/// ```rust
/// use lastfm_scrobble::ClientConfig;
///
/// let config = ClientConfig::new()
///     .with_base_url("http://localhost:8080/2.0/")
///     .with_user_agent("my-player/1.0");
/// assert_eq!(config.base_url, "http://localhost:8080/2.0/");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API endpoint every call is sent to
    pub base_url: String,
    /// Value of the `User-Agent` header
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            user_agent: concat!("lastfm-scrobble/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the transport at another endpoint, e.g. a local test server
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set a custom `User-Agent`
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_API_URL);
        assert!(config.user_agent.starts_with("lastfm-scrobble/"));
    }
}
