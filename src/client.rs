use crate::params::SignedParams;
use crate::session::Session;
use crate::track::Track;
use crate::transport::{HttpTransport, Transport};
use crate::update::{UpdateMethod, UpdateOptions, UpdateRequest};
use crate::{ClientConfig, Result};
use http_client::HttpClient;
use std::sync::Arc;

/// Application credentials issued by Last.fm for an API account.
///
/// `api_key` travels with every call; `secret` only ever feeds signatures.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiCredentials {
    pub api_key: String,
    pub secret: String,
}

impl ApiCredentials {
    pub fn new(api_key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            secret: secret.into(),
        }
    }
}

impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("api_key", &self.api_key)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Entry point for talking to Last.fm.
///
/// Owns the application credentials and the [`Transport`]. Cloning is cheap and
/// clones share the transport, so a client can be handed to every
/// [`Session`] and [`UpdateRequest`] it creates.
///
/// # Examples
///
/// ```rust,no_run
/// use lastfm_scrobble::{ApiCredentials, LastFmClient, Result, Track};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() -> Result<()> {
///     let client = LastFmClient::with_http_client(
///         ApiCredentials::new("api_key", "secret"),
///         Box::new(http_client::native::NativeClient::new()),
///     );
///
///     // A session key obtained earlier through `Session::authorise`
///     let session = client.restore_session("username", "sessionkey");
///
///     let track = Track::new("Run To Your Grave", "The Mae Shi");
///     client.now_playing(&session, track.clone(), Some(232)).await?;
///     client.scrobble(&session, track, 1_700_000_000).await?;
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct LastFmClient {
    credentials: ApiCredentials,
    transport: Arc<dyn Transport>,
}

impl LastFmClient {
    pub fn new(credentials: ApiCredentials, transport: impl Transport + 'static) -> Self {
        Self::from_shared(credentials, Arc::new(transport))
    }

    pub fn from_shared(credentials: ApiCredentials, transport: Arc<dyn Transport>) -> Self {
        Self {
            credentials,
            transport,
        }
    }

    /// Create a client that talks to the public Last.fm endpoint over `client`.
    pub fn with_http_client(
        credentials: ApiCredentials,
        client: Box<dyn HttpClient + Send + Sync>,
    ) -> Self {
        Self::new(credentials, HttpTransport::new(client))
    }

    pub fn with_config(
        credentials: ApiCredentials,
        client: Box<dyn HttpClient + Send + Sync>,
        config: ClientConfig,
    ) -> Self {
        Self::new(credentials, HttpTransport::with_config(client, config))
    }

    pub fn credentials(&self) -> &ApiCredentials {
        &self.credentials
    }

    pub fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    /// Parameters for `method` with the application's `api_key` already set.
    pub fn params(&self, method: &str) -> SignedParams {
        SignedParams::new(method).with("api_key", &self.credentials.api_key)
    }

    /// Add `api_sig` to `params` using the application secret.
    pub fn sign(&self, params: &mut SignedParams) {
        params.sign(&self.credentials.secret);
    }

    /// A fresh, unauthorised session bound to this client.
    pub fn session(&self) -> Session {
        Session::new(self.clone())
    }

    /// A session for a user and session key obtained earlier.
    pub fn restore_session(&self, user: impl Into<String>, key: impl Into<String>) -> Session {
        Session::restore(self.clone(), user, key)
    }

    /// Tell Last.fm that `track` started playing.
    ///
    /// Returns the submitted track once the service accepted it, or `None`
    /// when the service answered with an empty body.
    pub async fn now_playing(
        &self,
        session: &Session,
        track: Track,
        duration: Option<u32>,
    ) -> Result<Option<Track>> {
        let mut options = UpdateOptions::new(track);
        options.duration = duration;
        UpdateRequest::new(self, UpdateMethod::NowPlaying, session, options)?
            .send()
            .await
    }

    /// Record that `track` was played, starting at `timestamp` (Unix seconds).
    pub async fn scrobble(
        &self,
        session: &Session,
        track: Track,
        timestamp: i64,
    ) -> Result<Option<Track>> {
        let options = UpdateOptions::new(track).with_timestamp(timestamp);
        UpdateRequest::new(self, UpdateMethod::Scrobble, session, options)?
            .send()
            .await
    }
}

impl std::fmt::Debug for LastFmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LastFmClient")
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}
