use crate::client::LastFmClient;
use crate::error::ScrobbleError;
use crate::params::SignedParams;
use crate::response::ApiResponse;
use crate::session::Session;
use crate::track::Track;
use crate::Result;
use std::str::FromStr;

/// The two kinds of listening update Last.fm accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateMethod {
    /// `track.updateNowPlaying`
    NowPlaying,
    /// `track.scrobble`
    Scrobble,
}

impl UpdateMethod {
    /// Name of the Last.fm API method this update calls.
    pub fn api_method(&self) -> &'static str {
        match self {
            UpdateMethod::NowPlaying => "track.updateNowPlaying",
            UpdateMethod::Scrobble => "track.scrobble",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateMethod::NowPlaying => "nowplaying",
            UpdateMethod::Scrobble => "scrobble",
        }
    }
}

impl FromStr for UpdateMethod {
    type Err = ScrobbleError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "nowplaying" => Ok(UpdateMethod::NowPlaying),
            "scrobble" => Ok(UpdateMethod::Scrobble),
            other => Err(ScrobbleError::UnknownMethod(other.to_string())),
        }
    }
}

impl std::fmt::Display for UpdateMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What to submit, plus the callbacks for this one request.
pub struct UpdateOptions {
    pub track: Track,
    /// Track length in seconds
    pub duration: Option<u32>,
    /// Unix time the track started playing; required for scrobbles
    pub timestamp: Option<i64>,
    pub on_success: Option<Box<dyn FnOnce(&Track)>>,
    pub on_error: Option<Box<dyn FnOnce(&ScrobbleError)>>,
}

impl UpdateOptions {
    pub fn new(track: Track) -> Self {
        Self {
            track,
            duration: None,
            timestamp: None,
            on_success: None,
            on_error: None,
        }
    }

    pub fn with_duration(mut self, duration: u32) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn on_success(mut self, callback: impl FnOnce(&Track) + 'static) -> Self {
        self.on_success = Some(Box::new(callback));
        self
    }

    pub fn on_error(mut self, callback: impl FnOnce(&ScrobbleError) + 'static) -> Self {
        self.on_error = Some(Box::new(callback));
        self
    }
}

/// A single "now playing" or scrobble submission.
///
/// Construction validates the request and signs its parameters; a failed
/// precondition is reported to `on_error` and also returned, so it is visible
/// even when no callback was supplied. [`send`](UpdateRequest::send) then
/// performs the one network call and delivers its outcome.
///
/// # Examples
///
/// ```rust,no_run
/// use lastfm_scrobble::{ApiCredentials, LastFmClient, Track, UpdateMethod, UpdateOptions, UpdateRequest};
///
/// # tokio_test::block_on(async {
/// let client = LastFmClient::with_http_client(
///     ApiCredentials::new("api_key", "secret"),
///     Box::new(http_client::native::NativeClient::new()),
/// );
/// let session = client.restore_session("username", "sessionkey");
///
/// let options = UpdateOptions::new(Track::new("Run To Your Grave", "The Mae Shi"))
///     .with_timestamp(1_700_000_000)
///     .on_success(|track| println!("Scrobbled {}", track.name))
///     .on_error(|e| eprintln!("Scrobble failed: {e}"));
///
/// if let Ok(request) = UpdateRequest::new(&client, UpdateMethod::Scrobble, &session, options) {
///     let _ = request.send().await;
/// }
/// # });
/// ```
pub struct UpdateRequest {
    client: LastFmClient,
    method: UpdateMethod,
    track: Track,
    params: SignedParams,
    on_success: Option<Box<dyn FnOnce(&Track)>>,
    on_error: Option<Box<dyn FnOnce(&ScrobbleError)>>,
}

impl UpdateRequest {
    pub fn new(
        client: &LastFmClient,
        method: UpdateMethod,
        session: &Session,
        options: UpdateOptions,
    ) -> Result<Self> {
        let UpdateOptions {
            track,
            duration,
            timestamp,
            on_success,
            mut on_error,
        } = options;

        if !session.is_authorised() {
            return Err(fail(&mut on_error, ScrobbleError::NotAuthorised));
        }

        let mut params = client
            .params(method.api_method())
            .with("artist", track.artist_name())
            .with("track", &track.name)
            .with("sk", session.key());

        // A zero timestamp or duration counts as not supplied.
        if method == UpdateMethod::Scrobble {
            match timestamp.filter(|&timestamp| timestamp != 0) {
                Some(timestamp) => params.insert("timestamp", timestamp),
                None => return Err(fail(&mut on_error, ScrobbleError::TimestampRequired)),
            }
        }
        if let Some(duration) = duration.filter(|&duration| duration != 0) {
            params.insert("duration", duration);
        }
        client.sign(&mut params);

        Ok(Self {
            client: client.clone(),
            method,
            track,
            params,
            on_success,
            on_error,
        })
    }

    pub fn method(&self) -> UpdateMethod {
        self.method
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    /// The signed parameters that [`send`](UpdateRequest::send) will write.
    pub fn params(&self) -> &SignedParams {
        &self.params
    }

    /// Submit the update and deliver its outcome.
    ///
    /// Resolves to the submitted track when the service accepted it, and to
    /// `None` when it answered with an empty body; no callback runs in that
    /// case.
    pub async fn send(self) -> Result<Option<Track>> {
        let UpdateRequest {
            client,
            method,
            track,
            params,
            on_success,
            mut on_error,
        } = self;

        log::debug!("Submitting {} for '{}'", method, track.name);
        let outcome = client.transport().write(params, true).await;
        let body = match outcome {
            Ok(body) => body,
            Err(e) => return Err(fail(&mut on_error, e.into())),
        };

        match ApiResponse::parse(&body) {
            ApiResponse::Empty => {
                log::debug!("Empty response to {method}");
                Ok(None)
            }
            ApiResponse::ServiceError { code, message } => {
                Err(fail(&mut on_error, ScrobbleError::service(code, message)))
            }
            ApiResponse::Malformed(reason) => {
                log::debug!("Unreadable response to {method}: {reason}");
                Err(fail(&mut on_error, ScrobbleError::Unexpected))
            }
            ApiResponse::AuthSuccess { .. } | ApiResponse::Payload(_) => {
                if let Some(callback) = on_success {
                    callback(&track);
                }
                Ok(Some(track))
            }
        }
    }
}

fn fail(
    once: &mut Option<Box<dyn FnOnce(&ScrobbleError)>>,
    error: ScrobbleError,
) -> ScrobbleError {
    log::warn!("Update error: {error}");
    if let Some(callback) = once.take() {
        callback(&error);
    }
    error
}

impl std::fmt::Debug for UpdateRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateRequest")
            .field("method", &self.method)
            .field("track", &self.track)
            .finish_non_exhaustive()
    }
}
