use crate::client::LastFmClient;
use crate::error::{ScrobbleError, INVALID_SIGNATURE_CODE};
use crate::response::ApiResponse;
use crate::Result;

type ErrorListener = Box<dyn FnMut(&ScrobbleError)>;
type AuthorisedListener = Box<dyn FnMut(&Session)>;

/// Callbacks that apply to a single [`Session::authorise`] call.
///
/// Each fires at most once and is dropped when the call finishes.
#[derive(Default)]
pub struct AuthoriseOptions {
    pub on_error: Option<Box<dyn FnOnce(&ScrobbleError)>>,
    pub on_authorised: Option<Box<dyn FnOnce(&Session)>>,
}

impl AuthoriseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_error(mut self, callback: impl FnOnce(&ScrobbleError) + 'static) -> Self {
        self.on_error = Some(Box::new(callback));
        self
    }

    pub fn on_authorised(mut self, callback: impl FnOnce(&Session) + 'static) -> Self {
        self.on_authorised = Some(Box::new(callback));
        self
    }
}

/// A Last.fm user session.
///
/// A session starts unauthorised and becomes authorised once
/// [`authorise`](Session::authorise) exchanges a token for a session key, or
/// when it is restored from a user name and key obtained earlier. `user` and
/// `key` only ever change together.
///
/// Outcomes are delivered to listeners: per-call ones passed in
/// [`AuthoriseOptions`] and long-lived ones registered with
/// [`on_error`](Session::on_error) / [`on_authorised`](Session::on_authorised).
///
/// # Examples
///
/// ```rust,no_run
/// use lastfm_scrobble::{ApiCredentials, AuthoriseOptions, LastFmClient};
///
/// # tokio_test::block_on(async {
/// let client = LastFmClient::with_http_client(
///     ApiCredentials::new("api_key", "secret"),
///     Box::new(http_client::native::NativeClient::new()),
/// );
/// let mut session = client.session();
/// session.on_error(|e| eprintln!("Authorisation failed: {e}"));
///
/// let options = AuthoriseOptions::new().on_authorised(|session| {
///     println!("Authorised as {}", session.user());
/// });
/// let _ = session.authorise("token-from-auth-page", options).await;
/// # });
/// ```
pub struct Session {
    client: LastFmClient,
    user: String,
    key: String,
    error_listeners: Vec<ErrorListener>,
    authorised_listeners: Vec<AuthorisedListener>,
}

impl Session {
    /// Create an unauthorised session.
    pub fn new(client: LastFmClient) -> Self {
        Self::restore(client, String::new(), String::new())
    }

    /// Create a session from a user name and session key obtained earlier.
    pub fn restore(client: LastFmClient, user: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            client,
            user: user.into(),
            key: key.into(),
            error_listeners: Vec::new(),
            authorised_listeners: Vec::new(),
        }
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    /// The session key, empty while unauthorised.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn client(&self) -> &LastFmClient {
        &self.client
    }

    pub fn is_authorised(&self) -> bool {
        !self.key.is_empty()
    }

    /// Register a listener for every error this session reports.
    pub fn on_error(&mut self, listener: impl FnMut(&ScrobbleError) + 'static) {
        self.error_listeners.push(Box::new(listener));
    }

    /// Register a listener for every successful authorisation.
    pub fn on_authorised(&mut self, listener: impl FnMut(&Session) + 'static) {
        self.authorised_listeners.push(Box::new(listener));
    }

    /// Exchange an authorisation token for a session key (`auth.getSession`).
    ///
    /// The token comes from the user granting access on the Last.fm
    /// authorisation page. On success `user` and `key` are replaced and the
    /// authorised listeners run; otherwise the error listeners run. The same
    /// outcome is returned.
    pub async fn authorise(&mut self, token: &str, options: AuthoriseOptions) -> Result<()> {
        let AuthoriseOptions {
            mut on_error,
            on_authorised,
        } = options;

        if token.is_empty() {
            return Err(self.emit_error(&mut on_error, ScrobbleError::NoTokenSupplied));
        }

        let mut params = self.client.params("auth.getsession").with("token", token);
        self.client.sign(&mut params);

        log::debug!("Requesting session key");
        let outcome = self.client.transport().read(params, true).await;
        let body = match outcome {
            Ok(body) => body,
            Err(e) => return Err(self.emit_error(&mut on_error, e.into())),
        };

        match ApiResponse::parse(&body) {
            ApiResponse::AuthSuccess { name, key } => {
                self.user = name;
                self.key = key;
                log::info!("Session authorised for {}", self.user);
                self.emit_authorised(on_authorised);
                Ok(())
            }
            ApiResponse::ServiceError { code, .. } if code == INVALID_SIGNATURE_CODE => {
                Err(self.emit_error(&mut on_error, ScrobbleError::InvalidSignature))
            }
            ApiResponse::ServiceError { code, message } => {
                Err(self.emit_error(&mut on_error, ScrobbleError::service(code, message)))
            }
            ApiResponse::Empty | ApiResponse::Payload(_) | ApiResponse::Malformed(_) => {
                Err(self.emit_error(&mut on_error, ScrobbleError::Unexpected))
            }
        }
    }

    fn emit_error(
        &mut self,
        once: &mut Option<Box<dyn FnOnce(&ScrobbleError)>>,
        error: ScrobbleError,
    ) -> ScrobbleError {
        log::warn!("Session error: {error}");
        if let Some(callback) = once.take() {
            callback(&error);
        }
        for listener in &mut self.error_listeners {
            listener(&error);
        }
        error
    }

    fn emit_authorised(&mut self, once: Option<Box<dyn FnOnce(&Session)>>) {
        if let Some(callback) = once {
            callback(&*self);
        }
        let mut listeners = std::mem::take(&mut self.authorised_listeners);
        for listener in &mut listeners {
            listener(&*self);
        }
        self.authorised_listeners = listeners;
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("user", &self.user)
            .field("authorised", &self.is_authorised())
            .field("error_listeners", &self.error_listeners.len())
            .field("authorised_listeners", &self.authorised_listeners.len())
            .finish()
    }
}
