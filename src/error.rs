use thiserror::Error;

/// Last.fm error code for "Invalid method signature supplied".
pub const INVALID_SIGNATURE_CODE: u32 = 13;

/// Error types for Last.fm session and update operations.
///
/// Every failure is reported to the registered listeners and returned as the
/// `Err` side of the operation. The [`kind`](ScrobbleError::kind) groups them
/// by where they originated.
///
/// # Error Handling Examples
///
/// ```rust,no_run
/// use lastfm_scrobble::{ApiCredentials, AuthoriseOptions, ErrorKind, LastFmClient, ScrobbleError};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let credentials = ApiCredentials::new("api_key", "secret");
///     let client = LastFmClient::with_http_client(
///         credentials,
///         Box::new(http_client::native::NativeClient::new()),
///     );
///     let mut session = client.session();
///
///     match session.authorise("token", AuthoriseOptions::new()).await {
///         Ok(()) => println!("Authorised as {}", session.user()),
///         Err(ScrobbleError::InvalidSignature) => eprintln!("Check the API secret"),
///         Err(e) if e.kind() == ErrorKind::Transport => eprintln!("Network error: {}", e),
///         Err(e) => eprintln!("Other error: {}", e),
///     }
/// }
/// ```
#[derive(Error, Debug)]
pub enum ScrobbleError {
    /// `authorise` was called with an empty token.
    #[error("No token supplied")]
    NoTokenSupplied,

    /// An update was requested against a session without a session key.
    #[error("Session is not authorised")]
    NotAuthorised,

    /// A scrobble was requested without the time the track started playing.
    #[error("Timestamp is required for scrobbling")]
    TimestampRequired,

    /// An update method name other than `nowplaying` or `scrobble`.
    #[error("Unknown update method: {0}")]
    UnknownMethod(String),

    /// The transport failed before a response body was available.
    ///
    /// The transport's error is kept as-is, including its message.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Last.fm rejected the `api_sig` of an authorisation call.
    #[error("Signature is invalid")]
    InvalidSignature,

    /// The response did not have any shape this client understands.
    #[error("Unexpected error")]
    Unexpected,

    /// Last.fm answered with an application level error.
    #[error("{message}")]
    Service {
        /// Last.fm error code, see <https://www.last.fm/api/errorcodes>
        code: u32,
        /// Message supplied by the service
        message: String,
    },
}

/// Coarse classification of a [`ScrobbleError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A precondition failed before any network call was made.
    Validation,
    /// The underlying transport failed.
    Transport,
    /// The service responded, but not with a success payload.
    Protocol,
}

impl ScrobbleError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ScrobbleError::NoTokenSupplied
            | ScrobbleError::NotAuthorised
            | ScrobbleError::TimestampRequired
            | ScrobbleError::UnknownMethod(_) => ErrorKind::Validation,
            ScrobbleError::Transport(_) => ErrorKind::Transport,
            ScrobbleError::InvalidSignature
            | ScrobbleError::Unexpected
            | ScrobbleError::Service { .. } => ErrorKind::Protocol,
        }
    }

    /// Error for a service error payload, keeping the service message.
    ///
    /// Payloads without a message become [`ScrobbleError::Unexpected`].
    pub fn service(code: u32, message: String) -> Self {
        if message.is_empty() {
            ScrobbleError::Unexpected
        } else {
            ScrobbleError::Service { code, message }
        }
    }
}

/// Errors raised by a [`Transport`](crate::Transport) implementation.
#[derive(Error, Debug)]
pub enum TransportError {
    /// HTTP/network related errors.
    ///
    /// This includes connection failures, timeouts, DNS errors, and other
    /// low-level networking issues.
    #[error("HTTP error: {0}")]
    Http(String),

    /// A call was marked as signed but carried no `api_sig`.
    #[error("Signed call to {method} is missing api_sig")]
    Unsigned {
        /// API method of the rejected call
        method: String,
    },

    /// Any other failure reported by a custom transport.
    #[error("{0}")]
    Other(String),
}
