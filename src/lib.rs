//! # lastfm-scrobble
//!
//! Client for the Last.fm 2.0 API that authorises user sessions and submits
//! "now playing" and scrobble updates through signed calls.
//!
//! - [`Session`] exchanges an authorisation token for a session key.
//! - [`UpdateRequest`] submits one `track.updateNowPlaying` or `track.scrobble` call.
//! - [`sign`] computes the `api_sig` every authenticated call carries.
//! - [`Transport`] abstracts the network; [`HttpTransport`] implements it over
//!   any [`http_client::HttpClient`].
//!
//! Outcomes are delivered both to registered callbacks and as the `Result` of
//! each async operation.

pub mod client;
pub mod config;
pub mod error;
pub mod events;
pub mod headers;
pub mod params;
pub mod response;
pub mod session;
pub mod signature;
pub mod track;
pub mod transport;
pub mod update;

pub use client::{ApiCredentials, LastFmClient};
pub use config::{ClientConfig, DEFAULT_API_URL};
pub use error::{ErrorKind, ScrobbleError, TransportError, INVALID_SIGNATURE_CODE};
pub use events::{ClientEvent, ClientEventReceiver, RequestInfo, SharedEventBroadcaster};
pub use params::SignedParams;
pub use response::ApiResponse;
pub use session::{AuthoriseOptions, Session};
pub use signature::sign;
pub use track::{Track, TrackAlbum, TrackArtist};
pub use transport::{HttpTransport, Transport};
pub use update::{UpdateMethod, UpdateOptions, UpdateRequest};

#[cfg(feature = "mock")]
pub use transport::MockTransport;

pub type Result<T> = std::result::Result<T, ScrobbleError>;
