//! # Request Events
//!
//! Broadcast channel system for the HTTP activity of [`HttpTransport`](crate::HttpTransport),
//! so consumers can observe calls without wrapping the transport.

use crate::params::SignedParams;
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, watch};

/// Request information for client events.
///
/// Secrets never end up here: only the HTTP verb, the API method and whether
/// the call was signed are recorded.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestInfo {
    /// The HTTP method (GET or POST)
    pub http_method: String,
    /// The Last.fm API method, e.g. `track.scrobble`
    pub api_method: String,
    /// Whether the call carried an `api_sig`
    pub signed: bool,
}

impl RequestInfo {
    pub fn from_params(http_method: &str, params: &SignedParams) -> Self {
        Self {
            http_method: http_method.to_string(),
            api_method: params.method().unwrap_or_default().to_string(),
            signed: params.is_signed(),
        }
    }

    /// Get a short description of the request for logging
    pub fn short_description(&self) -> String {
        if self.signed {
            format!("{} {} (signed)", self.http_method, self.api_method)
        } else {
            format!("{} {}", self.http_method, self.api_method)
        }
    }
}

/// Event type to describe internal HTTP client activity
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ClientEvent {
    /// Request started
    RequestStarted {
        /// Request details
        request: RequestInfo,
    },
    /// Response received, whatever its status
    RequestCompleted {
        /// Request details
        request: RequestInfo,
        /// HTTP status code
        status_code: u16,
        /// Duration of the request in milliseconds
        duration_ms: u64,
    },
    /// No response could be obtained
    RequestFailed {
        /// Request details
        request: RequestInfo,
        /// Transport error message
        error: String,
    },
}

/// Receiver half handed out by [`SharedEventBroadcaster::subscribe`].
pub type ClientEventReceiver = broadcast::Receiver<ClientEvent>;

/// Events a slow subscriber may fall behind by before it starts lagging.
pub const EVENT_BUFFER: usize = 100;

/// Fan-out of request events to every subscriber of an [`HttpTransport`](crate::HttpTransport).
///
/// Transports created through
/// [`with_shared_broadcaster`](crate::HttpTransport::with_shared_broadcaster)
/// hold the same instance, so one subscription sees all of their calls. The
/// most recent event is retained even when nobody is subscribed.
pub struct SharedEventBroadcaster {
    events: broadcast::Sender<ClientEvent>,
    latest: watch::Sender<Option<ClientEvent>>,
}

impl SharedEventBroadcaster {
    pub fn new() -> Self {
        Self {
            events: broadcast::channel(EVENT_BUFFER).0,
            latest: watch::channel(None).0,
        }
    }

    /// Deliver `event` to current subscribers and remember it as the latest.
    pub fn broadcast_event(&self, event: ClientEvent) {
        // No receivers is fine; the event is still kept as `latest`.
        let _ = self.events.send(event.clone());
        self.latest.send_replace(Some(event));
    }

    /// Receive every event broadcast from now on.
    pub fn subscribe(&self) -> ClientEventReceiver {
        self.events.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.events.receiver_count()
    }

    pub fn latest_event(&self) -> Option<ClientEvent> {
        self.latest.borrow().clone()
    }
}

impl Default for SharedEventBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SharedEventBroadcaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedEventBroadcaster")
            .field("subscribers", &self.subscriber_count())
            .field("latest", &*self.latest.borrow())
            .finish()
    }
}
