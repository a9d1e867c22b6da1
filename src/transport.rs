use crate::config::ClientConfig;
use crate::error::TransportError;
use crate::events::{ClientEvent, ClientEventReceiver, RequestInfo, SharedEventBroadcaster};
use crate::headers;
use crate::params::SignedParams;
use async_trait::async_trait;
use http_client::{HttpClient, Request};
use http_types::{Method, Url};
use std::sync::Arc;

/// Network collaborator that carries API calls to Last.fm.
///
/// Each call returns a pending operation (the future) that completes exactly
/// once, with either the raw response body or the transport failure. When
/// `signed` is true the caller has already added `api_sig` to `params`.
///
/// # Mocking Support
///
/// When the `mock` feature is enabled, this crate provides `MockTransport`
/// that implements this trait using the `mockall` library.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait(?Send)]
pub trait Transport {
    /// Issue a read-only call (HTTP GET for [`HttpTransport`]).
    async fn read(&self, params: SignedParams, signed: bool) -> Result<String, TransportError>;

    /// Issue a call that changes state on the service (HTTP POST for [`HttpTransport`]).
    async fn write(&self, params: SignedParams, signed: bool) -> Result<String, TransportError>;
}

/// [`Transport`] over any [`HttpClient`] implementation.
///
/// Adds `format=json` to every call and returns the body whatever the HTTP
/// status, since Last.fm reports application errors as JSON with 4xx codes.
///
/// # Examples
///
/// ```rust,no_run
/// use lastfm_scrobble::{HttpTransport, SignedParams, Transport};
///
/// # tokio_test::block_on(async {
/// let transport = HttpTransport::new(Box::new(http_client::native::NativeClient::new()));
///
/// let params = SignedParams::new("auth.getToken").with("api_key", "xx");
/// let body = transport.read(params, false).await?;
/// println!("{body}");
/// println!("{:?}", transport.latest_event());
/// # Ok::<(), lastfm_scrobble::TransportError>(())
/// # });
/// ```
#[derive(Clone)]
pub struct HttpTransport {
    client: Arc<dyn HttpClient + Send + Sync>,
    config: ClientConfig,
    broadcaster: Arc<SharedEventBroadcaster>,
}

impl HttpTransport {
    pub fn new(client: Box<dyn HttpClient + Send + Sync>) -> Self {
        Self::with_config(client, ClientConfig::default())
    }

    pub fn with_config(client: Box<dyn HttpClient + Send + Sync>, config: ClientConfig) -> Self {
        Self {
            client: Arc::from(client),
            config,
            broadcaster: Arc::new(SharedEventBroadcaster::new()),
        }
    }

    /// Create a transport over another HTTP client that reports to the same
    /// event subscribers as this one.
    pub fn with_shared_broadcaster(&self, client: Box<dyn HttpClient + Send + Sync>) -> Self {
        Self {
            client: Arc::from(client),
            config: self.config.clone(),
            broadcaster: self.broadcaster.clone(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn subscribe(&self) -> ClientEventReceiver {
        self.broadcaster.subscribe()
    }

    pub fn latest_event(&self) -> Option<ClientEvent> {
        self.broadcaster.latest_event()
    }

    fn build_request(
        &self,
        method: Method,
        params: &SignedParams,
    ) -> Result<Request, TransportError> {
        let form = params.to_form_string();
        let request = match method {
            Method::Get => {
                let url = parse_url(&format!("{}?{}", self.config.base_url, form))?;
                let mut request = Request::new(Method::Get, url);
                headers::add_common_headers(&mut request, &self.config.user_agent);
                request
            }
            _ => {
                let url = parse_url(&self.config.base_url)?;
                let mut request = Request::new(method, url);
                headers::add_form_headers(&mut request, &self.config.user_agent);
                request.set_body(form);
                request
            }
        };
        Ok(request)
    }

    async fn send(
        &self,
        method: Method,
        mut params: SignedParams,
        signed: bool,
    ) -> Result<String, TransportError> {
        if signed && !params.is_signed() {
            return Err(TransportError::Unsigned {
                method: params.method().unwrap_or_default().to_string(),
            });
        }
        params.insert("format", "json");

        let request_info = RequestInfo::from_params(&method.to_string(), &params);
        let request = self.build_request(method, &params)?;

        log::debug!("Sending {}", request_info.short_description());
        let request_start = std::time::Instant::now();
        self.broadcaster.broadcast_event(ClientEvent::RequestStarted {
            request: request_info.clone(),
        });

        let mut response = match self.client.send(request).await {
            Ok(response) => response,
            Err(e) => {
                let error = TransportError::Http(e.to_string());
                self.broadcaster.broadcast_event(ClientEvent::RequestFailed {
                    request: request_info,
                    error: error.to_string(),
                });
                return Err(error);
            }
        };

        let status_code: u16 = response.status().into();
        log::debug!(
            "{} completed with status {}",
            request_info.api_method,
            status_code
        );
        self.broadcaster.broadcast_event(ClientEvent::RequestCompleted {
            request: request_info,
            status_code,
            duration_ms: request_start.elapsed().as_millis() as u64,
        });

        response
            .body_string()
            .await
            .map_err(|e| TransportError::Http(e.to_string()))
    }
}

fn parse_url(url: &str) -> Result<Url, TransportError> {
    url.parse::<Url>()
        .map_err(|e| TransportError::Http(format!("Invalid URL {url}: {e}")))
}

#[async_trait(?Send)]
impl Transport for HttpTransport {
    async fn read(&self, params: SignedParams, signed: bool) -> Result<String, TransportError> {
        self.send(Method::Get, params, signed).await
    }

    async fn write(&self, params: SignedParams, signed: bool) -> Result<String, TransportError> {
        self.send(Method::Post, params, signed).await
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("config", &self.config)
            .field("broadcaster", &self.broadcaster)
            .finish()
    }
}
