//! Sentiscope HTTP gateway
//!
//! One shared client per process. Every call goes through the request
//! interceptors, the transport, and, for success statuses, the response
//! interceptors. See [`interceptor`] for the built-in pipeline.

pub mod body;
pub mod clean;
pub mod dictionary;
pub mod envelope;
pub mod error;
pub mod interceptor;
pub mod project;
pub mod request;
pub mod user;

pub use body::ResponseBody;
pub use envelope::Envelope;
pub use error::GatewayError;
pub use interceptor::{
    AttachCredential, JsonContentType, NormalizeBody, RedirectOnExpiry, RequestInterceptor,
    ResponseInterceptor,
};
pub use request::{RequestBody, RequestConfig};

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, ClientBuilder};
use sentiscope_core::{GatewayConfig, Navigator, Session};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

/// Default per-call timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

/// Session-aware API gateway
#[derive(Clone)]
pub struct Gateway {
    client: Client,
    base_url: String,
    timeout: Duration,
    session: Session,
    request_interceptors: Arc<Vec<Arc<dyn RequestInterceptor>>>,
    response_interceptors: Arc<Vec<Arc<dyn ResponseInterceptor>>>,
}

impl Gateway {
    /// Create a new gateway builder
    pub fn builder() -> GatewayBuilder {
        GatewayBuilder::default()
    }

    /// Builder preloaded from configuration
    pub fn from_config(config: &GatewayConfig) -> GatewayBuilder {
        Self::builder()
            .base_url(&config.base_url)
            .timeout(config.timeout())
            .user_agent(&config.user_agent)
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The credential store this gateway reads from
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Send a request through the interceptor pipeline
    ///
    /// Resolves to the normalized payload. A `"401"` envelope still resolves
    /// successfully after the redirect has been triggered.
    pub async fn send(&self, mut request: RequestConfig) -> Result<Value, GatewayError> {
        for interceptor in self.request_interceptors.iter() {
            interceptor.on_request(&mut request)?;
        }

        let method = request.method.clone();
        let url = request.url(&self.base_url);
        debug!(%method, %url, "Sending request");

        // No body, nothing for a content type to describe
        let mut headers = request.headers;
        if matches!(request.body, RequestBody::Empty) {
            headers.remove(CONTENT_TYPE);
        }

        let mut builder = self.client.request(request.method, &url).headers(headers);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.body(serde_json::to_vec(&value)?),
            RequestBody::Multipart(form) => builder.multipart(form),
        };

        let response = builder.send().await.map_err(|e| self.transport_failure(&method, &url, e))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_else(|_| status.to_string());
            let err = GatewayError::from_status(status, message);
            error!(%method, %url, %err, "Request failed");
            return Err(err);
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.transport_failure(&method, &url, e))?;

        let mut body = ResponseBody::from_bytes(&bytes)?;
        for interceptor in self.response_interceptors.iter() {
            body = interceptor.on_response(body)?;
        }
        body.into_value()
    }

    /// Send a request and decode the payload as an envelope
    pub async fn call<T: DeserializeOwned>(
        &self,
        request: RequestConfig,
    ) -> Result<Envelope<T>, GatewayError> {
        let value = self.send(request).await?;
        Ok(serde_json::from_value(value)?)
    }

    fn transport_failure(
        &self,
        method: &reqwest::Method,
        url: &str,
        error: reqwest::Error,
    ) -> GatewayError {
        let err = GatewayError::from_transport(error, self.timeout);
        error!(%method, %url, %err, "Request failed");
        err
    }
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("request_interceptors", &self.request_interceptors.len())
            .field("response_interceptors", &self.response_interceptors.len())
            .finish()
    }
}

/// Builder for Gateway
#[derive(Default)]
pub struct GatewayBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    session: Option<Session>,
    navigator: Option<Arc<dyn Navigator>>,
    request_interceptors: Vec<Arc<dyn RequestInterceptor>>,
    response_interceptors: Vec<Arc<dyn ResponseInterceptor>>,
}

impl GatewayBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Credential store to read `token` / `uuid` from
    pub fn session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    /// Where to send the user when the backend reports an expired session
    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    /// Append a request interceptor after the built-in ones
    pub fn request_interceptor(mut self, interceptor: Arc<dyn RequestInterceptor>) -> Self {
        self.request_interceptors.push(interceptor);
        self
    }

    /// Append a response interceptor after the built-in ones
    pub fn response_interceptor(mut self, interceptor: Arc<dyn ResponseInterceptor>) -> Self {
        self.response_interceptors.push(interceptor);
        self
    }

    /// Build the gateway
    pub fn build(self) -> Result<Gateway, GatewayError> {
        let base_url = self
            .base_url
            .ok_or_else(|| GatewayError::Configuration("base_url is required".into()))?;

        // Ensure base_url ends without a trailing slash
        let base_url = base_url.trim_end_matches('/').to_string();
        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);
        if timeout.is_zero() {
            return Err(GatewayError::Configuration("timeout must be positive".into()));
        }

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("sentiscope/{}", env!("CARGO_PKG_VERSION")));
        let client = ClientBuilder::new()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| GatewayError::Configuration(e.to_string()))?;

        let session = self.session.unwrap_or_else(Session::in_memory);

        let mut request_interceptors: Vec<Arc<dyn RequestInterceptor>> = vec![
            Arc::new(JsonContentType),
            Arc::new(AttachCredential::new(session.clone())),
        ];
        request_interceptors.extend(self.request_interceptors);

        let mut response_interceptors: Vec<Arc<dyn ResponseInterceptor>> =
            vec![Arc::new(NormalizeBody)];
        if let Some(navigator) = self.navigator {
            response_interceptors.push(Arc::new(RedirectOnExpiry::new(navigator)));
        }
        response_interceptors.extend(self.response_interceptors);

        Ok(Gateway {
            client,
            base_url,
            timeout,
            session,
            request_interceptors: Arc::new(request_interceptors),
            response_interceptors: Arc::new(response_interceptors),
        })
    }
}
