//! Request and response interceptors
//!
//! The gateway runs an ordered list of request interceptors before sending
//! and an ordered list of response interceptors after a successful
//! transport round trip. Each one either transforms its input or fails the
//! call.

use std::sync::Arc;

use reqwest::header::CONTENT_TYPE;
use sentiscope_core::{LOGIN_PATH, Navigator, Session};
use tracing::{debug, warn};

use super::GatewayError;
use super::body::ResponseBody;
use super::request::RequestConfig;

/// Content type set on every non-multipart request
pub const JSON_CONTENT_TYPE: &str = "application/json;charset=utf-8";

/// Envelope code the backend uses for an invalid or expired session
pub const SESSION_EXPIRED_CODE: &str = "401";

/// Runs before a request is sent
pub trait RequestInterceptor: Send + Sync {
    fn on_request(&self, request: &mut RequestConfig) -> Result<(), GatewayError>;
}

/// Runs after a response arrived with a success status
pub trait ResponseInterceptor: Send + Sync {
    fn on_response(&self, body: ResponseBody) -> Result<ResponseBody, GatewayError>;
}

/// Marks non-multipart requests as JSON
///
/// Multipart requests must not carry a content type of their own so the
/// transport can add the boundary parameter.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonContentType;

impl RequestInterceptor for JsonContentType {
    fn on_request(&self, request: &mut RequestConfig) -> Result<(), GatewayError> {
        if request.body.is_multipart() {
            request.headers.remove(CONTENT_TYPE);
        } else {
            request.set_header(CONTENT_TYPE.as_str(), JSON_CONTENT_TYPE)?;
        }
        Ok(())
    }
}

/// Copies the stored credential into the `token` and `uuid` headers
///
/// Stored values always replace caller-supplied headers of the same name.
#[derive(Debug, Clone)]
pub struct AttachCredential {
    session: Session,
}

impl AttachCredential {
    pub fn new(session: Session) -> Self {
        Self { session }
    }
}

impl RequestInterceptor for AttachCredential {
    fn on_request(&self, request: &mut RequestConfig) -> Result<(), GatewayError> {
        if let Some(token) = self.session.token() {
            request.set_header(Session::TOKEN_KEY, &token)?;
        }
        if let Some(uuid) = self.session.uuid() {
            request.set_header(Session::UUID_KEY, &uuid)?;
        }
        Ok(())
    }
}

/// Parses textual bodies
#[derive(Debug, Default, Clone, Copy)]
pub struct NormalizeBody;

impl ResponseInterceptor for NormalizeBody {
    fn on_response(&self, body: ResponseBody) -> Result<ResponseBody, GatewayError> {
        body.normalize()
    }
}

/// Sends the user to the login page when the backend reports code `"401"`
///
/// The body is returned untouched; callers still receive the envelope.
/// Navigation failures are logged and dropped.
#[derive(Clone)]
pub struct RedirectOnExpiry {
    navigator: Arc<dyn Navigator>,
}

impl RedirectOnExpiry {
    pub fn new(navigator: Arc<dyn Navigator>) -> Self {
        Self { navigator }
    }
}

impl ResponseInterceptor for RedirectOnExpiry {
    fn on_response(&self, body: ResponseBody) -> Result<ResponseBody, GatewayError> {
        if body.code() == Some(SESSION_EXPIRED_CODE) {
            warn!("Backend reported an expired session, redirecting to {LOGIN_PATH}");
            if let Err(error) = self.navigator.navigate(LOGIN_PATH) {
                debug!(%error, "Ignoring failed redirect after session expiry");
            }
        }
        Ok(body)
    }
}
