//! Outgoing request description
//!
//! A [`RequestConfig`] is built by the caller, passed through the request
//! interceptors (which may mutate it), and only then turned into a reqwest
//! request.

use reqwest::Method;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::multipart::Form;
use serde::Serialize;
use serde_json::Value;

use super::GatewayError;

/// Request payload
#[derive(Debug, Default)]
pub enum RequestBody {
    /// No payload
    #[default]
    Empty,
    /// Structured payload sent as JSON
    Json(Value),
    /// Opaque multipart form; the transport picks the boundary
    Multipart(Form),
}

impl RequestBody {
    pub fn is_multipart(&self) -> bool {
        matches!(self, Self::Multipart(_))
    }
}

/// A single outgoing call
#[derive(Debug)]
pub struct RequestConfig {
    pub method: Method,
    /// Path relative to the gateway base URL, or an absolute URL
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: HeaderMap,
    pub body: RequestBody,
}

impl RequestConfig {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attach a JSON payload
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, GatewayError> {
        self.body = RequestBody::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Attach a multipart form
    pub fn multipart(mut self, form: Form) -> Self {
        self.body = RequestBody::Multipart(form);
        self
    }

    /// Append a query parameter
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Set a header, replacing any previous value
    pub fn header(mut self, name: &str, value: &str) -> Result<Self, GatewayError> {
        self.set_header(name, value)?;
        Ok(self)
    }

    /// Set a header in place, replacing any previous value
    pub fn set_header(&mut self, name: &str, value: &str) -> Result<(), GatewayError> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| GatewayError::Interceptor(format!("invalid header name {name:?}: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| GatewayError::Interceptor(format!("invalid value for header {name}: {e}")))?;
        self.headers.insert(name, value);
        Ok(())
    }

    /// Header value as text, if present and printable
    pub fn header_str(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Resolve the target URL against `base_url`
    pub fn url(&self, base_url: &str) -> String {
        if self.path.starts_with("http://") || self.path.starts_with("https://") {
            return self.path.clone();
        }
        if self.path.starts_with('/') {
            format!("{base_url}{}", self.path)
        } else {
            format!("{base_url}/{}", self.path)
        }
    }
}
