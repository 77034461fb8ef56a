//! Response payload handling
//!
//! The backend answers either with a JSON document or with a JSON document
//! encoded as a JSON string (some endpoints forward another service's reply
//! verbatim). Bodies therefore start out as [`ResponseBody::Raw`] or
//! [`ResponseBody::Structured`] and are normalized to `Structured`.

use serde_json::Value;

use super::GatewayError;

/// Response payload before and after normalization
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// Text that still has to be parsed
    Raw(String),
    /// Parsed payload
    Structured(Value),
}

impl ResponseBody {
    /// Decode the bytes returned by the transport
    ///
    /// Bodies are parsed once here whatever their content type. Text that
    /// does not parse, and JSON that decodes to a string, stay `Raw`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, GatewayError> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| GatewayError::MalformedResponse(format!("body is not UTF-8: {e}")))?;

        if text.is_empty() {
            return Ok(Self::Raw(String::new()));
        }

        Ok(match serde_json::from_str::<Value>(text) {
            Ok(Value::String(inner)) => Self::Raw(inner),
            Ok(value) => Self::Structured(value),
            Err(_) => Self::Raw(text.to_string()),
        })
    }

    /// Parse a `Raw` body
    ///
    /// An empty string is passed through as the JSON string `""` instead of
    /// being parsed.
    pub fn normalize(self) -> Result<Self, GatewayError> {
        self.into_value().map(Self::Structured)
    }

    /// Normalize and unwrap
    pub fn into_value(self) -> Result<Value, GatewayError> {
        match self {
            Self::Structured(value) => Ok(value),
            Self::Raw(text) if text.is_empty() => Ok(Value::String(text)),
            Self::Raw(text) => serde_json::from_str(&text)
                .map_err(|e| GatewayError::MalformedResponse(e.to_string())),
        }
    }

    /// The envelope `code` field, when it is a string
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Structured(value) => value.get("code").and_then(Value::as_str),
            Self::Raw(_) => None,
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, Self::Structured(_))
    }
}
