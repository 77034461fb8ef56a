//! Backend response envelope

use serde::{Deserialize, Serialize};

use super::GatewayError;
use super::interceptor::SESSION_EXPIRED_CODE;

/// Envelope code for a successful call
pub const SUCCESS_CODE: &str = "0";

/// `{ code, msg, data }` wrapper returned by every backend endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub code: String,
    pub msg: Option<String>,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    pub fn is_session_expired(&self) -> bool {
        self.code == SESSION_EXPIRED_CODE
    }

    /// Payload of a successful envelope
    ///
    /// A success without `data` is reported as `Ok(None)`.
    pub fn into_result(self) -> Result<Option<T>, GatewayError> {
        if self.is_success() {
            Ok(self.data)
        } else {
            Err(GatewayError::Rejected {
                message: self.msg.unwrap_or_default(),
                code: self.code,
            })
        }
    }

    /// Payload of a successful envelope that must carry `data`
    pub fn into_data(self) -> Result<T, GatewayError> {
        let code = self.code.clone();
        self.into_result()?.ok_or_else(|| GatewayError::Rejected {
            code,
            message: "response carried no data".to_string(),
        })
    }
}
