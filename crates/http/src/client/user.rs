//! User account client methods

use reqwest::multipart::{Form, Part};
use sentiscope_core::{Credential, Session};
use tracing::info;

use super::{Envelope, Gateway, GatewayError, RequestConfig};
use crate::types::{LoginData, LoginRequest, Upload, UserInfo};

impl Gateway {
    /// Log in and persist the returned credential
    ///
    /// The session is only written when the envelope reports success. The
    /// backend issues a single session id; it doubles as the token unless a
    /// separate `token` is returned.
    pub async fn login(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<Envelope<LoginData>, GatewayError> {
        let request = RequestConfig::post("/user/login").json(&LoginRequest {
            username: username.to_string(),
            password_hash: password_hash.to_string(),
        })?;
        let envelope: Envelope<LoginData> = self.call(request).await?;

        if envelope.is_success()
            && let Some(data) = &envelope.data
        {
            let credential = Credential {
                token: data.token.clone().unwrap_or_else(|| data.uuid.clone()),
                uuid: data.uuid.clone(),
            };
            self.session().store_credential(&credential)?;
            info!(username = %data.username, "Logged in");
        }

        Ok(envelope)
    }

    /// Create an account
    pub async fn register(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<Envelope<String>, GatewayError> {
        let request = RequestConfig::post("/user/register").json(&LoginRequest {
            username: username.to_string(),
            password_hash: password_hash.to_string(),
        })?;
        self.call(request).await
    }

    /// Forget the stored credential; no backend call is made
    pub fn logout(&self) -> Result<(), GatewayError> {
        self.session().clear()?;
        info!("Logged out");
        Ok(())
    }

    /// Profile of the user with session id `uuid`
    pub async fn user_info(&self, uuid: &str) -> Result<Envelope<UserInfo>, GatewayError> {
        self.call(RequestConfig::get(format!("/user/info/{uuid}")))
            .await
    }

    /// Replace the current user's avatar; resolves to the new avatar URL
    pub async fn upload_avatar(&self, upload: Upload) -> Result<Envelope<String>, GatewayError> {
        let uuid = self.current_uuid()?;
        let form = Form::new()
            .part("file", Part::bytes(upload.bytes).file_name(upload.file_name))
            .text(Session::UUID_KEY, uuid);
        self.call(RequestConfig::post("/user/upload-avatar").multipart(form))
            .await
    }

    pub(crate) fn current_uuid(&self) -> Result<String, GatewayError> {
        self.session().uuid().ok_or(GatewayError::NotLoggedIn)
    }
}
