//! Data cleaning upload
//!
//! The backend relays the cleaning service's reply as a string, so the
//! result often arrives JSON-encoded twice; the gateway's body
//! normalization takes care of that.

use reqwest::multipart::{Form, Part};
use serde_json::Value;

use super::{Gateway, GatewayError, RequestConfig};
use crate::types::Upload;

impl Gateway {
    /// Upload a spreadsheet for cleaning into a new project
    ///
    /// `options` is the list of cleaning steps to apply; an empty list uses
    /// the service defaults. Resolves to the cleaning report.
    pub async fn upload_for_cleaning(
        &self,
        upload: Upload,
        project_name: &str,
        options: &[String],
    ) -> Result<Value, GatewayError> {
        let uuid = self.current_uuid()?;
        let form = Form::new()
            .part("file", Part::bytes(upload.bytes).file_name(upload.file_name))
            .text("project_name", project_name.to_string())
            .text("options", serde_json::to_string(options)?)
            .text("user_uuid", uuid);
        self.send(RequestConfig::post("/clean/upload").multipart(form))
            .await
    }
}
