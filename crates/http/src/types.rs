//! Payload types exchanged with the backend

use serde::{Deserialize, Serialize};

/// Credentials posted to `/user/login` and `/user/register`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password_hash: String,
}

/// `data` of a successful login
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    pub username: String,
    pub role: Option<String>,
    pub uuid: String,
    /// Bearer token, when the backend issues one separately from the uuid
    #[serde(default)]
    pub token: Option<String>,
}

/// `data` of `/user/info/{uuid}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub uuid: String,
    pub username: String,
    pub role: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: Option<String>,
    pub last_login: Option<String>,
}

/// An analysis project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub pid: String,
    pub project_name: Option<String>,
    pub clean_type: Option<String>,
    pub create_time: Option<String>,
    pub update_time: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    /// `init`, `running`, `success` or `fail`
    pub status: Option<String>,
    pub uuid: Option<String>,
}

/// Page of results as produced by the backend pager
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub page_num: u32,
    #[serde(default)]
    pub page_size: u32,
    #[serde(default = "Vec::new")]
    pub list: Vec<T>,
}

/// Project listing filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectQuery {
    pub page_num: u32,
    pub page_size: u32,
    pub status: Option<String>,
}

impl Default for ProjectQuery {
    fn default() -> Self {
        Self {
            page_num: 1,
            page_size: 10,
            status: None,
        }
    }
}

/// Entry of a user's sentiment dictionary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentWord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub word: String,
    /// `positive`, `negative` or `neutral`
    pub sentiment: String,
    pub weight: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<String>,
}

/// A file to upload
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }
}
