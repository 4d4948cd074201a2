//! Data models for Google Drive API responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Native Google Docs MIME type.
pub const MIME_DOCUMENT: &str = "application/vnd.google-apps.document";

/// Native Google Slides MIME type.
pub const MIME_PRESENTATION: &str = "application/vnd.google-apps.presentation";

/// MIME type requested from the export endpoint.
pub const EXPORT_MIME_TEXT: &str = "text/plain";

/// A child entry of the synced folder, as returned by files.list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteEntry {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub modified_time: Option<DateTime<Utc>>,
}

impl RemoteEntry {
    /// Name used for slugging; empty names fall back to "untitled".
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "untitled"
        } else {
            &self.name
        }
    }

    /// Export format for this entry, or `None` when it is skipped.
    pub fn export_kind(&self) -> Option<ExportKind> {
        self.mime_type.as_deref().and_then(ExportKind::from_mime_type)
    }
}

impl std::fmt::Display for RemoteEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mime = self.mime_type.as_deref().unwrap_or("-");
        let modified = self
            .modified_time
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        write!(f, "{}\t{}\t{}\t{}", self.id, mime, modified, self.display_name())
    }
}

/// Native formats that can be exported as plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Document,
    Presentation,
}

impl ExportKind {
    pub fn from_mime_type(mime_type: &str) -> Option<Self> {
        match mime_type {
            MIME_DOCUMENT => Some(ExportKind::Document),
            MIME_PRESENTATION => Some(ExportKind::Presentation),
            _ => None,
        }
    }

    /// MIME type to request from the export endpoint.
    pub fn export_mime_type(self) -> &'static str {
        match self {
            ExportKind::Document | ExportKind::Presentation => EXPORT_MIME_TEXT,
        }
    }
}

/// Response from the files.list API endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileListResponse {
    #[serde(default)]
    pub files: Vec<RemoteEntry>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// Google API error response.
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    pub code: u16,
    pub message: String,
}

/// Service account credentials from JSON file.
#[derive(Debug, Deserialize)]
pub struct ServiceAccountCredentials {
    pub client_email: String,
    pub private_key: String,
    pub token_uri: Option<String>,
}

/// OAuth2 token response.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}
