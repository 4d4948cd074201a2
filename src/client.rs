//! Google Drive API client for folder listing and text export.

use bytes::Bytes;
use futures::{Stream, TryStreamExt};
use reqwest::{Client, Response};
use tracing::debug;

use crate::auth::TokenSource;
use crate::error::{DriveError, Result};
use crate::models::{ApiErrorResponse, FileListResponse, RemoteEntry};

/// Base URL for Google Drive API v3.
pub const DRIVE_API_BASE: &str = "https://www.googleapis.com/drive/v3";

/// Fields requested for each listing page.
const LIST_FIELDS: &str = "nextPageToken, files(id, name, mimeType, modifiedTime)";

/// Entries requested per listing page.
const PAGE_SIZE: &str = "100";

/// Client for listing a Drive folder and exporting its documents.
pub struct DriveClient<T> {
    tokens: T,
    http: Client,
    base_url: String,
}

impl<T: TokenSource> DriveClient<T> {
    /// Create a client against the public Drive v3 API.
    pub fn new(tokens: T) -> Self {
        Self::with_base_url(tokens, DRIVE_API_BASE)
    }

    /// Create a client against a custom API base URL.
    pub fn with_base_url(tokens: T, base_url: impl Into<String>) -> Self {
        Self {
            tokens,
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List every non-trashed entry directly inside a folder.
    ///
    /// Follows `nextPageToken` until the API stops returning one; entries are
    /// returned in page order.
    pub async fn list_folder(&self, folder_id: &str) -> Result<Vec<RemoteEntry>> {
        let query = format!("'{}' in parents and trashed = false", folder_id);
        let token = self.tokens.access_token().await?;
        let mut all_entries = Vec::new();
        let mut page_token: Option<String> = None;
        let mut page = 0usize;

        loop {
            let mut request = self
                .http
                .get(format!("{}/files", self.base_url))
                .bearer_auth(&token)
                .query(&[
                    ("q", query.as_str()),
                    ("fields", LIST_FIELDS),
                    ("pageSize", PAGE_SIZE),
                ]);

            if let Some(ref token) = page_token {
                request = request.query(&[("pageToken", token)]);
            }

            let response = check_status(request.send().await?).await?;
            let list_response: FileListResponse = response.json().await?;

            page += 1;
            debug!(folder_id, page, count = list_response.files.len(), "listed page");
            all_entries.extend(list_response.files);

            match list_response.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        Ok(all_entries)
    }

    /// Export a native Google file and return its content as a chunk stream.
    ///
    /// HTTP errors are reported before the stream is returned; transport
    /// failures mid-transfer surface as stream items.
    pub async fn export(
        &self,
        file_id: &str,
        mime_type: &str,
    ) -> Result<impl Stream<Item = Result<Bytes>>> {
        let token = self.tokens.access_token().await?;

        let response = self
            .http
            .get(format!("{}/files/{}/export", self.base_url, file_id))
            .bearer_auth(&token)
            .query(&[("mimeType", mime_type)])
            .send()
            .await?;

        let response = check_status(response).await?;
        Ok(response.bytes_stream().map_err(DriveError::from))
    }
}

/// Turn a non-2xx response into an `ApiError`, preferring Google's error body.
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let error_body = response.text().await.unwrap_or_default();
    if let Ok(api_error) = serde_json::from_str::<ApiErrorResponse>(&error_body) {
        return Err(DriveError::ApiError {
            status: api_error.error.code,
            message: api_error.error.message,
        });
    }
    Err(DriveError::ApiError {
        status: status.as_u16(),
        message: error_body,
    })
}
