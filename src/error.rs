//! Error types for the drive_sync crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while syncing a Drive folder.
#[derive(Error, Debug)]
pub enum DriveError {
    #[error(
        "Thiếu file credentials: {}.\n\
         Tạo service account, tải file JSON và đặt vào đường dẫn trên,\n\
         sau đó share folder Drive cho email của service account.\n\
         Missing credentials file: {}.\n\
         Create a service account, download its JSON key to that path,\n\
         then share the Drive folder with the service account's email.",
        .0.display(),
        .0.display()
    )]
    MissingCredentials(PathBuf),

    #[error("Failed to read credentials file {}: {source}", .path.display())]
    CredentialsFileError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse credentials JSON: {0}")]
    CredentialsParseError(#[from] serde_json::Error),

    #[error("Invalid inline credentials: {0}")]
    InvalidCredentials(String),

    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    #[error("Token refresh failed: {0}")]
    TokenRefreshError(String),

    #[error("JWT encoding error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DriveError {
    /// True for failures detected before any network call is made.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            DriveError::MissingCredentials(_)
                | DriveError::CredentialsFileError { .. }
                | DriveError::CredentialsParseError(_)
                | DriveError::InvalidCredentials(_)
        )
    }
}

/// Result type alias for DriveError.
pub type Result<T> = std::result::Result<T, DriveError>;
