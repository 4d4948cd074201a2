//! Run configuration: which folder, where to write, which credentials.

use std::path::{Path, PathBuf};

use crate::client::DRIVE_API_BASE;

/// Folder synced when none is given.
pub const DEFAULT_FOLDER_ID: &str = "1Q6Em3cwKw5BV4cgz1VkTqJA4K7cgIM8l";

/// Credential file name, relative to the base directory.
pub const CREDENTIALS_FILE_NAME: &str = "service-account.json";

/// Where service account credentials come from.
///
/// `Debug` and `Display` never print the inline key.
#[derive(Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// Path to a service account JSON key file.
    File(PathBuf),
    /// Raw or base64-encoded JSON key.
    Inline(String),
}

impl std::fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialSource::File(path) => write!(f, "{}", path.display()),
            CredentialSource::Inline(_) => f.write_str("inline GOOGLE_APPLICATION_CREDENTIALS_JSON"),
        }
    }
}

impl std::fmt::Debug for CredentialSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialSource::File(path) => f.debug_tuple("File").field(path).finish(),
            CredentialSource::Inline(_) => f.debug_tuple("Inline").field(&"<redacted>").finish(),
        }
    }
}

/// Everything a sync run needs.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub folder_id: String,
    pub output_dir: PathBuf,
    pub credentials: CredentialSource,
    pub api_base: String,
}

impl SyncConfig {
    /// Default layout under a base directory:
    /// `<base>/knowledge/_drive` for output and `<base>/service-account.json`
    /// for credentials.
    pub fn for_base_dir<P: AsRef<Path>>(base: P) -> Self {
        let base = base.as_ref();
        Self {
            folder_id: DEFAULT_FOLDER_ID.to_string(),
            output_dir: default_output_dir(base),
            credentials: CredentialSource::File(base.join(CREDENTIALS_FILE_NAME)),
            api_base: DRIVE_API_BASE.to_string(),
        }
    }

    pub fn with_folder_id(mut self, folder_id: impl Into<String>) -> Self {
        self.folder_id = folder_id.into();
        self
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_credentials(mut self, credentials: CredentialSource) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }
}

fn default_output_dir(base: &Path) -> PathBuf {
    base.join("knowledge").join("_drive")
}
