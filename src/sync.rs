//! Folder-to-disk export loop.

use std::path::{Path, PathBuf};
use std::pin::pin;

use bytes::Bytes;
use futures::{Stream, StreamExt};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::auth::{Authenticator, TokenSource};
use crate::client::DriveClient;
use crate::config::{CredentialSource, SyncConfig};
use crate::error::{DriveError, Result};
use crate::slug::export_file_name;

/// Outcome of one sync pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// Files written, in listing order.
    pub exported: Vec<PathBuf>,
    /// Entries skipped because their type has no text export.
    pub skipped: usize,
}

/// Create the output directory and check that credentials are available.
///
/// Runs before any network call; a missing credential file is reported as
/// [`DriveError::MissingCredentials`].
pub fn prepare(config: &SyncConfig) -> Result<()> {
    std::fs::create_dir_all(&config.output_dir)?;

    if let CredentialSource::File(path) = &config.credentials {
        if !path.exists() {
            return Err(DriveError::MissingCredentials(path.clone()));
        }
    }

    Ok(())
}

/// Build an authenticator from the configured credential source.
pub fn load_authenticator(credentials: &CredentialSource) -> Result<Authenticator> {
    match credentials {
        CredentialSource::File(path) => Authenticator::from_file(path),
        CredentialSource::Inline(raw) => Authenticator::from_json(raw),
    }
}

/// Write a chunk stream to `path`, truncating any existing file.
///
/// Returns the number of bytes written. If a chunk fails, the bytes written so
/// far stay on disk.
pub async fn write_stream<S>(path: &Path, stream: S) -> Result<u64>
where
    S: Stream<Item = Result<Bytes>>,
{
    let mut file = File::create(path).await?;
    let mut stream = pin!(stream);
    let mut written = 0u64;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }

    file.flush().await?;

    Ok(written)
}

/// List `folder_id` and export each document or presentation into `output_dir`.
///
/// Other entry types are skipped. The first failing entry aborts the pass.
pub async fn sync_folder<T: TokenSource>(
    client: &DriveClient<T>,
    folder_id: &str,
    output_dir: &Path,
) -> Result<SyncReport> {
    let entries = client.list_folder(folder_id).await?;
    info!(folder_id, count = entries.len(), "listed folder");

    let mut report = SyncReport::default();

    for entry in &entries {
        let Some(kind) = entry.export_kind() else {
            debug!(
                id = %entry.id,
                name = %entry.name,
                mime_type = entry.mime_type.as_deref().unwrap_or("-"),
                "skipping entry without text export"
            );
            report.skipped += 1;
            continue;
        };

        let path = output_dir.join(export_file_name(entry));
        debug!(
            id = %entry.id,
            ?kind,
            modified_time = ?entry.modified_time,
            path = %path.display(),
            "exporting"
        );

        let stream = client.export(&entry.id, kind.export_mime_type()).await?;
        let bytes = write_stream(&path, stream).await?;
        info!(id = %entry.id, bytes, path = %path.display(), "exported");

        report.exported.push(path);
    }

    Ok(report)
}

/// Run a full sync: preconditions, authentication, listing and export.
pub async fn run(config: &SyncConfig) -> Result<SyncReport> {
    prepare(config)?;

    let auth = load_authenticator(&config.credentials)?;
    let client = DriveClient::with_base_url(auth, config.api_base.clone());

    sync_folder(&client, &config.folder_id, &config.output_dir).await
}
