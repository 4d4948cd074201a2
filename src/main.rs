//! drive_sync CLI - Export a Drive folder's documents to local text files.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use drive_sync::sync::{load_authenticator, prepare, run};
use drive_sync::{export_file_name, Authenticator, CredentialSource, DriveClient, SyncConfig};

/// Export Google Docs and Slides from a Drive folder to plain-text files.
#[derive(Parser)]
#[command(name = "drive_sync")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base directory holding service-account.json and the knowledge/_drive output.
    #[arg(long, env = "DRIVE_SYNC_BASE_DIR", default_value = ".")]
    base_dir: PathBuf,

    /// Drive folder ID to sync.
    #[arg(long, env = "DRIVE_FOLDER_ID")]
    folder_id: Option<String>,

    /// Output directory (defaults to <base-dir>/knowledge/_drive).
    #[arg(long, short = 'o')]
    output_dir: Option<PathBuf>,

    /// Path to service account JSON credentials file.
    #[arg(long, env = "GOOGLE_APPLICATION_CREDENTIALS")]
    credentials: Option<PathBuf>,

    /// Inline service account JSON (raw or base64). Takes precedence over --credentials.
    #[arg(long, env = "GOOGLE_APPLICATION_CREDENTIALS_JSON", hide_env_values = true)]
    credentials_json: Option<String>,

    /// List the folder and show what would be exported without writing files.
    #[arg(long)]
    dry_run: bool,

    /// Enable debug logging (RUST_LOG overrides).
    #[arg(long, short = 'v')]
    verbose: bool,
}

impl Cli {
    fn sync_config(&self) -> SyncConfig {
        let mut config = SyncConfig::for_base_dir(&self.base_dir);

        if let Some(folder_id) = &self.folder_id {
            config = config.with_folder_id(folder_id.clone());
        }
        if let Some(output_dir) = &self.output_dir {
            config = config.with_output_dir(output_dir.clone());
        }
        if let Some(raw) = &self.credentials_json {
            config = config.with_credentials(CredentialSource::Inline(raw.clone()));
        } else if let Some(path) = &self.credentials {
            config = config.with_credentials(CredentialSource::File(path.clone()));
        }

        config
    }
}

/// Default log filter when `RUST_LOG` is unset.
fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "info,drive_sync=debug"
    } else {
        "info"
    }
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Load the configured credentials; the error names the source, never its content.
fn authenticate(config: &SyncConfig) -> Result<Authenticator> {
    load_authenticator(&config.credentials)
        .with_context(|| format!("Failed to load credentials from {}", config.credentials))
}

async fn dry_run(config: &SyncConfig) -> Result<()> {
    // Fails before any network call when the credential file is absent.
    prepare(config)?;

    let client = DriveClient::with_base_url(authenticate(config)?, config.api_base.clone());
    let entries = client
        .list_folder(&config.folder_id)
        .await
        .with_context(|| format!("Failed to list folder: {}", config.folder_id))?;

    if entries.is_empty() {
        println!("No files found.");
        return Ok(());
    }

    for entry in entries {
        match entry.export_kind() {
            Some(_) => println!("{}\t-> {}", entry, export_file_name(&entry)),
            None => println!("{}\t(skipped)", entry),
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.sync_config();

    if cli.dry_run {
        return dry_run(&config).await;
    }

    let report = run(&config)
        .await
        .with_context(|| format!("Failed to sync folder: {}", config.folder_id))?;

    tracing::info!(
        exported = report.exported.len(),
        skipped = report.skipped,
        "sync finished"
    );
    println!("Đã đồng bộ xong (sync complete). Output: {}", config.output_dir.display());

    Ok(())
}
