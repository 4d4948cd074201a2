//! drive_sync - Export Google Docs and Slides from a Drive folder to plain text.
//!
//! This library provides functionality to:
//! - List the immediate children of a Drive folder (following pagination)
//! - Export native documents and presentations as `text/plain`
//! - Write each export to `<slug>__<id>.txt` in a local directory
//!
//! # Example
//!
//! ```no_run
//! use drive_sync::{Authenticator, DriveClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let auth = Authenticator::from_file("service-account.json")?;
//!     let client = DriveClient::new(auth);
//!
//!     let report = drive_sync::sync_folder(&client, "folder-id", "out".as_ref()).await?;
//!     println!("{} file(s) exported", report.exported.len());
//!
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod slug;
pub mod sync;

// Re-exports for convenience
pub use auth::{Authenticator, StaticToken, TokenSource};
pub use client::DriveClient;
pub use config::{CredentialSource, SyncConfig};
pub use error::{DriveError, Result};
pub use models::{ExportKind, RemoteEntry};
pub use slug::{export_file_name, slugify};
pub use sync::{prepare, run, sync_folder, write_stream, SyncReport};
