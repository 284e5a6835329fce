//! get command - Download an object
//!
//! Writes the object's content to a local file, either straight from the
//! gateway or through a presigned URL.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{ArgAction, Args};
use s3p_core::{Gateway, HttpTransport, ObjectRef, TransferMode};

use crate::exit_code::ExitCode;
use crate::output::Formatter;

/// Download an object to a local file
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Bucket name
    #[arg(long)]
    pub bucket: String,

    /// Object key
    #[arg(long)]
    pub key: String,

    /// Destination file (defaults to the object key)
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Download through a presigned URL
    #[arg(
        long,
        num_args = 0..=1,
        require_equals = true,
        default_value = "false",
        default_missing_value = "true",
        action = ArgAction::Set
    )]
    pub presigned: bool,
}

impl GetArgs {
    fn destination(&self) -> PathBuf {
        self.file
            .clone()
            .unwrap_or_else(|| PathBuf::from(&self.key))
    }
}

/// Execute the get command
pub async fn execute<T: HttpTransport>(
    args: GetArgs,
    gateway: &Gateway<T>,
    formatter: &Formatter,
) -> ExitCode {
    let destination = args.destination();

    match download(&args, &destination, gateway).await {
        Ok(size) => formatter.success(&format!(
            "File downloaded successfully: {} ({})",
            destination.display(),
            humansize::format_size(size as u64, humansize::BINARY)
        )),
        Err(e) => formatter.error(&format!("{e:#}")),
    }

    ExitCode::Success
}

async fn download<T: HttpTransport>(
    args: &GetArgs,
    destination: &Path,
    gateway: &Gateway<T>,
) -> anyhow::Result<usize> {
    let object = ObjectRef::new(&args.bucket, &args.key);
    let mode = TransferMode::from_flag(args.presigned);

    let data = gateway
        .get_object(&object, mode)
        .await
        .with_context(|| format!("Error downloading {object}"))?;

    tokio::fs::write(destination, &data)
        .await
        .with_context(|| format!("Error writing file {}", destination.display()))?;

    tracing::debug!(%object, ?mode, bytes = data.len(), "object downloaded");
    Ok(data.len())
}
