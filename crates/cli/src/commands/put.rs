//! put command - Upload an object
//!
//! Reads the whole local file into memory and uploads it, either through the
//! gateway or to a presigned URL.

use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Args};
use s3p_core::{Gateway, HttpTransport, ObjectRef, TransferMode};

use crate::exit_code::ExitCode;
use crate::output::Formatter;

/// Upload a local file as an object
#[derive(Args, Debug)]
pub struct PutArgs {
    /// Bucket name
    #[arg(long)]
    pub bucket: String,

    /// Object key
    #[arg(long)]
    pub key: String,

    /// File to upload
    #[arg(long)]
    pub file: PathBuf,

    /// Upload through a presigned URL
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

/// Execute the put command
pub async fn execute<T: HttpTransport>(
    args: PutArgs,
    gateway: &Gateway<T>,
    formatter: &Formatter,
) -> ExitCode {
    match upload(&args, gateway).await {
        Ok(size) => formatter.success(&format!(
            "File uploaded successfully: {} ({})",
            ObjectRef::new(&args.bucket, &args.key),
            humansize::format_size(size as u64, humansize::BINARY)
        )),
        Err(e) => formatter.error(&format!("{e:#}")),
    }

    ExitCode::Success
}

async fn upload<T: HttpTransport>(args: &PutArgs, gateway: &Gateway<T>) -> anyhow::Result<usize> {
    let data = tokio::fs::read(&args.file)
        .await
        .with_context(|| format!("Error reading file {}", args.file.display()))?;
    let size = data.len();

    let object = ObjectRef::new(&args.bucket, &args.key);
    let mode = TransferMode::from_flag(args.presigned);

    gateway
        .put_object(&object, data, mode)
        .await
        .with_context(|| format!("Error uploading {object}"))?;

    tracing::debug!(%object, ?mode, bytes = size, "object uploaded");
    Ok(size)
}
