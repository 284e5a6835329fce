//! list command - List buckets
//!
//! Prints the gateway's bucket listing exactly as received.

use anyhow::Context;
use s3p_core::{Gateway, HttpTransport};

use crate::exit_code::ExitCode;
use crate::output::Formatter;

/// Execute the list command
pub async fn execute<T: HttpTransport>(gateway: &Gateway<T>, formatter: &Formatter) -> ExitCode {
    match fetch(gateway).await {
        Ok(body) => {
            if let Err(e) = formatter.raw(&body) {
                formatter.error(&format!("Failed to write to stdout: {e}"));
            }
        }
        Err(e) => formatter.error(&format!("{e:#}")),
    }

    ExitCode::Success
}

async fn fetch<T: HttpTransport>(gateway: &Gateway<T>) -> anyhow::Result<Vec<u8>> {
    gateway
        .list_buckets()
        .await
        .context("Error listing buckets")
}
