//! delete command - Delete an object
//!
//! The gateway's status code is not checked: any response counts as deleted.

use anyhow::Context;
use clap::Args;
use s3p_core::{Gateway, HttpTransport, ObjectRef};

use crate::exit_code::ExitCode;
use crate::output::Formatter;

/// Delete an object
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Bucket name
    #[arg(long)]
    pub bucket: String,

    /// Object key
    #[arg(long)]
    pub key: String,
}

/// Execute the delete command
pub async fn execute<T: HttpTransport>(
    args: DeleteArgs,
    gateway: &Gateway<T>,
    formatter: &Formatter,
) -> ExitCode {
    let object = ObjectRef::new(args.bucket, args.key);

    match remove(&object, gateway).await {
        Ok(()) => formatter.success(&format!("Object deleted successfully: {object}")),
        Err(e) => formatter.error(&format!("{e:#}")),
    }

    ExitCode::Success
}

async fn remove<T: HttpTransport>(object: &ObjectRef, gateway: &Gateway<T>) -> anyhow::Result<()> {
    gateway
        .delete_object(object)
        .await
        .with_context(|| format!("Error deleting {object}"))
}
