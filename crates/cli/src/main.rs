//! s3p - object storage through an API gateway
//!
//! A command-line client that lists buckets and gets, puts or deletes objects
//! through an HTTP API gateway, optionally using presigned URLs.

use s3proxy_cli::commands::{self, Parsed};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = match commands::parse_args(std::env::args_os()) {
        Parsed::Run(cli) => cli,
        Parsed::Exit(code) => std::process::exit(code.as_i32()),
    };

    // Initialize tracing subscriber for logging
    let filter = if cli.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let exit_code = commands::execute(cli).await;

    std::process::exit(exit_code.as_i32());
}
