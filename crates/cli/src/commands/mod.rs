//! CLI command definitions and execution
//!
//! One subcommand per gateway operation. Flags are accepted in both the
//! `--bucket` and the single-dash `-bucket` spelling.

use std::ffi::OsString;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use s3p_core::{ConfigLoader, Gateway, HttpTransport};
use s3p_http::ReqwestTransport;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

pub mod delete;
pub mod get;
pub mod list;
pub mod put;

#[cfg(test)]
pub(crate) mod testing;

const AFTER_HELP: &str = "\
Environment:
  S3_PROXY_API_KEY  API key sent in the x-api-key header
  API_URL           Base URL of the API gateway
  S3P_CONFIG_DIR    Directory holding config.toml (optional)

Both values may also be set in a local .env file or in config.toml.

Examples:
  s3p list
  s3p get -bucket my-bucket -key my-object -file output.txt -presigned
  s3p put -bucket my-bucket -key my-object -file input.txt -presigned
  s3p delete -bucket my-bucket -key my-object";

/// Long flags that may also be written with a single dash
const SINGLE_DASH_FLAGS: &[&str] = &[
    "bucket",
    "key",
    "file",
    "presigned",
    "help",
    "version",
    "quiet",
    "no-color",
    "debug",
];

/// s3p - object storage through an API gateway
///
/// Lists buckets and gets, puts or deletes objects through an HTTP API
/// gateway, optionally transferring data through presigned URLs.
#[derive(Parser, Debug)]
#[command(name = "s3p")]
#[command(author, version, about, long_about = None, after_help = AFTER_HELP)]
#[command(propagate_version = true, arg_required_else_help = true)]
pub struct Cli {
    /// Suppress success messages
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, default_value = "false")]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true, default_value = "false")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List buckets
    List,

    /// Download an object to a local file
    Get(get::GetArgs),

    /// Upload a local file as an object
    Put(put::PutArgs),

    /// Delete an object
    Delete(delete::DeleteArgs),
}

/// Result of parsing the command line
#[derive(Debug)]
pub enum Parsed {
    /// Run the parsed command
    Run(Cli),
    /// Nothing to run; exit with this code
    Exit(ExitCode),
}

/// Parse command-line arguments, printing help or errors as needed
pub fn parse_args<I, T>(args: I) -> Parsed
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    match Cli::try_parse_from(normalize_args(args)) {
        Ok(cli) => Parsed::Run(cli),
        Err(err) => Parsed::Exit(report_parse_error(&err)),
    }
}

/// Rewrite `-bucket` / `-bucket=NAME` style flags to their `--` form
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            let normalized = arg.to_str().and_then(normalize_flag);
            normalized.map(OsString::from).unwrap_or(arg)
        })
        .collect()
}

fn normalize_flag(arg: &str) -> Option<String> {
    let flag = arg.strip_prefix('-')?;
    if flag.starts_with('-') {
        return None;
    }

    let name = flag.split_once('=').map_or(flag, |(name, _)| name);
    SINGLE_DASH_FLAGS.contains(&name).then(|| format!("-{arg}"))
}

/// Map a clap error to an exit code: an unknown operation shows help and
/// succeeds, a missing operation shows help and fails.
fn report_parse_error(err: &clap::Error) -> ExitCode {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = err.print();
            ExitCode::Success
        }
        ErrorKind::InvalidSubcommand => {
            print_help();
            ExitCode::Success
        }
        _ => {
            let _ = err.print();
            ExitCode::Failure
        }
    }
}

fn print_help() {
    let _ = Cli::command().print_help();
    println!();
}

/// Execute the CLI command and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    let formatter = Formatter::new(OutputConfig {
        no_color: cli.no_color,
        quiet: cli.quiet,
    });

    let credentials = match ConfigLoader::new().load() {
        Ok(c) => c,
        Err(e) => {
            formatter.fatal(&e.to_string());
            return ExitCode::Failure;
        }
    };

    let transport = match ReqwestTransport::new() {
        Ok(t) => t,
        Err(e) => {
            formatter.fatal(&format!("Failed to create HTTP client: {e}"));
            return ExitCode::Failure;
        }
    };

    let gateway = Gateway::new(transport, credentials);
    dispatch(cli.command, &gateway, &formatter).await
}

/// Route a parsed command to its handler
pub async fn dispatch<T: HttpTransport>(
    command: Commands,
    gateway: &Gateway<T>,
    formatter: &Formatter,
) -> ExitCode {
    tracing::debug!(?command, "dispatching");

    match command {
        Commands::List => list::execute(gateway, formatter).await,
        Commands::Get(args) => get::execute(args, gateway, formatter).await,
        Commands::Put(args) => put::execute(args, gateway, formatter).await,
        Commands::Delete(args) => delete::execute(args, gateway, formatter).await,
    }
}
