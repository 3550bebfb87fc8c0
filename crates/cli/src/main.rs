//! cos-upload - CI artifact publisher
//!
//! Uploads a build artifact to Tencent COS and publishes a presigned
//! download URL for later pipeline steps.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cos_upload::commands::{self, Cli};
use cos_upload::exit_code::ExitCode;

/// Filter applied by `--debug`
const DEBUG_FILTER: &str = "cos_upload=debug,cos_upload_core=debug,cos_upload_s3=debug";

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version go to stdout and are not failures
            let code = if e.use_stderr() {
                ExitCode::Failure
            } else {
                ExitCode::Success
            };
            let _ = e.print();
            std::process::exit(code.as_i32());
        }
    };

    // Logs share stderr with diagnostics; stdout carries only the URL
    let filter = if cli.debug {
        EnvFilter::new(DEBUG_FILTER)
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
